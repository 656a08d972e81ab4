// Copyright Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Attribution cannot be removed

use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use transit_timetable::config::{DEFAULT_API_ROOT, DEFAULT_UPSTREAM_TIMEOUT_MS, UpstreamConfig};
use transit_timetable::session_incidents::DEFAULT_HANDOFF_TTL;
use transit_timetable::{SessionIncidentStore, TimetableService, WmataClient};

mod routes;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// WMATA developer API key
    #[arg(long, env = "WMATA_API_KEY")]
    api_key: String,
    #[arg(long, env = "WMATA_API_ROOT", default_value = DEFAULT_API_ROOT)]
    api_root: String,
    /// Upper bound for every single upstream call
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS", default_value_t = DEFAULT_UPSTREAM_TIMEOUT_MS)]
    upstream_timeout_ms: u64,
    /// Seconds an incident handoff waits for the follow-up turn
    #[arg(long, env = "INCIDENT_TTL_SECS", default_value_t = DEFAULT_HANDOFF_TTL.as_secs())]
    incident_ttl_secs: u64,
    #[arg(short, long, env = "LINDEN_ADDRESS", default_value = "127.0.0.1")]
    address: String,
    #[arg(short, long, env = "LINDEN_PORT", default_value_t = 8080)]
    port: u16,
    #[arg(long, env = "LINDEN_LOG_LEVEL", default_value = "info")]
    log_level: tracing::Level,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = UpstreamConfig {
        api_root: args.api_root,
        api_key: args.api_key,
        timeout: Duration::from_millis(args.upstream_timeout_ms),
    };

    let client = WmataClient::new(config.clone())?;
    let service = Arc::new(TimetableService::new(
        client,
        Arc::new(SessionIncidentStore::with_ttl(Duration::from_secs(
            args.incident_ttl_secs,
        ))),
        config.timeout,
    ));

    tracing::info!(
        "linden listening on {}:{}, upstream {}",
        args.address,
        args.port,
        config.api_root
    );

    HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Server", "Catenary")),
            )
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(Arc::clone(&service)))
            .configure(routes::configure::<WmataClient>)
    })
    .bind((args.address, args.port))?
    .run()
    .await?;

    Ok(())
}
