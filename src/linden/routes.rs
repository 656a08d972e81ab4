// Copyright Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Attribution cannot be removed

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use transit_timetable::{SessionContext, TimetableService, TransitDataSource};
use uuid::Uuid;

pub const SESSION_HEADER: &str = "X-Session-Id";

#[derive(Serialize, Deserialize)]
pub struct TrainTimetableQuery {
    pub station: String,
    pub session: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct BusTimetableQuery {
    pub stop: String,
    pub session: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct NearbyStopsQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius: Option<u32>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionQuery {
    pub session: String,
}

#[derive(Serialize)]
struct NotFound {
    found: bool,
}

/// Registers every timetable route for a service backed by `S`.
pub fn configure<S: TransitDataSource + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/train_timetable/", web::get().to(train_timetable::<S>))
        .route("/bus_timetable/", web::get().to(bus_timetable::<S>))
        .route("/nearby_bus_stops/", web::get().to(nearby_bus_stops::<S>))
        .route("/incidents/", web::get().to(take_incidents::<S>))
        .route("/incidents/", web::delete().to(clear_incidents::<S>));
}

// Callers that do not track a session get a fresh one back in the response header.
fn session_or_new(session: &Option<String>) -> SessionContext {
    match session {
        Some(session_id) if !session_id.is_empty() => SessionContext::new(session_id.clone()),
        _ => SessionContext::new(Uuid::new_v4().to_string()),
    }
}

fn not_found(session: &SessionContext) -> HttpResponse {
    HttpResponse::NotFound()
        .append_header(("Cache-Control", "no-cache"))
        .append_header((SESSION_HEADER, session.session_id.clone()))
        .json(NotFound { found: false })
}

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Content-Type", "text/plain"))
        .body("linden: metro timetable lookups")
}

pub async fn train_timetable<S: TransitDataSource + 'static>(
    query: web::Query<TrainTimetableQuery>,
    service: web::Data<Arc<TimetableService<S>>>,
) -> impl Responder {
    let session = session_or_new(&query.session);

    match service.fetch_train_timetable(&query.station, &session).await {
        Some(timetable) => HttpResponse::Ok()
            .append_header(("Cache-Control", "no-cache"))
            .append_header((SESSION_HEADER, session.session_id.clone()))
            .json(timetable),
        None => not_found(&session),
    }
}

pub async fn bus_timetable<S: TransitDataSource + 'static>(
    query: web::Query<BusTimetableQuery>,
    service: web::Data<Arc<TimetableService<S>>>,
) -> impl Responder {
    let session = session_or_new(&query.session);

    match service.fetch_bus_timetable(&query.stop, &session).await {
        Some(timetable) => HttpResponse::Ok()
            .append_header(("Cache-Control", "no-cache"))
            .append_header((SESSION_HEADER, session.session_id.clone()))
            .json(timetable),
        None => not_found(&session),
    }
}

pub async fn nearby_bus_stops<S: TransitDataSource + 'static>(
    query: web::Query<NearbyStopsQuery>,
    service: web::Data<Arc<TimetableService<S>>>,
) -> impl Responder {
    let stops = service
        .nearby_bus_stops(query.lat, query.lon, query.radius)
        .await;

    HttpResponse::Ok()
        .append_header(("Cache-Control", "no-cache"))
        .json(stops)
}

/// The incident follow-up turn: returns what the last timetable lookup of this
/// session found, then forgets it.
pub async fn take_incidents<S: TransitDataSource + 'static>(
    query: web::Query<SessionQuery>,
    service: web::Data<Arc<TimetableService<S>>>,
) -> impl Responder {
    let session = SessionContext::new(query.session.clone());
    let handoff = service.incident_store().take_incidents(&session);

    if handoff.data.is_empty() {
        return not_found(&session);
    }

    HttpResponse::Ok()
        .append_header(("Cache-Control", "no-cache"))
        .json(handoff)
}

pub async fn clear_incidents<S: TransitDataSource + 'static>(
    query: web::Query<SessionQuery>,
    service: web::Data<Arc<TimetableService<S>>>,
) -> impl Responder {
    service
        .incident_store()
        .clear(&SessionContext::new(query.session.clone()));

    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use std::time::Duration;
    use transit_timetable::models::{
        BusStop, BusStopPredictions, IncidentMode, IncidentRecord, MergedTimetable,
        PredictionEntry, StationRecord,
    };
    use transit_timetable::{FetchError, IncidentHandoff, SessionIncidentStore};

    /// Answers from memory; `down` makes every call fail like an outage.
    #[derive(Default)]
    struct FixedSource {
        down: bool,
    }

    impl FixedSource {
        fn check(&self) -> Result<(), FetchError> {
            if self.down {
                return Err(FetchError::Timeout(Duration::from_secs(5)));
            }
            Ok(())
        }
    }

    impl TransitDataSource for FixedSource {
        async fn station_directory(&self) -> Result<Vec<StationRecord>, FetchError> {
            self.check()?;
            Ok(vec![StationRecord {
                code: "A01".to_string(),
                name: "Metro Center".to_string(),
                linked_platform_code: None,
                line_codes: [Some("RD".to_string()), None, None, None],
                lat: None,
                lon: None,
            }])
        }

        async fn rail_predictions(
            &self,
            _station_code: &str,
        ) -> Result<Vec<PredictionEntry>, FetchError> {
            self.check()?;
            Ok(vec![PredictionEntry {
                line: "RD".to_string(),
                destination: "Glenmont".to_string(),
                car: Some("8".to_string()),
                minutes_or_status: "4".to_string(),
            }])
        }

        async fn bus_predictions(
            &self,
            _stop_id: &str,
        ) -> Result<Option<BusStopPredictions>, FetchError> {
            self.check()?;
            Ok(None)
        }

        async fn incidents(&self, _mode: IncidentMode) -> Result<Vec<IncidentRecord>, FetchError> {
            self.check()?;
            Ok(vec![red_line_delay()])
        }

        async fn bus_stops_near(
            &self,
            _lat: f64,
            _lon: f64,
            _radius_metres: u32,
        ) -> Result<Vec<BusStop>, FetchError> {
            self.check()?;
            Ok(Vec::new())
        }
    }

    fn red_line_delay() -> IncidentRecord {
        IncidentRecord {
            incident_id: Some("1".to_string()),
            description: "Red Line: delays.".to_string(),
            incident_type: "Delay".to_string(),
            affected_codes: vec!["RD".to_string()],
            date_updated: None,
        }
    }

    fn service(source: FixedSource) -> Arc<TimetableService<FixedSource>> {
        Arc::new(TimetableService::new(
            source,
            Arc::new(SessionIncidentStore::new()),
            Duration::from_millis(200),
        ))
    }

    #[actix_web::test]
    async fn test_train_timetable_then_incident_follow_up() {
        let service = service(FixedSource::default());

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::clone(&service)))
                .configure(configure::<FixedSource>),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/train_timetable/?station=metro&session=user-a")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(SESSION_HEADER).unwrap().to_str().unwrap(),
            "user-a"
        );
        let timetable: MergedTimetable = test::read_body_json(resp).await;
        assert_eq!(timetable.station_name, "Metro Center");
        assert_eq!(timetable.incidents, vec![red_line_delay()]);

        let req = test::TestRequest::get()
            .uri("/incidents/?session=user-a")
            .to_request();
        let first: IncidentHandoff = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first.station.as_deref(), Some("Metro Center"));
        assert_eq!(first.data.len(), 1);

        // consumed by the first read
        let req = test::TestRequest::get()
            .uri("/incidents/?session=user-a")
            .to_request();
        let second = test::call_service(&app, req).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_clear_incidents() {
        let service = service(FixedSource::default());
        let session = SessionContext::new("user-b");
        service.incident_store().set_incidents(
            &session,
            IncidentHandoff {
                station: Some("Metro Center".to_string()),
                data: vec![red_line_delay()],
            },
        );

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::clone(&service)))
                .configure(configure::<FixedSource>),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/incidents/?session=user-b")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(service.incident_store().is_empty());
    }

    #[actix_web::test]
    async fn test_outage_reads_as_not_found() {
        let service = service(FixedSource { down: true });

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Arc::clone(&service)))
                .configure(configure::<FixedSource>),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/train_timetable/?station=Metro%20Center&session=user-a")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get(SESSION_HEADER).unwrap().to_str().unwrap(),
            "user-a"
        );

        // no digits: answered without touching upstream, with a minted session
        let req = test::TestRequest::get()
            .uri("/bus_timetable/?stop=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().contains_key(SESSION_HEADER));

        let req = test::TestRequest::get()
            .uri("/nearby_bus_stops/?lat=38.87&lon=-76.99")
            .to_request();
        let stops: Vec<BusStop> = test::call_and_read_body_json(&app, req).await;
        assert!(stops.is_empty());
    }
}
