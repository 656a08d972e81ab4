//! The lookups the conversational layer calls: train times for a spoken
//! station name, bus times for a stop id, and bus stops around a point.
//!
//! Below this module failures travel as `FetchError`. Here they are logged and
//! folded into "nothing to show", which the caller treats like an unknown station.

use crate::incident_matching::relevant_incidents;
use crate::models::{BusStop, BusTimetable, IncidentMode, IncidentRecord, MergedTimetable};
use crate::platform_aggregation::aggregate_platforms;
use crate::session_incidents::{IncidentHandoff, SessionContext, SessionIncidentStore};
use crate::station_resolver::StationResolver;
use crate::wmata::{FetchError, TransitDataSource, with_timeout};
use itertools::Itertools;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_NEARBY_RADIUS_METRES: u32 = 500;
pub const MAX_NEARBY_RADIUS_METRES: u32 = 2_000;

/// Outcome of a lookup before it is collapsed for the caller.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Unavailable(FetchError),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Unavailable(_) => None,
        }
    }

    fn logged(self, operation: &str, query: &str) -> Option<T> {
        match &self {
            Lookup::Found(_) => debug!("{} for {:?} found", operation, query),
            Lookup::NotFound => info!("{} for {:?} matched nothing", operation, query),
            Lookup::Unavailable(cause) => {
                warn!("{} for {:?} failed upstream: {}", operation, query, cause)
            }
        }

        self.into_option()
    }
}

/// Keeps only the digits of a spoken or typed bus stop id.
pub fn sanitize_stop_id(raw_stop_id: &str) -> String {
    raw_stop_id.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub struct TimetableService<S> {
    source: S,
    resolver: StationResolver,
    incident_store: Arc<SessionIncidentStore>,
    upstream_timeout: Duration,
}

impl<S: TransitDataSource> TimetableService<S> {
    pub fn new(
        source: S,
        incident_store: Arc<SessionIncidentStore>,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            source,
            resolver: StationResolver::new(),
            incident_store,
            upstream_timeout,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn resolver(&self) -> &StationResolver {
        &self.resolver
    }

    pub fn incident_store(&self) -> &SessionIncidentStore {
        &self.incident_store
    }

    pub async fn lookup_train_timetable(&self, query: &str) -> Lookup<MergedTimetable> {
        let timeout = self.upstream_timeout;

        let directory = match with_timeout(timeout, self.source.station_directory()).await {
            Ok(directory) => directory,
            Err(err) => return Lookup::Unavailable(err),
        };

        let Some(resolved) = self.resolver.resolve(query, &directory) else {
            return Lookup::NotFound;
        };
        let station = resolved.station;

        info!(
            "{:?} resolved to {} ({}) via {:?} match",
            query, station.name, station.code, resolved.tier
        );

        let source = &self.source;
        let aggregated = match aggregate_platforms(station, &directory, move |code| async move {
            with_timeout(timeout, source.rail_predictions(&code)).await
        })
        .await
        {
            Ok(aggregated) => aggregated,
            Err(err) => return Lookup::Unavailable(err),
        };

        let feed = match with_timeout(timeout, self.source.incidents(IncidentMode::Train)).await {
            Ok(feed) => feed,
            Err(err) => return Lookup::Unavailable(err),
        };

        Lookup::Found(MergedTimetable {
            station_name: station.name.clone(),
            predictions: aggregated.predictions,
            incidents: relevant_incidents(&aggregated.line_codes, &feed),
        })
    }

    /// Train times for a station name. `None` covers both an unknown station
    /// and an upstream outage.
    pub async fn fetch_train_timetable(
        &self,
        query: &str,
        session: &SessionContext,
    ) -> Option<MergedTimetable> {
        let timetable = self
            .lookup_train_timetable(query)
            .await
            .logged("train timetable", query)?;

        self.hand_off_incidents(session, &timetable.station_name, &timetable.incidents);

        Some(timetable)
    }

    pub async fn lookup_bus_timetable(&self, raw_stop_id: &str) -> Lookup<BusTimetable> {
        let timeout = self.upstream_timeout;
        let stop_id = sanitize_stop_id(raw_stop_id);

        if stop_id.is_empty() {
            debug!("{:?} has no digits, not asking upstream", raw_stop_id);
            return Lookup::NotFound;
        }

        let stop = match with_timeout(timeout, self.source.bus_predictions(&stop_id)).await {
            Ok(Some(stop)) => stop,
            Ok(None) => return Lookup::NotFound,
            Err(err) => return Lookup::Unavailable(err),
        };

        let routes = stop
            .predictions
            .iter()
            .map(|prediction| prediction.line.clone())
            .unique()
            .collect::<Vec<String>>();

        let feed = match with_timeout(timeout, self.source.incidents(IncidentMode::Bus)).await {
            Ok(feed) => feed,
            Err(err) => return Lookup::Unavailable(err),
        };

        Lookup::Found(BusTimetable {
            stop_name: stop.stop_name,
            incidents: relevant_incidents(&routes, &feed),
            predictions: stop.predictions,
        })
    }

    pub async fn fetch_bus_timetable(
        &self,
        raw_stop_id: &str,
        session: &SessionContext,
    ) -> Option<BusTimetable> {
        let timetable = self
            .lookup_bus_timetable(raw_stop_id)
            .await
            .logged("bus timetable", raw_stop_id)?;

        self.hand_off_incidents(session, &timetable.stop_name, &timetable.incidents);

        Some(timetable)
    }

    /// Bus stops around a point. The radius defaults to 500 m and is held to 1..=2000 m.
    pub async fn nearby_bus_stops(
        &self,
        lat: f64,
        lon: f64,
        radius_metres: Option<u32>,
    ) -> Vec<BusStop> {
        let radius = radius_metres
            .unwrap_or(DEFAULT_NEARBY_RADIUS_METRES)
            .clamp(1, MAX_NEARBY_RADIUS_METRES);

        match with_timeout(
            self.upstream_timeout,
            self.source.bus_stops_near(lat, lon, radius),
        )
        .await
        {
            Ok(stops) => stops,
            Err(err) => {
                warn!("bus stops near {},{} failed upstream: {}", lat, lon, err);
                Vec::new()
            }
        }
    }

    fn hand_off_incidents(
        &self,
        session: &SessionContext,
        name: &str,
        incidents: &[IncidentRecord],
    ) {
        if incidents.is_empty() {
            return;
        }

        self.incident_store.set_incidents(
            session,
            IncidentHandoff {
                station: Some(name.to_string()),
                data: incidents.to_vec(),
            },
        );
    }
}
