//! Upstream transit data: the source trait the orchestrator is written
//! against, and the WMATA JSON API implementation of it.

use crate::models::{BusStop, BusStopPredictions, IncidentMode, IncidentRecord, PredictionEntry, StationRecord};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod raw;

pub use client::WmataClient;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("upstream call timed out after {0:?}")]
    Timeout(Duration),
}

/// Everything the timetable lookups need from the transit data provider.
///
/// Each call is a fresh read; implementations must not cache the station directory.
pub trait TransitDataSource: Send + Sync {
    fn station_directory(
        &self,
    ) -> impl Future<Output = Result<Vec<StationRecord>, FetchError>> + Send;

    fn rail_predictions(
        &self,
        station_code: &str,
    ) -> impl Future<Output = Result<Vec<PredictionEntry>, FetchError>> + Send;

    /// `Ok(None)` when the provider has no predictions collection for the stop.
    fn bus_predictions(
        &self,
        stop_id: &str,
    ) -> impl Future<Output = Result<Option<BusStopPredictions>, FetchError>> + Send;

    fn incidents(
        &self,
        mode: IncidentMode,
    ) -> impl Future<Output = Result<Vec<IncidentRecord>, FetchError>> + Send;

    fn bus_stops_near(
        &self,
        lat: f64,
        lon: f64,
        radius_metres: u32,
    ) -> impl Future<Output = Result<Vec<BusStop>, FetchError>> + Send;
}

/// Bounds an upstream call; running out of time counts as a failed fetch.
pub async fn with_timeout<T, F>(timeout: Duration, fetch: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(timeout, fetch).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout)),
    }
}
