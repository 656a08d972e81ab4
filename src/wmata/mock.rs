//! In-memory source for tests. Records every call it receives.

use super::{FetchError, TransitDataSource};
use crate::models::{
    BusStop, BusStopPredictions, IncidentMode, IncidentRecord, PredictionEntry, StationRecord,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct RecordingSource {
    pub stations: Vec<StationRecord>,
    pub rail_predictions: HashMap<String, Vec<PredictionEntry>>,
    pub bus_predictions: HashMap<String, BusStopPredictions>,
    pub rail_incidents: Vec<IncidentRecord>,
    pub bus_incidents: Vec<IncidentRecord>,
    pub stops: Vec<BusStop>,
    /// Call names that answer with an error, e.g. "rail_incidents".
    pub failing: HashSet<&'static str>,
    /// Calls that never answer within any reasonable timeout.
    pub stalling: HashSet<&'static str>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingSource {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, name: &'static str, call: String) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(call);

        if self.stalling.contains(name) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        if self.failing.contains(name) {
            return Err(FetchError::Status {
                url: format!("mock://{}", name),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }

        Ok(())
    }
}

impl TransitDataSource for RecordingSource {
    async fn station_directory(&self) -> Result<Vec<StationRecord>, FetchError> {
        self.record("station_directory", "station_directory".to_string())
            .await?;
        Ok(self.stations.clone())
    }

    async fn rail_predictions(&self, station_code: &str) -> Result<Vec<PredictionEntry>, FetchError> {
        self.record("rail_predictions", format!("rail_predictions:{}", station_code))
            .await?;
        Ok(self
            .rail_predictions
            .get(station_code)
            .cloned()
            .unwrap_or_default())
    }

    async fn bus_predictions(
        &self,
        stop_id: &str,
    ) -> Result<Option<BusStopPredictions>, FetchError> {
        self.record("bus_predictions", format!("bus_predictions:{}", stop_id))
            .await?;
        Ok(self.bus_predictions.get(stop_id).cloned())
    }

    async fn incidents(&self, mode: IncidentMode) -> Result<Vec<IncidentRecord>, FetchError> {
        match mode {
            IncidentMode::Train => {
                self.record("rail_incidents", "rail_incidents".to_string())
                    .await?;
                Ok(self.rail_incidents.clone())
            }
            IncidentMode::Bus => {
                self.record("bus_incidents", "bus_incidents".to_string())
                    .await?;
                Ok(self.bus_incidents.clone())
            }
        }
    }

    async fn bus_stops_near(
        &self,
        lat: f64,
        lon: f64,
        radius_metres: u32,
    ) -> Result<Vec<BusStop>, FetchError> {
        self.record(
            "bus_stops_near",
            format!("bus_stops_near:{},{},{}", lat, lon, radius_metres),
        )
        .await?;
        Ok(self.stops.clone())
    }
}
