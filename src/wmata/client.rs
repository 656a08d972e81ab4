// Copyright Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Attribution cannot be removed

use super::raw::{
    RawBusIncidents, RawBusPredictions, RawRailIncidents, RawStationList, RawStopList,
    RawTrainPredictions,
};
use super::{FetchError, TransitDataSource};
use crate::config::UpstreamConfig;
use crate::models::{
    BusStop, BusStopPredictions, IncidentMode, IncidentRecord, PredictionEntry, StationRecord,
};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const STATIONS_PATH: &str = "/Rail.svc/json/jStations";
pub const RAIL_PREDICTION_PATH: &str = "/StationPrediction.svc/json/GetPrediction";
pub const BUS_PREDICTION_PATH: &str = "/NextBusService.svc/json/jPredictions";
pub const RAIL_INCIDENTS_PATH: &str = "/Incidents.svc/json/Incidents";
pub const BUS_INCIDENTS_PATH: &str = "/Incidents.svc/json/BusIncidents";
pub const BUS_STOPS_PATH: &str = "/Bus.svc/json/jStops";

/// WMATA developer API client. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct WmataClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl WmataClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|source| FetchError::Http {
                url: config.api_root.clone(),
                source,
            })?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = self.config.url(path);

        let response = self
            .client
            .get(&url)
            .header("api_key", &self.config.api_key)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response.text().await.map_err(|source| FetchError::Http {
            url: url.clone(),
            source,
        })?;

        debug!("{} returned {} bytes", url, body.len());

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

impl TransitDataSource for WmataClient {
    async fn station_directory(&self) -> Result<Vec<StationRecord>, FetchError> {
        let raw: RawStationList = self.get_json(STATIONS_PATH, &[]).await?;

        Ok(raw.stations.into_iter().map(StationRecord::from).collect())
    }

    async fn rail_predictions(&self, station_code: &str) -> Result<Vec<PredictionEntry>, FetchError> {
        let path = format!("{}/{}", RAIL_PREDICTION_PATH, station_code);
        let raw: RawTrainPredictions = self.get_json(&path, &[]).await?;

        Ok(raw.trains.into_iter().map(PredictionEntry::from).collect())
    }

    async fn bus_predictions(
        &self,
        stop_id: &str,
    ) -> Result<Option<BusStopPredictions>, FetchError> {
        let raw: RawBusPredictions = self
            .get_json(BUS_PREDICTION_PATH, &[("StopID", stop_id.to_string())])
            .await?;

        Ok(raw.into_stop_predictions())
    }

    async fn incidents(&self, mode: IncidentMode) -> Result<Vec<IncidentRecord>, FetchError> {
        match mode {
            IncidentMode::Train => {
                let raw: RawRailIncidents = self.get_json(RAIL_INCIDENTS_PATH, &[]).await?;
                Ok(raw.incidents.into_iter().map(IncidentRecord::from).collect())
            }
            IncidentMode::Bus => {
                let raw: RawBusIncidents = self.get_json(BUS_INCIDENTS_PATH, &[]).await?;
                Ok(raw.bus_incidents.into_iter().map(IncidentRecord::from).collect())
            }
        }
    }

    async fn bus_stops_near(
        &self,
        lat: f64,
        lon: f64,
        radius_metres: u32,
    ) -> Result<Vec<BusStop>, FetchError> {
        let query = [
            ("Lat", lat.to_string()),
            ("Lon", lon.to_string()),
            ("Radius", radius_metres.to_string()),
        ];
        let raw: RawStopList = self.get_json(BUS_STOPS_PATH, &query).await?;

        Ok(raw.stops.into_iter().map(BusStop::from).collect())
    }
}
