//! WMATA JSON payloads as they come off the wire.

use crate::incident_matching::parse_lines_affected;
use crate::models::{BusStop, BusStopPredictions, IncidentRecord, PredictionEntry, StationRecord};
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStationList {
    pub stations: Vec<RawStation>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStation {
    pub code: String,
    pub name: String,
    pub station_together1: Option<String>,
    pub station_together2: Option<String>,
    pub line_code1: Option<String>,
    pub line_code2: Option<String>,
    pub line_code3: Option<String>,
    pub line_code4: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTrainPredictions {
    pub trains: Vec<RawTrain>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTrain {
    pub car: Option<String>,
    pub destination: Option<String>,
    pub destination_code: Option<String>,
    pub destination_name: Option<String>,
    pub group: Option<String>,
    pub line: Option<String>,
    pub location_code: Option<String>,
    pub location_name: Option<String>,
    pub min: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBusPredictions {
    pub stop_name: Option<String>,
    pub predictions: Option<Vec<RawBusPrediction>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBusPrediction {
    #[serde(rename = "RouteID")]
    pub route_id: String,
    pub direction_text: Option<String>,
    pub direction_num: Option<String>,
    pub minutes: Option<i64>,
    #[serde(rename = "VehicleID")]
    pub vehicle_id: Option<String>,
    #[serde(rename = "TripID")]
    pub trip_id: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRailIncidents {
    pub incidents: Vec<RawRailIncident>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRailIncident {
    #[serde(rename = "IncidentID")]
    pub incident_id: Option<String>,
    pub description: Option<String>,
    pub incident_type: Option<String>,
    pub lines_affected: Option<String>,
    pub date_updated: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBusIncidents {
    pub bus_incidents: Vec<RawBusIncident>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawBusIncident {
    #[serde(rename = "IncidentID")]
    pub incident_id: Option<String>,
    pub description: Option<String>,
    pub incident_type: Option<String>,
    #[serde(default)]
    pub routes_affected: Vec<String>,
    pub date_updated: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStopList {
    pub stops: Vec<RawStop>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStop {
    #[serde(rename = "StopID")]
    pub stop_id: Option<String>,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub routes: Vec<String>,
}

// The feed sends "" rather than null for a missing code.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|x| !x.trim().is_empty())
}

impl From<RawStation> for StationRecord {
    fn from(raw: RawStation) -> Self {
        StationRecord {
            code: raw.code,
            name: raw.name,
            linked_platform_code: non_empty(raw.station_together1),
            line_codes: [
                non_empty(raw.line_code1),
                non_empty(raw.line_code2),
                non_empty(raw.line_code3),
                non_empty(raw.line_code4),
            ],
            lat: raw.lat,
            lon: raw.lon,
        }
    }
}

impl From<RawTrain> for PredictionEntry {
    fn from(raw: RawTrain) -> Self {
        PredictionEntry {
            line: raw.line.unwrap_or_default(),
            destination: raw.destination.unwrap_or_default(),
            car: non_empty(raw.car),
            minutes_or_status: raw.min.unwrap_or_default(),
        }
    }
}

impl From<RawBusPrediction> for PredictionEntry {
    fn from(raw: RawBusPrediction) -> Self {
        PredictionEntry {
            line: raw.route_id,
            destination: raw.direction_text.unwrap_or_default(),
            car: None,
            minutes_or_status: raw.minutes.map(|x| x.to_string()).unwrap_or_default(),
        }
    }
}

impl RawBusPredictions {
    pub fn into_stop_predictions(self) -> Option<BusStopPredictions> {
        let predictions = self.predictions?;

        Some(BusStopPredictions {
            stop_name: self.stop_name.unwrap_or_default(),
            predictions: predictions.into_iter().map(PredictionEntry::from).collect(),
        })
    }
}

impl From<RawRailIncident> for IncidentRecord {
    fn from(raw: RawRailIncident) -> Self {
        IncidentRecord {
            incident_id: raw.incident_id,
            description: raw.description.unwrap_or_default(),
            incident_type: raw.incident_type.unwrap_or_default(),
            affected_codes: parse_lines_affected(raw.lines_affected.as_deref().unwrap_or("")),
            date_updated: raw.date_updated,
        }
    }
}

impl From<RawBusIncident> for IncidentRecord {
    fn from(raw: RawBusIncident) -> Self {
        IncidentRecord {
            incident_id: raw.incident_id,
            description: raw.description.unwrap_or_default(),
            incident_type: raw.incident_type.unwrap_or_default(),
            affected_codes: raw.routes_affected,
            date_updated: raw.date_updated,
        }
    }
}

impl From<RawStop> for BusStop {
    fn from(raw: RawStop) -> Self {
        BusStop {
            stop_id: raw.stop_id.unwrap_or_default(),
            name: raw.name,
            lat: raw.lat,
            lon: raw.lon,
            routes: raw.routes,
        }
    }
}
