use serde::{Deserialize, Serialize};

/// Line values the rail feed uses for trains that carry no passengers.
pub const NO_PASSENGER_LINES: [&str; 2] = ["No", "--"];

/// One physical rail platform from the station directory.
///
/// A station served by two platforms appears twice, each record naming the
/// other through `linked_platform_code`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StationRecord {
    pub code: String,
    pub name: String,
    pub linked_platform_code: Option<String>,
    pub line_codes: [Option<String>; 4],
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl StationRecord {
    pub fn line_codes(&self) -> impl Iterator<Item = &str> {
        self.line_codes.iter().filter_map(|code| code.as_deref())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictionEntry {
    pub line: String,
    pub destination: String,
    pub car: Option<String>,
    /// Whole minutes as a string, or a status code such as `ARR` or `BRD`.
    pub minutes_or_status: String,
}

impl PredictionEntry {
    pub fn minutes(&self) -> Option<u32> {
        self.minutes_or_status.trim().parse::<u32>().ok()
    }

    pub fn carries_passengers(&self) -> bool {
        !NO_PASSENGER_LINES.contains(&self.line.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum IncidentMode {
    Train,
    Bus,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncidentRecord {
    pub incident_id: Option<String>,
    pub description: String,
    pub incident_type: String,
    pub affected_codes: Vec<String>,
    pub date_updated: Option<String>,
}

impl IncidentRecord {
    pub fn affects_any<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes
            .iter()
            .any(|code| self.affected_codes.iter().any(|a| a == code.as_ref()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MergedTimetable {
    pub station_name: String,
    pub predictions: Vec<PredictionEntry>,
    pub incidents: Vec<IncidentRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BusTimetable {
    pub stop_name: String,
    pub predictions: Vec<PredictionEntry>,
    pub incidents: Vec<IncidentRecord>,
}

/// Bus arrivals for one stop as the upstream reports them.
#[derive(Clone, Debug, PartialEq)]
pub struct BusStopPredictions {
    pub stop_name: String,
    pub predictions: Vec<PredictionEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BusStop {
    pub stop_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub routes: Vec<String>,
}
