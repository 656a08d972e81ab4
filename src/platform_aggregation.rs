use crate::models::{PredictionEntry, StationRecord};
use crate::prediction_sort::sort_predictions;
use crate::wmata::FetchError;
use itertools::Itertools;
use std::future::Future;
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedPredictions {
    pub predictions: Vec<PredictionEntry>,
    /// Lines served by the station across all of its platforms, first seen first.
    pub line_codes: Vec<String>,
}

/// Collects predictions for a station and, when it has one, its linked platform.
///
/// Both platforms are fetched at the same time. The merged list is always built
/// primary first, then linked, and sorted, so completion order never shows in
/// the result. A station without a linked platform keeps the upstream order.
/// Trains that carry no passengers are dropped either way.
pub async fn aggregate_platforms<F, Fut>(
    station: &StationRecord,
    directory: &[StationRecord],
    fetch_predictions: F,
) -> Result<AggregatedPredictions, FetchError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<PredictionEntry>, FetchError>>,
{
    let mut line_codes = station.line_codes().map(str::to_string).collect::<Vec<_>>();

    let predictions = match station.linked_platform_code.as_deref() {
        None => fetch_predictions(station.code.clone()).await?,
        Some(linked_code) => {
            let (primary, linked) = futures::join!(
                fetch_predictions(station.code.clone()),
                fetch_predictions(linked_code.to_string())
            );

            match directory.iter().find(|record| record.code == linked_code) {
                Some(linked_station) => {
                    line_codes.extend(linked_station.line_codes().map(str::to_string));
                }
                None => {
                    warn!(
                        "{} links to platform {} which is not in the station directory",
                        station.code, linked_code
                    );
                }
            }

            let mut merged = primary?;
            merged.extend(linked?);
            sort_predictions(merged)
        }
    };

    Ok(AggregatedPredictions {
        predictions: predictions
            .into_iter()
            .filter(PredictionEntry::carries_passengers)
            .collect(),
        line_codes: line_codes.into_iter().unique().collect(),
    })
}
