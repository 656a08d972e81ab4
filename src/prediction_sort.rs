use crate::models::PredictionEntry;

/// Orders predictions by how soon they arrive.
///
/// Status codes ("ARR", "BRD", anything that is not a whole number) mean the
/// train is already at or pulling into the platform, so they lead the list in
/// the order they were given. Numeric entries follow in ascending minutes;
/// equal minutes keep their input order.
pub fn sort_predictions(predictions: Vec<PredictionEntry>) -> Vec<PredictionEntry> {
    let (mut numeric, mut imminent): (Vec<_>, Vec<_>) = predictions
        .into_iter()
        .partition(|prediction| prediction.minutes().is_some());

    // sort_by_key is stable
    numeric.sort_by_key(|prediction| prediction.minutes());

    imminent.append(&mut numeric);
    imminent
}
