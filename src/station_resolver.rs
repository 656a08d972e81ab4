//! Finds the station a spoken or typed query refers to.
//!
//! The query is trimmed first; a blank query resolves to nothing rather than
//! substring-matching every station. Two tiers, first hit wins:
//! 1. case-insensitive substring match of the trimmed query against station names
//! 2. every word of the normalized query appears in the normalized station name
//!
//! Neither tier ranks candidates: the first record in directory order wins.

use crate::models::StationRecord;
use crate::station_names::normalize_station_name;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchTier {
    Partial,
    Fuzzy,
}

#[derive(Clone, Copy, Debug)]
pub struct Resolved<'a> {
    pub station: &'a StationRecord,
    pub tier: MatchTier,
}

pub fn partial_match<'a>(query: &str, directory: &'a [StationRecord]) -> Option<&'a StationRecord> {
    let query = query.to_lowercase();

    directory
        .iter()
        .find(|station| station.name.to_lowercase().contains(&query))
}

pub fn fuzzy_match<'a>(query: &str, directory: &'a [StationRecord]) -> Option<&'a StationRecord> {
    let normalized_query = normalize_station_name(query);
    let words = normalized_query.split_whitespace().collect::<Vec<&str>>();

    if words.is_empty() {
        return None;
    }

    directory.iter().find(|station| {
        let normalized_name = normalize_station_name(&station.name);
        words.iter().all(|word| normalized_name.contains(word))
    })
}

/// Keeps a count of fuzzy passes so callers can see how often tier 1 misses.
#[derive(Debug, Default)]
pub struct StationResolver {
    fuzzy_passes: AtomicU64,
}

impl StationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fuzzy_passes(&self) -> u64 {
        self.fuzzy_passes.load(Ordering::Relaxed)
    }

    pub fn resolve<'a>(&self, query: &str, directory: &'a [StationRecord]) -> Option<Resolved<'a>> {
        let query = query.trim();

        if query.is_empty() {
            return None;
        }

        if let Some(station) = partial_match(query, directory) {
            debug!("{:?} matched {} by substring", query, station.code);
            return Some(Resolved {
                station,
                tier: MatchTier::Partial,
            });
        }

        self.fuzzy_passes.fetch_add(1, Ordering::Relaxed);

        fuzzy_match(query, directory).map(|station| {
            debug!("{:?} matched {} by normalized words", query, station.code);
            Resolved {
                station,
                tier: MatchTier::Fuzzy,
            }
        })
    }
}

/// Free-function form of [`StationResolver::resolve`] for one-off lookups.
pub fn resolve_station<'a>(query: &str, directory: &'a [StationRecord]) -> Option<&'a StationRecord> {
    StationResolver::new()
        .resolve(query, directory)
        .map(|resolved| resolved.station)
}
