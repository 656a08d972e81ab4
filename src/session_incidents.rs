//! Hands the incidents found by one conversational turn to the follow-up turn
//! ("tell me about the incidents") of the same session.

use crate::models::IncidentRecord;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a handoff waits for its follow-up turn.
pub const DEFAULT_HANDOFF_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct IncidentHandoff {
    /// Station name or bus stop name the incidents were found for.
    pub station: Option<String>,
    pub data: Vec<IncidentRecord>,
}

/// Identifies one end user's dialogue, as supplied by the conversational layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

/// One slot per session, last write wins within a session.
///
/// Slots older than the ttl read as empty and are evicted on the next write,
/// so sessions that never ask the follow-up question do not pile up.
#[derive(Debug)]
pub struct SessionIncidentStore {
    slots: DashMap<String, (Instant, IncidentHandoff)>,
    ttl: Duration,
}

impl Default for SessionIncidentStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_HANDOFF_TTL)
    }
}

impl SessionIncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: DashMap::new(),
            ttl,
        }
    }

    pub fn set_incidents(&self, session: &SessionContext, handoff: IncidentHandoff) {
        self.evict_stale();
        self.slots
            .insert(session.session_id.clone(), (Instant::now(), handoff));
    }

    /// An empty handoff when nothing fresh was stored for the session.
    pub fn get_incidents(&self, session: &SessionContext) -> IncidentHandoff {
        self.slots
            .get(&session.session_id)
            .filter(|slot| slot.value().0.elapsed() < self.ttl)
            .map(|slot| slot.value().1.clone())
            .unwrap_or_default()
    }

    /// Reads and clears the session's slot so the same incidents are not read twice.
    pub fn take_incidents(&self, session: &SessionContext) -> IncidentHandoff {
        self.slots
            .remove(&session.session_id)
            .filter(|(_, (stored_at, _))| stored_at.elapsed() < self.ttl)
            .map(|(_, (_, handoff))| handoff)
            .unwrap_or_default()
    }

    /// Drops every slot older than the ttl.
    pub fn evict_stale(&self) {
        let before = self.slots.len();
        self.slots
            .retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);

        let evicted = before.saturating_sub(self.slots.len());
        if evicted > 0 {
            debug!("evicted {} stale incident handoffs", evicted);
        }
    }

    pub fn clear(&self, session: &SessionContext) {
        self.slots.remove(&session.session_id);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
