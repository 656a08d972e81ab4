// Copyright Kyler Chin <kyler@catenarymaps.org>
// Catenary Transit Initiatives
// Attribution cannot be removed

//! Resolves spoken station and stop references against the WMATA feeds and
//! builds merged, ordered arrival timetables with the incidents that affect them.

#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::arc_with_non_send_sync,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::bytes_nth,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::cmp_null,
    clippy::op_ref
)]

pub mod codes;
pub mod config;
pub mod incident_matching;
pub mod models;
pub mod platform_aggregation;
pub mod prediction_sort;
pub mod session_incidents;
pub mod station_names;
pub mod station_resolver;
pub mod timetable;
pub mod wmata;

pub use session_incidents::{IncidentHandoff, SessionContext, SessionIncidentStore};
pub use timetable::{Lookup, TimetableService};
pub use wmata::{FetchError, TransitDataSource, WmataClient};
