//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, filesystem, etc.).
//!
//! # Structure
//!
//! - `request` - Inbound service requests (`Request`, `NewRequest`, `RequestRekey`)
//! - `catalog` - Download links and the daily stats counter

mod catalog;
mod request;

pub use catalog::{Link, STATS_DATE_FORMAT, StatsEntry, StatsKey};
pub use request::{NewRequest, Request, RequestRekey, RequestStatus};
