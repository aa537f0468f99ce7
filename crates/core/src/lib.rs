//! Production analytics domain logic.
//!
//! Record and reference-data types for manufacturing runs and stoppages,
//! plus the aggregation engine that turns a window of raw records into
//! ranked, percentage-normalized bucket summaries. Nothing here talks to a
//! database directly; records arrive through the [`analytics::store::RecordStore`]
//! seam.

pub mod analytics;
pub mod error;
pub mod production;
pub mod types;
