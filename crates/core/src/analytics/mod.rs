//! Report aggregation engine.
//!
//! A report run resolves every record to a bucket along one [`dimension`],
//! accumulates counts and sums ([`aggregator`]), computes percentages
//! ([`normalize`]) and orders the result ([`rank`]). [`assembler`] drives the
//! pipeline for a declarative [`spec::ReportSpec`], pulling records through the
//! [`store::RecordStore`] seam; [`catalog`] names the stock reports.

pub mod aggregator;
pub mod assembler;
pub mod bucket;
pub mod catalog;
pub mod dimension;
pub mod normalize;
pub mod rank;
pub mod record;
pub mod spec;
pub mod store;
pub mod window;
