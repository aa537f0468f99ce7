//! Row structs and insert DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A conversion into the matching `prodline_core` type

pub mod production;
pub mod reference;
pub mod stoppage;

/// Clamp a signed count column to the unsigned domain used by the engine.
///
/// The schema forbids negatives; rows that slip through are logged and
/// read as zero.
pub(crate) fn non_negative(value: i32, table: &'static str, column: &'static str, id: i64) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| {
        tracing::warn!(table, column, id, value, "Negative count read as zero");
        0
    })
}
