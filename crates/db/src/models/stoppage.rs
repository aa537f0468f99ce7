//! Stoppage rows.

use prodline_core::error::CoreError;
use prodline_core::production::{CauseRef, StoppageRecord};
use prodline_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

use super::non_negative;

/// A `stoppages` row joined with the owning production's `product_id`.
#[derive(Debug, Clone, FromRow)]
pub struct StoppageRow {
    pub id: DbId,
    pub production_id: DbId,
    pub line_id: DbId,
    pub product_id: Option<DbId>,
    pub stoppage_type_id: DbId,
    pub quality_deviation_id: Option<DbId>,
    pub raw_material_id: Option<DbId>,
    pub subsystem_id: Option<DbId>,
    pub subsubsystem_id: Option<DbId>,
    pub minutes: i32,
    pub started_at: Timestamp,
}

/// DTO for inserting a stoppage. At most one cause kind may be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStoppage {
    pub production_id: DbId,
    pub line_id: DbId,
    pub stoppage_type_id: DbId,
    pub quality_deviation_id: Option<DbId>,
    pub raw_material_id: Option<DbId>,
    pub subsystem_id: Option<DbId>,
    pub subsubsystem_id: Option<DbId>,
    pub minutes: i32,
    pub started_at: Timestamp,
}

impl TryFrom<StoppageRow> for StoppageRecord {
    type Error = CoreError;

    fn try_from(row: StoppageRow) -> Result<Self, Self::Error> {
        let cause = CauseRef::from_columns(
            row.quality_deviation_id,
            row.raw_material_id,
            row.subsystem_id,
            row.subsubsystem_id,
        )
        .map_err(|e| CoreError::Internal(format!("stoppage {}: {e}", row.id)))?;

        Ok(Self {
            id: row.id,
            production_id: row.production_id,
            line_id: row.line_id,
            product_id: row.product_id,
            stoppage_type_id: row.stoppage_type_id,
            cause,
            minutes: non_negative(row.minutes, "stoppages", "minutes", row.id),
            started_at: row.started_at,
        })
    }
}
