//! Production run rows.

use prodline_core::error::CoreError;
use prodline_core::production::{ProductionRecord, ProductionStatus, StatusId};
use prodline_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

use super::non_negative;

/// A row from the `productions` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductionRow {
    pub id: DbId,
    pub product_id: DbId,
    pub line_id: DbId,
    pub status_id: StatusId,
    pub produced_boxes: i32,
    pub planned_boxes: i32,
    pub produced_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a production run.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduction {
    pub product_id: DbId,
    pub line_id: DbId,
    /// Defaults to pending.
    pub status_id: Option<StatusId>,
    pub produced_boxes: i32,
    pub planned_boxes: i32,
    pub produced_at: Timestamp,
}

impl TryFrom<ProductionRow> for ProductionRecord {
    type Error = CoreError;

    fn try_from(row: ProductionRow) -> Result<Self, Self::Error> {
        let status = ProductionStatus::from_id(row.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "production {} has unknown status id {}",
                row.id, row.status_id
            ))
        })?;

        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            line_id: row.line_id,
            produced_boxes: non_negative(row.produced_boxes, "productions", "produced_boxes", row.id),
            planned_boxes: non_negative(row.planned_boxes, "productions", "planned_boxes", row.id),
            status,
            produced_at: row.produced_at,
        })
    }
}
