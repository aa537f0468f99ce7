//! Repository for the `productions` table.

use prodline_core::production::ProductionStatus;
use prodline_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::production::{CreateProduction, ProductionRow};

/// Column list for `productions` SELECT queries.
const COLUMNS: &str = "\
    id, product_id, line_id, status_id, produced_boxes, planned_boxes, \
    produced_at, created_at";

/// Provides query operations for production runs.
pub struct ProductionRepo;

impl ProductionRepo {
    /// Insert a production run, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduction,
    ) -> Result<ProductionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO productions \
                (product_id, line_id, status_id, produced_boxes, planned_boxes, produced_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionRow>(&query)
            .bind(input.product_id)
            .bind(input.line_id)
            .bind(input.status_id.unwrap_or(ProductionStatus::Pending.id()))
            .bind(input.produced_boxes)
            .bind(input.planned_boxes)
            .bind(input.produced_at)
            .fetch_one(pool)
            .await
    }

    /// Productions with `produced_at` inside `[from, to]`, oldest first.
    pub async fn list_in_window(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<ProductionRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM productions \
             WHERE produced_at >= $1 AND produced_at <= $2 \
             ORDER BY produced_at, id"
        );
        sqlx::query_as::<_, ProductionRow>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
