//! Repository for the `stoppages` table.

use prodline_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::stoppage::{CreateStoppage, StoppageRow};

/// Column list for stoppage SELECTs, qualified for the join with
/// `productions` (alias `p`) that supplies `product_id`.
const COLUMNS: &str = "\
    s.id, s.production_id, s.line_id, p.product_id, s.stoppage_type_id, \
    s.quality_deviation_id, s.raw_material_id, s.subsystem_id, s.subsubsystem_id, \
    s.minutes, s.started_at";

/// Provides query operations for stoppages.
pub struct StoppageRepo;

impl StoppageRepo {
    /// Insert a stoppage and return its id.
    pub async fn create(pool: &PgPool, input: &CreateStoppage) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO stoppages \
                (production_id, line_id, stoppage_type_id, quality_deviation_id, \
                 raw_material_id, subsystem_id, subsubsystem_id, minutes, started_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(input.production_id)
        .bind(input.line_id)
        .bind(input.stoppage_type_id)
        .bind(input.quality_deviation_id)
        .bind(input.raw_material_id)
        .bind(input.subsystem_id)
        .bind(input.subsubsystem_id)
        .bind(input.minutes)
        .bind(input.started_at)
        .fetch_one(pool)
        .await
    }

    /// Stoppages with `started_at` inside `[from, to]`, oldest first.
    pub async fn list_in_window(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<StoppageRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stoppages s \
             LEFT JOIN productions p ON p.id = s.production_id \
             WHERE s.started_at >= $1 AND s.started_at <= $2 \
             ORDER BY s.started_at, s.id"
        );
        sqlx::query_as::<_, StoppageRow>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
