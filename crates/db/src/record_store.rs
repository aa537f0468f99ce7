//! PostgreSQL-backed [`RecordStore`].

use async_trait::async_trait;
use prodline_core::analytics::store::RecordStore;
use prodline_core::analytics::window::ReportWindow;
use prodline_core::error::CoreError;
use prodline_core::production::{ProductionRecord, ReferenceCatalog, StoppageRecord};

use crate::repositories::reference_repo::NamedTable;
use crate::repositories::{ProductionRepo, ReferenceRepo, StoppageRepo};
use crate::DbPool;

/// Serves report inputs straight from the database.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

fn upstream(what: &'static str) -> impl Fn(sqlx::Error) -> CoreError {
    move |err| {
        tracing::error!(error = %err, what, "Record store query failed");
        CoreError::Upstream(format!("failed to load {what}"))
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn fetch_productions(
        &self,
        window: &ReportWindow,
    ) -> Result<Vec<ProductionRecord>, CoreError> {
        let rows = ProductionRepo::list_in_window(&self.pool, window.from, window.to)
            .await
            .map_err(upstream("productions"))?;
        tracing::debug!(count = rows.len(), "Loaded productions");
        rows.into_iter().map(ProductionRecord::try_from).collect()
    }

    async fn fetch_stoppages(
        &self,
        window: &ReportWindow,
    ) -> Result<Vec<StoppageRecord>, CoreError> {
        let rows = StoppageRepo::list_in_window(&self.pool, window.from, window.to)
            .await
            .map_err(upstream("stoppages"))?;
        tracing::debug!(count = rows.len(), "Loaded stoppages");
        rows.into_iter().map(StoppageRecord::try_from).collect()
    }

    async fn fetch_reference_data(&self) -> Result<ReferenceCatalog, CoreError> {
        let pool = &self.pool;
        let (products, lines, stoppage_types, quality_deviations, raw_materials, subsystems, subsubsystems) =
            futures::try_join!(
                ReferenceRepo::list_products(pool),
                ReferenceRepo::list_named(pool, NamedTable::Lines),
                ReferenceRepo::list_stoppage_types(pool),
                ReferenceRepo::list_named(pool, NamedTable::QualityDeviations),
                ReferenceRepo::list_named(pool, NamedTable::RawMaterials),
                ReferenceRepo::list_named(pool, NamedTable::Subsystems),
                ReferenceRepo::list_subsubsystems(pool),
            )
            .map_err(upstream("reference data"))?;

        Ok(ReferenceCatalog {
            products: products.into_iter().map(Into::into).collect(),
            lines: lines.into_iter().map(Into::into).collect(),
            stoppage_types: stoppage_types
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<_, _>>()?,
            quality_deviations: quality_deviations.into_iter().map(Into::into).collect(),
            raw_materials: raw_materials.into_iter().map(Into::into).collect(),
            subsystems: subsystems.into_iter().map(Into::into).collect(),
            subsubsystems: subsubsystems.into_iter().map(Into::into).collect(),
        })
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool)
            .await
            .map_err(upstream("health probe"))
    }
}
