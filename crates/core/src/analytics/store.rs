//! The record store seam.
//!
//! The engine only needs windowed record streams and the reference data they
//! join to. Timeouts and retries belong to the implementation; the engine
//! propagates the first error it sees.

use async_trait::async_trait;

use crate::analytics::window::ReportWindow;
use crate::error::CoreError;
use crate::production::{ProductionRecord, ReferenceCatalog, StoppageRecord};

/// Supplies records bounded by a [`ReportWindow`] (inclusive on both ends).
///
/// Fetch failures surface as [`CoreError::Upstream`].
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_productions(
        &self,
        window: &ReportWindow,
    ) -> Result<Vec<ProductionRecord>, CoreError>;

    /// Stoppages whose `started_at` falls inside `window`, with `product_id`
    /// joined from the owning production.
    async fn fetch_stoppages(&self, window: &ReportWindow)
        -> Result<Vec<StoppageRecord>, CoreError>;

    async fn fetch_reference_data(&self) -> Result<ReferenceCatalog, CoreError>;

    /// Cheap connectivity probe for health endpoints.
    async fn health_check(&self) -> Result<(), CoreError>;
}

/// A record store over in-memory snapshots.
///
/// Applies the same inclusive window filter a database-backed store does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    pub productions: Vec<ProductionRecord>,
    pub stoppages: Vec<StoppageRecord>,
    pub reference: ReferenceCatalog,
}

impl InMemoryRecordStore {
    pub fn new(reference: ReferenceCatalog) -> Self {
        Self {
            reference,
            ..Default::default()
        }
    }

    pub fn with_productions(mut self, records: impl IntoIterator<Item = ProductionRecord>) -> Self {
        self.productions.extend(records);
        self
    }

    pub fn with_stoppages(mut self, records: impl IntoIterator<Item = StoppageRecord>) -> Self {
        self.stoppages.extend(records);
        self
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_productions(
        &self,
        window: &ReportWindow,
    ) -> Result<Vec<ProductionRecord>, CoreError> {
        Ok(self
            .productions
            .iter()
            .filter(|p| window.contains(p.produced_at))
            .cloned()
            .collect())
    }

    async fn fetch_stoppages(
        &self,
        window: &ReportWindow,
    ) -> Result<Vec<StoppageRecord>, CoreError> {
        Ok(self
            .stoppages
            .iter()
            .filter(|s| window.contains(s.started_at))
            .cloned()
            .collect())
    }

    async fn fetch_reference_data(&self) -> Result<ReferenceCatalog, CoreError> {
        Ok(self.reference.clone())
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::analytics::test_helpers::{at, catalog, production, stoppage};

    #[tokio::test]
    async fn filters_by_inclusive_window() {
        let mut early = production(1, 1, 10, 10);
        early.produced_at = at(3, 6);
        let mut late = production(2, 1, 10, 10);
        late.produced_at = at(3, 18);
        let mut edge = stoppage(3, 5, None);
        edge.started_at = at(3, 6);

        let store = InMemoryRecordStore::new(catalog())
            .with_productions([early, late])
            .with_stoppages([edge]);

        let window = ReportWindow {
            from: at(3, 6),
            to: at(3, 6) + Duration::hours(1),
        };

        let productions = store.fetch_productions(&window).await.unwrap();
        assert_eq!(productions.len(), 1);
        assert_eq!(productions[0].id, 1);

        let stoppages = store.fetch_stoppages(&window).await.unwrap();
        assert_eq!(stoppages.len(), 1);

        assert_eq!(store.fetch_reference_data().await.unwrap(), catalog());
    }
}
