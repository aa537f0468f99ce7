use std::sync::Arc;

use prodline_core::analytics::assembler::{ReportAssembler, ReportSettings};
use prodline_core::analytics::store::RecordStore;
use prodline_core::analytics::window::Clock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Source of production and stoppage records.
    pub store: Arc<dyn RecordStore>,
    /// Supplies "now" for default report windows.
    pub clock: Arc<dyn Clock>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn report_settings(&self) -> ReportSettings {
        self.config.report_settings()
    }

    /// An assembler borrowing this state's store and clock.
    pub fn assembler(&self) -> ReportAssembler<'_> {
        ReportAssembler::new(self.store.as_ref(), self.clock.as_ref(), self.report_settings())
    }
}
