#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The record store failed to deliver data (connectivity, query error).
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
