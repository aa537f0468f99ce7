pub mod health;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /reports                 stock catalog, stock and custom report runs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/reports", reports::router())
}
