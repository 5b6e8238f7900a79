pub mod audit;
pub mod content;
pub mod health;
pub mod public_content;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/content/{key}                      load (GET)
/// /admin/content/{key}/draft                save draft (PUT)
/// /admin/content/{key}/publish              publish (POST)
/// /admin/content/{key}/rollback/{revision}  rollback (POST)
/// /admin/content/{key}/history              revision history (GET)
///
/// /admin/audit-logs                         query (GET)
/// /admin/audit-logs/export                  export csv/json (GET)
/// /admin/audit-logs/integrity-check         hash-chain check (GET)
///
/// /public/content/{key}                     published payload (GET, no auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/content", content::router())
        .nest("/admin/audit-logs", audit::router())
        .nest("/public/content", public_content::router())
}
