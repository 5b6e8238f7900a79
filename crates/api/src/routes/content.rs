//! Route definitions for the content workflow.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Content workflow routes mounted at `/admin/content`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET  /{key}                      -> load
/// PUT  /{key}/draft                -> save_draft
/// POST /{key}/publish              -> publish
/// POST /{key}/rollback/{revision}  -> rollback
/// GET  /{key}/history              -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{key}", get(content::load))
        .route("/{key}/draft", put(content::save_draft))
        .route("/{key}/publish", post(content::publish))
        .route("/{key}/rollback/{revision}", post(content::rollback))
        .route("/{key}/history", get(content::history))
}
