//! Route definitions for the public content surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::public_content;
use crate::state::AppState;

/// Public routes mounted at `/public/content`. No authentication.
///
/// ```text
/// GET /{key} -> get_snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{key}", get(public_content::get_snapshot))
}
