//! Handler for the public content surface.
//!
//! Serves only the public projection: the last published payload per key.
//! Drafts, revision history, and the audit trail are never reachable from
//! here, and no authentication is required.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use pressroom_core::content;
use pressroom_core::error::CoreError;
use pressroom_db::repositories::PublicSnapshotRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /public/content/{key}
///
/// Fetch the published payload for a key. 404 until the key has been
/// published at least once.
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    content::validate_key(&key).map_err(AppError::Core)?;

    let snapshot = PublicSnapshotRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Published content",
                key: key.clone(),
            })
        })?;

    Ok(Json(DataResponse { data: snapshot }))
}
