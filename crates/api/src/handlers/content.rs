//! Handlers for the versioned site-content workflow.
//!
//! Five operations against a content key: load, save_draft, publish,
//! rollback, and history. All require the `admin` role. Every mutation runs
//! as a single transaction in the repository layer and appends a
//! best-effort audit entry after commit; the mutation's durability never
//! depends on the audit trail.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use pressroom_core::content::{self, actions, HISTORY_LIMIT};
use pressroom_core::error::CoreError;
use pressroom_core::types::{ActorId, RevisionNo};
use pressroom_db::models::audit::CreateAuditLog;
use pressroom_db::models::content::{ActionRequest, ContentView, SaveDraftRequest};
use pressroom_db::repositories::{AuditLogRepo, ContentRepo, RevisionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Build the admin view for a key: record fields plus the newest revision
/// summaries. An absent key yields a zeroed view, since records are created
/// lazily on the first draft save.
async fn build_view(pool: &sqlx::PgPool, key: &str) -> AppResult<ContentView> {
    let record = ContentRepo::find_by_key(pool, key).await?;
    let revisions = RevisionRepo::list_summaries(pool, key, HISTORY_LIMIT).await?;

    Ok(match record {
        Some(record) => ContentView {
            key: record.key,
            payload_draft: Some(record.payload_draft),
            payload_published: record.payload_published,
            current_revision: record.current_revision,
            published_revision: record.published_revision,
            published_at: record.published_at,
            revisions,
        },
        None => ContentView {
            key: key.to_string(),
            payload_draft: None,
            payload_published: None,
            current_revision: 0,
            published_revision: None,
            published_at: None,
            revisions,
        },
    })
}

/// The conflict error returned when a concurrent writer won the revision
/// race. Retryable: the caller should re-read and try again.
fn revision_conflict(key: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Content key '{key}' was modified concurrently, retry the operation"
    )))
}

/// Append an audit entry, logging and swallowing any failure. The audit
/// trail is best-effort and must never fail a committed content mutation.
async fn record_audit(
    pool: &sqlx::PgPool,
    key: &str,
    action: &str,
    revision_no: RevisionNo,
    actor_id: ActorId,
    details: serde_json::Value,
) {
    let entry = CreateAuditLog {
        content_key: key.to_string(),
        action: action.to_string(),
        revision_no,
        actor_id,
        details,
    };
    if let Err(err) = AuditLogRepo::append(pool, &entry).await {
        tracing::warn!(
            error = %err,
            key = %key,
            action = %action,
            revision = revision_no,
            "Failed to append audit log entry"
        );
    }
}

/* --------------------------------------------------------------------------
Read operations
-------------------------------------------------------------------------- */

/// GET /admin/content/{key}
///
/// Load the full admin view: draft, published payload, revision pointers,
/// and the newest revision summaries. Pure read.
pub async fn load(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    content::validate_key(&key).map_err(AppError::Core)?;
    let view = build_view(&state.pool, &key).await?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /admin/content/{key}/history
///
/// The revision-summary tail of `load`, standalone, so the dashboard can
/// refresh history without reloading payloads.
pub async fn history(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    content::validate_key(&key).map_err(AppError::Core)?;
    let revisions = RevisionRepo::list_summaries(&state.pool, &key, HISTORY_LIMIT).await?;
    Ok(Json(DataResponse { data: revisions }))
}

/* --------------------------------------------------------------------------
Mutations
-------------------------------------------------------------------------- */

/// PUT /admin/content/{key}/draft
///
/// Save a draft payload, creating the record on first write. Published
/// fields are preserved unchanged.
pub async fn save_draft(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(key): Path<String>,
    Json(input): Json<SaveDraftRequest>,
) -> AppResult<impl IntoResponse> {
    content::validate_key(&key).map_err(AppError::Core)?;
    let payload = input.payload.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Missing payload for save_draft".into(),
        ))
    })?;
    content::validate_payload(&payload).map_err(AppError::Core)?;
    content::validate_note(input.note.as_deref()).map_err(AppError::Core)?;

    let expected = ContentRepo::find_by_key(&state.pool, &key)
        .await?
        .map_or(0, |r| r.current_revision);

    let record = ContentRepo::save_draft(
        &state.pool,
        &key,
        &payload,
        expected,
        admin.actor_id,
        input.note.as_deref(),
    )
    .await?
    .ok_or_else(|| revision_conflict(&key))?;

    record_audit(
        &state.pool,
        &key,
        actions::SAVE_DRAFT,
        record.current_revision,
        admin.actor_id,
        serde_json::json!({ "note": input.note }),
    )
    .await;

    tracing::info!(
        key = %key,
        actor = %admin.actor_id,
        revision = record.current_revision,
        "Draft saved"
    );

    let view = build_view(&state.pool, &key).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /admin/content/{key}/publish
///
/// Publish the current draft. Always mints a new revision, even when the
/// draft content is unchanged: revisions track publish events, not content
/// diffs.
pub async fn publish(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(key): Path<String>,
    body: Option<Json<ActionRequest>>,
) -> AppResult<impl IntoResponse> {
    content::validate_key(&key).map_err(AppError::Core)?;
    let input = body.map(|Json(b)| b).unwrap_or_default();
    content::validate_note(input.note.as_deref()).map_err(AppError::Core)?;

    // A record only exists once a draft has been saved, so an absent row is
    // the same failure as a missing draft.
    let record = ContentRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "No draft payload to publish".into(),
            ))
        })?;

    let published = ContentRepo::publish(
        &state.pool,
        &key,
        record.current_revision,
        admin.actor_id,
        input.note.as_deref(),
    )
    .await?
    .ok_or_else(|| revision_conflict(&key))?;

    record_audit(
        &state.pool,
        &key,
        actions::PUBLISH,
        published.current_revision,
        admin.actor_id,
        serde_json::json!({ "note": input.note }),
    )
    .await;

    tracing::info!(
        key = %key,
        actor = %admin.actor_id,
        revision = published.current_revision,
        "Content published"
    );

    let view = build_view(&state.pool, &key).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /admin/content/{key}/rollback/{revision}
///
/// Restore a historical revision by publishing its payload as a new head
/// revision. History is never rewritten; the target entry stays untouched.
/// Overwrites any unpublished draft in progress.
pub async fn rollback(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path((key, target_revision)): Path<(String, RevisionNo)>,
    body: Option<Json<ActionRequest>>,
) -> AppResult<impl IntoResponse> {
    content::validate_key(&key).map_err(AppError::Core)?;
    let input = body.map(|Json(b)| b).unwrap_or_default();
    content::validate_note(input.note.as_deref()).map_err(AppError::Core)?;

    let target = RevisionRepo::find_by_key_and_revision(&state.pool, &key, target_revision)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Revision",
                key: format!("{key}@{target_revision}"),
            })
        })?;

    let expected = ContentRepo::find_by_key(&state.pool, &key)
        .await?
        .map_or(0, |r| r.current_revision);

    let record = ContentRepo::rollback(
        &state.pool,
        &key,
        &target.payload,
        target.revision_no,
        expected,
        admin.actor_id,
        input.note.as_deref(),
    )
    .await?
    .ok_or_else(|| revision_conflict(&key))?;

    record_audit(
        &state.pool,
        &key,
        actions::ROLLBACK,
        record.current_revision,
        admin.actor_id,
        serde_json::json!({ "target_revision": target.revision_no, "note": input.note }),
    )
    .await;

    tracing::info!(
        key = %key,
        actor = %admin.actor_id,
        revision = record.current_revision,
        source_revision = target.revision_no,
        "Content rolled back"
    );

    let view = build_view(&state.pool, &key).await?;
    Ok(Json(DataResponse { data: view }))
}
