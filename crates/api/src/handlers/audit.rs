//! Handlers for audit trail review endpoints.
//!
//! All endpoints require the admin role. The trail carries no content
//! payloads, so these endpoints are safe to expose to compliance tooling.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use pressroom_core::audit::{canonical_entry_data, compute_integrity_hash};
use pressroom_core::types::ActorId;
use pressroom_db::models::audit::{AuditLogPage, AuditQuery, IntegrityCheckResult};
use pressroom_db::repositories::AuditLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query parameter types
-------------------------------------------------------------------------- */

/// Query parameters for audit queries.
#[derive(Debug, Deserialize)]
pub struct AuditQueryParams {
    pub key: Option<String>,
    pub action: Option<String>,
    pub actor_id: Option<ActorId>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for audit export.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub format: Option<String>,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Parse an optional ISO 8601 date string, with a fallback.
fn parse_timestamp(
    s: &Option<String>,
    fallback: chrono::DateTime<chrono::Utc>,
) -> AppResult<chrono::DateTime<chrono::Utc>> {
    match s {
        Some(v) => v
            .parse::<chrono::DateTime<chrono::Utc>>()
            .map_err(|_| AppError::BadRequest("Invalid date format".into())),
        None => Ok(fallback),
    }
}

/* --------------------------------------------------------------------------
Query
-------------------------------------------------------------------------- */

/// GET /admin/audit-logs
///
/// Query audit entries with filters and pagination. Admin only.
pub async fn query_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<AuditQueryParams>,
) -> AppResult<impl IntoResponse> {
    let from = if params.from.is_some() {
        Some(parse_timestamp(&params.from, chrono::Utc::now())?)
    } else {
        None
    };
    let to = if params.to.is_some() {
        Some(parse_timestamp(&params.to, chrono::Utc::now())?)
    } else {
        None
    };

    let query = AuditQuery {
        content_key: params.key,
        action: params.action,
        actor_id: params.actor_id,
        from,
        to,
        limit: params.limit,
        offset: params.offset,
    };

    let items = AuditLogRepo::query(&state.pool, &query).await?;
    let total = AuditLogRepo::count(&state.pool, &query).await?;

    Ok(Json(DataResponse {
        data: AuditLogPage { items, total },
    }))
}

/* --------------------------------------------------------------------------
Export
-------------------------------------------------------------------------- */

/// GET /admin/audit-logs/export?format=csv|json&from=X&to=Y
///
/// Export audit entries for a date range. Admin only.
pub async fn export_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let from = parse_timestamp(
        &params.from,
        chrono::Utc::now() - chrono::Duration::days(30),
    )?;
    let to = parse_timestamp(&params.to, chrono::Utc::now())?;

    let entries = AuditLogRepo::export_range(&state.pool, from, to).await?;

    let format = params.format.as_deref().unwrap_or("json");

    match format {
        "csv" => {
            let mut csv_output =
                String::from("id,created_at,content_key,action,revision_no,actor_id\n");
            for entry in &entries {
                csv_output.push_str(&format!(
                    "{},{},{},{},{},{}\n",
                    entry.id,
                    entry.created_at.to_rfc3339(),
                    entry.content_key,
                    entry.action,
                    entry.revision_no,
                    entry.actor_id,
                ));
            }

            Ok(axum::response::Response::builder()
                .status(200)
                .header("Content-Type", "text/csv")
                .header(
                    "Content-Disposition",
                    "attachment; filename=\"content-audit-logs.csv\"",
                )
                .body(axum::body::Body::from(csv_output))
                .map_err(|e| AppError::InternalError(e.to_string()))?
                .into_response())
        }
        _ => Ok(Json(DataResponse { data: entries }).into_response()),
    }
}

/* --------------------------------------------------------------------------
Integrity check
-------------------------------------------------------------------------- */

/// GET /admin/audit-logs/integrity-check
///
/// Walk the audit hash chain and verify every entry. Admin only.
pub async fn check_integrity(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<impl IntoResponse> {
    let entries = AuditLogRepo::fetch_for_integrity_check(&state.pool).await?;

    let mut verified: i64 = 0;
    let mut prev_hash: Option<String> = None;
    let mut first_break: Option<i64> = None;

    for entry in &entries {
        let entry_data = canonical_entry_data(
            &entry.content_key,
            &entry.action,
            entry.revision_no,
            entry.actor_id,
        );
        let expected_hash = compute_integrity_hash(prev_hash.as_deref(), &entry_data);

        if let Some(ref stored_hash) = entry.integrity_hash {
            if *stored_hash != expected_hash {
                first_break = Some(entry.id);
                break;
            }
        }
        // Entries without a hash are skipped in chain validation but still
        // counted.

        verified += 1;
        prev_hash = entry.integrity_hash.clone();
    }

    let result = IntegrityCheckResult {
        verified_entries: verified,
        chain_valid: first_break.is_none(),
        first_break,
    };

    Ok(Json(DataResponse { data: result }))
}
