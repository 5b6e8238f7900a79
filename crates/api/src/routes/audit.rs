//! Route definitions for audit trail review.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit;
use crate::state::AppState;

/// Audit routes mounted at `/admin/audit-logs`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET /                  -> query_audit_logs
/// GET /export            -> export_audit_logs
/// GET /integrity-check   -> check_integrity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit::query_audit_logs))
        .route("/export", get(audit::export_audit_logs))
        .route("/integrity-check", get(audit::check_integrity))
}
