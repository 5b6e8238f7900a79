//! Audit trail models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pressroom_core::types::{ActorId, DbId, RevisionNo, Timestamp};

/// A row from the `content_audit_logs` table.
///
/// Deliberately payload-free: the trail records who did what to which key,
/// while the revision log holds the content itself.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLogEntry {
    pub id: DbId,
    pub content_key: String,
    pub action: String,
    pub revision_no: RevisionNo,
    pub actor_id: ActorId,
    pub details: serde_json::Value,
    pub integrity_hash: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub content_key: String,
    pub action: String,
    pub revision_no: RevisionNo,
    pub actor_id: ActorId,
    pub details: serde_json::Value,
}

/// Filter and pagination parameters for audit queries.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub content_key: Option<String>,
    pub action: Option<String>,
    pub actor_id: Option<ActorId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of audit results plus the total match count.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLogEntry>,
    pub total: i64,
}

/// Result of an integrity-chain verification run.
#[derive(Debug, Serialize)]
pub struct IntegrityCheckResult {
    pub verified_entries: i64,
    pub chain_valid: bool,
    pub first_break: Option<DbId>,
}
