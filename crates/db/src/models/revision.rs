//! Revision log models.
//!
//! Revisions are immutable full-payload snapshots, appended on every
//! successful mutation of a content key.

use serde::Serialize;
use sqlx::FromRow;

use pressroom_core::types::{ActorId, DbId, RevisionNo, Timestamp};

/// A row from the `site_content_revisions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionEntry {
    pub id: DbId,
    pub content_key: String,
    pub revision_no: RevisionNo,
    pub action: String,
    pub payload: serde_json::Value,
    pub note: Option<String>,
    pub actor_id: ActorId,
    pub meta: serde_json::Value,
    pub created_at: Timestamp,
}

/// A revision list item without the payload body, as returned by
/// `load` / `history`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevisionSummary {
    pub revision_no: RevisionNo,
    pub action: String,
    pub note: Option<String>,
    pub actor_id: ActorId,
    pub meta: serde_json::Value,
    pub created_at: Timestamp,
}
