//! Content record and workflow DTO models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pressroom_core::types::{ActorId, DbId, RevisionNo, Timestamp};

use crate::models::revision::RevisionSummary;

/// A row from the `site_content` table: one mutable record per content key,
/// holding the current draft, the last published payload, and revision
/// pointers into the revision log.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentRecord {
    pub id: DbId,
    pub key: String,
    pub payload_draft: serde_json::Value,
    pub payload_published: Option<serde_json::Value>,
    pub current_revision: RevisionNo,
    pub published_revision: Option<RevisionNo>,
    pub published_at: Option<Timestamp>,
    pub updated_by: Option<ActorId>,
    pub published_by: Option<ActorId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The admin view returned by every workflow operation: draft, published
/// payload, revision pointers, and the newest revision summaries.
///
/// An absent key yields a zeroed view (revision 0, no payloads, empty
/// history) rather than an error, since records are created lazily on the
/// first draft save.
#[derive(Debug, Serialize)]
pub struct ContentView {
    pub key: String,
    pub payload_draft: Option<serde_json::Value>,
    pub payload_published: Option<serde_json::Value>,
    pub current_revision: RevisionNo,
    pub published_revision: Option<RevisionNo>,
    pub published_at: Option<Timestamp>,
    pub revisions: Vec<RevisionSummary>,
}

/// Request body for saving a draft.
///
/// `payload` is optional at the type level so a missing field surfaces as a
/// validation error rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SaveDraftRequest {
    pub payload: Option<serde_json::Value>,
    pub note: Option<String>,
}

/// Optional request body for publish and rollback.
#[derive(Debug, Default, Deserialize)]
pub struct ActionRequest {
    pub note: Option<String>,
}
