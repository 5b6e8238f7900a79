//! Public projection model.

use serde::Serialize;
use sqlx::FromRow;

use pressroom_core::types::{DbId, RevisionNo, Timestamp};

/// A row from the `site_content_public` table: the publicly readable copy
/// of the last published payload for a key. Never carries draft content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicSnapshot {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub key: String,
    pub payload: serde_json::Value,
    pub published_revision: RevisionNo,
    pub published_at: Timestamp,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}
