//! Repository for the `site_content_public` table.
//!
//! The projection is upserted in place: one row per key, overwritten on
//! every publish or rollback. Upserting the same (key, revision) twice is
//! idempotent.

use sqlx::{PgPool, Postgres, Transaction};

use pressroom_core::types::{RevisionNo, Timestamp};

use crate::models::public_snapshot::PublicSnapshot;

/// Column list for site_content_public queries.
const COLUMNS: &str = "id, key, payload, published_revision, published_at, created_at, updated_at";

/// Provides upsert and read operations for the public projection.
pub struct PublicSnapshotRepo;

impl PublicSnapshotRepo {
    /// Upsert the published payload for a key inside the caller's
    /// transaction.
    pub async fn publish(
        tx: &mut Transaction<'_, Postgres>,
        key: &str,
        payload: &serde_json::Value,
        published_revision: RevisionNo,
        published_at: Timestamp,
    ) -> Result<PublicSnapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_content_public (key, payload, published_revision, published_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (key) DO UPDATE SET
                payload = EXCLUDED.payload,
                published_revision = EXCLUDED.published_revision,
                published_at = EXCLUDED.published_at,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PublicSnapshot>(&query)
            .bind(key)
            .bind(payload)
            .bind(published_revision)
            .bind(published_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find the public snapshot for a key.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<PublicSnapshot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_content_public WHERE key = $1");
        sqlx::query_as::<_, PublicSnapshot>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }
}
