//! Repository for the `site_content` table and the draft/publish/rollback
//! mutations.
//!
//! Each mutation allocates the next revision number and commits the content
//! row write together with the revision append (and the public snapshot
//! upsert on publish/rollback) as a single transaction. The content row
//! write is guarded by an optimistic check on `current_revision`; the
//! revision insert is additionally protected by
//! `uq_content_revisions_key_revision`. A writer that loses either race gets
//! `Ok(None)` so the caller can surface a retryable conflict.

use sqlx::PgPool;

use pressroom_core::content::{actions, next_revision};
use pressroom_core::types::{ActorId, RevisionNo};

use crate::models::content::ContentRecord;
use crate::repositories::public_snapshot_repo::PublicSnapshotRepo;
use crate::repositories::revision_repo::RevisionRepo;

/// Column list for site_content queries.
const COLUMNS: &str = "id, key, payload_draft, payload_published, current_revision, \
    published_revision, published_at, updated_by, published_by, created_at, updated_at";

/// Provides read and workflow-mutation operations for content records.
pub struct ContentRepo;

impl ContentRepo {
    /// Find a content record by key.
    pub async fn find_by_key(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<ContentRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_content WHERE key = $1");
        sqlx::query_as::<_, ContentRecord>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Save a draft payload, creating the record on first write.
    ///
    /// Published fields are left untouched. Returns `Ok(None)` when another
    /// writer advanced the key past `expected_revision` first.
    pub async fn save_draft(
        pool: &PgPool,
        key: &str,
        payload: &serde_json::Value,
        expected_revision: RevisionNo,
        actor_id: ActorId,
        note: Option<&str>,
    ) -> Result<Option<ContentRecord>, sqlx::Error> {
        let revision_no = next_revision(expected_revision);
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO site_content (key, payload_draft, current_revision, updated_by)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (key) DO UPDATE SET
                payload_draft = EXCLUDED.payload_draft,
                current_revision = EXCLUDED.current_revision,
                updated_by = EXCLUDED.updated_by,
                updated_at = NOW()
             WHERE site_content.current_revision = $5
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, ContentRecord>(&query)
            .bind(key)
            .bind(payload)
            .bind(revision_no)
            .bind(actor_id)
            .bind(expected_revision)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(record) = record else {
            tracing::debug!(key = %key, expected = expected_revision, "Revision guard lost");
            return Ok(None);
        };

        let appended = RevisionRepo::append(
            &mut tx,
            key,
            revision_no,
            actions::SAVE_DRAFT,
            payload,
            note,
            actor_id,
            &serde_json::json!({}),
        )
        .await;
        if let Err(err) = appended {
            if is_revision_conflict(&err) {
                tracing::debug!(key = %key, revision = revision_no, "Revision number already claimed");
                return Ok(None);
            }
            return Err(err);
        }

        tx.commit().await?;
        Ok(Some(record))
    }

    /// Publish the current draft, advancing both revision pointers and
    /// updating the public projection.
    ///
    /// The published payload is copied from `payload_draft` inside the
    /// guarded UPDATE, so the snapshot can never diverge from the draft the
    /// caller observed. The draft field is left as-is. Returns `Ok(None)`
    /// on a lost revision race.
    pub async fn publish(
        pool: &PgPool,
        key: &str,
        expected_revision: RevisionNo,
        actor_id: ActorId,
        note: Option<&str>,
    ) -> Result<Option<ContentRecord>, sqlx::Error> {
        let revision_no = next_revision(expected_revision);
        let now = chrono::Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE site_content SET
                payload_published = payload_draft,
                current_revision = $2,
                published_revision = $2,
                published_by = $3,
                published_at = $4,
                updated_by = $3,
                updated_at = $4
             WHERE key = $1 AND current_revision = $5
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, ContentRecord>(&query)
            .bind(key)
            .bind(revision_no)
            .bind(actor_id)
            .bind(now)
            .bind(expected_revision)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(record) = record else {
            tracing::debug!(key = %key, expected = expected_revision, "Revision guard lost");
            return Ok(None);
        };

        // After the UPDATE, payload_draft equals the freshly published payload.
        let appended = RevisionRepo::append(
            &mut tx,
            key,
            revision_no,
            actions::PUBLISH,
            &record.payload_draft,
            note,
            actor_id,
            &serde_json::json!({}),
        )
        .await;
        if let Err(err) = appended {
            if is_revision_conflict(&err) {
                tracing::debug!(key = %key, revision = revision_no, "Revision number already claimed");
                return Ok(None);
            }
            return Err(err);
        }

        PublicSnapshotRepo::publish(&mut tx, key, &record.payload_draft, revision_no, now).await?;

        tx.commit().await?;
        Ok(Some(record))
    }

    /// Roll back to a historical payload: "publish from history".
    ///
    /// Sets BOTH the draft and the published payload to the historical
    /// snapshot, advancing the head rather than rewriting it. Any
    /// unpublished draft in progress is overwritten. Returns `Ok(None)` on
    /// a lost revision race.
    pub async fn rollback(
        pool: &PgPool,
        key: &str,
        payload: &serde_json::Value,
        source_revision: RevisionNo,
        expected_revision: RevisionNo,
        actor_id: ActorId,
        note: Option<&str>,
    ) -> Result<Option<ContentRecord>, sqlx::Error> {
        let revision_no = next_revision(expected_revision);
        let now = chrono::Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE site_content SET
                payload_draft = $2,
                payload_published = $2,
                current_revision = $3,
                published_revision = $3,
                updated_by = $4,
                published_by = $4,
                published_at = $5,
                updated_at = $5
             WHERE key = $1 AND current_revision = $6
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, ContentRecord>(&query)
            .bind(key)
            .bind(payload)
            .bind(revision_no)
            .bind(actor_id)
            .bind(now)
            .bind(expected_revision)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(record) = record else {
            tracing::debug!(key = %key, expected = expected_revision, "Revision guard lost");
            return Ok(None);
        };

        let appended = RevisionRepo::append(
            &mut tx,
            key,
            revision_no,
            actions::ROLLBACK,
            payload,
            note,
            actor_id,
            &serde_json::json!({ "source_revision": source_revision }),
        )
        .await;
        if let Err(err) = appended {
            if is_revision_conflict(&err) {
                tracing::debug!(key = %key, revision = revision_no, "Revision number already claimed");
                return Ok(None);
            }
            return Err(err);
        }

        PublicSnapshotRepo::publish(&mut tx, key, payload, revision_no, now).await?;

        tx.commit().await?;
        Ok(Some(record))
    }
}

/// True when the error is a unique violation on the per-key revision index,
/// i.e. a concurrent writer claimed the same revision number.
fn is_revision_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_content_revisions_key_revision")
        }
        _ => false,
    }
}
