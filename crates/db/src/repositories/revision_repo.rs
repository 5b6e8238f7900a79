//! Repository for the `site_content_revisions` table.
//!
//! Revisions are append-only: rows are inserted by the workflow mutations
//! and never updated or deleted afterwards.

use sqlx::{PgPool, Postgres, Transaction};

use pressroom_core::types::{ActorId, RevisionNo};

use crate::models::revision::{RevisionEntry, RevisionSummary};

/// Column list for site_content_revisions queries.
const COLUMNS: &str =
    "id, content_key, revision_no, action, payload, note, actor_id, meta, created_at";

/// Column list for payload-free summary queries.
const SUMMARY_COLUMNS: &str = "revision_no, action, note, actor_id, meta, created_at";

/// Provides append and read operations for content revisions.
pub struct RevisionRepo;

impl RevisionRepo {
    /// Append a revision inside the caller's transaction.
    ///
    /// Fails with a unique violation on `uq_content_revisions_key_revision`
    /// when another writer already claimed `revision_no` for this key.
    #[allow(clippy::too_many_arguments)]
    pub async fn append(
        tx: &mut Transaction<'_, Postgres>,
        content_key: &str,
        revision_no: RevisionNo,
        action: &str,
        payload: &serde_json::Value,
        note: Option<&str>,
        actor_id: ActorId,
        meta: &serde_json::Value,
    ) -> Result<RevisionEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_content_revisions
                (content_key, revision_no, action, payload, note, actor_id, meta)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RevisionEntry>(&query)
            .bind(content_key)
            .bind(revision_no)
            .bind(action)
            .bind(payload)
            .bind(note)
            .bind(actor_id)
            .bind(meta)
            .fetch_one(&mut **tx)
            .await
    }

    /// List the newest `limit` revision summaries for a key, newest first.
    pub async fn list_summaries(
        pool: &PgPool,
        content_key: &str,
        limit: i64,
    ) -> Result<Vec<RevisionSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM site_content_revisions
             WHERE content_key = $1
             ORDER BY revision_no DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, RevisionSummary>(&query)
            .bind(content_key)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a specific revision of a key.
    pub async fn find_by_key_and_revision(
        pool: &PgPool,
        content_key: &str,
        revision_no: RevisionNo,
    ) -> Result<Option<RevisionEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_content_revisions
             WHERE content_key = $1 AND revision_no = $2"
        );
        sqlx::query_as::<_, RevisionEntry>(&query)
            .bind(content_key)
            .bind(revision_no)
            .fetch_optional(pool)
            .await
    }

    /// Get the latest revision number recorded for a key (0 if none exist).
    pub async fn latest_revision_no(
        pool: &PgPool,
        content_key: &str,
    ) -> Result<RevisionNo, sqlx::Error> {
        let result: Option<(RevisionNo,)> = sqlx::query_as(
            "SELECT COALESCE(MAX(revision_no), 0) FROM site_content_revisions WHERE content_key = $1",
        )
        .bind(content_key)
        .fetch_optional(pool)
        .await?;

        Ok(result.map(|(v,)| v).unwrap_or(0))
    }
}
