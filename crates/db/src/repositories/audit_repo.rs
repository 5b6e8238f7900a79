//! Repository for the `content_audit_logs` table.
//!
//! Appends are best-effort from the workflow's point of view: callers log
//! and swallow failures so a broken audit trail never rolls back a
//! committed content mutation.

use sqlx::PgPool;

use pressroom_core::audit::{canonical_entry_data, compute_integrity_hash};
use pressroom_core::types::{ActorId, Timestamp};

use crate::models::audit::{AuditLogEntry, AuditQuery, CreateAuditLog};

/// Column list for content_audit_logs queries.
const COLUMNS: &str = "\
    id, content_key, action, revision_no, actor_id, details, integrity_hash, created_at";

/// Provides append and query operations for the audit trail.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an audit entry, chaining its integrity hash to the most
    /// recent entry.
    pub async fn append(
        pool: &PgPool,
        input: &CreateAuditLog,
    ) -> Result<AuditLogEntry, sqlx::Error> {
        let prev_hash = Self::find_last_hash(pool).await?;
        let entry_data = canonical_entry_data(
            &input.content_key,
            &input.action,
            input.revision_no,
            input.actor_id,
        );
        let hash = compute_integrity_hash(prev_hash.as_deref(), &entry_data);

        let query = format!(
            "INSERT INTO content_audit_logs
                (content_key, action, revision_no, actor_id, details, integrity_hash)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(&input.content_key)
            .bind(&input.action)
            .bind(input.revision_no)
            .bind(input.actor_id)
            .bind(&input.details)
            .bind(&hash)
            .fetch_one(pool)
            .await
    }

    /// Query audit entries with filtering and pagination, newest first.
    pub async fn query(
        pool: &PgPool,
        params: &AuditQuery,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let limit = params.limit.unwrap_or(50).min(500);
        let offset = params.offset.unwrap_or(0);

        let (where_clause, bind_values, bind_idx) = build_audit_filter(params);

        let query = format!(
            "SELECT {COLUMNS} FROM content_audit_logs {where_clause} \
             ORDER BY id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_audit_values(sqlx::query_as::<_, AuditLogEntry>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count audit entries matching the given filter (for pagination
    /// metadata).
    pub async fn count(pool: &PgPool, params: &AuditQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_audit_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT FROM content_audit_logs {where_clause}");

        let q = bind_audit_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Find the integrity hash of the most recent audit entry.
    pub async fn find_last_hash(pool: &PgPool) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<String>>(
            "SELECT integrity_hash FROM content_audit_logs ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(pool)
        .await
        .map(|opt| opt.flatten())
    }

    /// Fetch all entries ordered by id for sequential hash-chain checking.
    pub async fn fetch_for_integrity_check(
        pool: &PgPool,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_audit_logs ORDER BY id ASC");
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .fetch_all(pool)
            .await
    }

    /// Export audit entries within a time range, oldest first.
    pub async fn export_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<AuditLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_audit_logs \
             WHERE created_at >= $1 AND created_at <= $2 \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, AuditLogEntry>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built audit queries.
enum BindValue {
    Text(String),
    Actor(ActorId),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from `AuditQuery` filter parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when no filters are active, or starts with `WHERE `.
fn build_audit_filter(params: &AuditQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref content_key) = params.content_key {
        conditions.push(format!("content_key = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(content_key.clone()));
    }

    if let Some(ref action) = params.action {
        conditions.push(format!("action = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(action.clone()));
    }

    if let Some(actor_id) = params.actor_id {
        conditions.push(format!("actor_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Actor(actor_id));
    }

    if let Some(from) = params.from {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = params.to {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_audit_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Actor(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_audit_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Actor(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
