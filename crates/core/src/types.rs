/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Revision numbers are allocated per content key, starting at 1.
pub type RevisionNo = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Principal identifiers issued by the external identity provider.
pub type ActorId = uuid::Uuid;
