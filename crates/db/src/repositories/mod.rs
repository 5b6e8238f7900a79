//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a caller-owned transaction) as the first argument.

pub mod audit_repo;
pub mod content_repo;
pub mod public_snapshot_repo;
pub mod revision_repo;

pub use audit_repo::AuditLogRepo;
pub use content_repo::ContentRepo;
pub use public_snapshot_repo::PublicSnapshotRepo;
pub use revision_repo::RevisionRepo;
