//! Audit-trail hashing utilities.
//!
//! Each audit entry carries a SHA-256 integrity hash chained to its
//! predecessor so tampering with the trail is detectable. The canonical
//! entry data is built from stored columns only, so the chain can be
//! re-verified from the table alone.

use sha2::{Digest, Sha256};

use crate::types::{ActorId, RevisionNo};

/// Known seed value for the first entry in the hash chain.
const CHAIN_SEED: &str = "CONTENT_AUDIT_CHAIN_SEED_V1";

/// Build the canonical string an entry's integrity hash is computed over.
///
/// Uses only columns stored on the row (key, action, revision number, actor)
/// so verification never depends on insert-time state.
pub fn canonical_entry_data(
    content_key: &str,
    action: &str,
    revision_no: RevisionNo,
    actor_id: ActorId,
) -> String {
    format!("{content_key}|{action}|{revision_no}|{actor_id}")
}

/// Compute the SHA-256 integrity hash for an audit entry.
///
/// `prev_hash` is the hash of the previous entry, or `None` for the first
/// entry in the chain (which uses a known seed value).
pub fn compute_integrity_hash(prev_hash: Option<&str>, entry_data: &str) -> String {
    let prev = prev_hash.unwrap_or(CHAIN_SEED);
    let combined = format!("{prev}|{entry_data}");
    let hash = Sha256::digest(combined.as_bytes());
    format!("{hash:x}")
}
