//! Content-key and payload validation plus revision-numbering rules.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the repository and API layers.

use crate::error::CoreError;
use crate::types::RevisionNo;

// ---------------------------------------------------------------------------
// Revision action constants
// ---------------------------------------------------------------------------

/// Actions recorded in the revision log (and mirrored in the audit trail).
pub mod actions {
    pub const SAVE_DRAFT: &str = "save_draft";
    pub const PUBLISH: &str = "publish";
    pub const ROLLBACK: &str = "rollback";
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of revision summaries returned by `load` / `history`.
pub const HISTORY_LIMIT: i64 = 30;

/// Maximum length of a content key.
pub const MAX_KEY_LENGTH: usize = 100;

/// Maximum length of a revision note.
pub const MAX_NOTE_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Revision numbering
// ---------------------------------------------------------------------------

/// Allocate the revision number for the next mutation of a key.
///
/// Revision numbers are contiguous per key: every successful mutating
/// operation advances the head by exactly one.
pub fn next_revision(current_revision: RevisionNo) -> RevisionNo {
    current_revision + 1
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a content key (non-empty, <= 100 chars, lowercase alphanumeric
/// plus hyphens and underscores).
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation("Content key must not be empty".into()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content key must be at most {MAX_KEY_LENGTH} characters"
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Content key must contain only lowercase alphanumeric characters, hyphens, and underscores"
                .into(),
        ));
    }
    Ok(())
}

/// Validate a draft payload: it must be a JSON object.
///
/// The payload is otherwise opaque; no schema validation is applied to its
/// contents.
pub fn validate_payload(payload: &serde_json::Value) -> Result<(), CoreError> {
    if !payload.is_object() {
        return Err(CoreError::Validation(
            "Payload must be a JSON object".into(),
        ));
    }
    Ok(())
}

/// Validate an optional revision note (<= 500 chars).
pub fn validate_note(note: Option<&str>) -> Result<(), CoreError> {
    if let Some(note) = note {
        if note.len() > MAX_NOTE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Note must be at most {MAX_NOTE_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
