//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs where the API accepts a body
//! - `Serialize` view/response types composed from entities

pub mod audit;
pub mod content;
pub mod public_snapshot;
pub mod revision;
