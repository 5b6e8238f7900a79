//! Well-known role name constants.
//!
//! These must match the role claims issued by the identity provider. Only
//! `admin` may mutate content; the other names exist so the claims
//! vocabulary round-trips unchanged.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";
