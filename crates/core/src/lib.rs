//! Domain logic for the versioned site-content service.
//!
//! This crate has no internal dependencies so it can be used by both the
//! repository/API layers and any future CLI or worker tooling.

pub mod audit;
pub mod content;
pub mod error;
pub mod roles;
pub mod types;
