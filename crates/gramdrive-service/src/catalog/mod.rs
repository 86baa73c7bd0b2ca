//! The catalog engine: per-user forest queries and tree mutations.

pub mod profile;
pub mod service;

pub use profile::ProfileSummary;
pub use service::{CatalogService, ListMode, MAX_TREE_DEPTH};
