//! # gramdrive-service
//!
//! Business logic service layer for GramDrive. Each service orchestrates
//! the item/user stores and the chat transport to implement
//! application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references, so tests can substitute
//! in-memory doubles for the store and transport.

pub mod access;
pub mod catalog;
pub mod ingest;
pub mod share;

#[cfg(test)]
pub(crate) mod testutil;

pub use access::AccessService;
pub use catalog::{CatalogService, ListMode, ProfileSummary, MAX_TREE_DEPTH};
pub use ingest::IngestService;
pub use share::{Distributor, ShareService, ShareToken, TreeRenderer};
