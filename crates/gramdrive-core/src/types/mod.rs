//! Shared types used across crate boundaries.

pub mod filter;
pub mod sorting;

pub use filter::{FilterField, FilterOp, FilterValue};
pub use sorting::{SortDirection, SortField};
