//! # gramdrive-core
//!
//! Core crate for GramDrive. Contains configuration schemas, the chat
//! transport capability trait, filter/sorting types for the item store,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other GramDrive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
