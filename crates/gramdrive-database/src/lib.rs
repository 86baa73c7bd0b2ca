//! # gramdrive-database
//!
//! PostgreSQL connection management, the `ItemStore`/`UserStore` traits,
//! and their concrete sqlx repository implementations.
//!
//! The store traits are defined here rather than in `gramdrive-core`
//! because they speak in entity types; the service layer holds them as
//! `Arc<dyn ...>` so tests can substitute in-memory doubles.

pub mod connection;
pub mod migration;
pub mod query;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{ItemStore, UserStore};
