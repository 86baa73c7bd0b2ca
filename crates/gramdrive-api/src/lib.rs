//! # gramdrive-api
//!
//! HTTP API layer for GramDrive built on Axum.
//!
//! Provides the REST endpoints the web client talks to, CORS, request
//! tracing, DTOs, and the `AppError` to HTTP response mapping.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
