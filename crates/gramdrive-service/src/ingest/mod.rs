//! Inbound attachment ingestion.

pub mod service;

pub use service::IngestService;
