//! HTTP handlers, organized by domain.

pub mod admin;
pub mod catalog;
pub mod health;
pub mod transfer;
