//! Access control: blocked users and the administrator identity.

pub mod service;

pub use service::AccessService;
