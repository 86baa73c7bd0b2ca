//! Capability traits implemented by the infrastructure crates.

pub mod transport;

pub use transport::{ChatTransport, SendKind};
