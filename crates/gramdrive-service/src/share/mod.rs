//! Sharing and distribution: bearer share tokens, subtree copy, tree
//! rendering, and best-effort folder distribution to a chat.

pub mod distribute;
pub mod render;
pub mod service;
pub mod token;

pub use distribute::Distributor;
pub use render::TreeRenderer;
pub use service::ShareService;
pub use token::ShareToken;

use gramdrive_core::traits::transport::SendKind;
use gramdrive_entity::item::FileCategory;

/// Pick the provider send method for a file by its name suffix.
pub fn send_kind_for_name(name: &str) -> SendKind {
    match FileCategory::from_name(name) {
        FileCategory::Photo => SendKind::Photo,
        FileCategory::Video => SendKind::Video,
        FileCategory::Doc => SendKind::Document,
    }
}
