//! # gramdrive-entity
//!
//! Domain entity models for GramDrive: the catalog item forest, user
//! accounts, inbound chat attachments, and filename-based file
//! categorization.

pub mod attachment;
pub mod item;
pub mod user;

pub use attachment::{Attachment, AttachmentKind};
pub use item::{CreateItem, FileCategory, Item, ItemKind};
pub use user::User;
