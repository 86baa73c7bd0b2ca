//! Catalog item entity.

pub mod category;
pub mod model;

pub use category::FileCategory;
pub use model::{CreateItem, Item, ItemKind};
