//! Filename-suffix file categorization.
//!
//! The catalog stores no MIME type; photo/video detection everywhere in
//! the system (profile aggregates, re-send kind selection) is by name
//! suffix alone.

use serde::{Deserialize, Serialize};

/// Coarse file category derived from the filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// `.jpg`, `.jpeg`, `.png`.
    Photo,
    /// `.mp4`, `.mov`.
    Video,
    /// Everything else.
    Doc,
}

impl FileCategory {
    /// Classify a filename by its suffix, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if [".jpg", ".jpeg", ".png"].iter().any(|s| lower.ends_with(s)) {
            Self::Photo
        } else if [".mp4", ".mov"].iter().any(|s| lower.ends_with(s)) {
            Self::Video
        } else {
            Self::Doc
        }
    }
}
