//! Catalog profile aggregates.

use serde::{Deserialize, Serialize};

use gramdrive_entity::item::{FileCategory, Item};

/// Aggregate view of a user's catalog, rendered on the profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Number of file items (folders excluded).
    pub total_files: u64,
    /// Number of folders.
    pub total_folders: u64,
    /// Total size in mebibytes, rounded half-up to 2 decimal places.
    pub total_size_mb: f64,
    /// Files categorized as photos by suffix.
    pub photos: u64,
    /// Files categorized as videos by suffix.
    pub videos: u64,
    /// Remaining files.
    pub docs: u64,
}

impl ProfileSummary {
    /// Summarize a user's items. Folders contribute a count but no size.
    pub fn of(items: &[Item]) -> Self {
        let mut summary = Self {
            total_files: 0,
            total_folders: 0,
            total_size_mb: 0.0,
            photos: 0,
            videos: 0,
            docs: 0,
        };

        let mut total_bytes: i64 = 0;
        for item in items {
            if item.kind.is_folder() {
                summary.total_folders += 1;
                continue;
            }
            summary.total_files += 1;
            total_bytes += item.size;
            match item.category() {
                FileCategory::Photo => summary.photos += 1,
                FileCategory::Video => summary.videos += 1,
                FileCategory::Doc => summary.docs += 1,
            }
        }

        summary.total_size_mb = mebibytes_rounded(total_bytes);
        summary
    }
}

/// Convert a byte count to mebibytes, rounded half-up to 2 decimals.
fn mebibytes_rounded(bytes: i64) -> f64 {
    let mib = bytes as f64 / (1024.0 * 1024.0);
    (mib * 100.0).round() / 100.0
}
