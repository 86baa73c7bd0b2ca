//! Inbound chat attachments.
//!
//! An inbound message carries at most one attachment of interest. The
//! transport layer classifies the raw message into an [`Attachment`]
//! before it reaches the ingestion service.

use serde::{Deserialize, Serialize};

/// The provider-side kind of an inbound attachment.
///
/// Classification priority when several are present is
/// document > photo > video > audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// A generic document.
    Document,
    /// A photo (the largest rendition is kept).
    Photo,
    /// A video.
    Video,
    /// An audio track.
    Audio,
    /// Present but unrecognized.
    Unknown,
}

/// A classified inbound attachment, ready for cataloging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Provider-side kind.
    pub kind: AttachmentKind,
    /// Opaque provider file handle.
    pub handle: String,
    /// Declared or synthesized display name.
    pub name: String,
    /// Byte size, 0 if the provider did not report one.
    pub size: i64,
}
