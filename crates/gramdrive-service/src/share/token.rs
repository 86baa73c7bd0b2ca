//! Share tokens.
//!
//! Sharing is bearer-token style: anyone holding a valid token can
//! resolve it regardless of ownership. Tokens double as bot deep-link
//! arguments, so the format stays URL-safe.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use gramdrive_core::error::AppError;

/// A parsed share token: `file_<id>` or `folder_<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareToken {
    /// A single shared file.
    File(Uuid),
    /// A shared folder subtree.
    Folder(Uuid),
}

impl FromStr for ShareToken {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(raw) = s.strip_prefix("file_") {
            let id = Uuid::parse_str(raw)
                .map_err(|_| AppError::validation("Malformed file share token"))?;
            return Ok(Self::File(id));
        }
        if let Some(raw) = s.strip_prefix("folder_") {
            let id = Uuid::parse_str(raw)
                .map_err(|_| AppError::validation("Malformed folder share token"))?;
            return Ok(Self::Folder(id));
        }
        Err(AppError::validation("Unrecognized share token"))
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(id) => write!(f, "file_{id}"),
            Self::Folder(id) => write!(f, "folder_{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = Uuid::new_v4();
        let token: ShareToken = format!("folder_{id}").parse().unwrap();
        assert_eq!(token, ShareToken::Folder(id));
        assert_eq!(token.to_string(), format!("folder_{id}"));
    }

    #[test]
    fn test_file_token() {
        let id = Uuid::new_v4();
        assert_eq!(
            format!("file_{id}").parse::<ShareToken>().unwrap(),
            ShareToken::File(id)
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("share_abc".parse::<ShareToken>().is_err());
        assert!("file_not-a-uuid".parse::<ShareToken>().is_err());
        assert!("".parse::<ShareToken>().is_err());
    }
}
