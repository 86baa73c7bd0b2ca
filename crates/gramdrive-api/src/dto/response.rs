//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Short status token returned by every mutating endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Liveness body for GET /.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub message: String,
}

impl LivenessResponse {
    pub fn working() -> Self {
        Self {
            message: "Working".to_string(),
        }
    }
}
