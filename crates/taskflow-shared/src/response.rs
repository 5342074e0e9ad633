//! Error bodies returned by the backend.
//!
//! Failures carry a `detail` member that is either a plain message or,
//! for request validation failures, a list of field issues.

use serde::{Deserialize, Serialize};

/// A single field-level validation issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub msg: String,
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Issues(Vec<ValidationIssue>),
}

/// Error envelope: `{"detail": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

impl ErrorBody {
    /// Parse an error body, returning `None` for anything unrecognised.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// The human-readable message, if the server supplied one.
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            ErrorDetail::Message(msg) if !msg.is_empty() => Some(msg.clone()),
            ErrorDetail::Message(_) => None,
            ErrorDetail::Issues(issues) => issues.first().map(|issue| issue.msg.clone()),
        }
    }
}
