use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Opaque bearer token. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token. Empty or whitespace-only tokens are rejected.
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ValidationError::new("credential", "Credential is empty"));
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Account identity. Declared for the session shape but not fetched yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Derived authentication state of this client instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub credential: Option<Credential>,
    pub user: Option<User>,
    /// True only while the persisted credential is being read at startup.
    pub loading: bool,
}

impl Session {
    /// State before durable storage has been read.
    pub fn hydrating() -> Self {
        Self {
            credential: None,
            user: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
