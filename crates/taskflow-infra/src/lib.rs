//! # TaskFlow Infrastructure
//!
//! Concrete implementations of the ports defined in `taskflow-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network stack, credential storage only
//! - `http` - reqwest-backed API client

pub mod storage;

#[cfg(feature = "http")]
pub mod http;

pub use storage::{FileCredentialStore, InMemoryCredentialStore};

#[cfg(feature = "http")]
pub use http::{HttpApiClient, HttpConfig};
