//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod api;
mod confirm;
mod storage;

pub use api::{ApiClient, RequestBody, decode};
pub use confirm::Confirm;
pub use storage::{CREDENTIAL_KEY, CredentialSource, CredentialStore};
