//! Credential storage - file-backed and in-memory fallback.

mod file;
mod memory;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;
