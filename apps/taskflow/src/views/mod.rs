//! Views - capture input, delegate to the core services, print results.

pub mod auth;
pub mod dashboard;
pub mod shell;

use taskflow_core::ClientError;

/// Turn a failed operation into the message shown to the user.
pub fn failure(err: impl Into<ClientError>, fallback: &str) -> anyhow::Error {
    let err = err.into();
    tracing::debug!(error = %err, "{}", fallback);
    anyhow::anyhow!(err.user_message(fallback))
}
