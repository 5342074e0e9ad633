use async_trait::async_trait;

/// Explicit user confirmation for destructive actions.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Ask `prompt`; `true` means the user agreed.
    async fn confirm(&self, prompt: &str) -> bool;
}
