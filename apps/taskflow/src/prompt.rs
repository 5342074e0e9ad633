//! Line-based terminal input shared by prompts and confirmations.

use std::io::Write;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use taskflow_core::ports::Confirm;

/// Reads answers from stdin, one line at a time.
pub struct Prompter {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Prompter {
    pub fn stdin() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        print!("{}", prompt);
        std::io::stdout().flush()?;
        lines.next_line().await
    }
}

#[async_trait]
impl Confirm for Prompter {
    async fn confirm(&self, prompt: &str) -> bool {
        match self.read_line(&format!("{} [y/N] ", prompt)).await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

/// Confirmation given up front (`--yes`).
pub struct AssumeYes;

#[async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
