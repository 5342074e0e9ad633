//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use taskflow_infra::HttpConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http: HttpConfig,
    /// Directory holding the persisted credential. `None` when no home
    /// directory can be determined.
    pub home: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            http: HttpConfig::from_env(),
            home: Self::resolve_home(),
            telemetry: TelemetryConfig::from_env(),
        }
    }

    /// Apply command-line overrides.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.http.base_url = url;
        }
        self
    }

    /// TASKFLOW_HOME, else ~/.config/taskflow.
    fn resolve_home() -> Option<PathBuf> {
        if let Ok(home) = env::var("TASKFLOW_HOME") {
            return Some(PathBuf::from(home));
        }
        dirs::home_dir().map(|h| h.join(".config").join("taskflow"))
    }
}
