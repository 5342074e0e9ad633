//! Command-line surface.

use clap::{Parser, Subcommand};

use taskflow_core::Route;
use taskflow_core::domain::{TaskFilter, TaskId};

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(version)]
#[command(about = "Track your tasks from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides TASKFLOW_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "TASKFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "TASKFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the session
    Logout,

    /// Show whether a session is active
    Status,

    /// List tasks
    #[command(visible_alias = "ls")]
    Tasks {
        /// all, pending or completed
        #[arg(long, short, default_value = "all")]
        filter: TaskFilter,
    },

    /// Create a task
    Add {
        title: String,
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Flip a task between pending and completed
    Toggle {
        #[arg(value_name = "TASK_ID")]
        id: TaskId,
    },

    /// Delete a task
    #[command(visible_alias = "rm")]
    Delete {
        #[arg(value_name = "TASK_ID")]
        id: TaskId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Interactive dashboard
    Shell,
}

impl Commands {
    /// View the command belongs to.
    pub fn route(&self) -> Option<Route> {
        match self {
            Commands::Register { .. } => Some(Route::Register),
            Commands::Login { .. } => Some(Route::Login),
            Commands::Logout | Commands::Status => None,
            Commands::Tasks { .. }
            | Commands::Add { .. }
            | Commands::Toggle { .. }
            | Commands::Delete { .. }
            | Commands::Shell => Some(Route::Dashboard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_task_commands_are_protected() {
        let cli = Cli::try_parse_from(["taskflow", "tasks", "--filter", "completed"]).unwrap();
        assert_eq!(cli.command.route(), Some(Route::Dashboard));
        match cli.command {
            Commands::Tasks { filter } => assert_eq!(filter, TaskFilter::Completed),
            _ => panic!("expected tasks command"),
        }

        let cli = Cli::try_parse_from(["taskflow", "login", "--email", "a@b.com"]).unwrap();
        assert_eq!(cli.command.route(), Some(Route::Login));
    }
}
