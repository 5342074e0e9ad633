//! # TaskFlow
//!
//! Command-line client for the TaskFlow task tracker.

use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Parser;

use taskflow_core::domain::{TaskDraft, TaskFilter};
use taskflow_core::{DeleteOutcome, Route};

mod cli;
mod config;
mod prompt;
mod router;
mod state;
mod telemetry;
mod views;

use cli::{Cli, Commands};
use config::AppConfig;
use prompt::{AssumeYes, Prompter};
use router::{Navigation, Router};
use state::AppState;
use views::dashboard::Dashboard;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_api_url(cli.api_url.clone());

    telemetry::init_telemetry(&config.telemetry);

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    let app = AppState::new(config).await?;
    let prompter = Prompter::stdin();
    let mut router = app.router();

    if let Some(route) = command.route() {
        enter(&mut router, route).await?;
    }

    match command {
        Commands::Register { email, password } => {
            views::auth::register(&app, &prompter, email, password).await
        }
        Commands::Login { email, password } => {
            views::auth::login(&app, &prompter, email, password).await
        }
        Commands::Logout => views::auth::logout(&app).await,
        Commands::Status => {
            views::auth::status(&app);
            Ok(())
        }
        Commands::Tasks { filter } => {
            let dashboard = Dashboard::new(&app.tasks);
            dashboard.load(filter).await?;
            print!("{}", dashboard.render().await);
            Ok(())
        }
        Commands::Add { title, description } => {
            let mut draft = TaskDraft::new(title);
            draft.description = description;
            let task = Dashboard::new(&app.tasks).create(&draft).await?;
            println!("Created task #{}: {}", task.id, task.title);
            Ok(())
        }
        Commands::Toggle { id } => {
            let dashboard = Dashboard::new(&app.tasks);
            dashboard.load(TaskFilter::All).await?;
            let task = dashboard.toggle(id).await?;
            println!("Task #{} is now {}.", task.id, task.status);
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let dashboard = Dashboard::new(&app.tasks);
            dashboard.load(TaskFilter::All).await?;
            let outcome = if yes {
                dashboard.delete(id, &AssumeYes).await?
            } else {
                dashboard.delete(id, &prompter).await?
            };
            match outcome {
                DeleteOutcome::Deleted => println!("Deleted task #{}.", id),
                DeleteOutcome::Declined => println!("Kept task #{}.", id),
            }
            Ok(())
        }
        Commands::Shell => views::shell::run(&app, &mut router, &prompter).await,
    }
}

/// Navigate to the command's view, refusing if the guard redirects.
async fn enter(router: &mut Router, route: Route) -> Result<()> {
    match router.navigate(route).await {
        Navigation::Rendered(_) => Ok(()),
        Navigation::Redirected { to, .. } => {
            bail!("Not signed in. Continue at {}: run `taskflow login`.", to)
        }
        Navigation::Pending => bail!("Session is still loading"),
    }
}
