//! Interactive dashboard.
//!
//! Keeps one task collection alive across commands, the way the
//! dashboard page does between clicks. Changing the filter re-fetches.

use anyhow::Result;

use taskflow_core::domain::{TaskDraft, TaskFilter, TaskId};
use taskflow_core::{DeleteOutcome, Route};

use crate::prompt::Prompter;
use crate::router::Router;
use crate::state::AppState;
use crate::views::auth;
use crate::views::dashboard::Dashboard;

const HELP: &str = "\
Commands:
  filter <all|pending|completed>   show tasks with that status
  refresh                          reload the current filter
  add <title> [| description]      create a task
  toggle <id>                      flip pending/completed
  delete <id>                      delete a task (asks first)
  logout                           sign out and leave
  help                             show this text
  quit                             leave";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(TaskFilter),
    Refresh,
    Add(TaskDraft),
    Toggle(TaskId),
    Delete(TaskId),
    Logout,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match word {
            "filter" | "f" => Command::Filter(rest.parse()?),
            "refresh" | "r" => Command::Refresh,
            "add" | "a" => {
                let draft = match rest.split_once('|') {
                    Some((title, description)) => {
                        TaskDraft::new(title.trim()).with_description(description.trim())
                    }
                    None => TaskDraft::new(rest),
                };
                Command::Add(draft)
            }
            "toggle" | "t" => Command::Toggle(parse_id(rest)?),
            "delete" | "d" => Command::Delete(parse_id(rest)?),
            "logout" => Command::Logout,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command '{}'. Type `help`.", other)),
        };
        Ok(Some(command))
    }
}

fn parse_id(raw: &str) -> Result<TaskId, String> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| format!("Expected a task id, got '{}'", raw))
}

pub async fn run(app: &AppState, router: &mut Router, prompter: &Prompter) -> Result<()> {
    let dashboard = Dashboard::new(&app.tasks);

    if let Err(e) = dashboard.load(TaskFilter::All).await {
        eprintln!("{}", e);
    }
    print!("{}", dashboard.render().await);
    println!("Type `help` for commands.");

    loop {
        let Some(line) = prompter.read_line("> ").await? else {
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        let outcome = match command {
            Command::Filter(filter) => dashboard.load(filter).await.map(|_| true),
            Command::Refresh => {
                let filter = app.tasks.filter().await;
                dashboard.load(filter).await.map(|_| true)
            }
            Command::Add(draft) => dashboard.create(&draft).await.map(|task| {
                println!("Created task #{}.", task.id);
                true
            }),
            Command::Toggle(id) => dashboard.toggle(id).await.map(|task| {
                println!("Task #{} is now {}.", task.id, task.status);
                true
            }),
            Command::Delete(id) => dashboard.delete(id, prompter).await.map(|outcome| {
                match outcome {
                    DeleteOutcome::Deleted => println!("Deleted task #{}.", id),
                    DeleteOutcome::Declined => println!("Kept task #{}.", id),
                }
                outcome == DeleteOutcome::Deleted
            }),
            Command::Logout => {
                auth::logout(app).await?;
                if let Some(to) = router.watch(Route::Dashboard).await {
                    println!("Continue at {}: run `taskflow login`.", to);
                }
                break;
            }
            Command::Help => {
                println!("{}", HELP);
                Ok(false)
            }
            Command::Quit => break,
        };

        match outcome {
            Ok(true) => print!("{}", dashboard.render().await),
            Ok(false) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse("filter completed"),
            Ok(Some(Command::Filter(TaskFilter::Completed)))
        );
        assert_eq!(Command::parse("  "), Ok(None));
        assert_eq!(Command::parse("toggle #12"), Ok(Some(Command::Toggle(12))));
        assert_eq!(Command::parse("d 3"), Ok(Some(Command::Delete(3))));
        assert!(Command::parse("toggle abc").is_err());
        assert!(Command::parse("dance").is_err());
    }

    #[test]
    fn test_parse_add_with_description() {
        assert_eq!(
            Command::parse("add Buy milk | 2L, skimmed"),
            Ok(Some(Command::Add(
                TaskDraft::new("Buy milk").with_description("2L, skimmed")
            )))
        );
        assert_eq!(
            Command::parse("add Buy milk"),
            Ok(Some(Command::Add(TaskDraft::new("Buy milk"))))
        );
    }
}
