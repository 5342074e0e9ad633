//! Task dashboard view.

use std::fmt::Write;

use anyhow::{Result, anyhow};

use taskflow_core::domain::{Task, TaskDraft, TaskFilter, TaskId, TaskStatus};
use taskflow_core::ports::Confirm;
use taskflow_core::services::CollectionSnapshot;
use taskflow_core::{DeleteOutcome, FetchOutcome, TaskCollectionManager};

use crate::views::failure;

pub const EMPTY_MESSAGE: &str = "No tasks found. Create one to get started!";
pub const LOADING_MESSAGE: &str = "Loading tasks...";

pub const LOAD_FAILED: &str = "Failed to load tasks";
pub const CREATE_FAILED: &str = "Failed to create task";
pub const UPDATE_FAILED: &str = "Failed to update task";
pub const DELETE_FAILED: &str = "Failed to delete task";

/// Dashboard actions over one task collection.
pub struct Dashboard<'a> {
    tasks: &'a TaskCollectionManager,
}

impl<'a> Dashboard<'a> {
    pub fn new(tasks: &'a TaskCollectionManager) -> Self {
        Self { tasks }
    }

    pub async fn load(&self, filter: TaskFilter) -> Result<()> {
        match self
            .tasks
            .fetch_tasks(filter)
            .await
            .map_err(|e| failure(e, LOAD_FAILED))?
        {
            FetchOutcome::Applied { count } => {
                tracing::debug!(%filter, count, "Dashboard loaded");
            }
            FetchOutcome::Stale => {
                tracing::debug!(%filter, "Dashboard load superseded");
            }
        }
        Ok(())
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        draft.validate().map_err(|e| failure(e, CREATE_FAILED))?;
        self.tasks
            .create_task(draft)
            .await
            .map_err(|e| failure(e, CREATE_FAILED))
    }

    pub async fn toggle(&self, id: TaskId) -> Result<Task> {
        let task = self.task(id).await?;
        self.tasks
            .toggle_status(&task)
            .await
            .map_err(|e| failure(e, UPDATE_FAILED))
    }

    pub async fn delete(&self, id: TaskId, confirm: &dyn Confirm) -> Result<DeleteOutcome> {
        self.task(id).await?;
        self.tasks
            .delete_task(id, confirm)
            .await
            .map_err(|e| failure(e, DELETE_FAILED))
    }

    pub async fn render(&self) -> String {
        render(&self.tasks.snapshot().await)
    }

    async fn task(&self, id: TaskId) -> Result<Task> {
        self.tasks
            .find(id)
            .await
            .ok_or_else(|| anyhow!("Task #{} not found", id))
    }
}

/// Text rendering of the dashboard.
///
/// Only tasks matching the selected filter are drawn. A task toggled out of
/// the filter stays in the collection until the next fetch.
pub fn render(snapshot: &CollectionSnapshot) -> String {
    let mut out = String::new();
    let filters: Vec<String> = TaskFilter::ALL
        .iter()
        .map(|f| {
            if *f == snapshot.filter {
                format!("[{}]", f)
            } else {
                f.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "My Tasks    {}", filters.join(" "));
    let _ = writeln!(out);

    if snapshot.loading {
        let _ = writeln!(out, "{}", LOADING_MESSAGE);
        return out;
    }
    let wanted = snapshot.filter.status();
    let visible: Vec<&Task> = snapshot
        .tasks
        .iter()
        .filter(|t| wanted.is_none_or(|s| t.status == s))
        .collect();
    if visible.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MESSAGE);
        return out;
    }

    for task in visible {
        let mark = match task.status {
            TaskStatus::Completed => "[x]",
            TaskStatus::Pending => "[ ]",
        };
        let _ = writeln!(out, "{} #{:<4} {}", mark, task.id, task.title);
        if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "          {}", description);
        }
    }
    out
}
