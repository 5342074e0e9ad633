//! Task Collection Manager.
//!
//! Owns the in-memory task collection for the lifetime of a dashboard.
//! Every change is applied only after the server confirms it, using the
//! server's representation. Filtering happens server-side: each filter
//! change is a fresh round trip.
//!
//! Fetches are tagged with a generation number; a response whose
//! generation has been superseded by a later fetch is dropped.

use std::sync::Arc;

use tokio::sync::RwLock;

use taskflow_shared::dto::UpdateTaskRequest;

use crate::domain::{Task, TaskDraft, TaskFilter, TaskId};
use crate::error::RequestError;
use crate::ports::{ApiClient, Confirm, RequestBody, decode};

const TASKS_PATH: &str = "/tasks/";

/// Prompt shown before a delete is sent.
pub const DELETE_PROMPT: &str = "Are you sure?";

fn task_path(id: TaskId) -> String {
    format!("/tasks/{}", id)
}

/// Result of [`TaskCollectionManager::fetch_tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The collection was replaced with `count` tasks.
    Applied { count: usize },
    /// A newer fetch was issued while this one was in flight; its result
    /// was discarded.
    Stale,
}

/// Result of [`TaskCollectionManager::delete_task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; no request was sent.
    Declined,
}

/// Point-in-time copy of the manager state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot {
    pub tasks: Vec<Task>,
    pub filter: TaskFilter,
    pub loading: bool,
}

struct CollectionState {
    tasks: Vec<Task>,
    filter: TaskFilter,
    generation: u64,
    loading: bool,
}

pub struct TaskCollectionManager {
    api: Arc<dyn ApiClient>,
    state: RwLock<CollectionState>,
}

impl TaskCollectionManager {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            state: RwLock::new(CollectionState {
                tasks: Vec::new(),
                filter: TaskFilter::default(),
                generation: 0,
                loading: true,
            }),
        }
    }

    /// Replace the collection with the server's view for `filter`.
    ///
    /// On failure the collection is left as it was.
    pub async fn fetch_tasks(&self, filter: TaskFilter) -> Result<FetchOutcome, RequestError> {
        let generation = {
            let mut state = self.state.write().await;
            state.generation += 1;
            state.filter = filter;
            state.generation
        };

        tracing::debug!(%filter, generation, "Fetching tasks");
        let result = self
            .api
            .get(TASKS_PATH, &filter.query())
            .await
            .and_then(decode::<Vec<Task>>);

        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(
                %filter,
                generation,
                latest = state.generation,
                "Discarding superseded task fetch"
            );
            return Ok(FetchOutcome::Stale);
        }
        state.loading = false;

        let tasks = result.inspect_err(|e| {
            tracing::warn!(%filter, error = %e, "Task fetch failed");
        })?;
        let count = tasks.len();
        state.tasks = tasks;
        Ok(FetchOutcome::Applied { count })
    }

    /// Create a task and append the server's copy.
    ///
    /// The draft is not validated here; callers reject an empty title
    /// before submitting.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, RequestError> {
        let body = serde_json::to_value(draft.to_request())
            .map_err(|e| RequestError::decode(e.to_string()))?;
        let task: Task = decode(self.api.post(TASKS_PATH, RequestBody::Json(body)).await?)?;

        tracing::info!(task_id = task.id, "Task created");
        self.state.write().await.tasks.push(task.clone());
        Ok(task)
    }

    /// Flip `task`'s status on the server and store the server's reply.
    pub async fn toggle_status(&self, task: &Task) -> Result<Task, RequestError> {
        let requested = task.status.toggled();
        let body = serde_json::to_value(UpdateTaskRequest::status(requested.as_str()))
            .map_err(|e| RequestError::decode(e.to_string()))?;
        let updated: Task = decode(self.api.put(&task_path(task.id), body).await?)?;

        if updated.status != requested {
            tracing::debug!(
                task_id = task.id,
                %requested,
                stored = %updated.status,
                "Server stored a different status than requested"
            );
        }

        let mut state = self.state.write().await;
        if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == updated.id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Delete task `id` after the user confirms. No undo.
    pub async fn delete_task(
        &self,
        id: TaskId,
        confirm: &dyn Confirm,
    ) -> Result<DeleteOutcome, RequestError> {
        if !confirm.confirm(DELETE_PROMPT).await {
            tracing::debug!(task_id = id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        self.api.delete(&task_path(id)).await?;
        tracing::info!(task_id = id, "Task deleted");
        self.state.write().await.tasks.retain(|t| t.id != id);
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    pub async fn find(&self, id: TaskId) -> Option<Task> {
        self.state
            .read()
            .await
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Filter of the most recently issued fetch.
    pub async fn filter(&self) -> TaskFilter {
        self.state.read().await.filter
    }

    /// True until the first fetch settles.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn snapshot(&self) -> CollectionSnapshot {
        let state = self.state.read().await;
        CollectionSnapshot {
            tasks: state.tasks.clone(),
            filter: state.filter,
            loading: state.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::TaskStatus;
    use crate::test_support::{FakeApi, FixedConfirm, task_json};

    fn manager(api: &Arc<FakeApi>) -> TaskCollectionManager {
        TaskCollectionManager::new(api.clone())
    }

    async fn seeded(api: &Arc<FakeApi>, tasks: serde_json::Value) -> TaskCollectionManager {
        api.respond(Ok(tasks));
        let manager = manager(api);
        manager.fetch_tasks(TaskFilter::All).await.unwrap();
        manager
    }

    #[tokio::test]
    async fn test_fetch_replaces_collection() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([task_json(1, "a", "pending")])).await;
        assert!(!manager.is_loading().await);

        api.respond(Ok(json!([task_json(2, "b", "completed")])));
        let outcome = manager.fetch_tasks(TaskFilter::Completed).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { count: 1 });

        let tasks = manager.tasks().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 2);
        assert_eq!(manager.filter().await, TaskFilter::Completed);
    }

    #[tokio::test]
    async fn test_filter_is_sent_to_server() {
        let api = Arc::new(FakeApi::new());
        api.respond(Ok(json!([])));
        api.respond(Ok(json!([])));
        let manager = manager(&api);

        manager.fetch_tasks(TaskFilter::All).await.unwrap();
        manager.fetch_tasks(TaskFilter::Pending).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].path, "/tasks/");
        assert!(calls[0].query.is_empty());
        assert_eq!(
            calls[1].query,
            vec![("status".to_string(), "pending".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fetch_does_not_refilter_server_result() {
        let api = Arc::new(FakeApi::new());
        api.respond(Ok(json!([
            task_json(1, "a", "completed"),
            task_json(2, "b", "pending")
        ])));
        let manager = manager(&api);
        manager.fetch_tasks(TaskFilter::Completed).await.unwrap();
        assert_eq!(manager.tasks().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_collection_and_clears_loading() {
        let api = Arc::new(FakeApi::new());
        api.respond(Err(RequestError::status(500, None)));
        let manager = manager(&api);
        assert!(manager.is_loading().await);
        assert!(manager.fetch_tasks(TaskFilter::All).await.is_err());
        assert!(!manager.is_loading().await);
        assert!(manager.tasks().await.is_empty());
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let api = Arc::new(FakeApi::new());
        let release_first = api.respond_gated(Ok(json!([task_json(1, "old", "pending")])));
        api.respond(Ok(json!([task_json(2, "new", "completed")])));
        let manager = Arc::new(manager(&api));

        let first = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.fetch_tasks(TaskFilter::Pending).await })
        };
        while api.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        let second = manager.fetch_tasks(TaskFilter::Completed).await.unwrap();
        assert_eq!(second, FetchOutcome::Applied { count: 1 });

        release_first.send(()).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), FetchOutcome::Stale);

        let tasks = manager.tasks().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "new");
        assert_eq!(manager.filter().await, TaskFilter::Completed);
    }

    #[tokio::test]
    async fn test_create_appends_server_task() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([])).await;

        api.respond(Ok(task_json(42, "Buy milk", "pending")));
        let task = manager.create_task(&TaskDraft::new("Buy milk")).await.unwrap();

        assert_eq!(task.id, 42);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(manager.tasks().await, vec![task]);

        let call = api.calls().pop().unwrap();
        assert_eq!(call.method, "POST");
        assert_eq!(
            call.body,
            Some(RequestBody::Json(json!({"title": "Buy milk"})))
        );
    }

    #[tokio::test]
    async fn test_failed_create_leaves_collection_unchanged() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([task_json(1, "a", "pending")])).await;

        api.respond(Err(RequestError::status(
            400,
            Some("title required".to_string()),
        )));
        let err = manager.create_task(&TaskDraft::new("x")).await.unwrap_err();

        assert_eq!(err.user_message("Failed to create task"), "title required");
        assert_eq!(manager.tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_requests_flip_and_stores_server_reply() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([task_json(1, "a", "pending")])).await;
        let task = manager.find(1).await.unwrap();

        // The server is authoritative even when it disagrees with the flip.
        let mut reply = task_json(1, "a (edited)", "pending");
        reply["description"] = json!("server side");
        api.respond(Ok(reply));
        let updated = manager.toggle_status(&task).await.unwrap();

        let call = api.calls().pop().unwrap();
        assert_eq!(call.method, "PUT");
        assert_eq!(call.path, "/tasks/1");
        assert_eq!(
            call.body,
            Some(RequestBody::Json(json!({"status": "completed"})))
        );
        assert_eq!(manager.find(1).await, Some(updated.clone()));
        assert_eq!(updated.status, TaskStatus::Pending);
        assert_eq!(updated.title, "a (edited)");
    }

    #[tokio::test]
    async fn test_failed_toggle_leaves_task() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([task_json(1, "a", "pending")])).await;
        let before = manager.tasks().await;

        api.respond(Err(RequestError::status(404, Some("Task not found".into()))));
        assert!(manager.toggle_status(&before[0]).await.is_err());
        assert_eq!(manager.tasks().await, before);
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_task() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(
            &api,
            json!([
                task_json(1, "a", "pending"),
                task_json(2, "b", "pending"),
                task_json(3, "c", "completed")
            ]),
        )
        .await;

        api.respond(Ok(serde_json::Value::Null));
        let confirm = FixedConfirm::yes();
        let outcome = manager.delete_task(2, &confirm).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(confirm.prompts(), vec![DELETE_PROMPT.to_string()]);
        let ids: Vec<_> = manager.tasks().await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(api.calls().pop().unwrap().path, "/tasks/2");
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([task_json(1, "a", "pending")])).await;
        let calls_before = api.calls().len();

        let outcome = manager.delete_task(1, &FixedConfirm::no()).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(api.calls().len(), calls_before);
        assert_eq!(manager.tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_task() {
        let api = Arc::new(FakeApi::new());
        let manager = seeded(&api, json!([task_json(1, "a", "pending")])).await;

        api.respond(Err(RequestError::transport("connection reset")));
        assert!(manager.delete_task(1, &FixedConfirm::yes()).await.is_err());
        assert_eq!(manager.tasks().await.len(), 1);
    }
}
