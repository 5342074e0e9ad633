//! In-crate fakes for the ports.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::oneshot;

use crate::error::{RequestError, StorageError};
use crate::ports::{ApiClient, Confirm, CredentialStore, RequestBody};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    response: Result<Value, RequestError>,
}

/// Scripted backend. Responses are consumed in call order.
#[derive(Default)]
pub struct FakeApi {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: Result<Value, RequestError>) -> &Self {
        self.script.lock().unwrap().push_back(Scripted {
            gate: None,
            response,
        });
        self
    }

    /// Queue a response that is held back until the returned sender fires.
    pub fn respond_gated(&self, response: Result<Value, RequestError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted {
            gate: Some(rx),
            response,
        });
        tx
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn dispatch(&self, call: RecordedCall) -> Result<Value, RequestError> {
        self.calls.lock().unwrap().push(call);
        let scripted = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: script exhausted");
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.response
    }
}

#[async_trait]
impl ApiClient for FakeApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, RequestError> {
        self.dispatch(RecordedCall {
            method: "GET",
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        })
        .await
    }

    async fn post(&self, path: &str, body: RequestBody) -> Result<Value, RequestError> {
        self.dispatch(RecordedCall {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body),
        })
        .await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, RequestError> {
        self.dispatch(RecordedCall {
            method: "PUT",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(RequestBody::Json(body)),
        })
        .await
    }

    async fn delete(&self, path: &str) -> Result<Value, RequestError> {
        self.dispatch(RecordedCall {
            method: "DELETE",
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        })
        .await
    }
}

/// Credential store backed by a shared slot, surviving "reloads".
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Mutex::new(Some(value.to_string())),
            fail_writes: Mutex::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn value(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value())
    }

    async fn save(&self, credential: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Io("disk full".to_string()));
        }
        *self.value.lock().unwrap() = Some(credential.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StorageError::Io("read-only".to_string()));
        }
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}

/// Confirmation that always answers the same way and counts prompts.
pub struct FixedConfirm {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl FixedConfirm {
    pub fn yes() -> Self {
        Self {
            answer: true,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn no() -> Self {
        Self {
            answer: false,
            asked: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for FixedConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

/// Server representation of a task.
pub fn task_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "status": status,
        "created_at": "2024-03-01T09:30:15.123456",
        "owner_id": 1
    })
}
