//! In-memory task store used as a test double for the REST layer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::store::TaskStore;
use super::{Task, TaskError, TaskFields, TaskPatch};

/// HashMap-backed [`TaskStore`]. Ids are sequential 24-digit hex strings so
/// they share the shape of document-store object ids while staying
/// deterministic; the same sequence number doubles as the list-order
/// tiebreaker for tasks created within one timestamp tick.
#[derive(Default)]
pub struct MemoryStore {
    seq: AtomicU64,
    records: RwLock<HashMap<String, Entry>>,
}

struct Entry {
    seq: u64,
    task: Task,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> (u64, String) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        (seq, format!("{seq:024x}"))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    fn is_valid_id(&self, id: &str) -> bool {
        id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
    }

    async fn insert(&self, fields: TaskFields) -> Result<Task, TaskError> {
        let (seq, id) = self.next_id();
        let now = Utc::now();
        let task = Task {
            id: id.clone(),
            title: fields.title,
            description: fields.description,
            completed: fields.completed,
            due_date: fields.due_date,
            created_at: now,
            updated_at: now,
        };
        self.records
            .write()
            .await
            .insert(id, Entry { seq, task: task.clone() });
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        let records = self.records.read().await;
        let mut entries: Vec<&Entry> = records.values().collect();
        entries.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(entries.iter().map(|e| e.task.clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<Task, TaskError> {
        self.records
            .read()
            .await
            .get(id)
            .map(|e| e.task.clone())
            .ok_or(TaskError::NotFound)
    }

    async fn replace(&self, id: &str, fields: TaskFields) -> Result<Task, TaskError> {
        let mut records = self.records.write().await;
        let entry = records.get_mut(id).ok_or(TaskError::NotFound)?;
        entry.task.title = fields.title;
        entry.task.description = fields.description;
        entry.task.completed = fields.completed;
        entry.task.due_date = fields.due_date;
        entry.task.updated_at = Utc::now();
        Ok(entry.task.clone())
    }

    async fn patch(&self, id: &str, patch: TaskPatch) -> Result<Task, TaskError> {
        let mut records = self.records.write().await;
        let entry = records.get_mut(id).ok_or(TaskError::NotFound)?;
        let mut fields = TaskFields {
            title: entry.task.title.clone(),
            description: entry.task.description.clone(),
            completed: entry.task.completed,
            due_date: entry.task.due_date,
        };
        patch.apply(&mut fields);
        entry.task.title = fields.title;
        entry.task.description = fields.description;
        entry.task.completed = fields.completed;
        entry.task.due_date = fields.due_date;
        entry.task.updated_at = Utc::now();
        Ok(entry.task.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), TaskError> {
        self.records
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(TaskError::NotFound)
    }
}
