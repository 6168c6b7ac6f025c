//! Document-store port for the tasks collection.

use async_trait::async_trait;

use super::{Task, TaskError, TaskFields, TaskPatch};

/// Persistence operations backing the task routes.
///
/// Implementations own their identifier format: `is_valid_id` is checked by
/// the handlers before any lookup, so a malformed id never reaches a query.
/// `patch` payloads arrive already trimmed/validated.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Whether `id` is a plausible record key for this store.
    fn is_valid_id(&self, id: &str) -> bool;

    /// Persist a new task; the store assigns the id and both timestamps.
    async fn insert(&self, fields: TaskFields) -> Result<Task, TaskError>;

    /// All tasks, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Task>, TaskError>;

    async fn get(&self, id: &str) -> Result<Task, TaskError>;

    /// Full overwrite of the mutable fields. `created_at` is preserved,
    /// `updated_at` refreshed.
    async fn replace(&self, id: &str, fields: TaskFields) -> Result<Task, TaskError>;

    /// Merge the supplied fields into the stored record; `updated_at` is
    /// refreshed even for an empty patch.
    async fn patch(&self, id: &str, patch: TaskPatch) -> Result<Task, TaskError>;

    async fn delete(&self, id: &str) -> Result<(), TaskError>;
}
