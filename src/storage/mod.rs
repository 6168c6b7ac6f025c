//! MongoDB-backed task store.
//!
//! Documents live in the `tasks` collection with the wire field names
//! (`titulo`, `descricao`, `concluida`, `prazo`, `createdAt`, `updatedAt`)
//! and a Mongo `ObjectId` primary key surfaced to clients as its hex form.

use anyhow::{anyhow, Context as _, Result};
use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::tasks::store::TaskStore;
use crate::tasks::{Task, TaskError, TaskFields, TaskPatch};

const COLLECTION: &str = "tasks";

// ─── Document shape ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct TaskDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    titulo: String,
    descricao: String,
    concluida: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    prazo: Option<bson::DateTime>,
    #[serde(rename = "createdAt")]
    created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    updated_at: bson::DateTime,
}

impl TaskDocument {
    fn into_task(self) -> Result<Task, TaskError> {
        let id = self
            .id
            .ok_or_else(|| TaskError::Store(anyhow!("task document missing _id")))?;
        Ok(Task {
            id: id.to_hex(),
            title: self.titulo,
            description: self.descricao,
            completed: self.concluida,
            due_date: self.prazo.map(|d| d.to_chrono()),
            created_at: self.created_at.to_chrono(),
            updated_at: self.updated_at.to_chrono(),
        })
    }
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// [`TaskStore`] over a MongoDB `tasks` collection.
pub struct MongoStore {
    collection: Collection<TaskDocument>,
}

impl MongoStore {
    /// Connect and ping the server so a bad connection string fails at
    /// startup instead of on the first request.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("invalid MongoDB connection string")?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(Self {
            collection: db.collection::<TaskDocument>(COLLECTION),
        })
    }
}

/// The identifier-format rule behind [`TaskStore::is_valid_id`] for this
/// store: the string must parse as a Mongo ObjectId (24 hex chars).
fn is_object_id(id: &str) -> bool {
    ObjectId::parse_str(id).is_ok()
}

fn parse_oid(id: &str) -> Result<ObjectId, TaskError> {
    ObjectId::parse_str(id).map_err(|_| TaskError::InvalidId)
}

fn store_err(err: mongodb::error::Error) -> TaskError {
    TaskError::Store(err.into())
}

/// `$set` document covering the full mutable field set. The schema is fixed,
/// so writing every mutable field is a full overwrite that leaves
/// `createdAt` untouched; an absent due date is written as null.
fn overwrite_set(fields: &TaskFields, updated_at: bson::DateTime) -> Document {
    let prazo = fields
        .due_date
        .map_or(Bson::Null, |d| Bson::DateTime(bson::DateTime::from_chrono(d)));
    doc! {
        "titulo": &fields.title,
        "descricao": &fields.description,
        "concluida": fields.completed,
        "prazo": prazo,
        "updatedAt": updated_at,
    }
}

#[async_trait]
impl TaskStore for MongoStore {
    fn is_valid_id(&self, id: &str) -> bool {
        is_object_id(id)
    }

    async fn insert(&self, fields: TaskFields) -> Result<Task, TaskError> {
        let now = bson::DateTime::from_chrono(Utc::now());
        let document = TaskDocument {
            id: None,
            titulo: fields.title,
            descricao: fields.description,
            concluida: fields.completed,
            prazo: fields.due_date.map(bson::DateTime::from_chrono),
            created_at: now,
            updated_at: now,
        };
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(store_err)?;
        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(Task {
            id,
            title: document.titulo,
            description: document.descricao,
            completed: document.concluida,
            due_date: document.prazo.map(|d| d.to_chrono()),
            created_at: now.to_chrono(),
            updated_at: now.to_chrono(),
        })
    }

    async fn list(&self) -> Result<Vec<Task>, TaskError> {
        // ObjectIds are time-ordered; `_id` breaks createdAt ties.
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(store_err)?;
        let documents: Vec<TaskDocument> = cursor.try_collect().await.map_err(store_err)?;
        documents.into_iter().map(TaskDocument::into_task).collect()
    }

    async fn get(&self, id: &str) -> Result<Task, TaskError> {
        let oid = parse_oid(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(store_err)?
            .ok_or(TaskError::NotFound)?;
        document.into_task()
    }

    async fn replace(&self, id: &str, fields: TaskFields) -> Result<Task, TaskError> {
        let oid = parse_oid(id)?;
        let now = bson::DateTime::from_chrono(Utc::now());
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": overwrite_set(&fields, now) })
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_err)?
            .ok_or(TaskError::NotFound)?;
        document.into_task()
    }

    async fn patch(&self, id: &str, patch: TaskPatch) -> Result<Task, TaskError> {
        let oid = parse_oid(id)?;
        let mut set = doc! { "updatedAt": bson::DateTime::from_chrono(Utc::now()) };
        if let Some(title) = patch.title {
            set.insert("titulo", title);
        }
        if let Some(description) = patch.description {
            set.insert("descricao", description);
        }
        if let Some(completed) = patch.completed {
            set.insert("concluida", completed);
        }
        if let Some(due_date) = patch.due_date {
            // A supplied null clears the due date.
            let value =
                due_date.map_or(Bson::Null, |d| Bson::DateTime(bson::DateTime::from_chrono(d)));
            set.insert("prazo", value);
        }
        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_err)?
            .ok_or(TaskError::NotFound)?;
        document.into_task()
    }

    async fn delete(&self, id: &str) -> Result<(), TaskError> {
        let oid = parse_oid(id)?;
        self.collection
            .find_one_and_delete(doc! { "_id": oid })
            .await
            .map_err(store_err)?
            .ok_or(TaskError::NotFound)?;
        Ok(())
    }
}
