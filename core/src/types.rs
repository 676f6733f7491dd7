//! Wire and persisted representations of a todo item.
//!
//! # Design
//! `TodoRecord` is what lives in the document collection (`_id`, `title`,
//! `completed`, `createdAt`). `TodoDto` is what crosses the HTTP boundary:
//! the identifier is rendered as a hex string and timestamps as RFC 3339.
//! Handlers decode a `TodoDto` on write paths and project records into
//! `TodoDto` on read paths; neither type is cached between requests.

use bson::oid::ObjectId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A todo item as exchanged with clients.
///
/// Every field is optional on input. A missing `createdAt` decodes to the
/// Unix epoch, a missing `completed` to `false`. Stored timestamps keep
/// millisecond precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "unix_epoch")]
    pub created_at: DateTime<Utc>,
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A todo item as stored in the collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub completed: bool,
    #[serde(
        rename = "createdAt",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub created_at: DateTime<Utc>,
}

impl TodoRecord {
    /// Build a record for a freshly created todo. The identifier is generated
    /// here; whatever id the client sent is ignored. `created_at` is cut to
    /// whole milliseconds, the precision of a BSON datetime, so every store
    /// hands back the same value.
    pub fn from_new(todo: TodoDto) -> Self {
        Self {
            id: ObjectId::new(),
            title: todo.title,
            completed: todo.completed,
            created_at: todo.created_at.trunc_subsecs(3),
        }
    }
}

impl From<TodoRecord> for TodoDto {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id.to_hex(),
            title: record.title,
            completed: record.completed,
            created_at: record.created_at,
        }
    }
}

/// Body of `PUT /todo/{id}`. Only `title` is applied by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
}

/// `201` body for a created todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoCreated {
    pub message: String,
    pub todo_id: String,
}

/// `200` body for `GET /todo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub data: Vec<TodoDto>,
}

/// Plain acknowledgement body, used by update and delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

/// JSON body sent on every failure path.
///
/// `error` is usually a string but may carry a structured value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    pub message: String,
    pub error: serde_json::Value,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, error: impl Into<serde_json::Value>) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
        }
    }
}
