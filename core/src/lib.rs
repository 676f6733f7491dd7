//! Domain types and API client core for the todo service.
//!
//! # Overview
//! Holds everything both sides of the HTTP boundary agree on: the wire
//! (`TodoDto`) and persisted (`TodoRecord`) shapes, identifier parsing, the
//! title validator, the error envelope, and the store error taxonomy.
//! `TodoClient` builds requests and parses responses without doing I/O.
//!
//! # Design
//! - No HTTP framework or database driver here; only `bson` for ObjectIds.
//! - The server and the client share one set of DTOs, so the router tests
//!   and the live tests catch any drift in the wire format.

pub mod client;
pub mod error;
pub mod http;
pub mod id;
pub mod types;
pub mod validate;

pub use bson::oid::ObjectId;
pub use client::TodoClient;
pub use error::{ClientError, InvalidTodoId, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use id::parse_todo_id;
pub use types::{ErrorEnvelope, Message, TodoCreated, TodoDto, TodoList, TodoRecord, UpdateTodo};
pub use validate::validate_todo;
