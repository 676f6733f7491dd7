//! Document store adapter.
//!
//! # Design
//! Handlers only see `TodoStore`. `MongoStore` talks to a real collection;
//! `MemoryStore` keeps records in process and backs the router tests. Both
//! report "nothing matched" as `StoreError::NotFound` so handlers can tell
//! it apart from a backend failure.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use todo_core::{ObjectId, StoreError, TodoRecord};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations over the single todo collection.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new record and return its identifier.
    async fn insert(&self, record: TodoRecord) -> StoreResult<ObjectId>;

    /// Every record, in the store's natural order.
    async fn find_all(&self) -> StoreResult<Vec<TodoRecord>>;

    /// Replace the title of the matching record. Other fields are untouched.
    async fn update_title(&self, id: ObjectId, title: &str) -> StoreResult<()>;

    /// Delete the matching record.
    async fn remove_by_id(&self, id: ObjectId) -> StoreResult<()>;
}
