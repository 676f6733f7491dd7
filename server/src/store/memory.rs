use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use todo_core::{ObjectId, StoreError, TodoRecord};

use super::{StoreResult, TodoStore};

/// In-process store keeping records in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<TodoRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, record: TodoRecord) -> StoreResult<ObjectId> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::Backend(format!(
                "duplicate key: _id {}",
                record.id.to_hex()
            )));
        }
        let id = record.id;
        records.push(record);
        Ok(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<TodoRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn update_title(&self, id: ObjectId, title: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_hex() })?;
        record.title = title.to_string();
        Ok(())
    }

    async fn remove_by_id(&self, id: ObjectId) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_hex() })?;
        records.remove(index);
        Ok(())
    }
}
