use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use todo_core::{ObjectId, StoreError, TodoRecord};
use tracing::{debug, info};

use super::{StoreResult, TodoStore};

/// `TodoStore` backed by one MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<TodoRecord>,
}

impl MongoStore {
    /// Open a client and verify the deployment answers a `ping` before
    /// returning, so connection problems surface at startup.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(uri).await.map_err(backend)?;
        options.app_name = Some("todo-server".to_string());
        let client = Client::with_options(options).map_err(backend)?;

        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(backend)?;
        info!(database, collection, "connected to MongoDB");

        Ok(Self {
            collection: db.collection(collection),
        })
    }
}

fn backend(err: mongodb::error::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl TodoStore for MongoStore {
    async fn insert(&self, record: TodoRecord) -> StoreResult<ObjectId> {
        let id = record.id;
        self.collection
            .insert_one(&record, None)
            .await
            .map_err(backend)?;
        debug!(id = %id, "inserted todo");
        Ok(id)
    }

    async fn find_all(&self) -> StoreResult<Vec<TodoRecord>> {
        let mut cursor = self.collection.find(None, None).await.map_err(backend)?;
        let mut records = Vec::new();
        while cursor.advance().await.map_err(backend)? {
            records.push(cursor.deserialize_current().map_err(backend)?);
        }
        Ok(records)
    }

    async fn update_title(&self, id: ObjectId, title: &str) -> StoreResult<()> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "title": title } }, None)
            .await
            .map_err(backend)?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound { id: id.to_hex() });
        }
        Ok(())
    }

    async fn remove_by_id(&self, id: ObjectId) -> StoreResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(backend)?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound { id: id.to_hex() });
        }
        Ok(())
    }
}
