//! Shared application state.

use std::sync::Arc;

use crate::store::TodoStore;

/// Dependencies handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }
}
