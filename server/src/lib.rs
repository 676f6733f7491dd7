//! HTTP service exposing CRUD over a single collection of todo items.
//!
//! # Overview
//! `routes::app` builds the axum router, `handlers` translate requests into
//! `store::TodoStore` calls, and `server` owns the process lifecycle
//! (startup policy, listener task, bounded graceful shutdown).

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod store;

pub use config::{Config, ConnectPolicy, StoreKind};
pub use error::ApiError;
pub use routes::{app, app_with_middleware};
pub use server::{connect_with_policy, init_tracing, open_store, run, serve, ShutdownOutcome};
pub use state::AppState;
pub use store::{MemoryStore, MongoStore, TodoStore};
