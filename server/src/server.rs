//! Process lifecycle: open the store, bind, serve, drain on interrupt.
//!
//! # Design
//! The accept loop runs on its own tokio task while the caller waits for the
//! shutdown signal. Once the signal fires the listener stops accepting and
//! in-flight requests get `shutdown_timeout` to finish; after that the
//! serving task is aborted and the outcome reported as `TimedOut`.

use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use todo_core::StoreError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConnectPolicy, StoreKind};
use crate::routes;
use crate::state::AppState;
use crate::store::{MemoryStore, MongoStore};

/// How the serving task ended after the shutdown signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every in-flight request finished inside the window.
    Graceful,
    /// The window elapsed and remaining connections were abandoned.
    TimedOut,
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the service until Ctrl-C, then shut down gracefully.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = open_store(&config)
        .await
        .context("failed to open the todo store")?;
    let app = routes::app_with_middleware(state, config.request_timeout);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(addr = %listener.local_addr()?, "listening");

    let outcome = serve(listener, app, config.shutdown_timeout, shutdown_signal()).await?;
    info!(?outcome, "server stopped");
    Ok(())
}

/// Build the application state for the configured store.
pub async fn open_store(config: &Config) -> Result<AppState, StoreError> {
    match config.store {
        StoreKind::Memory => {
            info!("using in-memory store");
            Ok(AppState::new(MemoryStore::new()))
        }
        StoreKind::Mongo => {
            let store = connect_with_policy(config.connect, || {
                MongoStore::connect(&config.mongodb_uri, &config.database, &config.collection)
            })
            .await?;
            Ok(AppState::new(store))
        }
    }
}

/// Call `connect` until it succeeds or the policy runs out of retries.
pub async fn connect_with_policy<T, F, Fut>(
    policy: ConnectPolicy,
    mut connect: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let (retries, mut delay) = match policy {
        ConnectPolicy::FailFast => (0, Duration::ZERO),
        ConnectPolicy::Retry { retries, backoff } => (retries, backoff),
    };

    let mut attempt = 0;
    loop {
        match connect().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < retries => {
                attempt += 1;
                warn!(
                    attempt,
                    retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "store connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
            Err(err) => return Err(err),
        }
    }
}

/// Serve `app` on `listener` until `signal` resolves, then drain.
///
/// Returns early with the listener's error if serving fails before the
/// signal arrives.
pub async fn serve<S>(
    listener: TcpListener,
    app: Router,
    shutdown_timeout: Duration,
    signal: S,
) -> io::Result<ShutdownOutcome>
where
    S: Future<Output = ()>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined.map_err(io::Error::other)??;
            return Ok(ShutdownOutcome::Graceful);
        }
        _ = signal => {}
    }

    info!(timeout = ?shutdown_timeout, "shutting down server");
    let _ = stop_tx.send(());

    match tokio::time::timeout(shutdown_timeout, &mut server).await {
        Ok(joined) => {
            joined.map_err(io::Error::other)??;
            info!("server gracefully shut down");
            Ok(ShutdownOutcome::Graceful)
        }
        Err(_) => {
            server.abort();
            warn!("shutdown timed out, abandoning in-flight requests");
            Ok(ShutdownOutcome::TimedOut)
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("interrupt received"),
        Err(err) => warn!(error = %err, "failed to listen for interrupt, shutting down"),
    }
}
