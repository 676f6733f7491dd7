//! Route table.

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::{get, put, MethodRouter},
    Json, Router,
};
use todo_core::ErrorEnvelope;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// `GET` lists, `POST` creates.
fn todo_collection() -> MethodRouter<AppState> {
    get(handlers::list_todos)
        .post(handlers::create_todo)
        .fallback(handlers::method_not_allowed)
}

/// The `/todo` routes. The collection answers with and without a trailing
/// slash.
fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todo", todo_collection())
        .route("/todo/", todo_collection())
        .route(
            "/todo/{id}",
            put(handlers::update_todo)
                .delete(handlers::delete_todo)
                .fallback(handlers::method_not_allowed),
        )
}

/// Build the application router without middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::home).fallback(handlers::method_not_allowed),
        )
        .merge(todo_routes())
        .fallback(handlers::not_found)
        .with_state(state)
}

/// The application router with request logging and a per-request timeout.
pub fn app_with_middleware(state: AppState, request_timeout: Duration) -> Router {
    app(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(map_response(timeout_envelope))
        .layer(TraceLayer::new_for_http())
}

/// `TimeoutLayer` answers with an empty body; give it an envelope.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ErrorEnvelope::new(
            "Request timed out",
            "the request did not complete in time",
        )),
    )
        .into_response()
}
