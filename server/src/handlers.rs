//! Request handlers for `/` and the `/todo` routes.
//!
//! Bodies are taken as raw bytes and decoded here, so a missing or wrong
//! `content-type` is not an error and every decode failure gets the same
//! envelope. Extractor rejections are taken as values too and turned into
//! `ApiError`s, so they are answered with an envelope instead of axum's
//! plain-text bodies.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use todo_core::{
    parse_todo_id, validate_todo, ErrorEnvelope, InvalidTodoId, Message, ObjectId, TodoCreated,
    TodoDto, TodoList, TodoRecord,
};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::state::AppState;

const HOME_PAGE: &str = include_str!("../static/home.html");

fn decode_todo(body: Result<Bytes, BytesRejection>) -> Result<TodoDto, ApiError> {
    let body = body?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn todo_id(path: Result<Path<String>, PathRejection>) -> Result<ObjectId, ApiError> {
    match path {
        Ok(Path(raw)) => Ok(parse_todo_id(&raw)?),
        Err(rejection) => Err(InvalidTodoId(rejection.body_text()).into()),
    }
}

pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

#[instrument(skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, ApiError> {
    let records = state
        .store()
        .find_all()
        .await
        .map_err(ApiError::store("Failed to fetch todo"))?;

    let data: Vec<TodoDto> = records.into_iter().map(TodoDto::from).collect();
    debug!(count = data.len(), "listed todos");
    Ok(Json(TodoList { data }))
}

#[instrument(skip(state, body))]
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<TodoCreated>), ApiError> {
    let todo = decode_todo(body)?;
    if !validate_todo(&todo) {
        return Err(ApiError::Validation);
    }

    let id = state
        .store()
        .insert(TodoRecord::from_new(todo))
        .await
        .map_err(ApiError::store("Failed to create todo"))?;

    debug!(id = %id, "created todo");
    Ok((
        StatusCode::CREATED,
        Json(TodoCreated {
            message: "todo created successfully".to_string(),
            todo_id: id.to_hex(),
        }),
    ))
}

/// Applies the payload's title only; `completed` and `createdAt` in the
/// body are ignored.
#[instrument(skip(state, body))]
pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = todo_id(id)?;
    let todo = decode_todo(body)?;
    if !validate_todo(&todo) {
        return Err(ApiError::Validation);
    }

    state
        .store()
        .update_title(id, &todo.title)
        .await
        .map_err(ApiError::store("Failed to update todo"))?;

    Ok(Json(Message {
        message: "todo updated successfully".to_string(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = todo_id(id)?;

    state
        .store()
        .remove_by_id(id)
        .await
        .map_err(ApiError::store("Failed to delete todo"))?;

    Ok(Json(Message {
        message: "todo deleted successfully".to_string(),
    }))
}

pub async fn not_found() -> (StatusCode, Json<ErrorEnvelope>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new(
            "Resource not found",
            "no route matches the request",
        )),
    )
}

/// Known path, unsupported method.
pub async fn method_not_allowed() -> (StatusCode, Json<ErrorEnvelope>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorEnvelope::new(
            "Method not allowed",
            "the route does not support this method",
        )),
    )
}
