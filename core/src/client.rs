//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip.

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ErrorEnvelope, Message, TodoCreated, TodoDto, TodoList, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/todo", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_todo(&self, todo: &TodoDto) -> Result<HttpRequest, ClientError> {
        let body = serde_json::to_string(todo)
            .map_err(|e| ClientError::SerializationError(e.to_string()))?;
        Ok(json_request(
            HttpMethod::Post,
            format!("{}/todo", self.base_url),
            body,
        ))
    }

    pub fn build_update_todo(&self, id: &str, title: &str) -> Result<HttpRequest, ClientError> {
        let input = UpdateTodo {
            title: title.to_string(),
        };
        let body = serde_json::to_string(&input)
            .map_err(|e| ClientError::SerializationError(e.to_string()))?;
        Ok(json_request(
            HttpMethod::Put,
            format!("{}/todo/{id}", self.base_url),
            body,
        ))
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/todo/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<TodoDto>, ClientError> {
        check_status(&response, 200)?;
        let list: TodoList = decode(&response)?;
        Ok(list.data)
    }

    /// Returns the identifier the server assigned to the new todo.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<String, ClientError> {
        check_status(&response, 201)?;
        let created: TodoCreated = decode(&response)?;
        Ok(created.todo_id)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Message, ClientError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<Message, ClientError> {
        check_status(&response, 200)?;
        decode(&response)
    }
}

fn json_request(method: HttpMethod, url: String, body: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    serde_json::from_str(&response.body).map_err(|e| ClientError::DeserializationError(e.to_string()))
}

/// Map unexpected status codes to `ClientError`, keeping the server's error
/// envelope when the body is one.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ClientError> {
    if response.status == expected {
        return Ok(());
    }
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => Err(ClientError::Api {
            status: response.status,
            envelope,
        }),
        Err(_) => Err(ClientError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}
