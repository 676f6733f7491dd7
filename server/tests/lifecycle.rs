//! Live-server tests: real sockets, the typed client, and graceful shutdown.
//!
//! # Design
//! Each test binds `127.0.0.1:0`, runs `todo_server::serve` with a oneshot
//! channel standing in for Ctrl-C, and talks to it over real HTTP.

use std::time::Duration;

use axum::{routing::get, Router};
use todo_core::{ClientError, HttpMethod, HttpRequest, HttpResponse, TodoClient, TodoDto};
use todo_server::{app, serve, AppState, MemoryStore, ShutdownOutcome};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Execute an `HttpRequest` with ureq, returning 4xx/5xx as data.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .unwrap_or_else(|e| panic!("{} {}: {e}", req.method.as_str(), req.url));

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    HttpResponse { status, body }
}

/// Router with one handler that sleeps before answering.
fn slow_app(delay: Duration) -> Router {
    Router::new().route(
        "/slow",
        get(move || async move {
            tokio::time::sleep(delay).await;
            "done"
        }),
    )
}

async fn send_raw_get(addr: std::net::SocketAddr, path: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();
    stream
}

#[test]
fn crud_over_http_then_graceful_shutdown() {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = TcpListener::from_std(std_listener).unwrap();
            let app = app(AppState::new(MemoryStore::new()));
            serve(listener, app, Duration::from_secs(5), async move {
                let _ = stop_rx.await;
            })
            .await
        })
        .unwrap()
    });

    let client = TodoClient::new(&format!("http://{addr}"));

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty());

    let new_todo: TodoDto = serde_json::from_str(
        r#"{"title":"buy milk","completed":false,"createdAt":"2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();
    let req = client.build_create_todo(&new_todo).unwrap();
    let id = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(id.len(), 24);

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);
    assert_eq!(todos[0].title, "buy milk");
    assert_eq!(todos[0].created_at, new_todo.created_at);

    let req = client.build_update_todo(&id, "buy oat milk").unwrap();
    client.parse_update_todo(execute(req)).unwrap();

    let req = client.build_update_todo("bad-id", "whatever").unwrap();
    let err = client.parse_update_todo(execute(req)).unwrap_err();
    match err {
        ClientError::Api { status, envelope } => {
            assert_eq!(status, 400);
            assert_eq!(envelope.message, "Invalid todo id");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos[0].title, "buy oat milk");

    let deleted = client.parse_delete_todo(execute(client.build_delete_todo(&id))).unwrap();
    assert_eq!(deleted.message, "todo deleted successfully");

    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(&id)))
        .unwrap_err();
    assert_eq!(err.status(), Some(404));

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty());

    stop_tx.send(()).unwrap();
    let outcome = server.join().unwrap();
    assert_eq!(outcome, ShutdownOutcome::Graceful);
}

#[tokio::test]
async fn in_flight_request_completes_inside_window() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_millis(200)),
        Duration::from_secs(5),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let mut stream = send_raw_get(addr, "/slow").await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    stop_tx.send(()).unwrap();

    let mut response = String::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_string(&mut response))
        .await
        .expect("response not received")
        .unwrap();
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("done"));

    let outcome = server.await.unwrap().unwrap();
    assert_eq!(outcome, ShutdownOutcome::Graceful);
}

#[tokio::test]
async fn shutdown_gives_up_after_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve(
        listener,
        slow_app(Duration::from_secs(30)),
        Duration::from_millis(200),
        async move {
            let _ = stop_rx.await;
        },
    ));

    let _stream = send_raw_get(addr, "/slow").await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let start = std::time::Instant::now();
    stop_tx.send(()).unwrap();
    let outcome = server.await.unwrap().unwrap();

    assert_eq!(outcome, ShutdownOutcome::TimedOut);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn listener_stops_accepting_after_signal() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve(
        listener,
        app(AppState::new(MemoryStore::new())),
        Duration::from_secs(5),
        async move {
            let _ = stop_rx.await;
        },
    ));

    stop_tx.send(()).unwrap();
    assert_eq!(server.await.unwrap().unwrap(), ShutdownOutcome::Graceful);
    assert!(TcpStream::connect(addr).await.is_err());
}
