//! HTTP Backend Tests
//!
//! Each test stands up a one-shot responder on a loopback port: it accepts a
//! single connection, captures the request, answers with a canned response
//! and closes.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use taskmaster_core::{FunctionCall, HttpBackend, TaskBackend, TaskId, TransportError};

// ============================================================================
// One-shot Responder
// ============================================================================

#[derive(Debug)]
struct Captured {
    method: String,
    path: String,
    body: String,
}

impl Captured {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut stream).await;

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();
        captured
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(stream: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Captured {
        method,
        path,
        body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
    }
}

fn backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(base_url, Duration::from_secs(5)).unwrap()
}

// ============================================================================
// Endpoints
// ============================================================================

#[tokio::test]
async fn test_list_tasks() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[{"id":1,"description":"Buy milk","completed":false},{"id":"abc","description":"Call mom","completed":true}]"#,
    )
    .await;

    let tasks = backend(&url).list_tasks().await.unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/api/tasks");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId::from(1));
    assert_eq!(tasks[1].id, TaskId::Text("abc".to_string()));
    assert!(tasks[1].completed);
}

#[tokio::test]
async fn test_create_task_posts_description() {
    let (url, server) = serve_once(
        "201 Created",
        r#"{"id":3,"description":"Buy milk","completed":false}"#,
    )
    .await;

    backend(&url).create_task("Buy milk").await.unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/tasks");
    assert_eq!(captured.json(), json!({"description": "Buy milk"}));
}

#[tokio::test]
async fn test_complete_task_path() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"id":7,"description":"x","completed":true}"#,
    )
    .await;

    backend(&url).complete_task(&TaskId::from(7)).await.unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.method, "PATCH");
    assert_eq!(captured.path, "/api/tasks/7/complete");
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let (url, server) = serve_once("204 No Content", "").await;

    backend(&url)
        .delete_task(&TaskId::Text("a b".to_string()))
        .await
        .unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.method, "DELETE");
    assert_eq!(captured.path, "/api/tasks/a%20b");
}

#[tokio::test]
async fn test_interpret_round_trip() {
    let (url, server) = serve_once(
        "200 OK",
        r#"{"call":{"function":"deleteTask","parameters":{"task_id":7}},"tasks":[]}"#,
    )
    .await;

    let reply = backend(&url).interpret("trash task seven").await.unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/api/ai");
    assert_eq!(captured.json(), json!({"text": "trash task seven"}));
    assert_eq!(
        reply.function_call(),
        FunctionCall::DeleteTask {
            task_id: "7".to_string()
        }
    );
    assert!(reply.tasks.is_empty());
}

#[tokio::test]
async fn test_base_url_prefix_is_kept() {
    let (url, server) = serve_once("200 OK", "[]").await;

    let backend = backend(&format!("{url}/todo/"));
    backend.list_tasks().await.unwrap();
    let captured = server.await.unwrap();

    assert_eq!(captured.path, "/todo/api/tasks");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_field_becomes_message() {
    let (url, server) = serve_once(
        "404 Not Found",
        r#"{"ok":false,"error":"Task not found."}"#,
    )
    .await;

    let err = backend(&url)
        .delete_task(&TaskId::from(99))
        .await
        .unwrap_err();
    server.await.unwrap();

    assert_eq!(
        err,
        TransportError::Status {
            status: 404,
            message: "Task not found.".to_string()
        }
    );
    assert_eq!(err.message(), "Task not found.");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_non_json_error_uses_raw_text() {
    let (url, server) = serve_once("502 Bad Gateway", "upstream down").await;

    let err = backend(&url).list_tasks().await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.message(), "upstream down");
}

#[tokio::test]
async fn test_empty_error_body_is_generic() {
    let (url, server) = serve_once("500 Internal Server Error", "").await;

    let err = backend(&url).interpret("hi").await.unwrap_err();
    server.await.unwrap();

    assert_eq!(err.message(), "Request failed");
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let (url, server) = serve_once("200 OK", "definitely not json").await;

    let err = backend(&url).list_tasks().await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, TransportError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("http://{addr}"))
        .list_tasks()
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Network(_)), "{err:?}");
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let backend = HttpBackend::new(&format!("http://{addr}"), Duration::from_millis(200)).unwrap();
    let err = backend.list_tasks().await.unwrap_err();
    server.abort();

    assert_eq!(err, TransportError::Timeout(Duration::from_millis(200)));
}
