//! Stub backend for black-box gateway tests.
//!
//! An axum app bound to an ephemeral port records every request and answers
//! with whatever the test's responder returns.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use auditdesk_auth::{CredentialStore, MemoryCredentialStore};
use auditdesk_gateway::{GatewayConfig, RequestGateway};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync;

#[derive(Clone)]
struct StubState {
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

pub struct StubBackend {
    pub origin: String,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubBackend {
    pub async fn spawn<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            log: log.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let origin = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { origin, log, handle }
    }

    /// Backend that answers every request with `200 { success: true }`.
    pub async fn ok() -> Self {
        Self::spawn(|_| (StatusCode::OK, json!({ "success": true }))).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("backend received no request")
    }

    pub fn config(&self) -> GatewayConfig {
        GatewayConfig::with_origin(self.origin.clone())
    }

    pub fn gateway(&self, store: Arc<dyn CredentialStore>) -> RequestGateway {
        RequestGateway::builder(self.config())
            .credentials(store)
            .build()
            .expect("gateway must build")
    }

    pub fn anonymous_gateway(&self) -> RequestGateway {
        self.gateway(Arc::new(MemoryCredentialStore::new()))
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    };
    let (status, reply) = (state.responder)(&request);
    state.log.lock().unwrap().push(request);
    (status, Json(reply)).into_response()
}

/// Origin on which nothing is listening.
pub async fn unreachable_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Origin whose server answers every request with `status_line` and then
/// closes the connection before the declared body length was sent.
pub async fn truncated_body_origin(status_line: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }

                let reply = format!(
                    "{status_line}\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n"
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.write_all(br#"{"message":"#).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}
