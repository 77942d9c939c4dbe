//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, Once};

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use cross_origin_middleware::{cross_origin_middleware, CrossOriginConfig};

/// Install a test subscriber once so RUST_LOG surfaces middleware traces.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// What the stub backend saw for the last request it served.
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub method: String,
    pub uri: String,
    pub body: Vec<u8>,
}

/// Programmable backend that records every invocation and returns a
/// fixed status and body.
#[derive(Clone)]
pub struct StubBackend {
    status: StatusCode,
    body: &'static str,
    calls: Arc<AtomicU32>,
    seen: Arc<Mutex<Option<SeenRequest>>>,
}

impl StubBackend {
    pub fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            calls: Arc::new(AtomicU32::new(0)),
            seen: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_seen(&self) -> SeenRequest {
        self.seen
            .lock()
            .unwrap()
            .clone()
            .expect("backend was never invoked")
    }
}

async fn stub_handler(State(backend): State<StubBackend>, req: Request<Body>) -> Response {
    backend.calls.fetch_add(1, Ordering::SeqCst);

    let (parts, body) = req.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap();
    *backend.seen.lock().unwrap() = Some(SeenRequest {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        body: body.to_vec(),
    });

    Response::builder()
        .status(backend.status)
        .body(Body::from(backend.body))
        .unwrap()
}

/// Build the middleware wrapped around the stub backend.
pub fn app(config: CrossOriginConfig, backend: StubBackend) -> Router {
    init_tracing();
    Router::new()
        .route("/{*path}", any(stub_handler))
        .route("/", any(stub_handler))
        .with_state(backend)
        .layer(from_fn_with_state(config, cross_origin_middleware))
}
