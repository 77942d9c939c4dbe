//! Middleware entry point.
//!
//! Classifies each inbound request and runs exactly one of the four
//! processing paths. The wrapped backend is reached through [`Next`];
//! its failures are never caught here, only its responses decorated.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::classify::{classify, RequestKind};
use crate::config::CrossOriginConfig;
use crate::{cors, jsonp};

/// Translate cross-origin requests for a same-origin-only backend.
///
/// Install with `axum::middleware::from_fn_with_state`. Holds no state
/// across requests; each invocation is an independent decision.
pub async fn cross_origin_middleware(
    State(config): State<CrossOriginConfig>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match classify(&req) {
        RequestKind::Preflight => {
            tracing::debug!(path = %req.uri().path(), "answering CORS preflight");
            cors::preflight_response(&req)
        }
        RequestKind::Cors => cors::annotate(next.run(req).await),
        RequestKind::Jsonp => handle_jsonp(&config, req, next).await,
        RequestKind::Passthrough => next.run(req).await,
    }
}

async fn handle_jsonp(config: &CrossOriginConfig, req: Request<Body>, next: Next) -> Response {
    let translated = match jsonp::translate(req, config.strict_callbacks) {
        Ok(translated) => translated,
        Err(err) => {
            tracing::warn!(error = %err, "rejecting JSONP request");
            return err.into_response();
        }
    };

    tracing::debug!(
        method = %translated.request.method(),
        target = %translated.request.uri(),
        callback = %translated.callback,
        "forwarding translated JSONP request"
    );

    let response = next.run(translated.request).await;

    match jsonp::wrap_response(&translated.callback, response).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, "failed to aggregate backend response");
            err.into_response()
        }
    }
}
