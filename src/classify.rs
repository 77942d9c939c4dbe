//! Request classification.
//!
//! # Responsibilities
//! - Inspect method, Origin header, and GET parameters
//! - Route each request to exactly one processing path
//!
//! # Design Decisions
//! - Precedence is fixed: preflight, then CORS, then JSONP, then passthrough
//! - OPTIONS wins regardless of query parameters or Origin
//! - JSONP is only recognized on GET with the literal `jsonp=true`

use axum::body::Body;
use axum::http::{header, Method, Request};
use url::form_urlencoded;

/// Processing path selected for an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// OPTIONS preflight, answered without contacting the backend.
    Preflight,
    /// Cross-origin request forwarded unmodified, response annotated.
    Cors,
    /// GET with `jsonp=true`, translated before and after the backend call.
    Jsonp,
    /// Everything else, forwarded and returned untouched.
    Passthrough,
}

/// Select the processing path for a request.
///
/// Pure routing decision; every request matches exactly one branch.
pub fn classify(req: &Request<Body>) -> RequestKind {
    if req.method() == Method::OPTIONS {
        return RequestKind::Preflight;
    }
    if req.headers().contains_key(header::ORIGIN) {
        return RequestKind::Cors;
    }
    if req.method() == Method::GET && jsonp_requested(req.uri().query()) {
        return RequestKind::Jsonp;
    }
    RequestKind::Passthrough
}

fn jsonp_requested(query: Option<&str>) -> bool {
    let Some(query) = query else {
        return false;
    };
    form_urlencoded::parse(query.as_bytes()).any(|(key, value)| key == "jsonp" && value == "true")
}
