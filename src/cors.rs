//! CORS preflight interception and response annotation.
//!
//! # Responsibilities
//! - Answer OPTIONS preflights without invoking the backend
//! - Decorate backend responses with access-control headers
//!
//! # Design Decisions
//! - Wildcard Allow-Origin instead of echoing the caller's Origin, so
//!   intermediate proxies can cache the response
//! - Credentials disabled; a wildcard origin cannot carry credentials
//! - Annotation applies to backend error statuses as well

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, Response, StatusCode};

/// Methods advertised to preflighting browsers.
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";

/// Seconds a browser may cache the preflight result.
const PREFLIGHT_MAX_AGE: &str = "60";

/// Synthesize the response to an OPTIONS preflight.
///
/// The backend never sees these requests. `Access-Control-Allow-Headers`
/// echoes the caller's `Access-Control-Request-Headers` verbatim and is
/// omitted when the request carried none.
pub fn preflight_response(req: &Request<Body>) -> Response<Body> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "false")
        .header(header::ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8");

    if let Some(requested) = req.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
        builder = builder.header(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }

    // All header values above are valid; the builder cannot fail.
    builder
        .body(Body::empty())
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

/// Decorate a backend response with CORS headers.
///
/// Status and body pass through unchanged, whether the backend succeeded
/// or not.
pub fn annotate(mut response: Response<Body>) -> Response<Body> {
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("false"),
    );
    response
}
