//! JSONP request translation and response wrapping.
//!
//! # Responsibilities
//! - Rewrite a JSONP-encoded GET into the request it describes (method
//!   override, body from `data`, control parameters stripped)
//! - Rewrap the backend response as an executable script
//!
//! # Design Decisions
//! - Immutable-in/immutable-out: `translate` consumes the request and
//!   returns a new one; nothing reads the request after rewriting
//! - `data` is the query parser's percent-decoded string, never JSON-parsed
//! - An absent or unparsable `method` keeps the original GET instead of
//!   failing the request
//! - The callback name is embedded verbatim unless strict mode is enabled

use axum::body::{to_bytes, Body};
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderValue, Method, Request, Response, Uri};
use url::form_urlencoded;

use crate::error::CrossOriginError;

/// Control keys consumed by the middleware; stripped before forwarding.
pub const RESERVED_KEYS: [&str; 5] = ["jsonp", "method", "callback", "_", "data"];

/// Function name used when the request omits `callback`.
const DEFAULT_CALLBACK: &str = "callback";

/// A JSONP request rewritten into the canonical form the backend
/// understands, plus the callback name for wrapping the response.
#[derive(Debug)]
pub struct TranslatedRequest {
    pub request: Request<Body>,
    pub callback: String,
}

/// Rewrite a JSONP-encoded request into the request it describes.
///
/// Only fails in strict mode, and only on the callback name; the backend
/// is not invoked here.
pub fn translate(
    req: Request<Body>,
    strict_callbacks: bool,
) -> Result<TranslatedRequest, CrossOriginError> {
    let (mut parts, body) = req.into_parts();

    let mut callback = None;
    let mut method = None;
    let mut data = None;
    let mut forwarded = form_urlencoded::Serializer::new(String::new());

    let query = parts.uri.query().unwrap_or("");
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if !RESERVED_KEYS.contains(&key.as_ref()) {
            forwarded.append_pair(&key, &value);
            continue;
        }
        match key.as_ref() {
            "callback" => callback = Some(value.into_owned()),
            "method" => method = Some(value.into_owned()),
            "data" => data = Some(value.into_owned()),
            // `jsonp` and the cache-buster `_` carry no payload.
            _ => {}
        }
    }

    let callback = callback.unwrap_or_else(|| DEFAULT_CALLBACK.to_string());
    if strict_callbacks && !is_plausible_callback(&callback) {
        return Err(CrossOriginError::InvalidCallback(callback));
    }

    if let Some(name) = method {
        match name.parse::<Method>() {
            Ok(method) => parts.method = method,
            Err(_) => {
                tracing::warn!(method = %name, "unparsable JSONP method override ignored");
            }
        }
    }

    parts.uri = rebuild_uri(&parts.uri, &forwarded.finish());

    let body = match data {
        Some(data) => Body::from(data),
        None => body,
    };

    Ok(TranslatedRequest {
        request: Request::from_parts(parts, body),
        callback,
    })
}

/// Replace the URI's query while keeping path, scheme, and authority.
fn rebuild_uri(uri: &Uri, query: &str) -> Uri {
    let target = if query.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), query)
    };

    // The path is taken from a valid URI and the query is freshly
    // percent-encoded, so parsing cannot fail; keep the original target
    // if it somehow does.
    match target.parse::<PathAndQuery>() {
        Ok(path_and_query) => {
            let mut uri_parts = uri.clone().into_parts();
            uri_parts.path_and_query = Some(path_and_query);
            Uri::from_parts(uri_parts).unwrap_or_else(|_| uri.clone())
        }
        Err(_) => uri.clone(),
    }
}

/// Aggregate the backend response body and rewrap it as
/// `<callback>(<body>);` with script headers.
///
/// The backend status passes through unchanged, error statuses included.
pub async fn wrap_response(
    callback: &str,
    response: Response<Body>,
) -> Result<Response<Body>, CrossOriginError> {
    let (mut parts, body) = response.into_parts();
    let backend_body = to_bytes(body, usize::MAX).await?;

    let mut wrapped = Vec::with_capacity(callback.len() + backend_body.len() + 3);
    wrapped.extend_from_slice(callback.as_bytes());
    wrapped.push(b'(');
    wrapped.extend_from_slice(&backend_body);
    wrapped.extend_from_slice(b");");

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/javascript"),
    );
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(wrapped.len()));

    Ok(Response::from_parts(parts, Body::from(wrapped)))
}

/// Accepts dotted identifier paths such as `ns.handlers.cb`. Consulted
/// only when strict mode is enabled.
fn is_plausible_callback(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}
