//! Cross-origin middleware for same-origin-only backends.
//!
//! Wraps an opaque backend service and translates two classes of
//! cross-origin browser traffic into requests the backend already
//! understands: CORS (preflight interception plus response annotation)
//! and JSONP (method, body, and callback encoded in GET parameters,
//! response rewrapped as an executable script).
//!
//! Install it as an Axum layer in front of the backend routes:
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/{*path}", any(backend_handler))
//!     .layer(middleware::from_fn_with_state(
//!         CrossOriginConfig::default(),
//!         cross_origin_middleware,
//!     ));
//! ```

pub mod classify;
pub mod config;
pub mod cors;
pub mod error;
pub mod jsonp;
pub mod middleware;

pub use classify::RequestKind;
pub use config::CrossOriginConfig;
pub use error::CrossOriginError;
pub use middleware::cross_origin_middleware;
