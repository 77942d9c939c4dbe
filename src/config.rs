//! Middleware configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the cross-origin middleware.
///
/// The default preserves the permissive contract: callback names are
/// embedded verbatim into the JSONP response body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CrossOriginConfig {
    /// Reject JSONP requests whose `callback` is not a plausible
    /// JavaScript callback path (dotted identifiers) with 400 instead of
    /// embedding the value verbatim.
    pub strict_callbacks: bool,
}
