//! Data transfer objects specific to the HTTP surface.
//!
//! Query answers reuse the request-document payloads; only the query string
//! and error body live here.

use serde::{Deserialize, Serialize};

/// Query string of `GET /route`.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Stop to start from
    pub from: String,

    /// Stop to arrive at
    pub to: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
