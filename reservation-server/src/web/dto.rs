//! Data transfer objects for web requests and responses.
//!
//! Reservation and schedule documents serialize directly from the domain
//! types; only the envelopes that have no domain counterpart live here.

use serde::{Deserialize, Serialize};

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
