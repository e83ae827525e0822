//! Document identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an invalid record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record ID: {reason}")]
pub struct InvalidRecordId {
    reason: &'static str,
}

/// Identifier of a stored document (reservation, schedule or traveller).
///
/// Identifiers are opaque strings chosen by the client or generated at
/// creation. The only validation is that they must be non-empty.
///
/// # Examples
///
/// ```
/// use reservation_server::domain::RecordId;
///
/// let id = RecordId::new("R-1001".to_string()).unwrap();
/// assert_eq!(id.as_str(), "R-1001");
///
/// // Empty strings are rejected
/// assert!(RecordId::new("".to_string()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Create a new identifier from a string.
    ///
    /// Returns an error if the string is empty.
    pub fn new(s: String) -> Result<Self, InvalidRecordId> {
        if s.is_empty() {
            return Err(InvalidRecordId {
                reason: "record ID cannot be empty",
            });
        }
        Ok(RecordId(s))
    }

    /// Generate a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        RecordId(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the RecordId and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = InvalidRecordId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        RecordId::new(s)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
