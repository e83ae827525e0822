//! Reservation lifecycle errors.

use std::fmt;

use crate::domain::RecordId;
use crate::store::{RESERVATIONS, StoreError};

/// The kind of document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Reservation,
    Schedule,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Reservation => f.write_str("reservation"),
            RecordKind::Schedule => f.write_str("train schedule"),
        }
    }
}

/// Broad classification of a [`ReservationError`], for mapping to a
/// transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced document does not exist
    NotFound,
    /// The input violates a booking rule
    InvalidArgument,
    /// The input is valid but the current state forbids the operation
    InvalidOperation,
    /// The identifier is already taken
    Conflict,
    /// Storage failed
    Internal,
}

/// Errors from reservation and schedule operations.
#[derive(Debug, thiserror::Error)]
pub enum ReservationError {
    /// Referenced document is absent
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: RecordId },

    /// Travel date is beyond the booking window (or unreadable)
    #[error("invalid reservation date {date:?}: must be within {window_days} days of booking")]
    DateOutOfWindow { date: String, window_days: i64 },

    /// Too close to the travel date to change or cancel
    #[error(
        "reservation {id} travels on {date} and can no longer be changed (less than {lock_days} days remain)"
    )]
    TooCloseToTravelDate {
        id: RecordId,
        date: String,
        lock_days: i64,
    },

    /// Schedule still has reservations linked to it
    #[error("train schedule {id} cannot be deleted: it has {count} associated reservation(s)")]
    ScheduleHasReservations { id: RecordId, count: usize },

    /// A document with this identifier already exists
    #[error("{kind} {id} already exists")]
    AlreadyExists { kind: RecordKind, id: RecordId },

    /// Storage backend failure
    #[error("storage error: {0}")]
    Store(#[source] StoreError),
}

impl ReservationError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::NotFound { .. } => ErrorKind::NotFound,
            ReservationError::DateOutOfWindow { .. } => ErrorKind::InvalidArgument,
            ReservationError::TooCloseToTravelDate { .. }
            | ReservationError::ScheduleHasReservations { .. } => ErrorKind::InvalidOperation,
            ReservationError::AlreadyExists { .. } => ErrorKind::Conflict,
            ReservationError::Store(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn not_found(kind: RecordKind, id: &RecordId) -> Self {
        ReservationError::NotFound {
            kind,
            id: id.clone(),
        }
    }
}

impl From<StoreError> for ReservationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { collection, id } => {
                let kind = if collection == RESERVATIONS {
                    RecordKind::Reservation
                } else {
                    RecordKind::Schedule
                };
                ReservationError::AlreadyExists { kind, id }
            }
            other => ReservationError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::new(s.to_string()).unwrap()
    }

    #[test]
    fn error_display() {
        let err = ReservationError::not_found(RecordKind::Schedule, &id("S1"));
        assert_eq!(err.to_string(), "train schedule not found: S1");

        let err = ReservationError::DateOutOfWindow {
            date: "2026-09-01".into(),
            window_days: 30,
        };
        assert_eq!(
            err.to_string(),
            "invalid reservation date \"2026-09-01\": must be within 30 days of booking"
        );

        let err = ReservationError::ScheduleHasReservations {
            id: id("S1"),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "train schedule S1 cannot be deleted: it has 2 associated reservation(s)"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(
            ReservationError::not_found(RecordKind::Reservation, &id("R1")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ReservationError::DateOutOfWindow {
                date: String::new(),
                window_days: 30
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ReservationError::TooCloseToTravelDate {
                id: id("R1"),
                date: "2026-03-02".into(),
                lock_days: 5
            }
            .kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(
            ReservationError::ScheduleHasReservations {
                id: id("S1"),
                count: 1
            }
            .kind(),
            ErrorKind::InvalidOperation
        );
    }

    #[test]
    fn duplicate_store_error_becomes_conflict() {
        let err: ReservationError = StoreError::Duplicate {
            collection: "reservations",
            id: id("R1"),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "reservation R1 already exists");

        let err: ReservationError = StoreError::Duplicate {
            collection: "train_schedules",
            id: id("S1"),
        }
        .into();
        assert_eq!(err.to_string(), "train schedule S1 already exists");
    }
}
