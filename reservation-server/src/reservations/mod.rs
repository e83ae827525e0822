//! Reservation lifecycle management.
//!
//! This module holds the business rules of the service: the booking window
//! applied when a reservation is created, the lock window that freezes a
//! reservation shortly before travel, and the back-reference kept on each
//! schedule so that booked schedules cannot be deleted.

mod details;
mod error;
mod manager;
mod policy;

pub use details::{ReservationDetails, enrich_all};
pub use error::{ErrorKind, RecordKind, ReservationError};
pub use manager::{Clock, ReservationManager};
pub use policy::ReservationPolicy;
