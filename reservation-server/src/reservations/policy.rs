//! Date-window rules for reservations.

use chrono::{DateTime, Utc};

use crate::domain::{days_from_today, lead_time_days};

/// Booking and change windows applied to reservations.
#[derive(Debug, Clone)]
pub struct ReservationPolicy {
    /// How far ahead a travel date may be booked (days).
    pub creation_window_days: i64,

    /// Minimum whole days before travel for an update or cancellation.
    pub lock_window_days: i64,
}

impl ReservationPolicy {
    /// Create a policy with the given windows.
    pub fn new(creation_window_days: i64, lock_window_days: i64) -> Self {
        Self {
            creation_window_days,
            lock_window_days,
        }
    }

    /// Whether a travel date may be booked at `now`.
    ///
    /// Only the upper bound is enforced: dates in the past pass. An
    /// unparsable date never passes.
    pub fn within_creation_window(&self, travel_date: &str, now: DateTime<Utc>) -> bool {
        days_from_today(travel_date, now).is_ok_and(|days| days <= self.creation_window_days)
    }

    /// Whether a reservation travelling on `travel_date` may still be
    /// changed or cancelled at `now`.
    ///
    /// Unparsable dates always pass.
    pub fn permits_change(&self, travel_date: &str, now: DateTime<Utc>) -> bool {
        let lead = lead_time_days(travel_date, now);
        tracing::debug!(travel_date, lead_days = lead, "computed lead time");
        lead >= self.lock_window_days
    }
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            creation_window_days: 30,
            lock_window_days: 5,
        }
    }
}
