//! Reservation lifecycle.
//!
//! Creation checks the schedule exists and the travel date is inside the
//! booking window, then stores the reservation and records its identifier on
//! the schedule. Updates and cancellations are refused once the travel date
//! is inside the lock window.
//!
//! The two writes made on creation are independent: if the schedule update
//! fails, the reservation stays stored without a back-reference on the
//! schedule. That only weakens the schedule deletion guard.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{RecordId, Reservation, ReservationInput, is_upcoming};
use crate::store::{ReservationStore, ScheduleStore};

use super::details::{ReservationDetails, enrich_all};
use super::error::{RecordKind, ReservationError};
use super::policy::ReservationPolicy;

/// Source of the current time.
pub type Clock = fn() -> DateTime<Utc>;

/// Orchestrates reservation changes across the two stores.
pub struct ReservationManager {
    reservations: Arc<dyn ReservationStore>,
    schedules: Arc<dyn ScheduleStore>,
    policy: ReservationPolicy,
    clock: Clock,
}

impl ReservationManager {
    /// Create a manager using the system clock.
    pub fn new(
        reservations: Arc<dyn ReservationStore>,
        schedules: Arc<dyn ScheduleStore>,
        policy: ReservationPolicy,
    ) -> Self {
        Self {
            reservations,
            schedules,
            policy,
            clock: Utc::now,
        }
    }

    /// Use a different clock (for tests).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Book a new reservation.
    ///
    /// The identifier is taken from the input when present, otherwise
    /// generated.
    pub async fn create(&self, input: ReservationInput) -> Result<Reservation, ReservationError> {
        let now = (self.clock)();

        if self.schedules.find_schedule(&input.schedule_id).await?.is_none() {
            return Err(ReservationError::not_found(
                RecordKind::Schedule,
                &input.schedule_id,
            ));
        }

        if !self.policy.within_creation_window(&input.date, now) {
            return Err(ReservationError::DateOutOfWindow {
                date: input.date,
                window_days: self.policy.creation_window_days,
            });
        }

        let id = input.id.clone().unwrap_or_else(RecordId::generate);
        let reservation = input.into_reservation(id);
        self.reservations
            .insert_reservation(reservation.clone())
            .await?;

        match self
            .schedules
            .add_reservation(&reservation.schedule_id, &reservation.id)
            .await
        {
            Ok(true) => {}
            Ok(false) => tracing::warn!(
                reservation = %reservation.id,
                schedule = %reservation.schedule_id,
                "schedule disappeared before back-reference was recorded"
            ),
            Err(e) => {
                tracing::warn!(
                    reservation = %reservation.id,
                    schedule = %reservation.schedule_id,
                    error = %e,
                    "reservation stored without schedule back-reference"
                );
                return Err(e.into());
            }
        }

        tracing::info!(
            reservation = %reservation.id,
            schedule = %reservation.schedule_id,
            traveller = %reservation.traveller_id,
            date = %reservation.date,
            "reservation created"
        );
        Ok(reservation)
    }

    /// Every reservation with its schedule summary.
    pub async fn list_with_details(&self) -> Result<Vec<ReservationDetails>, ReservationError> {
        let all = self.reservations.list_reservations().await?;
        Ok(enrich_all(self.schedules.as_ref(), all).await?)
    }

    /// One reservation with its schedule summary.
    ///
    /// Returns `Ok(None)` if the reservation does not exist, and a
    /// schedule `NotFound` error if it refers to a schedule that is gone.
    pub async fn get_with_details(
        &self,
        id: &RecordId,
    ) -> Result<Option<ReservationDetails>, ReservationError> {
        let Some(reservation) = self.reservations.find_reservation(id).await? else {
            return Ok(None);
        };

        let schedule = self
            .schedules
            .find_schedule(&reservation.schedule_id)
            .await?
            .ok_or_else(|| {
                ReservationError::not_found(RecordKind::Schedule, &reservation.schedule_id)
            })?;

        Ok(Some(ReservationDetails {
            train_schedule_details: schedule.summary(),
            reservation,
        }))
    }

    /// A traveller's reservations whose travel date is still ahead.
    pub async fn upcoming_for_traveller(
        &self,
        traveller_id: &RecordId,
    ) -> Result<Vec<ReservationDetails>, ReservationError> {
        let now = (self.clock)();
        let upcoming: Vec<Reservation> = self
            .reservations
            .find_by_traveller(traveller_id)
            .await?
            .into_iter()
            .filter(|r| is_upcoming(&r.date, now))
            .collect();
        Ok(enrich_all(self.schedules.as_ref(), upcoming).await?)
    }

    /// A traveller's full reservation history.
    pub async fn history_for_traveller(
        &self,
        traveller_id: &RecordId,
    ) -> Result<Vec<ReservationDetails>, ReservationError> {
        let all = self.reservations.find_by_traveller(traveller_id).await?;
        Ok(enrich_all(self.schedules.as_ref(), all).await?)
    }

    /// Replace a reservation's fields, keeping its identifier.
    ///
    /// The lock window is measured against the travel date already stored,
    /// not the one being submitted.
    pub async fn update(
        &self,
        id: &RecordId,
        input: ReservationInput,
    ) -> Result<Reservation, ReservationError> {
        let now = (self.clock)();
        let existing = self.find_existing(id).await?;
        self.ensure_changeable(&existing, now)?;

        let updated = input.into_reservation(id.clone());
        if self
            .reservations
            .replace_reservation(updated.clone())
            .await?
            == 0
        {
            return Err(ReservationError::not_found(RecordKind::Reservation, id));
        }

        tracing::info!(
            reservation = %id,
            previous_date = %existing.date,
            date = %updated.date,
            "reservation updated"
        );
        Ok(updated)
    }

    /// Cancel a reservation.
    ///
    /// The schedule's back-reference is left in place.
    pub async fn delete(&self, id: &RecordId) -> Result<(), ReservationError> {
        let now = (self.clock)();
        let existing = self.find_existing(id).await?;
        self.ensure_changeable(&existing, now)?;

        if !self.reservations.delete_reservation(id).await? {
            return Err(ReservationError::not_found(RecordKind::Reservation, id));
        }

        tracing::info!(reservation = %id, date = %existing.date, "reservation deleted");
        Ok(())
    }

    async fn find_existing(&self, id: &RecordId) -> Result<Reservation, ReservationError> {
        self.reservations
            .find_reservation(id)
            .await?
            .ok_or_else(|| ReservationError::not_found(RecordKind::Reservation, id))
    }

    fn ensure_changeable(
        &self,
        existing: &Reservation,
        now: DateTime<Utc>,
    ) -> Result<(), ReservationError> {
        if self.policy.permits_change(&existing.date, now) {
            return Ok(());
        }
        Err(ReservationError::TooCloseToTravelDate {
            id: existing.id.clone(),
            date: existing.date.clone(),
            lock_days: self.policy.lock_window_days,
        })
    }
}
