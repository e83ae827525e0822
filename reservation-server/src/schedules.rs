//! Train schedule management.
//!
//! Plain create/read/update for schedules, plus the deletion guard: a
//! schedule that still lists reservations cannot be removed.

use std::sync::Arc;

use crate::domain::{RecordId, ScheduleInput, TrainSchedule};
use crate::reservations::{RecordKind, ReservationError};
use crate::store::ScheduleStore;

/// Schedule operations over a [`ScheduleStore`].
pub struct ScheduleService {
    store: Arc<dyn ScheduleStore>,
}

impl ScheduleService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Publish a new schedule with no reservations.
    pub async fn create(&self, input: ScheduleInput) -> Result<TrainSchedule, ReservationError> {
        let id = input.id.clone().unwrap_or_else(RecordId::generate);
        let schedule = input.into_schedule(id, Vec::new());
        self.store.insert_schedule(schedule.clone()).await?;
        tracing::info!(
            schedule = %schedule.id,
            train = %schedule.train_id,
            "train schedule created"
        );
        Ok(schedule)
    }

    /// Every schedule.
    pub async fn list(&self) -> Result<Vec<TrainSchedule>, ReservationError> {
        Ok(self.store.list_schedules().await?)
    }

    /// One schedule, if it exists.
    pub async fn get(&self, id: &RecordId) -> Result<Option<TrainSchedule>, ReservationError> {
        Ok(self.store.find_schedule(id).await?)
    }

    /// Replace a schedule's descriptive fields.
    ///
    /// The reservation back-references held at the time of the write are
    /// kept.
    pub async fn update(
        &self,
        id: &RecordId,
        input: ScheduleInput,
    ) -> Result<TrainSchedule, ReservationError> {
        let updated = self
            .store
            .update_schedule_details(id, input)
            .await?
            .ok_or_else(|| ReservationError::not_found(RecordKind::Schedule, id))?;

        tracing::info!(schedule = %id, "train schedule updated");
        Ok(updated)
    }

    /// Delete a schedule that has no reservations.
    pub async fn delete(&self, id: &RecordId) -> Result<(), ReservationError> {
        let schedule = self
            .store
            .find_schedule(id)
            .await?
            .ok_or_else(|| ReservationError::not_found(RecordKind::Schedule, id))?;

        if schedule.has_reservations() {
            return Err(ReservationError::ScheduleHasReservations {
                id: id.clone(),
                count: schedule.reservations.len(),
            });
        }

        if !self.store.delete_schedule(id).await? {
            return Err(ReservationError::not_found(RecordKind::Schedule, id));
        }

        tracing::info!(schedule = %id, "train schedule deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::ErrorKind;
    use crate::store::DocumentStore;

    fn id(s: &str) -> RecordId {
        RecordId::new(s.to_string()).unwrap()
    }

    fn input(sid: Option<&str>, train: &str) -> ScheduleInput {
        ScheduleInput {
            id: sid.map(id),
            date: "2026-03-12".into(),
            departure: "05:55".into(),
            arrival: "08:40".into(),
            train_id: train.into(),
            origin: "Colombo Fort".into(),
            destination: "Anuradhapura".into(),
            ticket_price: Some(800),
        }
    }

    fn service() -> (Arc<DocumentStore>, ScheduleService) {
        let store = Arc::new(DocumentStore::in_memory());
        (store.clone(), ScheduleService::new(store))
    }

    #[tokio::test]
    async fn create_and_get() {
        let (_store, service) = service();
        let created = service.create(input(Some("S1"), "Rajarata Rejini")).await.unwrap();
        assert!(created.reservations.is_empty());

        let fetched = service.get(&id("S1")).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(service.get(&id("S2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_generates_id() {
        let (_store, service) = service();
        let created = service.create(input(None, "Yal Devi")).await.unwrap();
        assert_eq!(service.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn create_duplicate_is_conflict() {
        let (_store, service) = service();
        service.create(input(Some("S1"), "A")).await.unwrap();
        let err = service.create(input(Some("S1"), "B")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn update_keeps_back_references() {
        let (store, service) = service();
        let booked = input(Some("S1"), "A").into_schedule(id("S1"), vec![id("R1")]);
        store.insert_schedule(booked).await.unwrap();

        let updated = service.update(&id("S1"), input(None, "B")).await.unwrap();
        assert_eq!(updated.train_id, "B");
        assert_eq!(updated.reservations, vec![id("R1")]);

        let stored = store.find_schedule(&id("S1")).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_store, service) = service();
        let err = service.update(&id("S9"), input(None, "B")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_unbooked_schedule() {
        let (store, service) = service();
        service.create(input(Some("S1"), "A")).await.unwrap();

        service.delete(&id("S1")).await.unwrap();
        assert!(store.find_schedule(&id("S1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_booked_schedule_is_refused() {
        let (store, service) = service();
        store
            .insert_schedule(input(None, "A").into_schedule(id("S1"), vec![id("R1"), id("R2")]))
            .await
            .unwrap();

        let err = service.delete(&id("S1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        assert!(matches!(
            err,
            ReservationError::ScheduleHasReservations { count: 2, .. }
        ));
        assert!(store.find_schedule(&id("S1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_store, service) = service();
        let err = service.delete(&id("S1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn update_racing_bookings_keeps_every_back_reference() {
        let (store, service) = service();
        let service = Arc::new(service);
        service.create(input(Some("S1"), "A")).await.unwrap();

        let bookings: Vec<_> = (0..20)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .add_reservation(&id("S1"), &id(&format!("R{n}")))
                        .await
                        .unwrap()
                })
            })
            .collect();
        let updates: Vec<_> = (0..20)
            .map(|n| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .update(&id("S1"), input(None, &format!("Train {n}")))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for task in bookings {
            assert!(task.await.unwrap());
        }
        for task in updates {
            task.await.unwrap();
        }

        let stored = store.find_schedule(&id("S1")).await.unwrap().unwrap();
        assert_eq!(stored.reservations.len(), 20);

        let err = service.delete(&id("S1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}
