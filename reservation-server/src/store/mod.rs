//! Document store for schedules and reservations.
//!
//! The reservation lifecycle talks to storage through two narrow traits,
//! [`ScheduleStore`] and [`ReservationStore`]. [`DocumentStore`] implements
//! both, either purely in memory or mirrored to JSON files on disk.
//!
//! Each individual operation is atomic. Nothing here coordinates writes
//! across the two collections.

mod collection;
mod error;

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{RecordId, Reservation, ScheduleInput, TrainSchedule};

pub use collection::{Collection, Document};
pub use error::StoreError;

/// Name of the schedule collection.
pub const SCHEDULES: &str = "train_schedules";

/// Name of the reservation collection.
pub const RESERVATIONS: &str = "reservations";

/// Persistence for train schedules.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Find a schedule by identifier.
    async fn find_schedule(&self, id: &RecordId) -> Result<Option<TrainSchedule>, StoreError>;

    /// List every schedule.
    async fn list_schedules(&self) -> Result<Vec<TrainSchedule>, StoreError>;

    /// Insert a new schedule.
    async fn insert_schedule(&self, schedule: TrainSchedule) -> Result<(), StoreError>;

    /// Replace the schedule with the same identifier. Returns `false` if absent.
    async fn replace_schedule(&self, schedule: TrainSchedule) -> Result<bool, StoreError>;

    /// Append a reservation to a schedule's back-references in one atomic
    /// step. Returns `false` if the schedule is absent.
    async fn add_reservation(
        &self,
        schedule_id: &RecordId,
        reservation_id: &RecordId,
    ) -> Result<bool, StoreError>;

    /// Overwrite a schedule's descriptive fields, keeping the back-references
    /// it holds at the time of the write. Returns `None` if absent.
    async fn update_schedule_details(
        &self,
        id: &RecordId,
        input: ScheduleInput,
    ) -> Result<Option<TrainSchedule>, StoreError>;

    /// Delete a schedule. Returns `false` if absent.
    async fn delete_schedule(&self, id: &RecordId) -> Result<bool, StoreError>;
}

/// Persistence for reservations.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a new reservation.
    async fn insert_reservation(&self, reservation: Reservation) -> Result<(), StoreError>;

    /// Find a reservation by identifier.
    async fn find_reservation(&self, id: &RecordId) -> Result<Option<Reservation>, StoreError>;

    /// List every reservation.
    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError>;

    /// List the reservations belonging to one traveller.
    async fn find_by_traveller(
        &self,
        traveller_id: &RecordId,
    ) -> Result<Vec<Reservation>, StoreError>;

    /// Replace the reservation with the same identifier.
    ///
    /// Returns the number of documents matched (0 or 1).
    async fn replace_reservation(&self, reservation: Reservation) -> Result<u64, StoreError>;

    /// Delete a reservation. Returns `false` if absent.
    async fn delete_reservation(&self, id: &RecordId) -> Result<bool, StoreError>;
}

/// Both collections of the reservation system.
pub struct DocumentStore {
    schedules: Collection<TrainSchedule>,
    reservations: Collection<Reservation>,
}

impl DocumentStore {
    /// Create an empty store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self {
            schedules: Collection::in_memory(SCHEDULES),
            reservations: Collection::in_memory(RESERVATIONS),
        }
    }

    /// Open a store persisted as JSON files in `dir`.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        Ok(Self {
            schedules: Collection::open(SCHEDULES, dir).await?,
            reservations: Collection::open(RESERVATIONS, dir).await?,
        })
    }
}

#[async_trait]
impl ScheduleStore for DocumentStore {
    async fn find_schedule(&self, id: &RecordId) -> Result<Option<TrainSchedule>, StoreError> {
        Ok(self.schedules.get(id).await)
    }

    async fn list_schedules(&self) -> Result<Vec<TrainSchedule>, StoreError> {
        Ok(self.schedules.all().await)
    }

    async fn insert_schedule(&self, schedule: TrainSchedule) -> Result<(), StoreError> {
        self.schedules.insert(schedule).await
    }

    async fn replace_schedule(&self, schedule: TrainSchedule) -> Result<bool, StoreError> {
        self.schedules.replace(schedule).await
    }

    async fn add_reservation(
        &self,
        schedule_id: &RecordId,
        reservation_id: &RecordId,
    ) -> Result<bool, StoreError> {
        let written = self
            .schedules
            .modify(schedule_id, |s| s.reservations.push(reservation_id.clone()))
            .await?;
        Ok(written.is_some())
    }

    async fn update_schedule_details(
        &self,
        id: &RecordId,
        input: ScheduleInput,
    ) -> Result<Option<TrainSchedule>, StoreError> {
        self.schedules
            .modify(id, |s| {
                let reservations = std::mem::take(&mut s.reservations);
                *s = input.into_schedule(s.id.clone(), reservations);
            })
            .await
    }

    async fn delete_schedule(&self, id: &RecordId) -> Result<bool, StoreError> {
        self.schedules.remove(id).await
    }
}

#[async_trait]
impl ReservationStore for DocumentStore {
    async fn insert_reservation(&self, reservation: Reservation) -> Result<(), StoreError> {
        self.reservations.insert(reservation).await
    }

    async fn find_reservation(&self, id: &RecordId) -> Result<Option<Reservation>, StoreError> {
        Ok(self.reservations.get(id).await)
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.reservations.all().await)
    }

    async fn find_by_traveller(
        &self,
        traveller_id: &RecordId,
    ) -> Result<Vec<Reservation>, StoreError> {
        Ok(self
            .reservations
            .filter(|r| &r.traveller_id == traveller_id)
            .await)
    }

    async fn replace_reservation(&self, reservation: Reservation) -> Result<u64, StoreError> {
        let matched = self.reservations.replace(reservation).await?;
        Ok(u64::from(matched))
    }

    async fn delete_reservation(&self, id: &RecordId) -> Result<bool, StoreError> {
        self.reservations.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn id(s: &str) -> RecordId {
        RecordId::new(s.to_string()).unwrap()
    }

    fn reservation(rid: &str, traveller: &str) -> Reservation {
        Reservation {
            id: id(rid),
            traveller_id: id(traveller),
            schedule_id: id("S1"),
            date: "2026-03-01".into(),
        }
    }

    fn schedule(sid: &str) -> TrainSchedule {
        TrainSchedule {
            id: id(sid),
            date: "2026-03-01".into(),
            departure: "08:00".into(),
            arrival: "10:00".into(),
            train_id: "T-100".into(),
            origin: "A".into(),
            destination: "B".into(),
            ticket_price: None,
            reservations: Vec::new(),
        }
    }

    #[tokio::test]
    async fn find_by_traveller_filters() {
        let store = DocumentStore::in_memory();
        store.insert_reservation(reservation("R1", "T1")).await.unwrap();
        store.insert_reservation(reservation("R2", "T2")).await.unwrap();
        store.insert_reservation(reservation("R3", "T1")).await.unwrap();

        let found = store.find_by_traveller(&id("T1")).await.unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R1", "R3"]);

        assert!(store.find_by_traveller(&id("T9")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_reservation_counts_matches() {
        let store = DocumentStore::in_memory();
        assert_eq!(
            store.replace_reservation(reservation("R1", "T1")).await.unwrap(),
            0
        );

        store.insert_reservation(reservation("R1", "T1")).await.unwrap();
        assert_eq!(
            store.replace_reservation(reservation("R1", "T2")).await.unwrap(),
            1
        );
        let stored = store.find_reservation(&id("R1")).await.unwrap().unwrap();
        assert_eq!(stored.traveller_id.as_str(), "T2");
    }

    #[tokio::test]
    async fn schedule_crud() {
        let store = DocumentStore::in_memory();
        store.insert_schedule(schedule("S1")).await.unwrap();
        assert!(store.find_schedule(&id("S1")).await.unwrap().is_some());

        let mut updated = schedule("S1");
        updated.reservations.push(id("R1"));
        assert!(store.replace_schedule(updated).await.unwrap());
        let stored = store.find_schedule(&id("S1")).await.unwrap().unwrap();
        assert_eq!(stored.reservations, vec![id("R1")]);

        assert!(store.delete_schedule(&id("S1")).await.unwrap());
        assert!(store.list_schedules().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_add_reservation_keeps_every_entry() {
        let dir = tempdir().unwrap();
        let store = Arc::new(DocumentStore::open(dir.path()).await.unwrap());
        store.insert_schedule(schedule("S1")).await.unwrap();

        let tasks: Vec<_> = (0..20)
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
        for task in tasks {
            assert!(task.await.unwrap());
        }

        let stored = store.find_schedule(&id("S1")).await.unwrap().unwrap();
        assert_eq!(stored.reservations.len(), 20);
        assert!(!store.add_reservation(&id("S9"), &id("R1")).await.unwrap());
    }

    #[tokio::test]
    async fn update_schedule_details_keeps_back_references() {
        let store = DocumentStore::in_memory();
        store.insert_schedule(schedule("S1")).await.unwrap();
        store.add_reservation(&id("S1"), &id("R1")).await.unwrap();

        let input = ScheduleInput {
            id: Some(id("ignored")),
            date: "2026-03-02".into(),
            departure: "09:00".into(),
            arrival: "11:00".into(),
            train_id: "T-200".into(),
            origin: "A".into(),
            destination: "C".into(),
            ticket_price: Some(300),
        };
        let written = store
            .update_schedule_details(&id("S1"), input.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(written.id, id("S1"));
        assert_eq!(written.destination, "C");
        assert_eq!(written.reservations, vec![id("R1")]);
        assert_eq!(store.find_schedule(&id("S1")).await.unwrap(), Some(written));

        assert!(
            store
                .update_schedule_details(&id("S9"), input)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn open_persists_both_collections() {
        let dir = tempdir().unwrap();
        {
            let store = DocumentStore::open(dir.path()).await.unwrap();
            store.insert_schedule(schedule("S1")).await.unwrap();
            store.insert_reservation(reservation("R1", "T1")).await.unwrap();
        }

        assert!(dir.path().join("train_schedules.json").exists());
        assert!(dir.path().join("reservations.json").exists());

        let store = DocumentStore::open(dir.path()).await.unwrap();
        assert_eq!(store.list_schedules().await.unwrap().len(), 1);
        assert_eq!(store.list_reservations().await.unwrap().len(), 1);
    }
}
