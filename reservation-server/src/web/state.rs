//! Application state for the web layer.

use std::sync::Arc;

use crate::reservations::{ReservationManager, ReservationPolicy};
use crate::schedules::ScheduleService;
use crate::store::DocumentStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Reservation lifecycle
    pub reservations: Arc<ReservationManager>,

    /// Schedule management and deletion guard
    pub schedules: Arc<ScheduleService>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(reservations: ReservationManager, schedules: ScheduleService) -> Self {
        Self {
            reservations: Arc::new(reservations),
            schedules: Arc::new(schedules),
        }
    }

    /// Wire both services to a single document store.
    pub fn from_store(store: Arc<DocumentStore>, policy: ReservationPolicy) -> Self {
        let reservations = ReservationManager::new(store.clone(), store.clone(), policy);
        let schedules = ScheduleService::new(store);
        Self::new(reservations, schedules)
    }
}
