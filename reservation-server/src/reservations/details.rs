//! Joining reservations with their schedule details.

use std::collections::{BTreeSet, HashMap};

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::domain::{RecordId, Reservation, TrainScheduleSummary};
use crate::store::{ScheduleStore, StoreError};

/// A reservation together with a summary of the schedule it is booked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    pub reservation: Reservation,
    pub train_schedule_details: TrainScheduleSummary,
}

/// Attach schedule summaries to each reservation.
///
/// Each distinct schedule is fetched once, concurrently. Reservations whose
/// schedule no longer exists are left out with a warning.
pub async fn enrich_all(
    schedules: &dyn ScheduleStore,
    reservations: Vec<Reservation>,
) -> Result<Vec<ReservationDetails>, StoreError> {
    let ids: BTreeSet<&RecordId> = reservations.iter().map(|r| &r.schedule_id).collect();

    let fetched = try_join_all(ids.into_iter().map(|id| async move {
        let schedule = schedules.find_schedule(id).await?;
        Ok::<_, StoreError>((id.clone(), schedule.map(|s| s.summary())))
    }))
    .await?;

    let summaries: HashMap<RecordId, TrainScheduleSummary> = fetched
        .into_iter()
        .filter_map(|(id, summary)| summary.map(|s| (id, s)))
        .collect();

    let details = reservations
        .into_iter()
        .filter_map(|reservation| match summaries.get(&reservation.schedule_id) {
            Some(summary) => Some(ReservationDetails {
                train_schedule_details: summary.clone(),
                reservation,
            }),
            None => {
                tracing::warn!(
                    reservation = %reservation.id,
                    schedule = %reservation.schedule_id,
                    "skipping reservation with missing train schedule"
                );
                None
            }
        })
        .collect();

    Ok(details)
}
