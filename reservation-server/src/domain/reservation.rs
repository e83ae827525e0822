//! Reservation documents.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A traveller's booking on a train schedule.
///
/// `date` is the travel date exactly as submitted. It is parsed on demand
/// (see [`super::parse_travel_instant`]) so that a stored value the parser
/// does not understand never prevents the document from loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "reservationID")]
    pub id: RecordId,

    #[serde(rename = "reservationTravellerID")]
    pub traveller_id: RecordId,

    #[serde(rename = "reservationTrainScheduleID")]
    pub schedule_id: RecordId,

    #[serde(rename = "reservationDate")]
    pub date: String,
}

/// Client-supplied reservation fields, used for both creation and updates.
///
/// The identifier is optional: creation generates one when absent, and
/// updates ignore it in favour of the identifier in the request path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservationInput {
    #[serde(rename = "reservationID", default)]
    pub id: Option<RecordId>,

    #[serde(rename = "reservationTravellerID")]
    pub traveller_id: RecordId,

    #[serde(rename = "reservationTrainScheduleID")]
    pub schedule_id: RecordId,

    #[serde(rename = "reservationDate")]
    pub date: String,
}

impl ReservationInput {
    /// Build the stored document under the given identifier.
    pub fn into_reservation(self, id: RecordId) -> Reservation {
        Reservation {
            id,
            traveller_id: self.traveller_id,
            schedule_id: self.schedule_id,
            date: self.date,
        }
    }
}
