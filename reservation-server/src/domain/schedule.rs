//! Train schedule documents.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// A published train schedule.
///
/// `reservations` lists the identifiers of reservations booked against this
/// schedule. It is appended to when a reservation is created and guards
/// deletion; it is not the authoritative list of bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSchedule {
    #[serde(rename = "trainScheduleID")]
    pub id: RecordId,

    #[serde(rename = "trainScheduleDate")]
    pub date: String,

    #[serde(rename = "trainScheduleDept")]
    pub departure: String,

    #[serde(rename = "trainScheduleArr")]
    pub arrival: String,

    #[serde(rename = "trainScheduleTrainID")]
    pub train_id: String,

    #[serde(rename = "trainScheduleDeparturePoint")]
    pub origin: String,

    #[serde(rename = "trainScheduleDestinationPoint")]
    pub destination: String,

    #[serde(rename = "trainScheduleTicketPrice", default)]
    pub ticket_price: Option<u32>,

    #[serde(default)]
    pub reservations: Vec<RecordId>,
}

impl TrainSchedule {
    /// Whether any reservation refers back to this schedule.
    pub fn has_reservations(&self) -> bool {
        !self.reservations.is_empty()
    }

    /// The subset of fields shown alongside a reservation.
    pub fn summary(&self) -> TrainScheduleSummary {
        TrainScheduleSummary {
            departure: self.departure.clone(),
            arrival: self.arrival.clone(),
            train_id: self.train_id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
        }
    }
}

/// Schedule details attached to a reservation in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainScheduleSummary {
    #[serde(rename = "trainScheduleDept")]
    pub departure: String,

    #[serde(rename = "trainScheduleArr")]
    pub arrival: String,

    #[serde(rename = "trainScheduleTrainID")]
    pub train_id: String,

    #[serde(rename = "trainScheduleDeparturePoint")]
    pub origin: String,

    #[serde(rename = "trainScheduleDestinationPoint")]
    pub destination: String,
}

/// Client-supplied schedule fields.
///
/// Back-references are not accepted from clients; they are maintained by
/// the reservation lifecycle only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleInput {
    #[serde(rename = "trainScheduleID", default)]
    pub id: Option<RecordId>,

    #[serde(rename = "trainScheduleDate")]
    pub date: String,

    #[serde(rename = "trainScheduleDept")]
    pub departure: String,

    #[serde(rename = "trainScheduleArr")]
    pub arrival: String,

    #[serde(rename = "trainScheduleTrainID")]
    pub train_id: String,

    #[serde(rename = "trainScheduleDeparturePoint")]
    pub origin: String,

    #[serde(rename = "trainScheduleDestinationPoint")]
    pub destination: String,

    #[serde(rename = "trainScheduleTicketPrice", default)]
    pub ticket_price: Option<u32>,
}

impl ScheduleInput {
    /// Build a schedule document with the given identifier and back-references.
    pub fn into_schedule(self, id: RecordId, reservations: Vec<RecordId>) -> TrainSchedule {
        TrainSchedule {
            id,
            date: self.date,
            departure: self.departure,
            arrival: self.arrival,
            train_id: self.train_id,
            origin: self.origin,
            destination: self.destination,
            ticket_price: self.ticket_price,
            reservations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrainSchedule {
        TrainSchedule {
            id: RecordId::new("S1".into()).unwrap(),
            date: "2026-03-01".into(),
            departure: "08:15".into(),
            arrival: "11:40".into(),
            train_id: "IC-1042".into(),
            origin: "Colombo Fort".into(),
            destination: "Kandy".into(),
            ticket_price: Some(1200),
            reservations: Vec::new(),
        }
    }

    #[test]
    fn summary_copies_route_fields() {
        let summary = sample().summary();
        assert_eq!(summary.departure, "08:15");
        assert_eq!(summary.arrival, "11:40");
        assert_eq!(summary.train_id, "IC-1042");
        assert_eq!(summary.origin, "Colombo Fort");
        assert_eq!(summary.destination, "Kandy");
    }

    #[test]
    fn has_reservations() {
        let mut schedule = sample();
        assert!(!schedule.has_reservations());
        schedule.reservations.push(RecordId::new("R1".into()).unwrap());
        assert!(schedule.has_reservations());
    }

    #[test]
    fn missing_back_references_default_to_empty() {
        let schedule: TrainSchedule = serde_json::from_str(
            r#"{
                "trainScheduleID": "S1",
                "trainScheduleDate": "2026-03-01",
                "trainScheduleDept": "08:15",
                "trainScheduleArr": "11:40",
                "trainScheduleTrainID": "IC-1042",
                "trainScheduleDeparturePoint": "Colombo Fort",
                "trainScheduleDestinationPoint": "Kandy"
            }"#,
        )
        .unwrap();
        assert!(schedule.reservations.is_empty());
        assert_eq!(schedule.ticket_price, None);
    }

    #[test]
    fn into_schedule_attaches_back_references() {
        let input: ScheduleInput = serde_json::from_value(serde_json::json!({
            "trainScheduleDate": "2026-03-02",
            "trainScheduleDept": "09:00",
            "trainScheduleArr": "12:00",
            "trainScheduleTrainID": "IC-2000",
            "trainScheduleDeparturePoint": "Galle",
            "trainScheduleDestinationPoint": "Colombo Fort",
            "trainScheduleTicketPrice": 900
        }))
        .unwrap();

        let refs = vec![RecordId::new("R1".into()).unwrap()];
        let schedule = input.into_schedule(RecordId::new("S1".into()).unwrap(), refs.clone());
        assert_eq!(schedule.reservations, refs);
        assert_eq!(schedule.ticket_price, Some(900));
    }
}
