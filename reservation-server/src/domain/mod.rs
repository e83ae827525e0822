//! Domain types for the reservation server.
//!
//! Documents are stored with the field names the service has always
//! exposed over the wire; the Rust field names are snake_case aliases.

mod record_id;
mod reservation;
mod schedule;
mod travel_date;

pub use record_id::{InvalidRecordId, RecordId};
pub use reservation::{Reservation, ReservationInput};
pub use schedule::{ScheduleInput, TrainSchedule, TrainScheduleSummary};
pub use travel_date::{
    DateParseError, UNPARSABLE_LEAD_TIME, days_from_today, is_upcoming, lead_time_days,
    parse_travel_instant, whole_days_between,
};
