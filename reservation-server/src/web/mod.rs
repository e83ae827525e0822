//! Web layer for the reservation server.
//!
//! Provides HTTP endpoints for train schedules and reservations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
