//! Train reservation server.
//!
//! Travellers book seats on published train schedules. Bookings are only
//! accepted a limited number of days ahead, and are frozen shortly before
//! the travel date. A schedule that has been booked cannot be deleted.

pub mod config;
pub mod domain;
pub mod reservations;
pub mod schedules;
pub mod store;
pub mod web;
