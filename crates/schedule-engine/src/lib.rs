//! # schedule-engine
//!
//! Deterministic grouping of a day's clinic appointments into display clusters.
//!
//! The calendar week and day views render overlapping appointments side by side
//! inside one block. This crate decides which appointments share a block: it
//! walks the day's appointments in a fixed order and merges each one into the
//! running group while it overlaps (or touches) the group and the group stays
//! within a maximum span.
//!
//! ## Modules
//!
//! - [`appointment`] — `Appointment` record and the `Scheduled` trait
//! - [`day`] — Anchoring a calendar date to the instant of local midnight
//! - [`grouping`] — Overlap grouping with a span cap
//! - [`error`] — Error types

pub mod appointment;
pub mod day;
pub mod error;
pub mod grouping;

pub use appointment::{validate_appointments, Appointment, Scheduled};
pub use day::{day_start, minute_offset};
pub use error::ScheduleError;
pub use grouping::{group_appointments, group_appointments_on, AppointmentGroup, GroupingOptions};
