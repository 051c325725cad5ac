//! Conflict detection and rules evaluation for university course schedules.
//!
//! Given a term's course sections (meeting slots, rooms, instructors,
//! capacities) and a rules configuration, reports which constraints are
//! broken, how severe each breach is, and how it might be fixed.
//!
//! # Modules
//!
//! - **`time`**: `HH:MM` parsing and half-open interval overlap
//! - **`models`**: Domain types: `Section`, `TimeSlot`, `StudentSchedule`,
//!   `Violation`, `ViolationType`, `Severity`
//! - **`config`**: Rules configuration, defaults, validation, versioned store
//! - **`checkers`**: Individual rule checks behind the `RuleChecker` trait
//! - **`evaluator`**: Runs the checkers and summarizes the results
//! - **`conflicts`**: Room/faculty clashes for a single section
//! - **`validation`**: Cross-record integrity checks on section input
//!
//! # Architecture
//!
//! Everything here is synchronous and side-effect free. Fetching sections
//! and persisting violations belong to the caller; an evaluation is a pure
//! function of its inputs and can run concurrently with others.

pub mod checkers;
pub mod config;
pub mod conflicts;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod time;
pub mod validation;

pub use error::{Result, ScheduleError};
