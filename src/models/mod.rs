//! Course scheduling domain models.
//!
//! Provides the data types the rule checkers read and write: sections with
//! their weekly meeting slots, per-student enrollments, and the violations
//! emitted when a rule is broken.
//!
//! # Domain Mappings
//!
//! | schedule-rules | Registrar | Facilities | Faculty |
//! |----------------|-----------|------------|---------|
//! | Section | Course offering | Room booking | Teaching assignment |
//! | TimeSlot | Meeting pattern | Reservation | Class hour |
//! | Violation | Registration hold | Double booking | Clash |

mod section;
mod violation;

pub use section::{Section, StudentSchedule, TimeSlot};
pub use violation::{AffectedEntity, Severity, Violation, ViolationType};
