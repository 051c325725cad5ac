//! Rule checkers.
//!
//! Each checker scans the section data against one rule category and
//! returns zero or more violations. Checkers are pure: they read the
//! sections and the rules, never mutate either, and hold no state between
//! calls. Running them in any order yields the same violations.
//!
//! # Built-in Checkers
//!
//! | Checker | Emits | Severity |
//! |---------|-------|----------|
//! | [`BreakTimeChecker`] | `constraint_violation` | warning |
//! | [`LoadChecker`] | `excessive_daily_load`, `excessive_weekly_load` | warning |
//! | [`CapacityChecker`] | `capacity_exceeded` | error |
//! | [`RoomConflictChecker`] | `room_conflict` | critical |
//! | [`InstructorConflictChecker`] | `faculty_conflict` | critical |
//! | [`TimeConflictChecker`] | both of the above | critical |
//! | [`SectionSizeChecker`] | `constraint_violation` | warning |

mod break_time;
mod enrollment;
mod load;
mod overlap;

pub use break_time::BreakTimeChecker;
pub use enrollment::{CapacityChecker, SectionSizeChecker};
pub use load::LoadChecker;
pub use overlap::{
    detect_pairwise_overlaps, InstructorConflictChecker, OverlapRule, RoomConflictChecker,
    TimeConflictChecker,
};

use chrono::{DateTime, Utc};
use std::fmt::Debug;

use crate::config::SchedulingRules;
use crate::models::{Section, StudentSchedule, Violation};

/// Inputs shared by all checkers in one evaluation pass.
///
/// `detected_at` is stamped on every violation of the pass, so two passes
/// with the same context produce identical output.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Active scheduling rules.
    pub rules: &'a SchedulingRules,
    /// Timestamp for emitted violations.
    pub detected_at: DateTime<Utc>,
    /// Per-student enrollments, when the caller has them.
    pub students: &'a [StudentSchedule],
}

impl<'a> CheckContext<'a> {
    /// Creates a context without student data.
    pub fn new(rules: &'a SchedulingRules, detected_at: DateTime<Utc>) -> Self {
        Self {
            rules,
            detected_at,
            students: &[],
        }
    }

    /// Attaches student enrollments.
    pub fn with_students(mut self, students: &'a [StudentSchedule]) -> Self {
        self.students = students;
        self
    }
}

/// A scheduling rule check.
///
/// # Contract
/// `check` returns every violation of the rule found in `sections` and
/// nothing else. When it returns no violations the evaluator records
/// `passed_label()` as a passed check.
pub trait RuleChecker: Send + Sync + Debug {
    /// Short identifier (e.g. `"capacity"`).
    fn name(&self) -> &'static str;

    /// Label reported when the check finds nothing.
    fn passed_label(&self) -> &'static str;

    /// Whether the rules turn this check on. Disabled checks are skipped
    /// entirely and report no label.
    fn is_enabled(&self, _rules: &SchedulingRules) -> bool {
        true
    }

    /// Scans the sections and returns violations.
    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation>;
}
