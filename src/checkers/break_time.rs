//! Break-time checker.
//!
//! Flags every meeting that overlaps the common break window. The window
//! is a property of the checker, not of the rules configuration; the
//! default is the midday break 12:00-13:00.

use super::{CheckContext, RuleChecker};
use crate::models::{Section, Severity, Violation, ViolationType};
use crate::time::{ClockTime, TimeRange};

/// Flags meetings that overlap a protected break window.
#[derive(Debug, Clone, Copy)]
pub struct BreakTimeChecker {
    window: TimeRange,
}

impl BreakTimeChecker {
    /// Midday break, 12:00-13:00.
    pub const MIDDAY: TimeRange = TimeRange {
        start: ClockTime::hm(12, 0),
        end: ClockTime::hm(13, 0),
    };

    /// Creates a checker for a custom break window.
    pub fn new(window: TimeRange) -> Self {
        Self { window }
    }

    /// The protected window.
    pub fn window(&self) -> TimeRange {
        self.window
    }
}

impl Default for BreakTimeChecker {
    fn default() -> Self {
        Self::new(Self::MIDDAY)
    }
}

impl RuleChecker for BreakTimeChecker {
    fn name(&self) -> &'static str {
        "break_time"
    }

    fn passed_label(&self) -> &'static str {
        "Break time rules"
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for section in sections {
            for slot in &section.time_slots {
                if !slot.range().overlaps(&self.window) {
                    continue;
                }
                violations.push(
                    Violation::new(
                        ViolationType::ConstraintViolation,
                        Severity::Warning,
                        "Class scheduled during break time",
                        format!(
                            "{} meets on {} {} overlapping the {} break",
                            section.label(),
                            slot.day,
                            slot.range(),
                            self.window
                        ),
                        ctx.detected_at,
                    )
                    .with_entity(section.as_entity())
                    .with_suggestions([
                        "Reschedule to avoid break time",
                        "Split section into different time slots",
                    ])
                    .auto_resolvable(true),
                );
            }
        }

        violations
    }
}
