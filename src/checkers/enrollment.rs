//! Enrollment checkers: capacity overflow and undersized sections.

use super::{CheckContext, RuleChecker};
use crate::config::SchedulingRules;
use crate::models::{Section, Severity, Violation, ViolationType};

/// Flags sections enrolled beyond their allowed maximum.
///
/// The maximum is `capacity`, or `capacity * (1 + overflow%/100)` when
/// overflow is allowed. Runs only when `respect_room_capacity` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityChecker;

impl RuleChecker for CapacityChecker {
    fn name(&self) -> &'static str {
        "capacity"
    }

    fn passed_label(&self) -> &'static str {
        "Room capacity"
    }

    fn is_enabled(&self, rules: &SchedulingRules) -> bool {
        rules.respect_room_capacity
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        if !self.is_enabled(ctx.rules) {
            return Vec::new();
        }

        sections
            .iter()
            .filter_map(|section| {
                let max_allowed = ctx.rules.max_allowed_enrollment(section.capacity);
                if f64::from(section.enrolled_count) <= max_allowed {
                    return None;
                }
                Some(
                    Violation::new(
                        ViolationType::CapacityExceeded,
                        Severity::Error,
                        "Section over capacity",
                        format!(
                            "{} has {} students enrolled; maximum allowed is {} (capacity {})",
                            section.label(),
                            section.enrolled_count,
                            max_allowed.floor(),
                            section.capacity
                        ),
                        ctx.detected_at,
                    )
                    .with_entity(section.as_entity())
                    .with_suggestions([
                        "Create an additional section",
                        "Move students to another section",
                        "Increase the section capacity or move to a larger room",
                    ])
                    .auto_resolvable(false),
                )
            })
            .collect()
    }
}

/// Flags sections enrolled below `min_students_per_section`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionSizeChecker;

impl RuleChecker for SectionSizeChecker {
    fn name(&self) -> &'static str {
        "section_size"
    }

    fn passed_label(&self) -> &'static str {
        "Section size"
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let min = ctx.rules.min_students_per_section;

        sections
            .iter()
            .filter(|s| s.enrolled_count < min)
            .map(|section| {
                Violation::new(
                    ViolationType::ConstraintViolation,
                    Severity::Warning,
                    "Section below minimum size",
                    format!(
                        "{} has {} students enrolled; minimum is {}",
                        section.label(),
                        section.enrolled_count,
                        min
                    ),
                    ctx.detected_at,
                )
                .with_entity(section.as_entity())
                .with_suggestions([
                    "Merge with another section",
                    "Consider cancelling the section",
                ])
                .auto_resolvable(false)
            })
            .collect()
    }
}
