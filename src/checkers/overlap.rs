//! Room and instructor double-booking checkers.
//!
//! Both checkers share one routine: group every meeting slot by a key
//! (room number or instructor), then compare all pairs within a group and
//! report each same-day overlapping pair once.
//!
//! # Algorithm
//! Pairwise comparison within each group. O(k²) per group of k slots,
//! which is small for a single room or instructor in one term.
//! Groups are visited in key order and pairs in input order, so the
//! output is deterministic.

use std::collections::BTreeMap;

use super::{CheckContext, RuleChecker};
use crate::models::{AffectedEntity, Section, Severity, TimeSlot, Violation, ViolationType};

/// What to emit for an overlap within one group.
#[derive(Debug, Clone, Copy)]
pub struct OverlapRule {
    /// Violation type for each overlapping pair.
    pub violation_type: ViolationType,
    /// Entity type of the shared resource (`"room"`, `"instructor"`).
    pub resource_kind: &'static str,
    /// Violation title.
    pub title: &'static str,
    /// Resolution suggestions.
    pub suggestions: &'static [&'static str],
}

impl OverlapRule {
    /// Two sections in one room at the same time.
    pub const ROOM: OverlapRule = OverlapRule {
        violation_type: ViolationType::RoomConflict,
        resource_kind: "room",
        title: "Room double-booked",
        suggestions: &[
            "Move one section to a different room",
            "Reschedule one section to a non-overlapping time",
        ],
    };

    /// One instructor teaching two sections at the same time.
    pub const FACULTY: OverlapRule = OverlapRule {
        violation_type: ViolationType::FacultyConflict,
        resource_kind: "instructor",
        title: "Instructor double-booked",
        suggestions: &[
            "Assign a different instructor to one section",
            "Reschedule one section to a non-overlapping time",
        ],
    };
}

/// Reports every same-day overlapping pair of slots sharing a key.
///
/// Sections for which `key` returns `None` are ignored. Two slots of the
/// same section are never reported against each other. One violation is
/// produced per overlapping slot pair.
pub fn detect_pairwise_overlaps<'s, K>(
    sections: &'s [Section],
    key: K,
    rule: &OverlapRule,
    ctx: &CheckContext<'_>,
) -> Vec<Violation>
where
    K: Fn(&'s Section) -> Option<&'s str>,
{
    let mut groups: BTreeMap<&str, Vec<(&Section, &TimeSlot)>> = BTreeMap::new();
    for section in sections {
        if let Some(k) = key(section) {
            let group = groups.entry(k).or_default();
            group.extend(section.time_slots.iter().map(|slot| (section, slot)));
        }
    }

    let mut violations = Vec::new();
    for (resource, slots) in &groups {
        for (i, &(sa, a)) in slots.iter().enumerate() {
            for &(sb, b) in &slots[i + 1..] {
                if sa.id == sb.id || !a.conflicts_with(b) {
                    continue;
                }
                violations.push(overlap_violation(resource, (sa, a), (sb, b), rule, ctx));
            }
        }
    }

    violations
}

fn overlap_violation(
    resource: &str,
    (sa, a): (&Section, &TimeSlot),
    (sb, b): (&Section, &TimeSlot),
    rule: &OverlapRule,
    ctx: &CheckContext<'_>,
) -> Violation {
    let mut resource_entity = AffectedEntity::new(rule.resource_kind, resource);
    if rule.resource_kind == OverlapRule::FACULTY.resource_kind {
        if let Some(name) = sa.instructor_name.as_ref().or(sb.instructor_name.as_ref()) {
            resource_entity = resource_entity.with_name(name.as_str());
        }
    }

    Violation::new(
        rule.violation_type,
        Severity::Critical,
        rule.title,
        format!(
            "{} {} has overlapping sessions on {}: {} ({}) and {} ({})",
            rule.resource_kind,
            resource,
            a.day,
            sa.label(),
            a.range(),
            sb.label(),
            b.range()
        ),
        ctx.detected_at,
    )
    .with_entity(sa.as_entity())
    .with_entity(sb.as_entity())
    .with_entity(resource_entity)
    .with_suggestions(rule.suggestions.iter().copied())
    .auto_resolvable(true)
}

/// Flags sections booked in the same room at overlapping times.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoomConflictChecker;

impl RuleChecker for RoomConflictChecker {
    fn name(&self) -> &'static str {
        "room_conflicts"
    }

    fn passed_label(&self) -> &'static str {
        "Room conflicts"
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        detect_pairwise_overlaps(sections, |s| s.room_number.as_deref(), &OverlapRule::ROOM, ctx)
    }
}

/// Flags instructors teaching overlapping sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstructorConflictChecker;

impl RuleChecker for InstructorConflictChecker {
    fn name(&self) -> &'static str {
        "instructor_conflicts"
    }

    fn passed_label(&self) -> &'static str {
        "Instructor conflicts"
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        detect_pairwise_overlaps(
            sections,
            |s| s.instructor_id.as_deref(),
            &OverlapRule::FACULTY,
            ctx,
        )
    }
}

/// Room and instructor checks reported together as one "time conflicts"
/// check: room conflicts first, then instructor conflicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeConflictChecker;

impl RuleChecker for TimeConflictChecker {
    fn name(&self) -> &'static str {
        "time_conflicts"
    }

    fn passed_label(&self) -> &'static str {
        "Time conflicts"
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        let mut violations = RoomConflictChecker.check(sections, ctx);
        violations.extend(InstructorConflictChecker.check(sections, ctx));
        violations
    }
}
