//! Violation (schedule conflict) model.
//!
//! A violation is emitted by a rule checker when the section data breaks
//! one rule. It carries a type, a fixed severity, the entities involved,
//! and suggested remedies. Within one evaluation pass a violation is
//! never modified; persisted copies may later be marked resolved by the
//! calling code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of detected problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// A student's sections meet at the same time.
    TimeOverlap,
    /// Two exams are scheduled at the same time.
    ExamOverlap,
    /// Enrollment above the allowed capacity.
    CapacityExceeded,
    /// Enrollment without a required prerequisite.
    PrerequisiteViolation,
    /// Two sections booked in the same room at the same time.
    RoomConflict,
    /// One instructor teaching two sections at the same time.
    FacultyConflict,
    /// A configured scheduling rule is broken.
    ConstraintViolation,
    /// A requested elective is not offered.
    ElectiveUnavailable,
    /// Too many class hours on one day.
    ExcessiveDailyLoad,
    /// Too many class hours in one week.
    ExcessiveWeeklyLoad,
    /// Gap between classes is too long.
    LargeGap,
    /// Section scheduled outside an instructor's availability.
    FacultyUnavailable,
    /// A required course is missing from a schedule.
    MissingRequiredCourse,
}

impl ViolationType {
    /// Wire name (`"room_conflict"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationType::TimeOverlap => "time_overlap",
            ViolationType::ExamOverlap => "exam_overlap",
            ViolationType::CapacityExceeded => "capacity_exceeded",
            ViolationType::PrerequisiteViolation => "prerequisite_violation",
            ViolationType::RoomConflict => "room_conflict",
            ViolationType::FacultyConflict => "faculty_conflict",
            ViolationType::ConstraintViolation => "constraint_violation",
            ViolationType::ElectiveUnavailable => "elective_unavailable",
            ViolationType::ExcessiveDailyLoad => "excessive_daily_load",
            ViolationType::ExcessiveWeeklyLoad => "excessive_weekly_load",
            ViolationType::LargeGap => "large_gap",
            ViolationType::FacultyUnavailable => "faculty_unavailable",
            ViolationType::MissingRequiredCourse => "missing_required_course",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a violation is.
///
/// Ordering is fixed: `Critical > Error > Warning > Info`. A checker
/// assigns severity once; nothing downstream changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Should be looked at.
    Warning,
    /// Must be fixed before publishing.
    Error,
    /// Physically impossible schedule (double booking).
    Critical,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity involved in a violation (section, room, instructor, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedEntity {
    /// Entity kind (`"section"`, `"room"`, `"instructor"`, `"student"`).
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Entity identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AffectedEntity {
    /// Creates an entity reference.
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            name: None,
        }
    }

    /// A section reference with display name.
    pub fn section(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new("section", id).with_name(name)
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A detected rule breach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Persisted row ID; `None` until stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Violation category.
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    /// Severity, fixed at emission.
    pub severity: Severity,
    /// Short headline.
    pub title: String,
    /// Human-readable detail.
    pub description: String,
    /// Entities involved.
    pub affected_entities: Vec<AffectedEntity>,
    /// Suggested remedies.
    pub resolution_suggestions: Vec<String>,
    /// Whether a suggested fix could in principle be applied automatically.
    pub auto_resolvable: bool,
    /// When the evaluation pass that found this ran.
    pub detected_at: DateTime<Utc>,
    /// Whether the violation has been resolved.
    #[serde(default)]
    pub resolved: bool,
    /// Who resolved it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    /// When it was resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Violation {
    /// Creates an unresolved violation with no entities or suggestions.
    pub fn new(
        violation_type: ViolationType,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        detected_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            violation_type,
            severity,
            title: title.into(),
            description: description.into(),
            affected_entities: Vec::new(),
            resolution_suggestions: Vec::new(),
            auto_resolvable: false,
            detected_at,
            resolved: false,
            resolved_by: None,
            resolved_at: None,
        }
    }

    /// Adds an affected entity.
    pub fn with_entity(mut self, entity: AffectedEntity) -> Self {
        self.affected_entities.push(entity);
        self
    }

    /// Sets the resolution suggestions.
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resolution_suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the auto-resolvable flag.
    pub fn auto_resolvable(mut self, auto: bool) -> Self {
        self.auto_resolvable = auto;
        self
    }

    /// Whether an entity with the given ID is involved.
    pub fn affects(&self, entity_id: &str) -> bool {
        self.affected_entities.iter().any(|e| e.id == entity_id)
    }

    /// Marks a persisted copy as resolved.
    pub fn resolve(&mut self, resolved_by: impl Into<String>, at: DateTime<Utc>) {
        self.resolved = true;
        self.resolved_by = Some(resolved_by.into());
        self.resolved_at = Some(at);
    }
}
