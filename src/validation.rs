//! Input validation for section data.
//!
//! Checks structural integrity of the section list before evaluation.
//! Per-record problems (bad times, inverted slots) are already rejected
//! when records are decoded; this pass catches problems that only show up
//! across records:
//! - Duplicate section IDs
//! - The same slot listed twice in one section
//! - Sections with an empty ID or course code

use serde::Serialize;
use std::collections::HashSet;

use crate::models::Section;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Two sections share the same ID.
    DuplicateId,
    /// A section lists the same meeting slot more than once.
    DuplicateSlot,
    /// A required identifier is empty.
    MissingField,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a section list.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_sections(sections: &[Section]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for section in sections {
        if section.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Section for course '{}' has an empty ID", section.course_code),
            ));
        } else if !ids.insert(section.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", section.id),
            ));
        }

        if section.course_code.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Section '{}' has an empty course code", section.id),
            ));
        }

        let mut seen = HashSet::new();
        for slot in &section.time_slots {
            if !seen.insert(slot) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSlot,
                    format!(
                        "Section '{}' lists {} {} more than once",
                        section.id,
                        slot.day,
                        slot.range()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
