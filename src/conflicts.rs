//! Single-section conflict lookup.
//!
//! Answers "what does this one section clash with?" against the rest of
//! the term: other sections sharing its room or its instructor with an
//! overlapping same-day slot. Rows use the shape of the database-side
//! conflict query so callers can swap one for the other.

use serde::{Deserialize, Serialize};

use crate::models::Section;
use crate::time::{ClockTime, Weekday};

/// Resource a conflict is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// Same room.
    RoomConflict,
    /// Same instructor.
    FacultyConflict,
}

/// One clash between the queried section and another section.
///
/// Day and times are those of the conflicting section's slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTimeConflict {
    /// Shared resource.
    pub conflict_type: ConflictKind,
    /// The other section.
    pub conflicting_section_id: String,
    /// Day of the clashing slot.
    pub conflict_day: Weekday,
    /// Start of the other section's slot.
    pub conflict_start_time: ClockTime,
    /// End of the other section's slot.
    pub conflict_end_time: ClockTime,
}

/// Conflicts of the section with `section_id` against all other sections.
///
/// Returns an empty list when the ID is unknown.
pub fn detect_section_time_conflicts(
    section_id: &str,
    sections: &[Section],
) -> Vec<SectionTimeConflict> {
    match sections.iter().find(|s| s.id == section_id) {
        Some(target) => find_conflicts_for(target, sections),
        None => Vec::new(),
    }
}

/// Conflicts of `candidate` against `others`.
///
/// The candidate need not be part of `others` (e.g. a section about to be
/// created); an entry in `others` with the candidate's ID is skipped.
/// Room conflicts are listed before faculty conflicts.
pub fn find_conflicts_for(candidate: &Section, others: &[Section]) -> Vec<SectionTimeConflict> {
    let mut rooms = Vec::new();
    let mut faculty = Vec::new();

    for other in others.iter().filter(|o| o.id != candidate.id) {
        let same_room = shares(&candidate.room_number, &other.room_number);
        let same_instructor = shares(&candidate.instructor_id, &other.instructor_id);
        if !same_room && !same_instructor {
            continue;
        }

        for theirs in &other.time_slots {
            if !candidate.time_slots.iter().any(|mine| mine.conflicts_with(theirs)) {
                continue;
            }
            let row = |conflict_type| SectionTimeConflict {
                conflict_type,
                conflicting_section_id: other.id.clone(),
                conflict_day: theirs.day,
                conflict_start_time: theirs.start,
                conflict_end_time: theirs.end,
            };
            if same_room {
                rooms.push(row(ConflictKind::RoomConflict));
            }
            if same_instructor {
                faculty.push(row(ConflictKind::FacultyConflict));
            }
        }
    }

    rooms.extend(faculty);
    rooms
}

fn shares(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}
