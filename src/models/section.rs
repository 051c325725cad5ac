//! Course section model.
//!
//! A section is one scheduled offering of a course: where it meets, who
//! teaches it, how many seats it has, and its weekly meeting pattern.
//! Sections are fetched by the caller and are read-only during an
//! evaluation.
//!
//! # Boundary Validation
//! Records are checked when decoded. A time slot with a malformed time or
//! with `start >= end` is rejected by deserialization, so checkers only
//! ever see well-formed intervals.

use serde::{Deserialize, Serialize};

use super::AffectedEntity;
use crate::error::{Result, ScheduleError};
use crate::time::{ClockTime, TimeRange, Weekday};

/// A single weekly meeting: day + [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    /// Meeting day.
    pub day: Weekday,
    /// Start time (inclusive).
    pub start: ClockTime,
    /// End time (exclusive).
    pub end: ClockTime,
}

/// Wire form of a time slot, accepting the column names used by the
/// section/time-slot tables as well as the short form.
#[derive(Debug, Deserialize)]
struct RawTimeSlot {
    #[serde(alias = "day_of_week", alias = "dayOfWeek")]
    day: String,
    #[serde(alias = "start_time", alias = "startTime")]
    start: String,
    #[serde(alias = "end_time", alias = "endTime")]
    end: String,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(raw: RawTimeSlot) -> Result<Self> {
        TimeSlot::parse(&raw.day, &raw.start, &raw.end)
    }
}

impl TimeSlot {
    /// Creates a slot, rejecting `start >= end`.
    pub fn new(day: Weekday, start: ClockTime, end: ClockTime) -> Result<Self> {
        let range = TimeRange::new(start, end)?;
        Ok(Self {
            day,
            start: range.start,
            end: range.end,
        })
    }

    /// Parses a slot from raw strings (`"monday"`, `"09:00"`, `"10:00"`).
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self> {
        Self::new(day.parse()?, start.parse()?, end.parse()?)
    }

    /// The slot's interval within its day.
    #[inline]
    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Meeting length in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.range().duration_minutes()
    }

    /// Whether two slots meet on the same day at overlapping times.
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.day == other.day && self.range().overlaps(&other.range())
    }
}

/// A scheduled section of a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Course code (e.g. "CS101").
    #[serde(alias = "courseCode")]
    pub course_code: String,
    /// Course title, if known.
    #[serde(default, alias = "courseName", skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    /// Section number within the course (e.g. "01").
    #[serde(default, alias = "sectionNumber", skip_serializing_if = "Option::is_none")]
    pub section_number: Option<String>,
    /// Assigned room. `None` = unassigned.
    #[serde(default, alias = "roomNumber")]
    pub room_number: Option<String>,
    /// Assigned instructor. `None` = unassigned.
    #[serde(default, alias = "instructorId")]
    pub instructor_id: Option<String>,
    /// Instructor display name, if known.
    #[serde(default, alias = "instructorName", skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    /// Seat capacity. Required.
    pub capacity: u32,
    /// Students currently enrolled. Required.
    #[serde(alias = "enrolledCount")]
    pub enrolled_count: u32,
    /// Weekly meeting pattern.
    #[serde(default, alias = "timeSlots")]
    pub time_slots: Vec<TimeSlot>,
}

impl Section {
    /// Creates a section with no room, instructor, seats or meetings.
    pub fn new(id: impl Into<String>, course_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            course_code: course_code.into(),
            course_name: None,
            section_number: None,
            room_number: None,
            instructor_id: None,
            instructor_name: None,
            capacity: 0,
            enrolled_count: 0,
            time_slots: Vec::new(),
        }
    }

    /// Sets the course title.
    pub fn with_course_name(mut self, name: impl Into<String>) -> Self {
        self.course_name = Some(name.into());
        self
    }

    /// Sets the section number.
    pub fn with_section_number(mut self, number: impl Into<String>) -> Self {
        self.section_number = Some(number.into());
        self
    }

    /// Assigns a room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room_number = Some(room.into());
        self
    }

    /// Assigns an instructor.
    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    /// Sets the instructor display name.
    pub fn with_instructor_name(mut self, name: impl Into<String>) -> Self {
        self.instructor_name = Some(name.into());
        self
    }

    /// Sets capacity and enrollment.
    pub fn with_seats(mut self, capacity: u32, enrolled_count: u32) -> Self {
        self.capacity = capacity;
        self.enrolled_count = enrolled_count;
        self
    }

    /// Adds a meeting slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.push(slot);
        self
    }

    /// Label used in violation text: `"CS101"` or `"CS101-01"`.
    pub fn label(&self) -> String {
        match &self.section_number {
            Some(n) => format!("{}-{}", self.course_code, n),
            None => self.course_code.clone(),
        }
    }

    /// This section as an affected entity.
    pub fn as_entity(&self) -> AffectedEntity {
        AffectedEntity::section(&self.id, self.label())
    }

    /// Total meeting minutes per week.
    pub fn weekly_minutes(&self) -> u32 {
        self.time_slots.iter().map(TimeSlot::duration_minutes).sum()
    }

    /// Meeting minutes on a given day.
    pub fn minutes_on(&self, day: Weekday) -> u32 {
        self.time_slots
            .iter()
            .filter(|s| s.day == day)
            .map(TimeSlot::duration_minutes)
            .sum()
    }
}

/// The sections one student is enrolled in.
///
/// Needed only for per-student load checks; sections alone do not say
/// who sits in them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentSchedule {
    /// Student identifier.
    #[serde(alias = "studentId")]
    pub student_id: String,
    /// Enrolled section IDs.
    #[serde(default, alias = "sectionIds")]
    pub section_ids: Vec<String>,
}

impl StudentSchedule {
    /// Creates an empty schedule for a student.
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            section_ids: Vec::new(),
        }
    }

    /// Adds an enrolled section.
    pub fn with_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_ids.push(section_id.into());
        self
    }
}
