//! Per-student daily and weekly load checker.
//!
//! Section data alone does not say which students sit in which sections,
//! so this checker needs [`StudentSchedule`](crate::models::StudentSchedule)
//! records in the context. Without them it finds nothing.
//!
//! Load is the sum of meeting minutes of a student's sections, per weekday
//! and per week, compared against `max_daily_hours` and
//! `max_weekly_hours`. Unknown section IDs are skipped and a section
//! listed twice is counted once.

use std::collections::{BTreeSet, HashMap};

use super::{CheckContext, RuleChecker};
use crate::models::{AffectedEntity, Section, Severity, Violation, ViolationType};
use crate::time::Weekday;

/// Flags students whose class hours exceed the daily or weekly cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadChecker;

impl RuleChecker for LoadChecker {
    fn name(&self) -> &'static str {
        "daily_hours"
    }

    fn passed_label(&self) -> &'static str {
        "Daily hours limit"
    }

    fn check(&self, sections: &[Section], ctx: &CheckContext<'_>) -> Vec<Violation> {
        if ctx.students.is_empty() {
            return Vec::new();
        }

        let by_id: HashMap<&str, &Section> = sections.iter().map(|s| (s.id.as_str(), s)).collect();
        let daily_cap = ctx.rules.max_daily_hours * 60.0;
        let weekly_cap = ctx.rules.max_weekly_hours * 60.0;
        let mut violations = Vec::new();

        for student in ctx.students {
            let enrolled: BTreeSet<&str> = student.section_ids.iter().map(String::as_str).collect();
            let taken: Vec<&Section> = enrolled
                .iter()
                .filter_map(|id| by_id.get(id).copied())
                .collect();

            let student_entity = AffectedEntity::new("student", student.student_id.as_str());

            for day in Weekday::ALL {
                let minutes: u32 = taken.iter().map(|s| s.minutes_on(day)).sum();
                if f64::from(minutes) <= daily_cap {
                    continue;
                }
                let v = Violation::new(
                    ViolationType::ExcessiveDailyLoad,
                    Severity::Warning,
                    "Excessive daily class load",
                    format!(
                        "Student {} has {} of class on {} (limit {}h)",
                        student.student_id,
                        format_hours(minutes),
                        day,
                        ctx.rules.max_daily_hours
                    ),
                    ctx.detected_at,
                )
                .with_entity(student_entity.clone());
                violations.push(
                    taken
                        .iter()
                        .filter(|s| s.minutes_on(day) > 0)
                        .fold(v, |v, s| v.with_entity(s.as_entity()))
                        .with_suggestions([
                            "Move one of the day's sections to another day",
                            "Drop or swap a section",
                        ]),
                );
            }

            let weekly: u32 = taken.iter().map(|s| s.weekly_minutes()).sum();
            if f64::from(weekly) > weekly_cap {
                violations.push(
                    Violation::new(
                        ViolationType::ExcessiveWeeklyLoad,
                        Severity::Warning,
                        "Excessive weekly class load",
                        format!(
                            "Student {} has {} of class per week (limit {}h)",
                            student.student_id,
                            format_hours(weekly),
                            ctx.rules.max_weekly_hours
                        ),
                        ctx.detected_at,
                    )
                    .with_entity(student_entity)
                    .with_suggestions(["Reduce the number of enrolled sections"]),
                );
            }
        }

        violations
    }
}

fn format_hours(minutes: u32) -> String {
    match minutes % 60 {
        0 => format!("{}h", minutes / 60),
        m => format!("{}h{:02}m", minutes / 60, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulingRules;
    use crate::models::{StudentSchedule, TimeSlot};
    use chrono::{TimeZone, Utc};

    fn section(id: &str, day: &str, start: &str, end: &str) -> Section {
        Section::new(id, id).with_slot(TimeSlot::parse(day, start, end).unwrap())
    }

    fn run(rules: &SchedulingRules, sections: &[Section], students: &[StudentSchedule]) -> Vec<Violation> {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        LoadChecker.check(sections, &CheckContext::new(rules, at).with_students(students))
    }

    #[test]
    fn test_no_students_is_noop() {
        let sections = vec![section("S1", "monday", "08:00", "18:00")];
        assert!(run(&SchedulingRules::default(), &sections, &[]).is_empty());
    }

    #[test]
    fn test_daily_load_exceeded() {
        let rules = SchedulingRules {
            max_daily_hours: 4.0,
            ..SchedulingRules::default()
        };
        let sections = vec![
            section("S1", "monday", "08:00", "10:30"),
            section("S2", "monday", "11:00", "13:00"),
            section("S3", "tuesday", "08:00", "09:00"),
        ];
        let students = vec![StudentSchedule::new("U1")
            .with_section("S1")
            .with_section("S2")
            .with_section("S3")];

        let v = run(&rules, &sections, &students);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::ExcessiveDailyLoad);
        assert_eq!(v[0].severity, Severity::Warning);
        assert!(v[0].affects("U1"));
        assert!(v[0].affects("S1"));
        assert!(!v[0].affects("S3"));
        assert!(v[0].description.contains("4h30m"));
    }

    #[test]
    fn test_weekly_load_exceeded() {
        let rules = SchedulingRules {
            max_weekly_hours: 5.0,
            ..SchedulingRules::default()
        };
        let sections: Vec<Section> = ["sunday", "monday", "tuesday"]
            .iter()
            .enumerate()
            .map(|(i, d)| section(&format!("S{i}"), d, "08:00", "10:00"))
            .collect();
        let students = vec![StudentSchedule {
            student_id: "U1".into(),
            section_ids: vec!["S0".into(), "S1".into(), "S2".into()],
        }];

        let v = run(&rules, &sections, &students);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::ExcessiveWeeklyLoad);
    }

    #[test]
    fn test_duplicate_and_unknown_ids_ignored() {
        let rules = SchedulingRules {
            max_daily_hours: 3.0,
            ..SchedulingRules::default()
        };
        let sections = vec![section("S1", "monday", "08:00", "10:00")];
        let students = vec![StudentSchedule::new("U1")
            .with_section("S1")
            .with_section("S1")
            .with_section("GONE")];
        assert!(run(&rules, &sections, &students).is_empty());
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(120), "2h");
        assert_eq!(format_hours(95), "1h35m");
    }
}
