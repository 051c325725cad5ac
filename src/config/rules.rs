//! Rules configuration model.
//!
//! A rules configuration is the per-term set of scheduling constraints
//! (hour caps, gaps, capacity overflow, exam spacing, ...) plus the
//! priority weights reserved for a schedule optimizer. Weights are stored
//! and validated but no checker reads them.
//!
//! Every struct is `#[serde(default)]`, so a partial payload is completed
//! from the built-in defaults below.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::{ClockTime, Weekday};

/// Numeric and boolean scheduling constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingRules {
    /// Maximum class hours per student per day.
    pub max_daily_hours: f64,
    /// Minimum gap between consecutive classes (minutes).
    pub min_gap_between_classes: i32,
    /// Maximum gap between consecutive classes (minutes).
    pub max_gap_between_classes: i32,
    /// Earliest allowed class start.
    pub earliest_class_time: ClockTime,
    /// Latest allowed class end.
    pub latest_class_time: ClockTime,
    /// Maximum class hours per student per week.
    pub max_weekly_hours: f64,
    /// Days students prefer to keep free.
    pub preferred_days_off: Vec<Weekday>,
    /// Whether classes may be scheduled back to back.
    pub allow_back_to_back: bool,

    /// Target maximum enrollment per section.
    pub max_students_per_section: u32,
    /// Sections below this enrollment are flagged.
    pub min_students_per_section: u32,
    /// Whether enrollment may exceed capacity by `overflow_percentage`.
    pub allow_section_overflow: bool,
    /// Allowed overflow above capacity (percent).
    pub overflow_percentage: f64,

    /// Whether instructor availability windows are honored.
    pub respect_faculty_availability: bool,
    /// Maximum teaching hours per instructor per day.
    pub max_faculty_daily_hours: f64,
    /// Minimum gap between an instructor's classes (minutes).
    pub min_gap_between_faculty_classes: i32,

    /// Minimum days between a student's exams.
    pub min_days_between_exams: u32,
    /// Whether exam overlaps are avoided.
    pub avoid_exam_conflicts: bool,
    /// Maximum exams per student per day.
    pub max_exams_per_day: u32,

    /// Whether elective preferences are honored.
    pub honor_elective_preferences: bool,
    /// Preferences ranked at or above this are honored.
    pub min_preference_rank_to_honor: u32,

    /// Whether every section needs a room.
    pub require_room_assignment: bool,
    /// Whether enrollment is checked against capacity.
    pub respect_room_capacity: bool,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            max_daily_hours: 8.0,
            min_gap_between_classes: 10,
            max_gap_between_classes: 180,
            earliest_class_time: ClockTime::hm(8, 0),
            latest_class_time: ClockTime::hm(18, 0),
            max_weekly_hours: 21.0,
            preferred_days_off: Vec::new(),
            allow_back_to_back: true,

            max_students_per_section: 35,
            min_students_per_section: 15,
            allow_section_overflow: true,
            overflow_percentage: 10.0,

            respect_faculty_availability: true,
            max_faculty_daily_hours: 8.0,
            min_gap_between_faculty_classes: 15,

            min_days_between_exams: 2,
            avoid_exam_conflicts: true,
            max_exams_per_day: 2,

            honor_elective_preferences: true,
            min_preference_rank_to_honor: 3,

            require_room_assignment: true,
            respect_room_capacity: true,
        }
    }
}

impl SchedulingRules {
    /// Highest enrollment a section of `capacity` seats may hold.
    ///
    /// With overflow allowed this is `capacity * (1 + overflow%/100)`,
    /// otherwise `capacity`.
    ///
    /// Multiplies before dividing so whole-seat limits are exact
    /// (100 seats at 15% gives 115, not 114.999...).
    pub fn max_allowed_enrollment(&self, capacity: u32) -> f64 {
        let capacity = f64::from(capacity);
        if self.allow_section_overflow {
            capacity * (100.0 + self.overflow_percentage) / 100.0
        } else {
            capacity
        }
    }
}

/// Optimizer priority weights. Should sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Preferred meeting times.
    pub time_preference: f64,
    /// Instructor teaching preferences.
    pub faculty_preference: f64,
    /// Student elective choices.
    pub elective_preference: f64,
    /// Fewer idle gaps between classes.
    pub minimize_gaps: f64,
    /// Room fit and utilization.
    pub room_optimization: f64,
    /// Even spread of load across days.
    pub load_balancing: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            time_preference: 0.2,
            faculty_preference: 0.2,
            elective_preference: 0.15,
            minimize_gaps: 0.15,
            room_optimization: 0.15,
            load_balancing: 0.15,
        }
    }
}

impl PriorityWeights {
    /// Named weights in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("time_preference", self.time_preference),
            ("faculty_preference", self.faculty_preference),
            ("elective_preference", self.elective_preference),
            ("minimize_gaps", self.minimize_gaps),
            ("room_optimization", self.room_optimization),
            ("load_balancing", self.load_balancing),
        ]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

/// A versioned rules configuration for one academic term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingRulesConfig {
    /// Academic term (e.g. "2025-FALL").
    pub term_code: String,
    /// Scheduling constraints.
    pub rules: SchedulingRules,
    /// Optimizer weights.
    pub priority_weights: PriorityWeights,
    /// Whether this is the term's active configuration.
    pub is_active: bool,
    /// Who saved this version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Version number within the term (0 = never saved).
    pub version: u32,
    /// When this version was saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// `true` for the built-in fallback that was never persisted.
    #[serde(rename = "isDefault", alias = "is_default")]
    pub is_default: bool,
}

impl Default for SchedulingRulesConfig {
    fn default() -> Self {
        Self {
            term_code: String::new(),
            rules: SchedulingRules::default(),
            priority_weights: PriorityWeights::default(),
            is_active: true,
            created_by: None,
            version: 0,
            created_at: None,
            is_default: false,
        }
    }
}

impl SchedulingRulesConfig {
    /// Creates a configuration for a term with default rules and weights.
    pub fn new(term_code: impl Into<String>) -> Self {
        Self {
            term_code: term_code.into(),
            ..Self::default()
        }
    }

    /// The built-in configuration returned when a term has none saved.
    pub fn default_for_term(term_code: impl Into<String>) -> Self {
        Self {
            is_default: true,
            ..Self::new(term_code)
        }
    }

    /// Replaces the rules.
    pub fn with_rules(mut self, rules: SchedulingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Replaces the priority weights.
    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.priority_weights = weights;
        self
    }

    /// Parses a configuration from JSON; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_rules_literal() {
        let r = SchedulingRules::default();
        assert!((r.max_daily_hours - 8.0).abs() < 1e-10);
        assert_eq!(r.min_gap_between_classes, 10);
        assert_eq!(r.max_gap_between_classes, 180);
        assert_eq!(r.earliest_class_time.to_string(), "08:00");
        assert_eq!(r.latest_class_time.to_string(), "18:00");
        assert!((r.max_weekly_hours - 21.0).abs() < 1e-10);
        assert!(r.preferred_days_off.is_empty());
        assert!(r.allow_back_to_back);
        assert_eq!(r.max_students_per_section, 35);
        assert_eq!(r.min_students_per_section, 15);
        assert!(r.allow_section_overflow);
        assert!((r.overflow_percentage - 10.0).abs() < 1e-10);
        assert!(r.respect_faculty_availability);
        assert!((r.max_faculty_daily_hours - 8.0).abs() < 1e-10);
        assert_eq!(r.min_gap_between_faculty_classes, 15);
        assert_eq!(r.min_days_between_exams, 2);
        assert!(r.avoid_exam_conflicts);
        assert_eq!(r.max_exams_per_day, 2);
        assert!(r.honor_elective_preferences);
        assert_eq!(r.min_preference_rank_to_honor, 3);
        assert!(r.require_room_assignment);
        assert!(r.respect_room_capacity);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = PriorityWeights::default();
        assert!((w.sum() - 1.0).abs() < 1e-10);
        assert!((w.elective_preference - 0.15).abs() < 1e-10);
    }

    #[test]
    fn test_max_allowed_enrollment() {
        let mut r = SchedulingRules::default();
        assert_eq!(r.max_allowed_enrollment(30).floor(), 33.0);

        r.allow_section_overflow = false;
        assert!((r.max_allowed_enrollment(30) - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_max_allowed_enrollment_exact_for_whole_seats() {
        let mut r = SchedulingRules::default();
        assert_eq!(r.max_allowed_enrollment(100), 110.0);

        r.overflow_percentage = 15.0;
        assert_eq!(r.max_allowed_enrollment(100), 115.0);
        r.overflow_percentage = 13.0;
        assert_eq!(r.max_allowed_enrollment(100), 113.0);

        for capacity in 1..=200u32 {
            for pct in 1..=100u32 {
                let scaled = capacity * (100 + pct);
                if scaled % 100 != 0 {
                    continue;
                }
                r.overflow_percentage = f64::from(pct);
                assert_eq!(
                    r.max_allowed_enrollment(capacity),
                    f64::from(scaled / 100),
                    "capacity {capacity} at {pct}%"
                );
            }
        }
    }

    #[test]
    fn test_default_for_term_is_marked() {
        let c = SchedulingRulesConfig::default_for_term("2025-FALL");
        assert!(c.is_default);
        assert!(c.is_active);
        assert_eq!(c.version, 0);

        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["isDefault"], json!(true));
        assert_eq!(value["term_code"], json!("2025-FALL"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let c = SchedulingRulesConfig::from_json_str(
            r#"{
                "term_code": "2025-SPRING",
                "rules": { "min_students_per_section": 10, "preferred_days_off": ["Fri"] },
                "priority_weights": { "time_preference": 0.25 }
            }"#,
        )
        .unwrap();

        assert_eq!(c.term_code, "2025-SPRING");
        assert_eq!(c.rules.min_students_per_section, 10);
        assert_eq!(c.rules.max_students_per_section, 35);
        assert_eq!(c.rules.preferred_days_off, vec![Weekday::Friday]);
        assert!((c.priority_weights.time_preference - 0.25).abs() < 1e-10);
        assert!((c.priority_weights.load_balancing - 0.15).abs() < 1e-10);
        assert!(!c.is_default);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        std::fs::write(
            &path,
            r#"{ "term_code": "2025-FALL", "rules": { "max_daily_hours": 6 } }"#,
        )
        .unwrap();

        let c = SchedulingRulesConfig::from_json_file(&path).unwrap();
        assert_eq!(c.term_code, "2025-FALL");
        assert!((c.rules.max_daily_hours - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_json_file_missing_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SchedulingRulesConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::error::ScheduleError::Io(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_invalid_clock_in_config_rejected() {
        let err = SchedulingRulesConfig::from_json_str(
            r#"{ "rules": { "earliest_class_time": "8 o'clock" } }"#,
        );
        assert!(err.is_err());
    }
}
