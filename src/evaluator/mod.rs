//! Rules evaluator.
//!
//! Runs a fixed list of checkers over the sections, concatenates their
//! violations, and records a passed-check label for every checker that
//! found nothing. The evaluator never changes a violation's severity and
//! never validates the configuration it is given.
//!
//! # Usage
//!
//! ```
//! use schedule_rules::config::SchedulingRulesConfig;
//! use schedule_rules::evaluator::RulesEvaluator;
//! use schedule_rules::models::{Section, TimeSlot};
//!
//! let sections = vec![
//!     Section::new("A", "CS101")
//!         .with_room("101")
//!         .with_seats(30, 20)
//!         .with_slot(TimeSlot::parse("monday", "09:00", "10:00").unwrap()),
//!     Section::new("B", "CS102")
//!         .with_room("101")
//!         .with_seats(30, 20)
//!         .with_slot(TimeSlot::parse("monday", "09:30", "10:30").unwrap()),
//! ];
//! let config = SchedulingRulesConfig::default_for_term("2025-FALL");
//!
//! let report = RulesEvaluator::standard().evaluate(&sections, &config).report();
//! assert_eq!(report.total_violations, 1);
//! assert_eq!(report.summary.critical, 1);
//! ```

mod report;

pub use report::{group_by_type, sort_by_severity, EvaluationReport, SeveritySummary};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checkers::{
    BreakTimeChecker, CapacityChecker, CheckContext, LoadChecker, RuleChecker,
    SectionSizeChecker, TimeConflictChecker,
};
use crate::config::SchedulingRulesConfig;
use crate::models::{Section, StudentSchedule, Violation};

/// Raw outcome of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Violations in checker order.
    pub violations: Vec<Violation>,
    /// Labels of checkers that found nothing, in checker order.
    pub passed_checks: Vec<String>,
}

impl EvaluationResult {
    /// Derives the summary report.
    pub fn report(&self) -> EvaluationReport {
        EvaluationReport::from_result(self)
    }
}

/// A full evaluation request: sections, configuration and optional
/// student enrollments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationInput {
    /// Sections to check.
    pub sections: Vec<Section>,
    /// Rules to check them against.
    #[serde(default, alias = "rulesConfig")]
    pub rules_config: SchedulingRulesConfig,
    /// Per-student enrollments for load checks.
    #[serde(default)]
    pub students: Vec<StudentSchedule>,
}

/// Runs rule checkers in a fixed order and merges their results.
#[derive(Clone)]
pub struct RulesEvaluator {
    checkers: Vec<Arc<dyn RuleChecker>>,
}

impl RulesEvaluator {
    /// Creates an evaluator with no checkers.
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    /// The standard pipeline: break time, daily hours, capacity,
    /// time conflicts (room + instructor), section size.
    pub fn standard() -> Self {
        Self::new()
            .with_checker(BreakTimeChecker::default())
            .with_checker(LoadChecker)
            .with_checker(CapacityChecker)
            .with_checker(TimeConflictChecker)
            .with_checker(SectionSizeChecker)
    }

    /// Appends a checker.
    pub fn with_checker<C: RuleChecker + 'static>(mut self, checker: C) -> Self {
        self.checkers.push(Arc::new(checker));
        self
    }

    /// Names of the configured checkers, in run order.
    pub fn checker_names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }

    /// Evaluates sections, stamping violations with the current time.
    pub fn evaluate(&self, sections: &[Section], config: &SchedulingRulesConfig) -> EvaluationResult {
        self.evaluate_at(sections, config, Utc::now())
    }

    /// Evaluates a full request, including student enrollments.
    pub fn evaluate_input(&self, input: &EvaluationInput) -> EvaluationResult {
        self.run(
            &input.sections,
            &input.rules_config,
            &input.students,
            Utc::now(),
        )
    }

    /// Evaluates sections with an explicit detection timestamp.
    ///
    /// Identical inputs give identical results.
    pub fn evaluate_at(
        &self,
        sections: &[Section],
        config: &SchedulingRulesConfig,
        detected_at: DateTime<Utc>,
    ) -> EvaluationResult {
        self.run(sections, config, &[], detected_at)
    }

    /// Evaluates with student enrollments and an explicit timestamp.
    pub fn evaluate_with_students_at(
        &self,
        sections: &[Section],
        config: &SchedulingRulesConfig,
        students: &[StudentSchedule],
        detected_at: DateTime<Utc>,
    ) -> EvaluationResult {
        self.run(sections, config, students, detected_at)
    }

    fn run(
        &self,
        sections: &[Section],
        config: &SchedulingRulesConfig,
        students: &[StudentSchedule],
        detected_at: DateTime<Utc>,
    ) -> EvaluationResult {
        let ctx = CheckContext::new(&config.rules, detected_at).with_students(students);
        let mut violations = Vec::new();
        let mut passed_checks = Vec::new();

        for checker in &self.checkers {
            if !checker.is_enabled(&config.rules) {
                debug!(checker = checker.name(), "skipped (disabled by rules)");
                continue;
            }

            let found = checker.check(sections, &ctx);
            debug!(checker = checker.name(), violations = found.len(), "check complete");

            if found.is_empty() {
                passed_checks.push(checker.passed_label().to_string());
            } else {
                violations.extend(found);
            }
        }

        info!(
            term = %config.term_code,
            sections = sections.len(),
            violations = violations.len(),
            passed = passed_checks.len(),
            "rules evaluation finished"
        );

        EvaluationResult {
            violations,
            passed_checks,
        }
    }
}

impl Default for RulesEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RulesEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesEvaluator")
            .field("checkers", &self.checker_names())
            .finish()
    }
}
