//! Evaluation summary report.
//!
//! Derived statelessly from an [`EvaluationResult`]: total count, counts
//! per violation type, counts per severity, plus the violations and
//! passed checks themselves. Serializes to the JSON shape returned by the
//! rules-testing endpoint.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | `total_violations` | `violations.len()` |
//! | `violations_by_type` | type → count |
//! | `summary` | count per severity |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::EvaluationResult;
use crate::models::{Severity, Violation, ViolationType};

/// Violation counts by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    /// Double bookings.
    pub critical: usize,
    /// Must-fix violations (e.g. over capacity).
    pub error: usize,
    /// Violations worth reviewing.
    pub warning: usize,
    /// Informational findings.
    pub info: usize,
}

impl SeveritySummary {
    /// Counts violations by severity.
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut s = Self::default();
        for v in violations {
            *s.slot_mut(v.severity) += 1;
        }
        s
    }

    /// Count for one severity.
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// Most severe level present, if any.
    pub fn highest(&self) -> Option<Severity> {
        Severity::ALL.into_iter().find(|&s| self.count(s) > 0)
    }

    fn slot_mut(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::Error => &mut self.error,
            Severity::Warning => &mut self.warning,
            Severity::Info => &mut self.info,
        }
    }
}

/// Summary of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Number of violations.
    pub total_violations: usize,
    /// Violation count per type (wire name), sorted by name.
    pub violations_by_type: BTreeMap<String, usize>,
    /// All violations, in checker order.
    pub violations: Vec<Violation>,
    /// Labels of checks that found nothing.
    pub passed_checks: Vec<String>,
    /// Violation count per severity.
    pub summary: SeveritySummary,
}

impl EvaluationReport {
    /// Builds the report from raw results.
    pub fn from_result(result: &EvaluationResult) -> Self {
        let mut violations_by_type = BTreeMap::new();
        for v in &result.violations {
            *violations_by_type
                .entry(v.violation_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            total_violations: result.violations.len(),
            violations_by_type,
            violations: result.violations.clone(),
            passed_checks: result.passed_checks.clone(),
            summary: SeveritySummary::from_violations(&result.violations),
        }
    }

    /// Whether no violations were found.
    pub fn is_clean(&self) -> bool {
        self.total_violations == 0
    }

    /// Whether any violation is critical (a physical double booking).
    pub fn has_blocking(&self) -> bool {
        self.summary.critical > 0
    }
}

/// Orders violations most severe first; stable within a severity.
pub fn sort_by_severity(violations: &mut [Violation]) {
    violations.sort_by(|a, b| b.severity.cmp(&a.severity));
}

/// Groups violations by type, preserving input order within each group.
pub fn group_by_type(violations: &[Violation]) -> BTreeMap<ViolationType, Vec<&Violation>> {
    let mut groups: BTreeMap<ViolationType, Vec<&Violation>> = BTreeMap::new();
    for v in violations {
        groups.entry(v.violation_type).or_default().push(v);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn v(t: ViolationType, s: Severity, title: &str) -> Violation {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Violation::new(t, s, title, "", at)
    }

    fn sample() -> EvaluationResult {
        EvaluationResult {
            violations: vec![
                v(ViolationType::ConstraintViolation, Severity::Warning, "w1"),
                v(ViolationType::RoomConflict, Severity::Critical, "c1"),
                v(ViolationType::CapacityExceeded, Severity::Error, "e1"),
                v(ViolationType::ConstraintViolation, Severity::Warning, "w2"),
                v(ViolationType::FacultyConflict, Severity::Critical, "c2"),
            ],
            passed_checks: vec!["Daily hours limit".into()],
        }
    }

    #[test]
    fn test_report_counts() {
        let r = sample().report();
        assert_eq!(r.total_violations, 5);
        assert_eq!(r.violations_by_type["constraint_violation"], 2);
        assert_eq!(r.violations_by_type["room_conflict"], 1);
        assert_eq!(r.violations_by_type["faculty_conflict"], 1);
        assert_eq!(r.violations_by_type["capacity_exceeded"], 1);
        assert_eq!(
            r.summary,
            SeveritySummary {
                critical: 2,
                error: 1,
                warning: 2,
                info: 0
            }
        );
        assert!(r.has_blocking());
        assert!(!r.is_clean());
    }

    #[test]
    fn test_report_json_shape() {
        let value = serde_json::to_value(sample().report()).unwrap();
        assert_eq!(value["total_violations"], json!(5));
        assert_eq!(value["violations_by_type"]["room_conflict"], json!(1));
        assert_eq!(value["summary"]["critical"], json!(2));
        assert_eq!(value["summary"]["info"], json!(0));
        assert_eq!(value["passed_checks"], json!(["Daily hours limit"]));
        assert_eq!(value["violations"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_empty_report() {
        let r = EvaluationResult {
            violations: vec![],
            passed_checks: vec![],
        }
        .report();
        assert!(r.is_clean());
        assert!(r.violations_by_type.is_empty());
        assert_eq!(r.summary.highest(), None);
    }

    #[test]
    fn test_highest_severity() {
        let r = sample().report();
        assert_eq!(r.summary.highest(), Some(Severity::Critical));
        assert_eq!(r.summary.count(Severity::Warning), 2);
    }

    #[test]
    fn test_sort_by_severity_is_stable() {
        let mut vs = sample().violations;
        sort_by_severity(&mut vs);
        let titles: Vec<&str> = vs.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["c1", "c2", "e1", "w1", "w2"]);
    }

    #[test]
    fn test_group_by_type() {
        let vs = sample().violations;
        let groups = group_by_type(&vs);
        assert_eq!(groups.len(), 4);
        let cv = &groups[&ViolationType::ConstraintViolation];
        assert_eq!(cv.len(), 2);
        assert_eq!(cv[0].title, "w1");
        assert_eq!(cv[1].title, "w2");
    }
}
