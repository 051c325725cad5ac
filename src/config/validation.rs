//! Rules configuration validation.
//!
//! Runs before a configuration is saved. Every broken constraint is
//! reported; nothing short-circuits, so a caller can show all problems at
//! once. Evaluation does not call this: the checkers accept any
//! configuration.
//!
//! Checks:
//! 1. `max_daily_hours` in (0, 24]
//! 2. `min_gap_between_classes` in [0, 240] minutes
//! 3. priority weights sum to 1.0 (±0.01)
//! 4. each priority weight in [0, 1]

use serde::{Deserialize, Serialize};

use super::SchedulingRulesConfig;

/// Allowed distance of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Upper bound for `min_gap_between_classes` (minutes).
pub const MAX_MIN_GAP_MINUTES: i32 = 240;

/// Outcome of validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigValidation {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Every violated constraint, in check order.
    pub errors: Vec<String>,
}

impl ConfigValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// `Ok(())` when valid, otherwise all messages.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validates a rules configuration, collecting every error.
pub fn validate(config: &SchedulingRulesConfig) -> ConfigValidation {
    let mut errors = Vec::new();
    let rules = &config.rules;

    // Negated comparisons so NaN fails too.
    if !(rules.max_daily_hours > 0.0 && rules.max_daily_hours <= 24.0) {
        errors.push(format!(
            "max_daily_hours must be greater than 0 and at most 24 (got {})",
            rules.max_daily_hours
        ));
    }

    if !(0..=MAX_MIN_GAP_MINUTES).contains(&rules.min_gap_between_classes) {
        errors.push(format!(
            "min_gap_between_classes must be between 0 and {MAX_MIN_GAP_MINUTES} minutes (got {})",
            rules.min_gap_between_classes
        ));
    }

    let sum = config.priority_weights.sum();
    if !((sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE) {
        errors.push(format!(
            "Priority weights must sum to 1.0 (current sum: {sum:.3})"
        ));
    }

    for (name, weight) in config.priority_weights.entries() {
        if !(0.0..=1.0).contains(&weight) {
            errors.push(format!(
                "Priority weight '{name}' must be between 0 and 1 (got {weight})"
            ));
        }
    }

    ConfigValidation::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriorityWeights;

    fn weights_summing_to(total: f64) -> PriorityWeights {
        // Bump only the first weight so the others stay at defaults.
        let mut w = PriorityWeights::default();
        w.time_preference += total - 1.0;
        w
    }

    #[test]
    fn test_default_config_is_valid() {
        let v = validate(&SchedulingRulesConfig::new("T1"));
        assert!(v.valid);
        assert!(v.errors.is_empty());
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn test_weight_sum_within_tolerance() {
        let c = SchedulingRulesConfig::new("T1").with_weights(weights_summing_to(1.005));
        assert!(validate(&c).valid);
    }

    #[test]
    fn test_weight_sum_outside_tolerance() {
        let c = SchedulingRulesConfig::new("T1").with_weights(weights_summing_to(1.02));
        let v = validate(&c);
        assert!(!v.valid);
        assert_eq!(v.errors.len(), 1);
        assert!(v.errors[0].contains("sum to 1.0"));
    }

    #[test]
    fn test_zero_daily_hours_invalid() {
        let mut c = SchedulingRulesConfig::new("T1");
        c.rules.max_daily_hours = 0.0;
        let v = validate(&c);
        assert!(!v.valid);
        assert!(v.errors[0].contains("max_daily_hours"));
    }

    #[test]
    fn test_daily_hours_upper_bound_inclusive() {
        let mut c = SchedulingRulesConfig::new("T1");
        c.rules.max_daily_hours = 24.0;
        assert!(validate(&c).valid);
        c.rules.max_daily_hours = 24.5;
        assert!(!validate(&c).valid);
        c.rules.max_daily_hours = f64::NAN;
        assert!(!validate(&c).valid);
    }

    #[test]
    fn test_gap_bounds() {
        let mut c = SchedulingRulesConfig::new("T1");
        c.rules.min_gap_between_classes = 240;
        assert!(validate(&c).valid);
        c.rules.min_gap_between_classes = 241;
        assert!(!validate(&c).valid);
        c.rules.min_gap_between_classes = -1;
        assert!(!validate(&c).valid);
    }

    #[test]
    fn test_individual_weight_out_of_range() {
        // Sums to 1.0 but one weight is negative and one above 1.
        let w = PriorityWeights {
            time_preference: 1.2,
            faculty_preference: -0.2,
            elective_preference: 0.0,
            minimize_gaps: 0.0,
            room_optimization: 0.0,
            load_balancing: 0.0,
        };
        let v = validate(&SchedulingRulesConfig::new("T1").with_weights(w));
        assert!(!v.valid);
        assert_eq!(v.errors.len(), 2);
        assert!(v.errors.iter().any(|e| e.contains("time_preference")));
        assert!(v.errors.iter().any(|e| e.contains("faculty_preference")));
    }

    #[test]
    fn test_all_errors_collected() {
        let mut c = SchedulingRulesConfig::new("T1").with_weights(weights_summing_to(1.5));
        c.rules.max_daily_hours = 0.0;
        c.rules.min_gap_between_classes = 500;
        let v = validate(&c);
        assert!(!v.valid);
        assert_eq!(v.errors.len(), 3);
        assert_eq!(v.clone().into_result().unwrap_err().len(), 3);
    }
}
