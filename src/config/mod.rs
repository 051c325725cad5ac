//! Scheduling rules configuration.
//!
//! - **`rules`**: `SchedulingRules`, `PriorityWeights`, `SchedulingRulesConfig`
//!   and their built-in defaults
//! - **`validation`**: collect-all validation run before saving
//! - **`store`**: versioned per-term registry (supersede, never delete)

mod rules;
mod store;
mod validation;

pub use rules::{PriorityWeights, SchedulingRules, SchedulingRulesConfig};
pub use store::RulesConfigStore;
pub use validation::{validate, ConfigValidation, MAX_MIN_GAP_MINUTES, WEIGHT_SUM_TOLERANCE};
