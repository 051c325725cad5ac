//! Versioned per-term configuration registry.
//!
//! Saving never edits a row in place: the term's active version is
//! deactivated and a new version inserted. Rows are never deleted, so
//! the full history of a term stays available.

use chrono::Utc;
use tracing::{info, warn};

use super::{validate, SchedulingRulesConfig};
use crate::error::{Result, ScheduleError};

/// In-memory store of saved rules configurations.
#[derive(Debug, Clone, Default)]
pub struct RulesConfigStore {
    rows: Vec<SchedulingRulesConfig>,
}

impl RulesConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active configuration for a term.
    ///
    /// Falls back to [`SchedulingRulesConfig::default_for_term`] (marked
    /// `is_default`) when nothing active is saved.
    pub fn active(&self, term_code: &str) -> SchedulingRulesConfig {
        self.active_row(term_code)
            .cloned()
            .unwrap_or_else(|| SchedulingRulesConfig::default_for_term(term_code))
    }

    /// Validates and saves a new version for `config.term_code`.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidConfig`] with every validation message when
    /// the configuration is rejected. Nothing is written in that case.
    pub fn save(
        &mut self,
        config: SchedulingRulesConfig,
        created_by: impl Into<String>,
    ) -> Result<&SchedulingRulesConfig> {
        let check = validate(&config);
        if !check.valid {
            warn!(
                term = %config.term_code,
                errors = check.errors.len(),
                "rejected rules configuration"
            );
            return Err(ScheduleError::InvalidConfig {
                errors: check.errors,
            });
        }

        let term = config.term_code.clone();
        let next_version = self
            .rows
            .iter()
            .filter(|r| r.term_code == term)
            .map(|r| r.version)
            .max()
            .unwrap_or(0)
            + 1;

        if let Some(prev) = self.active_row_mut(&term) {
            prev.is_active = false;
            info!(term = %term, superseded = prev.version, "deactivated rules configuration");
        }

        self.rows.push(SchedulingRulesConfig {
            is_active: true,
            is_default: false,
            version: next_version,
            created_by: Some(created_by.into()),
            created_at: Some(Utc::now()),
            ..config
        });
        info!(term = %term, version = next_version, "saved rules configuration");

        let idx = self.rows.len() - 1;
        Ok(&self.rows[idx])
    }

    /// Deactivates the term's active configuration.
    ///
    /// Returns `false` if the term had none. The row is kept.
    pub fn deactivate(&mut self, term_code: &str) -> bool {
        match self.active_row_mut(term_code) {
            Some(row) => {
                row.is_active = false;
                info!(term = %term_code, version = row.version, "deactivated rules configuration");
                true
            }
            None => false,
        }
    }

    /// All saved versions of a term, oldest first.
    pub fn history(&self, term_code: &str) -> Vec<&SchedulingRulesConfig> {
        self.rows
            .iter()
            .filter(|r| r.term_code == term_code)
            .collect()
    }

    /// Number of stored rows across all terms.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn active_row(&self, term_code: &str) -> Option<&SchedulingRulesConfig> {
        self.rows
            .iter()
            .find(|r| r.term_code == term_code && r.is_active)
    }

    fn active_row_mut(&mut self, term_code: &str) -> Option<&mut SchedulingRulesConfig> {
        self.rows
            .iter_mut()
            .find(|r| r.term_code == term_code && r.is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_falls_back_to_default() {
        let store = RulesConfigStore::new();
        let c = store.active("2025-FALL");
        assert!(c.is_default);
        assert_eq!(c.term_code, "2025-FALL");
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_supersede() {
        let mut store = RulesConfigStore::new();

        let mut first = SchedulingRulesConfig::new("2025-FALL");
        first.rules.min_students_per_section = 12;
        let saved = store.save(first, "committee").unwrap();
        assert_eq!(saved.version, 1);
        assert!(saved.is_active);
        assert!(!saved.is_default);
        assert_eq!(saved.created_by.as_deref(), Some("committee"));

        let mut second = SchedulingRulesConfig::new("2025-FALL");
        second.rules.min_students_per_section = 8;
        store.save(second, "registrar").unwrap();

        let active = store.active("2025-FALL");
        assert_eq!(active.version, 2);
        assert_eq!(active.rules.min_students_per_section, 8);

        let history = store.history("2025-FALL");
        assert_eq!(history.len(), 2);
        assert!(!history[0].is_active);
        assert!(history[1].is_active);
    }

    #[test]
    fn test_terms_are_independent() {
        let mut store = RulesConfigStore::new();
        store.save(SchedulingRulesConfig::new("A"), "u").unwrap();
        store.save(SchedulingRulesConfig::new("B"), "u").unwrap();
        store.save(SchedulingRulesConfig::new("B"), "u").unwrap();

        assert_eq!(store.active("A").version, 1);
        assert_eq!(store.active("B").version, 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_save_rejects_invalid() {
        let mut store = RulesConfigStore::new();
        let mut bad = SchedulingRulesConfig::new("2025-FALL");
        bad.rules.max_daily_hours = 0.0;
        bad.priority_weights.load_balancing = 0.5;

        let err = store.save(bad, "u").unwrap_err();
        match err {
            ScheduleError::InvalidConfig { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_deactivate_keeps_history() {
        let mut store = RulesConfigStore::new();
        store.save(SchedulingRulesConfig::new("T"), "u").unwrap();

        assert!(store.deactivate("T"));
        assert!(!store.deactivate("T"));
        assert!(store.active("T").is_default);
        assert_eq!(store.history("T").len(), 1);

        // Versions keep counting after a deactivation.
        let saved = store.save(SchedulingRulesConfig::new("T"), "u").unwrap();
        assert_eq!(saved.version, 2);
    }
}
