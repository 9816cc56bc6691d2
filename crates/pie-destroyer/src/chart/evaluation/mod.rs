mod budget;
mod config;
mod rules;

pub use budget::{chargeable_count, BudgetCategory};
pub use config::EvaluationConfig;
pub use rules::{GoodPractice, ViolationKind};

use super::attestation::generate_code;
use super::domain::OptionSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stateless evaluator applying the static rule table to an option set.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    config: EvaluationConfig,
}

impl EvaluationEngine {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn violations(&self, options: &OptionSet) -> Vec<String> {
        rules::detect_violations(options, &self.config)
            .into_iter()
            .map(|kind| kind.message(options))
            .collect()
    }

    pub fn violation_kinds(&self, options: &OptionSet) -> Vec<ViolationKind> {
        rules::detect_violations(options, &self.config)
    }

    pub fn good_practices(&self, options: &OptionSet) -> Vec<String> {
        rules::detect_good_practices(options)
            .into_iter()
            .map(|practice| practice.message().to_string())
            .collect()
    }

    /// Full recomputation of every derived output for `options` observed at `now`.
    pub fn derive(&self, options: &OptionSet, now: DateTime<Utc>) -> DerivedReport {
        DerivedReport {
            chargeable_count: chargeable_count(options),
            max_bad_choices: self.config.max_bad_choices,
            violations: self.violations(options),
            good_practices: self.good_practices(options),
            attestation_code: generate_code(options, now),
        }
    }

    /// Rejects a transition that would push the chargeable count past the budget.
    ///
    /// Transitions that keep or lower the count always pass, so an over-budget set can
    /// still be cleaned up one option at a time.
    pub fn check_change(&self, current: &OptionSet, next: &OptionSet) -> Result<(), BudgetError> {
        let before = chargeable_count(current);
        let after = chargeable_count(next);

        if after > self.config.max_bad_choices && after > before {
            let category = budget::active_categories(next)
                .into_iter()
                .find(|category| !category.is_active(current))
                .unwrap_or(BudgetCategory::ThreeD);
            return Err(BudgetError::Exceeded {
                max: self.config.max_bad_choices,
                category,
            });
        }

        Ok(())
    }
}

/// Outputs recomputed after every option change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedReport {
    pub chargeable_count: usize,
    pub max_bad_choices: usize,
    pub violations: Vec<String>,
    pub good_practices: Vec<String>,
    pub attestation_code: String,
}

impl DerivedReport {
    pub fn budget_exhausted(&self) -> bool {
        self.chargeable_count >= self.max_bad_choices
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    #[error("you can only select {max} bad options ({} would exceed the budget)", .category.label())]
    Exceeded { max: usize, category: BudgetCategory },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::domain::{BackgroundPattern, ColorScheme};

    fn engine() -> EvaluationEngine {
        EvaluationEngine::new(EvaluationConfig::default())
    }

    fn five_bad_choices() -> OptionSet {
        OptionSet {
            three_d: true,
            explode: true,
            tiny_labels: true,
            shadow: true,
            outline: true,
            ..OptionSet::default()
        }
    }

    #[test]
    fn shadow_and_background_take_separate_slots() {
        let options = OptionSet {
            shadow: true,
            background: BackgroundPattern::Checkered,
            ..OptionSet::default()
        };

        assert_eq!(chargeable_count(&options), 2);
        let violations = engine().violations(&options);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("Decorative Disaster"));
    }

    #[test]
    fn free_options_never_count() {
        let options = OptionSet {
            slices: 20,
            rotation: 270,
            colors: ColorScheme::Neon,
            donut: true,
            large_font: true,
            text_description: true,
            ..OptionSet::default()
        };

        assert_eq!(chargeable_count(&options), 0);
    }

    #[test]
    fn guard_rejects_a_sixth_category() {
        let current = five_bad_choices();
        let next = OptionSet {
            background: BackgroundPattern::Houndstooth,
            ..current.clone()
        };

        let err = engine()
            .check_change(&current, &next)
            .expect_err("sixth category blocked");
        assert_eq!(
            err,
            BudgetError::Exceeded {
                max: 5,
                category: BudgetCategory::Background,
            }
        );
    }

    #[test]
    fn guard_allows_extra_label_flags_within_an_active_category() {
        let current = five_bad_choices();
        let next = OptionSet {
            hide_labels: true,
            random_label_sizes: true,
            ..current.clone()
        };

        assert!(engine().check_change(&current, &next).is_ok());
    }

    #[test]
    fn guard_allows_turning_options_off_and_good_flags_on() {
        let mut current = five_bad_choices();
        current.background = BackgroundPattern::Checkered;
        assert_eq!(chargeable_count(&current), 6);

        let fewer = OptionSet {
            outline: false,
            ..current.clone()
        };
        assert!(engine().check_change(&current, &fewer).is_ok());

        let good = OptionSet {
            donut: true,
            ..current.clone()
        };
        assert!(engine().check_change(&current, &good).is_ok());

        let swapped = OptionSet {
            background: BackgroundPattern::Houndstooth,
            ..current.clone()
        };
        assert!(engine().check_change(&current, &swapped).is_ok());
    }

    #[test]
    fn report_flags_exhausted_budget() {
        let report = engine().derive(&five_bad_choices(), Utc::now());
        assert_eq!(report.chargeable_count, 5);
        assert!(report.budget_exhausted());
    }

    #[test]
    fn threshold_follows_config() {
        let strict = EvaluationEngine::new(EvaluationConfig {
            slice_overload_threshold: 4,
            ..EvaluationConfig::default()
        });
        let options = OptionSet::default();
        assert_eq!(
            strict.violation_kinds(&options),
            vec![ViolationKind::SliceOverload]
        );
        assert!(engine().violation_kinds(&options).is_empty());
    }
}
