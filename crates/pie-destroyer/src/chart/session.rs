use super::changes::OptionChange;
use super::domain::OptionSet;
use super::evaluation::{BudgetError, DerivedReport, EvaluationConfig, EvaluationEngine};
use super::query;
use super::render::ChartSpec;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

/// Owns the single mutable option set and keeps its report current.
///
/// Every accepted change recomputes the whole report before returning.
#[derive(Debug, Clone)]
pub struct ChartSession {
    options: OptionSet,
    engine: EvaluationEngine,
    report: DerivedReport,
}

impl ChartSession {
    pub fn new(config: EvaluationConfig) -> Self {
        Self::with_options(config, OptionSet::default())
    }

    /// Starts from a share-link query, which may describe an over-budget set.
    pub fn from_query(config: EvaluationConfig, raw_query: &str) -> Self {
        Self::with_options(config, query::parse_query(raw_query))
    }

    pub fn with_options(config: EvaluationConfig, options: OptionSet) -> Self {
        let engine = EvaluationEngine::new(config);
        let report = engine.derive(&options, Utc::now());
        Self {
            options,
            engine,
            report,
        }
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn report(&self) -> &DerivedReport {
        &self.report
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    pub fn apply(&mut self, change: OptionChange) -> Result<&DerivedReport, BudgetError> {
        self.apply_at(change, Utc::now())
    }

    /// Applies `change` if the budget allows it, stamping the new code with `now`.
    /// A rejected change leaves the session untouched.
    pub fn apply_at(
        &mut self,
        change: OptionChange,
        now: DateTime<Utc>,
    ) -> Result<&DerivedReport, BudgetError> {
        let next = change.applied_to(&self.options);
        self.engine.check_change(&self.options, &next)?;

        debug!(?change, "option change accepted");
        self.options = next;
        self.report = self.engine.derive(&self.options, now);
        Ok(&self.report)
    }

    /// Recomputes the report without changing options, e.g. to refresh the code.
    pub fn refresh_at(&mut self, now: DateTime<Utc>) -> &DerivedReport {
        self.report = self.engine.derive(&self.options, now);
        &self.report
    }

    pub fn chart<R: Rng>(&self, rng: &mut R) -> ChartSpec {
        ChartSpec::build(&self.options, rng)
    }

    pub fn share_query(&self) -> String {
        query::to_query_string(&self.options)
    }
}
