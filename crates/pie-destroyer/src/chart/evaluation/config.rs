use serde::{Deserialize, Serialize};

/// Limits applied by the rule engine and the budget guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub max_bad_choices: usize,
    pub slice_overload_threshold: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_bad_choices: 5,
            slice_overload_threshold: 7,
        }
    }
}
