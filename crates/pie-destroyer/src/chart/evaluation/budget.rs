use super::super::domain::{LabelMode, OptionSet};
use serde::Serialize;

/// A chargeable bad choice. Each active category costs one budget slot.
///
/// Shadow and background share a violation message but are charged separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    ThreeD,
    Explode,
    LabelDegradation,
    Shadow,
    Outline,
    Background,
}

impl BudgetCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::ThreeD,
            Self::Explode,
            Self::LabelDegradation,
            Self::Shadow,
            Self::Outline,
            Self::Background,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeD => "3D Effect",
            Self::Explode => "Explode Slices",
            Self::LabelDegradation => "Label Degradation",
            Self::Shadow => "Drop Shadow",
            Self::Outline => "Heavy Outline",
            Self::Background => "Background Pattern",
        }
    }

    pub fn is_active(self, options: &OptionSet) -> bool {
        match self {
            Self::ThreeD => options.three_d,
            Self::Explode => options.explode,
            Self::LabelDegradation => options.label_mode() != LabelMode::Standard,
            Self::Shadow => options.shadow,
            Self::Outline => options.outline,
            Self::Background => options.background.is_decorated(),
        }
    }
}

pub(crate) fn active_categories(options: &OptionSet) -> Vec<BudgetCategory> {
    BudgetCategory::ordered()
        .into_iter()
        .filter(|category| category.is_active(options))
        .collect()
}

/// Number of active chargeable categories. Not capped: a set loaded from a crafted
/// query may exceed the budget and is reported as-is.
pub fn chargeable_count(options: &OptionSet) -> usize {
    active_categories(options).len()
}
