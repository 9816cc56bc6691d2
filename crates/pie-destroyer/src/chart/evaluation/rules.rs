use super::super::domain::{ColorScheme, OptionSet};
use super::config::EvaluationConfig;
use serde::Serialize;

/// Design anti-patterns, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    SliceOverload,
    ThirdDimension,
    ColorChaos,
    ExplosiveElements,
    InformationVandalism,
    IllegibleLabels,
    InconsistentTypography,
    DecorativeDisaster,
    HeavyOutlines,
}

impl ViolationKind {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::SliceOverload,
            Self::ThirdDimension,
            Self::ColorChaos,
            Self::ExplosiveElements,
            Self::InformationVandalism,
            Self::IllegibleLabels,
            Self::InconsistentTypography,
            Self::DecorativeDisaster,
            Self::HeavyOutlines,
        ]
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::SliceOverload => "Slice Overload",
            Self::ThirdDimension => "The Third Dimension",
            Self::ColorChaos => "Color Chaos",
            Self::ExplosiveElements => "Explosive Elements",
            Self::InformationVandalism => "Information Vandalism",
            Self::IllegibleLabels => "Illegible Labels",
            Self::InconsistentTypography => "Inconsistent Typography",
            Self::DecorativeDisaster => "Decorative Disaster",
            Self::HeavyOutlines => "Heavy Outlines",
        }
    }

    pub fn fires(self, options: &OptionSet, config: &EvaluationConfig) -> bool {
        match self {
            Self::SliceOverload => options.slices > config.slice_overload_threshold,
            Self::ThirdDimension => options.three_d,
            Self::ColorChaos => options.colors.is_chaotic(),
            Self::ExplosiveElements => options.explode,
            Self::InformationVandalism => options.hide_labels,
            // hidden labels already explain the loss; skip the redundant complaints
            Self::IllegibleLabels => options.tiny_labels && !options.hide_labels,
            Self::InconsistentTypography => options.random_label_sizes && !options.hide_labels,
            Self::DecorativeDisaster => options.shadow || options.background.is_decorated(),
            Self::HeavyOutlines => options.outline,
        }
    }

    pub fn message(self, options: &OptionSet) -> String {
        let detail = match self {
            Self::SliceOverload => {
                return format!(
                    "{} ({} slices make comparison nearly impossible)",
                    self.title(),
                    options.slices
                )
            }
            Self::ThirdDimension => "3D distorts angle perception",
            Self::ColorChaos => "poor color choices harm accessibility",
            Self::ExplosiveElements => "exploded slices worsen comparison",
            Self::InformationVandalism => "missing labels eliminate context",
            Self::IllegibleLabels => "tiny text size harms readability",
            Self::InconsistentTypography => "random label sizes harm readability",
            Self::DecorativeDisaster => "unnecessary visual elements add noise without information",
            Self::HeavyOutlines => "thick borders distract from data comparison",
        };
        format!("{} ({})", self.title(), detail)
    }
}

/// Accessibility and readability improvements, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodPractice {
    Donut,
    ColorsafePalette,
    LargeFont,
    TextDescription,
}

impl GoodPractice {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Donut,
            Self::ColorsafePalette,
            Self::LargeFont,
            Self::TextDescription,
        ]
    }

    pub fn applies(self, options: &OptionSet) -> bool {
        match self {
            Self::Donut => options.donut,
            Self::ColorsafePalette => options.colors == ColorScheme::Colorsafe,
            Self::LargeFont => options.large_font,
            Self::TextDescription => options.text_description,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Donut => "Donut chart (center hole reduces visual clutter)",
            Self::ColorsafePalette => "Colorblind-safe palette (improves accessibility)",
            Self::LargeFont => "Larger font size (improves readability)",
            Self::TextDescription => "Text description provided (makes data accessible)",
        }
    }
}

pub(crate) fn detect_violations(
    options: &OptionSet,
    config: &EvaluationConfig,
) -> Vec<ViolationKind> {
    ViolationKind::ordered()
        .into_iter()
        .filter(|kind| kind.fires(options, config))
        .collect()
}

pub(crate) fn detect_good_practices(options: &OptionSet) -> Vec<GoodPractice> {
    GoodPractice::ordered()
        .into_iter()
        .filter(|practice| practice.applies(options))
        .collect()
}
