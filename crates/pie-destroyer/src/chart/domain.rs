use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Slice counts offered by the option picker.
pub const SLICE_CHOICES: [u32; 11] = [3, 4, 5, 6, 7, 8, 9, 10, 12, 15, 20];

pub const DEFAULT_SLICES: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Default,
    Colorblind,
    Colorsafe,
    Random,
    Similar,
    Ugly,
    Neon,
}

impl ColorScheme {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Default,
            Self::Colorblind,
            Self::Colorsafe,
            Self::Random,
            Self::Similar,
            Self::Ugly,
            Self::Neon,
        ]
    }

    /// Name used on the wire and in the canonical rendering.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Colorblind => "colorblind",
            Self::Colorsafe => "colorsafe",
            Self::Random => "random",
            Self::Similar => "similar",
            Self::Ugly => "ugly",
            Self::Neon => "neon",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Colorblind => "Colorblind",
            Self::Colorsafe => "Colorblind Safe (Good!)",
            Self::Random => "Random",
            Self::Similar => "Similar Colors",
            Self::Ugly => "Ugly Clashing Colors (Bad!)",
            Self::Neon => "Neon",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|scheme| scheme.as_str() == raw.trim())
    }

    /// Palettes that harm legibility or accessibility.
    pub const fn is_chaotic(self) -> bool {
        matches!(self, Self::Random | Self::Similar | Self::Neon | Self::Ugly)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundPattern {
    #[default]
    None,
    Checkered,
    Houndstooth,
}

impl BackgroundPattern {
    pub const fn ordered() -> [Self; 3] {
        [Self::None, Self::Checkered, Self::Houndstooth]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Checkered => "checkered",
            Self::Houndstooth => "houndstooth",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|pattern| pattern.as_str() == raw.trim())
    }

    pub const fn is_decorated(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for BackgroundPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tri-state view over the three label flags. Hidden dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    Standard,
    Degraded,
    Hidden,
}

/// The full user configuration of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub slices: u32,
    pub rotation: i32,
    pub colors: ColorScheme,
    pub three_d: bool,
    pub explode: bool,
    pub hide_labels: bool,
    pub tiny_labels: bool,
    pub random_label_sizes: bool,
    pub shadow: bool,
    pub outline: bool,
    pub background: BackgroundPattern,
    pub donut: bool,
    pub large_font: bool,
    pub text_description: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        Self {
            slices: DEFAULT_SLICES,
            rotation: 0,
            colors: ColorScheme::Default,
            three_d: false,
            explode: false,
            hide_labels: false,
            tiny_labels: false,
            random_label_sizes: false,
            shadow: false,
            outline: false,
            background: BackgroundPattern::None,
            donut: false,
            large_font: false,
            text_description: false,
        }
    }
}

impl OptionSet {
    pub fn label_mode(&self) -> LabelMode {
        if self.hide_labels {
            LabelMode::Hidden
        } else if self.tiny_labels || self.random_label_sizes {
            LabelMode::Degraded
        } else {
            LabelMode::Standard
        }
    }

    /// Separator-free rendering fed to the attestation hash. Field order is fixed.
    pub fn canonical_string(&self) -> String {
        let mut out = String::with_capacity(96);
        let _ = write!(
            out,
            "{}{}{}{}{}{}{}{}{}{}{}{}{}{}",
            self.slices,
            self.three_d,
            self.explode,
            self.colors,
            self.rotation,
            self.hide_labels,
            self.tiny_labels,
            self.random_label_sizes,
            self.shadow,
            self.outline,
            self.background,
            self.donut,
            self.large_font,
            self.text_description,
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string_of_defaults() {
        assert_eq!(
            OptionSet::default().canonical_string(),
            "5falsefalsedefault0falsefalsefalsefalsefalsenonefalsefalsefalse"
        );
    }

    #[test]
    fn hidden_labels_dominate_other_label_flags() {
        let mut options = OptionSet {
            tiny_labels: true,
            ..OptionSet::default()
        };
        assert_eq!(options.label_mode(), LabelMode::Degraded);

        options.hide_labels = true;
        options.random_label_sizes = true;
        assert_eq!(options.label_mode(), LabelMode::Hidden);
    }

    #[test]
    fn scheme_names_resolve() {
        assert_eq!(ColorScheme::from_name("neon"), Some(ColorScheme::Neon));
        assert_eq!(ColorScheme::from_name("plaid"), None);
        assert!(ColorScheme::Ugly.is_chaotic());
        assert!(!ColorScheme::Colorblind.is_chaotic());
        assert_eq!(
            BackgroundPattern::from_name("houndstooth"),
            Some(BackgroundPattern::Houndstooth)
        );
    }
}
