use super::domain::{BackgroundPattern, ColorScheme, OptionSet};
use super::query;
use std::str::FromStr;

/// A single user edit to the option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionChange {
    Slices(u32),
    Rotation(i32),
    Colors(ColorScheme),
    ThreeD(bool),
    Explode(bool),
    HideLabels(bool),
    TinyLabels(bool),
    RandomLabelSizes(bool),
    Shadow(bool),
    Outline(bool),
    Background(BackgroundPattern),
    Donut(bool),
    LargeFont(bool),
    TextDescription(bool),
}

impl OptionChange {
    /// Returns the option set with this change applied, leaving `options` untouched.
    pub fn applied_to(self, options: &OptionSet) -> OptionSet {
        let mut next = options.clone();
        match self {
            Self::Slices(count) => next.slices = count,
            Self::Rotation(degrees) => next.rotation = degrees,
            Self::Colors(scheme) => next.colors = scheme,
            Self::ThreeD(on) => next.three_d = on,
            Self::Explode(on) => next.explode = on,
            Self::HideLabels(on) => next.hide_labels = on,
            Self::TinyLabels(on) => next.tiny_labels = on,
            Self::RandomLabelSizes(on) => next.random_label_sizes = on,
            Self::Shadow(on) => next.shadow = on,
            Self::Outline(on) => next.outline = on,
            Self::Background(pattern) => next.background = pattern,
            Self::Donut(on) => next.donut = on,
            Self::LargeFont(on) => next.large_font = on,
            Self::TextDescription(on) => next.text_description = on,
        }
        next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionChangeError {
    #[error("expected `key=value`, got `{0}`")]
    Malformed(String),
    #[error("unknown option key `{0}`")]
    UnknownKey(String),
    #[error("option `{key}` expects {expected}, got `{value}`")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

/// Parses `key=value` using the share-link keys. Unlike query decoding, edits are
/// strict: a value that cannot be understood is an error instead of a default.
impl FromStr for OptionChange {
    type Err = OptionChangeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (key, value) = raw
            .trim()
            .split_once('=')
            .ok_or_else(|| OptionChangeError::Malformed(raw.to_string()))?;
        let (key, value) = (key.trim(), value.trim());

        let invalid = |expected: &'static str| OptionChangeError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        };
        let flag = || match value {
            "1" | "true" | "on" => Ok(true),
            "0" | "false" | "off" => Ok(false),
            _ => Err(invalid("1 or 0")),
        };

        let change = match key {
            query::SLICES => match value.parse::<u32>() {
                Ok(count) if count > 0 => Self::Slices(count),
                _ => return Err(invalid("a positive slice count")),
            },
            query::ROTATION => {
                Self::Rotation(value.parse::<i32>().map_err(|_| invalid("degrees as an integer"))?)
            }
            query::COLORS => Self::Colors(
                ColorScheme::from_name(value).ok_or_else(|| invalid("a color scheme name"))?,
            ),
            query::BACKGROUND => Self::Background(
                BackgroundPattern::from_name(value)
                    .ok_or_else(|| invalid("none, checkered, or houndstooth"))?,
            ),
            query::THREE_D => Self::ThreeD(flag()?),
            query::EXPLODE => Self::Explode(flag()?),
            query::HIDE_LABELS => Self::HideLabels(flag()?),
            query::TINY_LABELS => Self::TinyLabels(flag()?),
            query::RANDOM_LABEL_SIZES => Self::RandomLabelSizes(flag()?),
            query::SHADOW => Self::Shadow(flag()?),
            query::OUTLINE => Self::Outline(flag()?),
            query::DONUT => Self::Donut(flag()?),
            query::LARGE_FONT => Self::LargeFont(flag()?),
            query::TEXT_DESCRIPTION => Self::TextDescription(flag()?),
            other => return Err(OptionChangeError::UnknownKey(other.to_string())),
        };

        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_share_link_keys() {
        assert_eq!("3d=1".parse::<OptionChange>(), Ok(OptionChange::ThreeD(true)));
        assert_eq!("s=12".parse::<OptionChange>(), Ok(OptionChange::Slices(12)));
        assert_eq!(
            "bg=checkered".parse::<OptionChange>(),
            Ok(OptionChange::Background(BackgroundPattern::Checkered))
        );
        assert_eq!("lf=off".parse::<OptionChange>(), Ok(OptionChange::LargeFont(false)));
    }

    #[test]
    fn rejects_bad_edits() {
        assert!(matches!(
            "3d".parse::<OptionChange>(),
            Err(OptionChangeError::Malformed(_))
        ));
        assert!(matches!(
            "zz=1".parse::<OptionChange>(),
            Err(OptionChangeError::UnknownKey(key)) if key == "zz"
        ));
        assert!(matches!(
            "c=plaid".parse::<OptionChange>(),
            Err(OptionChangeError::InvalidValue { .. })
        ));
        assert!(matches!(
            "s=0".parse::<OptionChange>(),
            Err(OptionChangeError::InvalidValue { .. })
        ));
    }

    #[test]
    fn toggling_on_then_off_restores_the_set() {
        let original = OptionSet::default();
        let on = OptionChange::Explode(true).applied_to(&original);
        assert_ne!(on, original);
        let off = OptionChange::Explode(false).applied_to(&on);
        assert_eq!(off, original);
    }
}
