//! Flat key/value encoding of an [`OptionSet`] for share links.
//!
//! Decoding never fails: unparseable integers and unknown names fall back to defaults.
//! Integers are read from their leading digits, so `s=12abc` means 12 slices.

use super::domain::{BackgroundPattern, ColorScheme, OptionSet, DEFAULT_SLICES};
use tracing::debug;

pub const SLICES: &str = "s";
pub const THREE_D: &str = "3d";
pub const EXPLODE: &str = "e";
pub const COLORS: &str = "c";
pub const ROTATION: &str = "r";
pub const HIDE_LABELS: &str = "hl";
pub const TINY_LABELS: &str = "tl";
pub const RANDOM_LABEL_SIZES: &str = "rls";
pub const SHADOW: &str = "sh";
pub const OUTLINE: &str = "ol";
pub const BACKGROUND: &str = "bg";
pub const DONUT: &str = "d";
pub const LARGE_FONT: &str = "lf";
pub const TEXT_DESCRIPTION: &str = "td";

/// Parses a raw query such as `s=10&3d=1`. A leading `?` is ignored.
pub fn parse_query(raw: &str) -> OptionSet {
    let trimmed = raw.trim().trim_start_matches('?');
    match serde_urlencoded::from_str::<Vec<(String, String)>>(trimmed) {
        Ok(pairs) => from_pairs(pairs),
        Err(err) => {
            debug!(error = %err, "undecodable query, using defaults");
            OptionSet::default()
        }
    }
}

/// Builds an option set from decoded pairs. Later duplicates win.
pub fn from_pairs<I, K, V>(pairs: I) -> OptionSet
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut options = OptionSet::default();
    for (key, value) in pairs {
        apply_pair(&mut options, key.as_ref(), value.as_ref());
    }
    options
}

fn apply_pair(options: &mut OptionSet, key: &str, value: &str) {
    match key {
        SLICES => options.slices = slice_value(value),
        THREE_D => options.three_d = flag_value(value),
        EXPLODE => options.explode = flag_value(value),
        COLORS => options.colors = color_value(value),
        ROTATION => options.rotation = rotation_value(value),
        HIDE_LABELS => options.hide_labels = flag_value(value),
        TINY_LABELS => options.tiny_labels = flag_value(value),
        RANDOM_LABEL_SIZES => options.random_label_sizes = flag_value(value),
        SHADOW => options.shadow = flag_value(value),
        OUTLINE => options.outline = flag_value(value),
        BACKGROUND => options.background = background_value(value),
        DONUT => options.donut = flag_value(value),
        LARGE_FONT => options.large_font = flag_value(value),
        TEXT_DESCRIPTION => options.text_description = flag_value(value),
        other => debug!(key = other, "ignoring unknown query parameter"),
    }
}

pub(crate) fn flag_value(raw: &str) -> bool {
    raw == "1"
}

pub(crate) fn slice_value(raw: &str) -> u32 {
    leading_integer(raw)
        .and_then(|count| u32::try_from(count).ok())
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_SLICES)
}

pub(crate) fn rotation_value(raw: &str) -> i32 {
    leading_integer(raw)
        .and_then(|degrees| i32::try_from(degrees).ok())
        .unwrap_or(0)
}

/// Optional sign plus the run of ASCII digits at the start, ignoring leading whitespace.
/// `None` when there are no digits.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    trimmed[..sign_len + digits].parse().ok()
}

pub(crate) fn color_value(raw: &str) -> ColorScheme {
    ColorScheme::from_name(raw).unwrap_or_else(|| {
        debug!(value = raw, "unknown color scheme, using default");
        ColorScheme::Default
    })
}

pub(crate) fn background_value(raw: &str) -> BackgroundPattern {
    BackgroundPattern::from_name(raw).unwrap_or_else(|| {
        debug!(value = raw, "unknown background pattern, using none");
        BackgroundPattern::None
    })
}

/// Every key, in a stable order. Flags are written as `1`/`0`.
pub fn to_pairs(options: &OptionSet) -> Vec<(&'static str, String)> {
    let flag = |value: bool| if value { "1" } else { "0" }.to_string();
    vec![
        (SLICES, options.slices.to_string()),
        (THREE_D, flag(options.three_d)),
        (EXPLODE, flag(options.explode)),
        (COLORS, options.colors.as_str().to_string()),
        (ROTATION, options.rotation.to_string()),
        (HIDE_LABELS, flag(options.hide_labels)),
        (TINY_LABELS, flag(options.tiny_labels)),
        (RANDOM_LABEL_SIZES, flag(options.random_label_sizes)),
        (SHADOW, flag(options.shadow)),
        (OUTLINE, flag(options.outline)),
        (BACKGROUND, options.background.as_str().to_string()),
        (DONUT, flag(options.donut)),
        (LARGE_FONT, flag(options.large_font)),
        (TEXT_DESCRIPTION, flag(options.text_description)),
    ]
}

pub fn to_query_string(options: &OptionSet) -> String {
    to_pairs(options)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}
