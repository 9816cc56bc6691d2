use super::domain::OptionSet;
use chrono::{DateTime, Utc};

pub const CODE_LENGTH: usize = 7;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derives the 7-character attestation code for `options` observed at `now`.
///
/// The code is the base-36 millisecond timestamp followed by the base-36 option hash,
/// cut to [`CODE_LENGTH`] characters and uppercased.
pub fn generate_code(options: &OptionSet, now: DateTime<Utc>) -> String {
    // pre-epoch clocks clamp to zero
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let timestamp = to_base36(millis);
    let hash = to_base36(option_hash(options).unsigned_abs() as u64).to_ascii_uppercase();

    let mut code = timestamp;
    code.push_str(&hash);
    code.truncate(CODE_LENGTH);
    code.to_ascii_uppercase()
}

/// 32-bit `acc * 31 + unit` fold over the UTF-16 units of the canonical rendering.
pub fn option_hash(options: &OptionSet) -> i32 {
    options
        .canonical_string()
        .encode_utf16()
        .fold(0i32, |acc, unit| {
            acc.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
