//! Size expressions and human-readable byte counts
//!
//! Parses thresholds like `100M`, `1.5G` or `512` into bytes and formats byte
//! counts with binary prefixes for display.

use crate::error::SizeError;
use humansize::{FormatSizeOptions, BINARY};
use regex::Regex;
use std::sync::LazyLock;

/// Size grammar: number, optional whitespace, optional unit letter, optional `B`
static SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9.]+)\s*([kmgtp]?b?)$").expect("Invalid size regex")
});

/// Binary units with exactly two decimals, e.g. "1.00 KiB"
static DISPLAY_OPTIONS: LazyLock<FormatSizeOptions> =
    LazyLock::new(|| FormatSizeOptions::from(BINARY).decimal_places(2).decimal_zeroes(2));

/// Parse a size expression into a byte count
///
/// Accepts a non-negative decimal number followed by an optional unit
/// (`B`, `K`, `M`, `G`, `T`, `P`, case-insensitive, optionally suffixed with
/// `B`). Units are binary multiples. Fractional bytes are truncated.
///
/// ```
/// use spacehogs::size::parse_size;
///
/// assert_eq!(parse_size("100").unwrap(), 100);
/// assert_eq!(parse_size("1.5M").unwrap(), 1_572_864);
/// assert!(parse_size("-50M").is_err());
/// ```
pub fn parse_size(input: &str) -> Result<u64, SizeError> {
    let caps = SIZE_REGEX
        .captures(input.trim())
        .ok_or_else(|| SizeError::InvalidFormat {
            input: input.to_string(),
        })?;

    let number = &caps[1];
    let shift = unit_shift(&caps[2]);
    let out_of_range = || SizeError::OutOfRange {
        input: input.to_string(),
    };

    // Whole numbers stay in integer arithmetic so large values are exact
    if !number.contains('.') {
        let value: u64 = number.parse().map_err(|_| out_of_range())?;
        return value
            .checked_mul(1u64 << shift)
            .ok_or_else(out_of_range);
    }

    let value: f64 = number.parse().map_err(|_| SizeError::InvalidNumber {
        number: number.to_string(),
    })?;
    let bytes = value * (1u64 << shift) as f64;

    // 2^64 is the first f64 past u64::MAX
    if !bytes.is_finite() || bytes >= 18_446_744_073_709_551_616.0 {
        return Err(out_of_range());
    }

    Ok(bytes as u64)
}

/// Power-of-two exponent for a unit suffix that already matched the grammar
fn unit_shift(unit: &str) -> u32 {
    match unit.chars().next().map(|c| c.to_ascii_uppercase()) {
        Some('K') => 10,
        Some('M') => 20,
        Some('G') => 30,
        Some('T') => 40,
        Some('P') => 50,
        // "B" or no unit
        _ => 0,
    }
}

/// Format a byte count for display
///
/// Counts below 1024 are shown as whole bytes (`"1023 B"`). Larger counts use
/// the largest binary unit with a scaled value of at least one, with two
/// decimals (`"1.50 KiB"`).
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    humansize::format_size(bytes, &*DISPLAY_OPTIONS)
}
