//! Parsing of duration settings such as `720h` or `1h30m`.
//!
//! The accepted syntax is a possibly signed sequence of decimal numbers, each
//! with an optional fraction and a unit suffix: `ns`, `us` (or `µs`), `ms`,
//! `s`, `m`, `h`. The bare string `0` is also accepted.

use chrono::TimeDelta;

use crate::error::{Error, Result};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Fraction digits beyond this are ignored.
const MAX_FRACTION_DIGITS: u32 = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a duration string into a signed `TimeDelta`.
pub fn parse_duration(input: &str) -> Result<TimeDelta> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(Error::invalid_duration(input, "empty duration"));
    }

    let limit = i64::MAX as u128;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(after_dot) => {
                let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
                after_dot.split_at(frac_len)
            }
            None => ("", after_int),
        };

        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(Error::invalid_duration(input, "expected a number"));
        }

        let unit_len = after_number
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(after_number.len());
        let (unit, remainder) = after_number.split_at(unit_len);

        if unit.is_empty() {
            return Err(Error::invalid_duration(input, "missing unit"));
        }
        let scale = unit_nanos(unit)
            .ok_or_else(|| Error::invalid_duration(input, format!("unknown unit {:?}", unit)))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits
                .parse()
                .map_err(|_| Error::invalid_duration(input, "number out of range"))?
        };

        let mut value = whole
            .checked_mul(scale)
            .filter(|v| *v <= limit)
            .ok_or_else(|| Error::invalid_duration(input, "duration out of range"))?;

        if !frac_digits.is_empty() {
            let kept = &frac_digits[..frac_digits.len().min(MAX_FRACTION_DIGITS as usize)];
            let fraction: u128 = kept
                .parse()
                .map_err(|_| Error::invalid_duration(input, "fraction out of range"))?;
            value += fraction * scale / 10u128.pow(kept.len() as u32);
        }

        total = total
            .checked_add(value)
            .filter(|v| *v <= limit)
            .ok_or_else(|| Error::invalid_duration(input, "duration out of range"))?;

        rest = remainder;
    }

    let nanos = total as i64;
    Ok(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours() {
        assert_eq!(parse_duration("720h").unwrap(), TimeDelta::hours(720));
    }

    #[test]
    fn test_compound() {
        assert_eq!(
            parse_duration("1h30m15s").unwrap(),
            TimeDelta::hours(1) + TimeDelta::minutes(30) + TimeDelta::seconds(15)
        );
    }

    #[test]
    fn test_fraction() {
        assert_eq!(parse_duration("1.5h").unwrap(), TimeDelta::minutes(90));
        assert_eq!(parse_duration(".5s").unwrap(), TimeDelta::milliseconds(500));
    }

    #[test]
    fn test_small_units() {
        assert_eq!(parse_duration("300ms").unwrap(), TimeDelta::milliseconds(300));
        assert_eq!(parse_duration("2us").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_duration("2µs").unwrap(), TimeDelta::microseconds(2));
        assert_eq!(parse_duration("7ns").unwrap(), TimeDelta::nanoseconds(7));
    }

    #[test]
    fn test_zero_and_sign() {
        assert_eq!(parse_duration("0").unwrap(), TimeDelta::zero());
        assert_eq!(parse_duration("-2h").unwrap(), TimeDelta::hours(-2));
        assert_eq!(parse_duration("+2h").unwrap(), TimeDelta::hours(2));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in ["", "h", "720", "720d", "1h30", "abc", "-", "1..5h"] {
            assert!(
                matches!(parse_duration(input), Err(Error::InvalidDuration { .. })),
                "expected {:?} to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(parse_duration("9999999999999h").is_err());
    }
}
