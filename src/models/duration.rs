//! Mute duration model
//!
//! Durations are written as `<integer><unit>` where the unit is `m`, `h` or
//! `d` (e.g. `30m`, `1h`, `2d`). Anything else is invalid input.

use std::str::FromStr;
use std::sync::OnceLock;
use chrono::Duration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{ModBuddyError, Result};

/// Message shown when a duration argument does not parse
pub const INVALID_DURATION_MESSAGE: &str =
    "Invalid duration format. Use 'm' for minutes, 'h' for hours, 'd' for days (e.g., 30m, 1h, 1d).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    fn suffix(self) -> char {
        match self {
            DurationUnit::Minutes => 'm',
            DurationUnit::Hours => 'h',
            DurationUnit::Days => 'd',
        }
    }
}

/// A parsed mute duration: an amount of a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteDuration {
    pub amount: u32,
    pub unit: DurationUnit,
}

impl MuteDuration {
    pub fn new(amount: u32, unit: DurationUnit) -> Self {
        Self { amount, unit }
    }

    pub fn as_duration(&self) -> Duration {
        let amount = i64::from(self.amount);
        match self.unit {
            DurationUnit::Minutes => Duration::minutes(amount),
            DurationUnit::Hours => Duration::hours(amount),
            DurationUnit::Days => Duration::days(amount),
        }
    }
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([0-9]+)([mhdMHD])$").expect("duration pattern is valid"))
}

impl FromStr for MuteDuration {
    type Err = ModBuddyError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ModBuddyError::InvalidInput(INVALID_DURATION_MESSAGE.to_string());

        let captures = duration_pattern().captures(s).ok_or_else(invalid)?;
        let amount: u32 = captures[1].parse().map_err(|_| invalid())?;
        let unit = match captures[2].to_ascii_lowercase().as_str() {
            "m" => DurationUnit::Minutes,
            "h" => DurationUnit::Hours,
            "d" => DurationUnit::Days,
            _ => return Err(invalid()),
        };

        Ok(Self { amount, unit })
    }
}

impl std::fmt::Display for MuteDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_valid_durations() {
        let cases = [
            ("1h", Duration::hours(1)),
            ("30m", Duration::minutes(30)),
            ("2d", Duration::days(2)),
            ("10h", Duration::hours(10)),
            ("5m", Duration::minutes(5)),
            ("0m", Duration::zero()),
            ("0h", Duration::zero()),
            ("0d", Duration::zero()),
        ];

        for (input, expected) in cases {
            let parsed: MuteDuration = input.parse().unwrap();
            assert_eq!(parsed.as_duration(), expected, "input {input}");
        }
    }

    #[test]
    fn test_unit_is_case_insensitive() {
        let parsed: MuteDuration = "1H".parse().unwrap();
        assert_eq!(parsed, MuteDuration::new(1, DurationUnit::Hours));
    }

    #[test]
    fn test_invalid_durations() {
        for input in ["1z", "abc", "", "h", "1", "1hm", "1h30m", "-1h", "1.5h", " 1h", "1h ", "+1h", "٣h"] {
            assert_matches!(
                input.parse::<MuteDuration>(),
                Err(ModBuddyError::InvalidInput(_)),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_amount_overflow_is_invalid() {
        assert_matches!("99999999999999999999d".parse::<MuteDuration>(), Err(ModBuddyError::InvalidInput(_)));
    }

    #[test]
    fn test_display_echoes_input() {
        assert_eq!("30m".parse::<MuteDuration>().unwrap().to_string(), "30m");
        assert_eq!("2H".parse::<MuteDuration>().unwrap().to_string(), "2h");
    }

    proptest! {
        #[test]
        fn prop_amount_and_unit_parse_exactly(amount in 0u32..1_000_000, unit in prop::sample::select(vec!['m', 'h', 'd'])) {
            let parsed: MuteDuration = format!("{amount}{unit}").parse().unwrap();
            let expected = match unit {
                'm' => Duration::minutes(i64::from(amount)),
                'h' => Duration::hours(i64::from(amount)),
                _ => Duration::days(i64::from(amount)),
            };
            prop_assert_eq!(parsed.as_duration(), expected);
        }

        #[test]
        fn prop_negative_amounts_rejected(amount in 1u32..1_000_000, unit in prop::sample::select(vec!['m', 'h', 'd'])) {
            let input = format!("-{amount}{unit}");
            prop_assert!(input.parse::<MuteDuration>().is_err());
        }

        #[test]
        fn prop_fractional_amounts_rejected(whole in 0u32..1000, frac in 0u32..1000, unit in prop::sample::select(vec!['m', 'h', 'd'])) {
            let input = format!("{whole}.{frac}{unit}");
            prop_assert!(input.parse::<MuteDuration>().is_err());
        }

        #[test]
        fn prop_missing_unit_rejected(amount in 0u32..1_000_000) {
            prop_assert!(amount.to_string().parse::<MuteDuration>().is_err());
        }
    }
}
