//! Parsing and formatting of user-entered amounts.
//!
//! Portion and performance amounts accept plain numbers or simple fractions
//! (`3/4`), and nutrient targets additionally accept percentages of the FDA
//! daily value (`15%`). Parsed amounts are rounded to three decimal places.

use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, bail, Result};

use crate::refdata;

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Parses a decimal number or a simple fraction of two decimals.
pub fn parse_amount(input: &str) -> Result<f64> {
    let s = input.trim();
    let value = if let Some((numerator, denominator)) = s.split_once('/') {
        let numerator: f64 = numerator
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid fraction numerator in {input:?}"))?;
        let denominator: f64 = denominator
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid fraction denominator in {input:?}"))?;
        if denominator == 0.0 {
            bail!("fraction denominator must not be zero");
        }
        numerator / denominator
    } else {
        s.parse()
            .map_err(|_| anyhow!("expected a number, got {input:?}"))?
    };
    if !value.is_finite() {
        bail!("amount {input:?} is out of range");
    }
    Ok(round3(value))
}

/// Formats an amount without trailing zeros, up to three decimal places.
pub fn fmt_amount(value: f64) -> String {
    let rounded = round3(value);
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        format!("{}", rounded as i64)
    } else {
        let mut s = format!("{rounded:.3}");
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    }
}

/// A nutrient target as entered by the user: an absolute daily amount, or a
/// percentage of the FDA daily value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetInput {
    Absolute(f64),
    Percent(f64),
}

impl Display for TargetInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetInput::Absolute(v) => write!(f, "{}", fmt_amount(*v)),
            TargetInput::Percent(v) => write!(f, "{}%", fmt_amount(*v)),
        }
    }
}

impl FromStr for TargetInput {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(percent) = trimmed.strip_suffix('%') {
            let value = parse_amount(percent)?;
            if value <= 0.0 {
                bail!("target percentages must be greater than zero");
            }
            Ok(TargetInput::Percent(value))
        } else {
            let value = parse_amount(trimmed)?;
            if value <= 0.0 {
                bail!("targets must be greater than zero");
            }
            Ok(TargetInput::Absolute(value))
        }
    }
}

impl TargetInput {
    /// Resolves the input to a daily amount in the nutrient's unit.
    /// Percentage targets require an FDA daily value for the nutrient.
    pub fn resolve(self, nutrient_id: &str) -> Result<f64> {
        match self {
            TargetInput::Absolute(value) => Ok(value),
            TargetInput::Percent(percent) => {
                let (daily, _) = refdata::fda_daily_value(nutrient_id).ok_or_else(|| {
                    anyhow!("nutrient {nutrient_id} has no FDA daily value to take a percentage of")
                })?;
                Ok(round3(daily * percent / 100.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_fractions() {
        assert_eq!(parse_amount("2").unwrap(), 2.0);
        assert_eq!(parse_amount("1.25").unwrap(), 1.25);
        assert_eq!(parse_amount("3/4").unwrap(), 0.75);
        assert_eq!(parse_amount("1/3").unwrap(), 0.333);
        assert!(parse_amount("1/0").is_err());
        assert!(parse_amount("one").is_err());
        assert!(parse_amount("1/2/3").is_err());
    }

    #[test]
    fn formats_without_noise() {
        assert_eq!(fmt_amount(2.0), "2");
        assert_eq!(fmt_amount(1.5), "1.5");
        assert_eq!(fmt_amount(0.333), "0.333");
        assert_eq!(fmt_amount(1.2500), "1.25");
    }

    #[test]
    fn targets_resolve_against_daily_values() {
        let absolute: TargetInput = "120".parse().unwrap();
        assert_eq!(absolute.resolve("203").unwrap(), 120.0);

        // 15% of the 2000 kcal daily value
        let percent: TargetInput = "15%".parse().unwrap();
        assert_eq!(percent.resolve("208").unwrap(), 300.0);

        // Tryptophan has no FDA daily value
        let percent: TargetInput = "10%".parse().unwrap();
        assert!(percent.resolve("501").is_err());

        assert!("0".parse::<TargetInput>().is_err());
        assert!("-5%".parse::<TargetInput>().is_err());
    }
}
