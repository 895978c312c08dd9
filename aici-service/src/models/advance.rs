//! The 50% immediate-advance calculation.
//!
//! The simulation applies a flat 50% of the invoiced amount and ignores
//! statutory caps, eligibility rules and exclusions.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::utils::money::parse_amount;

/// Rounding applied to computed monetary values.
///
/// The live calculation path rounds half-up to 2 decimal places; the seeded
/// demonstration rows keep the exact product, preserving the behavior of the
/// original demo pending product clarification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingPolicy {
    #[default]
    HalfUp2,
    Exact,
}

impl RoundingPolicy {
    pub fn apply(self, value: Decimal) -> Decimal {
        match self {
            RoundingPolicy::HalfUp2 => {
                let mut rounded =
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                // Pin the scale so 100 and 100.0 both render and serialize as 100.00
                rounded.rescale(2);
                rounded
            }
            RoundingPolicy::Exact => value,
        }
    }
}

/// Result of applying the advance to a gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvanceCalculation {
    pub gross: Decimal,
    pub advance: Decimal,
    pub remainder: Decimal,
}

impl AdvanceCalculation {
    /// Compute `advance = gross × 0.5` and `remainder = gross − advance`,
    /// each rounded per `policy`.
    pub fn compute(gross: Decimal, policy: RoundingPolicy) -> Self {
        let advance = policy.apply(gross * Decimal::new(5, 1));
        let remainder = policy.apply(gross - advance);
        Self {
            gross,
            advance,
            remainder,
        }
    }
}

/// Parse raw amount text and compute the advance preview.
///
/// Unparseable or non-positive input yields `None`: the preview stays hidden
/// and no error is surfaced.
pub fn preview_amount(amount_text: &str, policy: RoundingPolicy) -> Option<AdvanceCalculation> {
    let gross = parse_amount(amount_text)?;
    if gross <= Decimal::ZERO {
        return None;
    }
    Some(AdvanceCalculation::compute(gross, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn advance_plus_remainder_reconstructs_rounded_gross() {
        for amount in ["80", "120", "0.01", "99.99", "1000000"] {
            let gross = dec(amount);
            let calc = AdvanceCalculation::compute(gross, RoundingPolicy::HalfUp2);
            assert_eq!(
                calc.advance + calc.remainder,
                gross.round_dp(2),
                "invariant broken for gross={}",
                amount
            );
        }
    }

    #[test]
    fn advance_rounds_half_up() {
        // 0.01 × 0.5 = 0.005 rounds up to 0.01, leaving a zero remainder
        let calc = AdvanceCalculation::compute(dec("0.01"), RoundingPolicy::HalfUp2);
        assert_eq!(calc.advance, dec("0.01"));
        assert_eq!(calc.remainder, dec("0.00"));

        let calc = AdvanceCalculation::compute(dec("99.99"), RoundingPolicy::HalfUp2);
        assert_eq!(calc.advance, dec("50.00"));
        assert_eq!(calc.remainder, dec("49.99"));
    }

    #[test]
    fn exact_policy_keeps_unrounded_product() {
        let calc = AdvanceCalculation::compute(dec("0.01"), RoundingPolicy::Exact);
        assert_eq!(calc.advance, dec("0.005"));
        assert_eq!(calc.remainder, dec("0.005"));
    }

    #[test]
    fn preview_rejects_zero_negative_and_garbage() {
        assert!(preview_amount("0", RoundingPolicy::HalfUp2).is_none());
        assert!(preview_amount("-5", RoundingPolicy::HalfUp2).is_none());
        assert!(preview_amount("abc", RoundingPolicy::HalfUp2).is_none());
        assert!(preview_amount("", RoundingPolicy::HalfUp2).is_none());
    }

    #[test]
    fn preview_accepts_comma_decimal_separator() {
        let calc = preview_amount("80,50", RoundingPolicy::HalfUp2).unwrap();
        assert_eq!(calc.gross, dec("80.50"));
        assert_eq!(calc.advance, dec("40.25"));
    }
}
