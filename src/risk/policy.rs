//! Risk-reward calculation policies.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Named risk-reward formula.
///
/// The journal's sources disagree on how the ratio is computed, so both
/// variants are exposed rather than silently picking one. They agree
/// algebraically whenever the entry price is nonzero; `PercentDelta`
/// additionally divides by the entry price in its intermediate terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RrPolicy {
    /// ratio = (target - entry) / (entry - stop)
    PriceDelta,
    /// ratio = reward% / risk%, each expressed relative to entry
    PercentDelta,
}

impl RrPolicy {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "percent" | "percent_delta" | "percentdelta" => Self::PercentDelta,
            _ => Self::PriceDelta,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RrPolicy::PriceDelta => "price_delta",
            RrPolicy::PercentDelta => "percent_delta",
        }
    }

    /// Compute the risk-reward ratio, or `None` when this policy's
    /// denominator is zero.
    pub fn risk_reward(&self, entry: Decimal, stop: Decimal, target: Decimal) -> Option<Decimal> {
        match self {
            RrPolicy::PriceDelta => {
                let risk = entry - stop;
                if risk.is_zero() {
                    return None;
                }
                Some((target - entry) / risk)
            }
            RrPolicy::PercentDelta => {
                if entry.is_zero() {
                    return None;
                }
                let risk_pct = (entry - stop) / entry * dec!(100);
                if risk_pct.is_zero() {
                    return None;
                }
                let reward_pct = (target - entry) / entry * dec!(100);
                Some(reward_pct / risk_pct)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_delta_formula() {
        let rr = RrPolicy::PriceDelta
            .risk_reward(dec!(100), dec!(95), dec!(110))
            .unwrap();
        assert_eq!(rr, dec!(2));
    }

    #[test]
    fn test_policies_agree_for_nonzero_entry() {
        let cases = [
            (dec!(100), dec!(95), dec!(110)),
            (dec!(250), dec!(240), dec!(280)),
            (dec!(50), dec!(55), dec!(40)), // short-style setup
        ];

        for (entry, stop, target) in cases {
            let a = RrPolicy::PriceDelta.risk_reward(entry, stop, target).unwrap();
            let b = RrPolicy::PercentDelta.risk_reward(entry, stop, target).unwrap();
            assert!((a - b).abs() < dec!(0.0000001), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_zero_denominator_is_none() {
        assert!(RrPolicy::PriceDelta.risk_reward(dec!(100), dec!(100), dec!(110)).is_none());
        assert!(RrPolicy::PercentDelta.risk_reward(dec!(100), dec!(100), dec!(110)).is_none());
    }

    #[test]
    fn test_from_str_lenient() {
        assert_eq!(RrPolicy::from_str("percent"), RrPolicy::PercentDelta);
        assert_eq!(RrPolicy::from_str("PERCENT_DELTA"), RrPolicy::PercentDelta);
        assert_eq!(RrPolicy::from_str("anything-else"), RrPolicy::PriceDelta);
    }
}
