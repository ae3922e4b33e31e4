//! Risk evaluation configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// When the overtrading kill switch resets.
///
/// The source behavior never resets within a session; `Daily` unlocks and
/// zeroes the counters when a submission arrives on a new calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetPolicy {
    Never,
    Daily,
}

impl ResetPolicy {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Self::Daily,
            _ => Self::Never,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResetPolicy::Never => "never",
            ResetPolicy::Daily => "daily",
        }
    }
}

/// Configuration for risk evaluation and the overtrading gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Account capital assumed when the form leaves it blank
    pub default_capital: Decimal,

    /// Risk percent assumed when the form leaves it blank
    pub default_risk_pct: Decimal,

    /// Upper bound for risk per trade, exclusive lower bound is zero
    pub max_risk_pct: Decimal,

    /// Minimum risk-reward ratio; below this a trade is warned and not logged
    pub min_risk_reward: Decimal,

    /// Accepted trades per session before the kill switch fires
    pub daily_trade_limit: u32,

    /// Block REVENGE and FOMO states before computing risk. The source only
    /// enforces this in the variants that collect psychology up front, so it
    /// is a switch rather than a hard rule.
    pub enforce_psychology: bool,

    /// Which risk-reward formula to use (price_delta, percent_delta)
    pub rr_policy: String,

    /// Kill switch reset behavior
    pub reset_policy: ResetPolicy,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            default_capital: dec!(100000),
            default_risk_pct: dec!(1),
            max_risk_pct: dec!(5),
            min_risk_reward: dec!(1.5),
            daily_trade_limit: 5,
            enforce_psychology: true,
            rr_policy: "price_delta".to_string(),
            reset_policy: ResetPolicy::Never,
        }
    }
}
