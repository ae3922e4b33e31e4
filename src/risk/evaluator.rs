//! The risk evaluation core: verdicts and recommended position sizes.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::TradeProposal;

use super::{RiskConfig, RrPolicy};

/// Outcome classification for a proposed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "ACCEPT")]
    Accept,
    #[serde(rename = "WARN_LOW_RR")]
    WarnLowRiskReward,
    #[serde(rename = "REJECT_ZERO_STOPLOSS")]
    RejectZeroStopLoss,
    #[serde(rename = "REJECT_PSYCHOLOGY")]
    RejectPsychology,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Accept => "ACCEPT",
            Verdict::WarnLowRiskReward => "WARN_LOW_RR",
            Verdict::RejectZeroStopLoss => "REJECT_ZERO_STOPLOSS",
            Verdict::RejectPsychology => "REJECT_PSYCHOLOGY",
        }
    }
}

/// Structured result of evaluating one proposal.
///
/// `risk_reward` and `position_size` are `None` exactly when the verdict
/// rejected the trade before any ratio was computed.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub verdict: Verdict,
    pub risk_reward: Option<Decimal>,
    pub position_size: Option<u64>,
    pub policy: RrPolicy,
}

impl RiskAssessment {
    fn accept(rr: Decimal, size: u64, policy: RrPolicy) -> Self {
        Self {
            verdict: Verdict::Accept,
            risk_reward: Some(rr),
            position_size: Some(size),
            policy,
        }
    }

    fn warn_low_rr(rr: Decimal, size: u64, policy: RrPolicy) -> Self {
        Self {
            verdict: Verdict::WarnLowRiskReward,
            risk_reward: Some(rr),
            position_size: Some(size),
            policy,
        }
    }

    fn reject(verdict: Verdict, policy: RrPolicy) -> Self {
        Self {
            verdict,
            risk_reward: None,
            position_size: None,
            policy,
        }
    }
}

/// Recommended position size such that a stop-loss hit loses no more than
/// `risk_pct` percent of `capital`.
///
/// size = floor((capital * risk_pct / 100) / |entry - stop|)
pub fn position_size(capital: Decimal, risk_pct: Decimal, entry: Decimal, stop: Decimal) -> u64 {
    let stop_distance = (entry - stop).abs();
    if stop_distance.is_zero() {
        return 0;
    }

    let risk_amount = capital * risk_pct / dec!(100);
    (risk_amount / stop_distance).floor().to_u64().unwrap_or(0)
}

/// Pure evaluator from a [`TradeProposal`] to a [`RiskAssessment`].
///
/// Session counters are not consulted here; the overtrading gate runs before
/// evaluation and owns that state.
pub struct RiskEvaluator {
    config: RiskConfig,
    policy: RrPolicy,
}

impl RiskEvaluator {
    /// Create a new evaluator with given config.
    pub fn new(config: RiskConfig) -> Self {
        let policy = RrPolicy::from_str(&config.rr_policy);
        Self { config, policy }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Evaluate a proposal. Decision order is fixed: zero stop distance,
    /// psychology, then ratio and size.
    pub fn evaluate(&self, proposal: &TradeProposal) -> RiskAssessment {
        if proposal.stop_loss.is_zero() || proposal.stop_loss == proposal.entry_price {
            debug!(
                symbol = %proposal.symbol,
                entry = %proposal.entry_price,
                stop = %proposal.stop_loss,
                "Rejecting trade with zero stop-loss distance"
            );
            return RiskAssessment::reject(Verdict::RejectZeroStopLoss, self.policy);
        }

        if self.config.enforce_psychology && proposal.psychology.is_blocked() {
            warn!(
                symbol = %proposal.symbol,
                state = proposal.psychology.as_str(),
                "Rejecting trade in disallowed psychological state"
            );
            return RiskAssessment::reject(Verdict::RejectPsychology, self.policy);
        }

        let rr = match self.policy.risk_reward(
            proposal.entry_price,
            proposal.stop_loss,
            proposal.target_price,
        ) {
            Some(rr) => rr,
            // Unreachable once the stop distance check passed, except for the
            // PercentDelta zero-entry case which the form also rejects.
            None => return RiskAssessment::reject(Verdict::RejectZeroStopLoss, self.policy),
        };

        let size = position_size(
            proposal.initial_capital,
            proposal.risk_per_trade_pct,
            proposal.entry_price,
            proposal.stop_loss,
        );

        if rr < self.config.min_risk_reward {
            debug!(
                symbol = %proposal.symbol,
                risk_reward = %rr,
                min = %self.config.min_risk_reward,
                "Risk-reward below minimum"
            );
            return RiskAssessment::warn_low_rr(rr, size, self.policy);
        }

        RiskAssessment::accept(rr, size, self.policy)
    }
}
