//! Journal entry model: an accepted trade and its lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PsychologyState, TradeKind, TradeProposal};
use crate::risk::RiskAssessment;

use super::charges::TradeCharges;

/// Lifecycle status of a journaled trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "OPEN",
            TradeStatus::Closed => "CLOSED",
        }
    }
}

/// One accepted trade in the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,

    pub logged_at: DateTime<Utc>,

    pub symbol: String,

    pub kind: TradeKind,

    pub entry_price: Decimal,

    pub stop_loss: Decimal,

    pub target_price: Decimal,

    /// Recommended size from the risk evaluation at log time
    pub position_size: u64,

    /// Risk-reward ratio at plan time
    pub risk_reward: Decimal,

    /// Percent of capital risked at the stop
    pub risk_per_trade_pct: Decimal,

    pub psychology: PsychologyState,

    #[serde(default)]
    pub market_condition: Option<String>,

    #[serde(default)]
    pub setup_type: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    pub status: TradeStatus,

    pub exit_price: Option<Decimal>,

    pub closed_at: Option<DateTime<Utc>>,

    pub charges: Option<TradeCharges>,

    /// size * (exit - entry), before charges
    pub gross_pnl: Option<Decimal>,

    /// Gross P&L minus total charges
    pub net_pnl: Option<Decimal>,

    /// Net P&L in multiples of the amount risked at the stop
    pub r_multiple: Option<Decimal>,
}

impl JournalEntry {
    /// Create an open entry from an accepted proposal and its assessment.
    ///
    /// Callers must only pass assessments whose verdict accepted the trade;
    /// a rejected assessment carries no size to journal.
    pub fn from_accepted(
        proposal: &TradeProposal,
        assessment: &RiskAssessment,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            logged_at,
            symbol: proposal.symbol.clone(),
            kind: proposal.kind,
            entry_price: proposal.entry_price,
            stop_loss: proposal.stop_loss,
            target_price: proposal.target_price,
            position_size: assessment.position_size.unwrap_or(0),
            risk_reward: assessment.risk_reward.unwrap_or(Decimal::ZERO),
            risk_per_trade_pct: proposal.risk_per_trade_pct,
            psychology: proposal.psychology,
            market_condition: proposal.market_condition.clone(),
            setup_type: proposal.setup_type.clone(),
            notes: proposal.notes.clone(),
            status: TradeStatus::Open,
            exit_price: None,
            closed_at: None,
            charges: None,
            gross_pnl: None,
            net_pnl: None,
            r_multiple: None,
        }
    }

    /// Short id for display and lookup.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    /// Close the trade at `exit_price`, realizing P&L, charges and the
    /// R multiple.
    pub fn close(&mut self, exit_price: Decimal, closed_at: DateTime<Utc>) {
        let qty = Decimal::from(self.position_size);
        let charges = TradeCharges::calculate(self.position_size, self.entry_price, exit_price, self.kind);

        let gross = qty * (exit_price - self.entry_price);
        let net = gross - charges.total;

        let risk_amount = qty * (self.entry_price - self.stop_loss).abs();
        self.r_multiple = if risk_amount.is_zero() {
            None
        } else {
            Some((net / risk_amount).round_dp(2))
        };

        self.status = TradeStatus::Closed;
        self.exit_price = Some(exit_price);
        self.closed_at = Some(closed_at);
        self.gross_pnl = Some(gross);
        self.net_pnl = Some(net);
        self.charges = Some(charges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::models::ProposalDraft;
    use crate::risk::{RiskConfig, RiskEvaluator};

    fn open_entry() -> JournalEntry {
        let mut d = ProposalDraft::default();
        d.set("symbol", "RELIANCE").unwrap();
        d.set("kind", "call").unwrap();
        d.set("entry", "100").unwrap();
        d.set("stop", "95").unwrap();
        d.set("target", "110").unwrap();
        d.set("psych", "calm").unwrap();

        let config = RiskConfig::default();
        let proposal = d.build(&config).unwrap();
        let assessment = RiskEvaluator::new(config).evaluate(&proposal);
        JournalEntry::from_accepted(&proposal, &assessment, Utc::now())
    }

    #[test]
    fn test_close_realizes_pnl() {
        let mut entry = open_entry();
        assert_eq!(entry.position_size, 200);
        assert!(entry.is_open());

        entry.close(dec!(110), Utc::now());

        assert_eq!(entry.status, TradeStatus::Closed);
        assert_eq!(entry.gross_pnl, Some(dec!(2000))); // 200 * 10
        let charges = entry.charges.as_ref().unwrap();
        assert_eq!(entry.net_pnl, Some(dec!(2000) - charges.total));
        // Risked 200 * 5 = 1000; net just under 2000 -> just under 2R
        assert_eq!(entry.r_multiple, Some(dec!(1.97)));
    }

    #[test]
    fn test_close_at_stop_is_negative_r() {
        let mut entry = open_entry();
        entry.close(dec!(95), Utc::now());

        let net = entry.net_pnl.unwrap();
        assert!(net < dec!(-1000)); // gross -1000 plus charges
        let r = entry.r_multiple.unwrap();
        assert!(r <= dec!(-1));
    }
}
