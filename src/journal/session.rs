//! Session orchestration: kill switch, form validation, verdict, ledger.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::metrics::JournalStats;
use crate::models::{ProposalDraft, SessionState};
use crate::notify::Outcome;
use crate::risk::{OvertradingGate, RiskConfig, RiskEvaluator, SubmitError, Verdict};

use super::entry::JournalEntry;
use super::ledger::Journal;

/// One user's journaling session.
///
/// Owns the session counters and the ledger; the evaluator itself stays
/// pure. Each submission produces exactly one [`Outcome`].
pub struct TradingSession {
    evaluator: RiskEvaluator,
    gate: OvertradingGate,
    state: SessionState,
    journal: Journal,
}

impl TradingSession {
    pub fn new(config: RiskConfig) -> Self {
        let gate = OvertradingGate::new(config.daily_trade_limit, config.reset_policy);
        let state = SessionState::new(Utc::now().date_naive());
        Self {
            evaluator: RiskEvaluator::new(config),
            gate,
            state,
            journal: Journal::new(),
        }
    }

    pub fn config(&self) -> &RiskConfig {
        self.evaluator.config()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn gate(&self) -> &OvertradingGate {
        &self.gate
    }

    /// Handle one submission start to finish: reset policy, kill switch,
    /// form validation, risk verdict, ledger append.
    ///
    /// The kill switch runs before any risk computation; only ACCEPT
    /// verdicts reach the journal or advance the counter.
    pub fn submit(&mut self, draft: &ProposalDraft) -> Outcome {
        let now = Utc::now();
        self.gate.roll_day(&mut self.state, now.date_naive());

        if let Err(e) = self.gate.ensure_open(&self.state) {
            return Outcome::Failed {
                kind: e.kind(),
                message: e.to_string(),
            };
        }

        let proposal = match draft.build(self.evaluator.config()) {
            Ok(p) => p,
            Err(e) => {
                return Outcome::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        };

        let assessment = self.evaluator.evaluate(&proposal);
        debug!(
            symbol = %proposal.symbol,
            verdict = assessment.verdict.as_str(),
            "Proposal evaluated"
        );

        match assessment.verdict {
            Verdict::Accept => {
                let entry = JournalEntry::from_accepted(&proposal, &assessment, now);
                let entry_id = entry.id;
                self.journal.log(entry);
                self.gate.record_accept(&mut self.state);
                Outcome::Accepted {
                    assessment,
                    entry_id,
                    trades_logged: self.state.trades_logged_today,
                    daily_limit_reached: self.state.daily_limit_reached,
                }
            }
            Verdict::WarnLowRiskReward => Outcome::Warned {
                assessment,
                min_risk_reward: self.evaluator.config().min_risk_reward,
            },
            _ => Outcome::Rejected { assessment },
        }
    }

    /// Close an open journal entry at the given raw exit price.
    pub fn close_entry(
        &mut self,
        id_prefix: &str,
        exit_raw: &str,
    ) -> Result<&JournalEntry, SubmitError> {
        let exit_raw = exit_raw.trim();
        let exit_price = exit_raw
            .parse::<Decimal>()
            .map_err(|_| SubmitError::InvalidInput {
                field: "exit",
                reason: format!("'{}' is not a number", exit_raw),
            })?;
        self.journal.close(id_prefix, exit_price, Utc::now())
    }

    /// Aggregate dashboard statistics over the journal.
    pub fn stats(&self) -> JournalStats {
        JournalStats::calculate(self.journal.entries())
    }
}
