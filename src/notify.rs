//! Notification sink boundary: the core emits tagged outcomes, sinks render.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::risk::{RiskAssessment, Verdict};

/// Tagged result of one submission, emitted exactly once per attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The trade was accepted and journaled.
    Accepted {
        assessment: RiskAssessment,
        entry_id: Uuid,
        trades_logged: u32,
        daily_limit_reached: bool,
    },
    /// Blocking warning: the ratio fell below the minimum, nothing logged.
    Warned {
        assessment: RiskAssessment,
        min_risk_reward: Decimal,
    },
    /// The evaluator rejected the trade outright.
    Rejected { assessment: RiskAssessment },
    /// The submission failed before a verdict (bad input, locked session).
    Failed { kind: &'static str, message: String },
}

/// Receives submission outcomes for user display.
pub trait NotificationSink {
    fn notify(&self, outcome: &Outcome);
}

/// Human-readable console rendering.
pub struct ConsoleSink {
    dry_run: bool,
}

impl ConsoleSink {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Accepted {
                assessment,
                entry_id,
                trades_logged,
                daily_limit_reached,
            } => {
                if self.dry_run {
                    println!("Trade accepted (dry run, not logged).");
                } else {
                    println!("Trade logged successfully!");
                }
                if let (Some(size), Some(rr)) = (assessment.position_size, assessment.risk_reward) {
                    println!("  Position size: {} units | Risk-reward: {:.2}", size, rr);
                }
                if !self.dry_run {
                    let short: String = entry_id.simple().to_string()[..8].to_string();
                    println!("  Entry id: {} | Trades today: {}", short, trades_logged);
                }
                if *daily_limit_reached {
                    println!("Warning: You might be overtrading today!");
                }
            }

            Outcome::Warned {
                assessment,
                min_risk_reward,
            } => {
                let rr = assessment.risk_reward.unwrap_or(Decimal::ZERO);
                println!(
                    "Risk-reward ratio {:.2} is below the {} minimum. Trade not logged.",
                    rr, min_risk_reward
                );
            }

            Outcome::Rejected { assessment } => match assessment.verdict {
                Verdict::RejectZeroStopLoss => {
                    println!("Stop-loss must be nonzero and differ from the entry price. Trade not logged.");
                }
                Verdict::RejectPsychology => {
                    println!("Trading not recommended in current psychological state!");
                }
                _ => println!("Trade rejected."),
            },

            Outcome::Failed { message, .. } => {
                println!("Error: {}", message);
            }
        }
    }
}

/// Machine-readable rendering: one JSON object per line.
pub struct JsonSink;

impl NotificationSink for JsonSink {
    fn notify(&self, outcome: &Outcome) {
        match serde_json::to_string(outcome) {
            Ok(line) => println!("{}", line),
            Err(e) => eprintln!("{{\"outcome\":\"error\",\"message\":\"{}\"}}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::risk::{RiskConfig, RiskEvaluator};
    use crate::models::ProposalDraft;

    #[test]
    fn test_outcome_serializes_with_tag() {
        let mut d = ProposalDraft::default();
        d.set("symbol", "INFY").unwrap();
        d.set("kind", "put").unwrap();
        d.set("entry", "100").unwrap();
        d.set("stop", "95").unwrap();
        d.set("target", "110").unwrap();
        d.set("psych", "calm").unwrap();

        let config = RiskConfig::default();
        let proposal = d.build(&config).unwrap();
        let assessment = RiskEvaluator::new(config).evaluate(&proposal);

        let outcome = Outcome::Warned {
            assessment,
            min_risk_reward: dec!(1.5),
        };
        let json = serde_json::to_string(&outcome).unwrap();

        assert!(json.contains("\"outcome\":\"warned\""));
        assert!(json.contains("\"verdict\":\"ACCEPT\""));
    }

    #[test]
    fn test_failed_outcome_carries_kind() {
        let outcome = Outcome::Failed {
            kind: "session_locked",
            message: "locked".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("session_locked"));
    }
}
