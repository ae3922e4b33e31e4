//! Trade proposal model and the form-input boundary that builds it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::risk::{RiskConfig, SubmitError};

/// Kind of trade being journaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeKind {
    Call,
    Put,
    Swing,
}

impl TradeKind {
    /// All kinds, in form display order.
    pub const ALL: [TradeKind; 3] = [TradeKind::Call, TradeKind::Put, TradeKind::Swing];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeKind::Call => "CALL",
            TradeKind::Put => "PUT",
            TradeKind::Swing => "SWING",
        }
    }

    /// Display label matching the entry form's options.
    pub fn label(&self) -> &'static str {
        match self {
            TradeKind::Call => "Call Option",
            TradeKind::Put => "Put Option",
            TradeKind::Swing => "Swing Trade",
        }
    }

    /// Options attract STT on the sell-side premium rather than on turnover.
    pub fn is_option(&self) -> bool {
        matches!(self, TradeKind::Call | TradeKind::Put)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "call" | "call_option" | "ce" => Some(Self::Call),
            "put" | "put_option" | "pe" => Some(Self::Put),
            "swing" | "swing_trade" | "equity" => Some(Self::Swing),
            _ => None,
        }
    }
}

/// Self-reported emotional state collected before each trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PsychologyState {
    Calm,
    Fomo,
    Revenge,
    Confident,
    Tired,
    Greedy,
}

impl PsychologyState {
    /// All states, in form display order.
    pub const ALL: [PsychologyState; 6] = [
        PsychologyState::Calm,
        PsychologyState::Fomo,
        PsychologyState::Revenge,
        PsychologyState::Confident,
        PsychologyState::Tired,
        PsychologyState::Greedy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PsychologyState::Calm => "CALM",
            PsychologyState::Fomo => "FOMO",
            PsychologyState::Revenge => "REVENGE",
            PsychologyState::Confident => "CONFIDENT",
            PsychologyState::Tired => "TIRED",
            PsychologyState::Greedy => "GREEDY",
        }
    }

    /// Display label matching the entry form's options.
    pub fn label(&self) -> &'static str {
        match self {
            PsychologyState::Calm => "Calm and Focused",
            PsychologyState::Fomo => "Feeling FOMO",
            PsychologyState::Revenge => "Revenge Trading Urge",
            PsychologyState::Confident => "Confident",
            PsychologyState::Tired => "Tired",
            PsychologyState::Greedy => "Greedy",
        }
    }

    /// States in which logging a trade is disallowed.
    pub fn is_blocked(&self) -> bool {
        matches!(self, PsychologyState::Fomo | PsychologyState::Revenge)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calm" => Some(Self::Calm),
            "fomo" => Some(Self::Fomo),
            "revenge" => Some(Self::Revenge),
            "confident" => Some(Self::Confident),
            "tired" => Some(Self::Tired),
            "greedy" => Some(Self::Greedy),
            _ => None,
        }
    }
}

/// A validated trade proposal, constructed once per submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeProposal {
    /// Instrument symbol (journaling only)
    pub symbol: String,

    /// Kind of trade (drives the STT branch of the charges model)
    pub kind: TradeKind,

    /// Planned entry price, positive
    pub entry_price: Decimal,

    /// Stop-loss price
    pub stop_loss: Decimal,

    /// Target price
    pub target_price: Decimal,

    /// Account capital backing the position sizing
    pub initial_capital: Decimal,

    /// Percent of capital risked if the stop is hit, in (0, max]
    pub risk_per_trade_pct: Decimal,

    /// Self-reported emotional state
    pub psychology: PsychologyState,

    /// Free-form journaling field, no computation
    #[serde(default)]
    pub market_condition: Option<String>,

    /// Free-form journaling field, no computation
    #[serde(default)]
    pub setup_type: Option<String>,

    /// Free-form journaling field, no computation
    #[serde(default)]
    pub notes: Option<String>,
}

/// Raw, unvalidated form fields as entered by the user.
///
/// This is the only path from user text to a [`TradeProposal`]: every numeric
/// field is parsed here so that missing or non-numeric input surfaces as
/// [`SubmitError::InvalidInput`] instead of propagating through arithmetic.
#[derive(Debug, Clone, Default)]
pub struct ProposalDraft {
    pub symbol: Option<String>,
    pub kind: Option<String>,
    pub entry_price: Option<String>,
    pub stop_loss: Option<String>,
    pub target_price: Option<String>,
    pub initial_capital: Option<String>,
    pub risk_per_trade_pct: Option<String>,
    pub psychology: Option<String>,
    pub market_condition: Option<String>,
    pub setup_type: Option<String>,
    pub notes: Option<String>,
}

impl ProposalDraft {
    /// Assign a named field from a `key=value` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SubmitError> {
        let value = value.trim();
        match key.to_lowercase().as_str() {
            "symbol" => self.symbol = Some(value.to_string()),
            "kind" | "type" => self.kind = Some(value.to_string()),
            "entry" => self.entry_price = Some(value.to_string()),
            "stop" | "stoploss" | "sl" => self.stop_loss = Some(value.to_string()),
            "target" => self.target_price = Some(value.to_string()),
            "capital" => self.initial_capital = Some(value.to_string()),
            "risk" => self.risk_per_trade_pct = Some(value.to_string()),
            "psych" | "psychology" => self.psychology = Some(value.to_string()),
            "market" | "condition" => self.market_condition = Some(value.to_string()),
            "setup" | "strategy" => self.setup_type = Some(value.to_string()),
            "notes" => self.notes = Some(value.to_string()),
            other => {
                return Err(SubmitError::InvalidInput {
                    field: "field",
                    reason: format!("unknown field '{}'", other),
                });
            }
        }
        Ok(())
    }

    /// Validate and parse into a [`TradeProposal`], applying config defaults
    /// for capital and risk percent.
    pub fn build(&self, config: &RiskConfig) -> Result<TradeProposal, SubmitError> {
        let symbol = match self.symbol.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_uppercase(),
            _ => return Err(missing("symbol")),
        };

        let kind = match &self.kind {
            Some(raw) => TradeKind::parse(raw).ok_or_else(|| SubmitError::InvalidInput {
                field: "kind",
                reason: format!("unrecognized trade type '{}'", raw),
            })?,
            None => return Err(missing("kind")),
        };

        let entry_price = parse_decimal("entry", self.entry_price.as_deref())?;
        if entry_price <= Decimal::ZERO {
            return Err(SubmitError::InvalidInput {
                field: "entry",
                reason: "entry price must be positive".to_string(),
            });
        }

        let stop_loss = parse_decimal("stop", self.stop_loss.as_deref())?;
        let target_price = parse_decimal("target", self.target_price.as_deref())?;

        let initial_capital = match self.initial_capital.as_deref() {
            Some(raw) => parse_decimal("capital", Some(raw))?,
            None => config.default_capital,
        };
        if initial_capital <= Decimal::ZERO {
            return Err(SubmitError::InvalidInput {
                field: "capital",
                reason: "capital must be positive".to_string(),
            });
        }

        let risk_per_trade_pct = match self.risk_per_trade_pct.as_deref() {
            Some(raw) => parse_decimal("risk", Some(raw))?,
            None => config.default_risk_pct,
        };
        if risk_per_trade_pct <= Decimal::ZERO || risk_per_trade_pct > config.max_risk_pct {
            return Err(SubmitError::InvalidInput {
                field: "risk",
                reason: format!(
                    "risk per trade must be between 0 (exclusive) and {}%",
                    config.max_risk_pct
                ),
            });
        }

        let psychology = match self.psychology.as_deref() {
            Some(raw) => PsychologyState::parse(raw).ok_or_else(|| SubmitError::InvalidInput {
                field: "psychology",
                reason: format!("unrecognized state '{}'", raw),
            })?,
            None => {
                return Err(SubmitError::InvalidInput {
                    field: "psychology",
                    reason: "select your current state".to_string(),
                });
            }
        };

        Ok(TradeProposal {
            symbol,
            kind,
            entry_price,
            stop_loss,
            target_price,
            initial_capital,
            risk_per_trade_pct,
            psychology,
            market_condition: none_if_empty(&self.market_condition),
            setup_type: none_if_empty(&self.setup_type),
            notes: none_if_empty(&self.notes),
        })
    }
}

fn missing(field: &'static str) -> SubmitError {
    SubmitError::InvalidInput {
        field,
        reason: "required field is missing".to_string(),
    }
}

fn parse_decimal(field: &'static str, raw: Option<&str>) -> Result<Decimal, SubmitError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| missing(field))?;
    raw.parse::<Decimal>().map_err(|_| SubmitError::InvalidInput {
        field,
        reason: format!("'{}' is not a number", raw),
    })
}

fn none_if_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
