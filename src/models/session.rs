//! Session counters backing the overtrading kill switch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gate status for the current session. Locked is terminal unless a reset
/// policy rolls the session to a new day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateState {
    Active,
    Locked,
}

impl GateState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateState::Active => "ACTIVE",
            GateState::Locked => "LOCKED",
        }
    }
}

/// Per-session trade counters.
///
/// Owned by the caller and passed explicitly into each submission; there is
/// no module-level mutable state. Lifetime is one process run unless the
/// reset policy says otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Accepted trades logged so far this session
    pub trades_logged_today: u32,

    /// True once the daily trade limit has been hit
    pub daily_limit_reached: bool,

    /// Mirrors the limit state, surfaced to the UI as "Overtrading Risk"
    pub overtrading_flag: bool,

    /// One-way gate state
    pub gate: GateState,

    /// Calendar day this session's counters belong to
    pub session_day: NaiveDate,
}

impl SessionState {
    /// Fresh counters for the given day.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            trades_logged_today: 0,
            daily_limit_reached: false,
            overtrading_flag: false,
            gate: GateState::Active,
            session_day: day,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.gate == GateState::Locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let state = SessionState::new(day);

        assert_eq!(state.trades_logged_today, 0);
        assert!(!state.daily_limit_reached);
        assert!(!state.overtrading_flag);
        assert!(!state.is_locked());
        assert_eq!(state.session_day, day);
    }
}
