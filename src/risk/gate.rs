//! The overtrading kill switch.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::models::{GateState, SessionState};

use super::{ResetPolicy, SubmitError};

/// One-way ACTIVE to LOCKED gate over the session counters.
///
/// Runs before any risk evaluation: while locked, every submission fails
/// with `SessionLocked` regardless of the proposal's merits. Only accepted
/// trades advance the counter.
pub struct OvertradingGate {
    limit: u32,
    reset: ResetPolicy,
}

impl OvertradingGate {
    pub fn new(limit: u32, reset: ResetPolicy) -> Self {
        Self { limit, reset }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply the reset policy for a submission arriving on `today`.
    pub fn roll_day(&self, state: &mut SessionState, today: NaiveDate) {
        if self.reset == ResetPolicy::Daily && today != state.session_day {
            if state.is_locked() {
                info!(
                    previous_day = %state.session_day,
                    day = %today,
                    "New calendar day, unlocking the overtrading gate"
                );
            }
            *state = SessionState::new(today);
        }
    }

    /// Fail fast when the session is locked, before any risk computation.
    pub fn ensure_open(&self, state: &SessionState) -> Result<(), SubmitError> {
        if state.is_locked() {
            return Err(SubmitError::SessionLocked {
                trades_logged: state.trades_logged_today,
            });
        }
        Ok(())
    }

    /// Count an accepted submission, locking once the limit is reached.
    pub fn record_accept(&self, state: &mut SessionState) {
        state.trades_logged_today += 1;

        if state.trades_logged_today >= self.limit && !state.is_locked() {
            state.gate = GateState::Locked;
            state.daily_limit_reached = true;
            state.overtrading_flag = true;
            warn!(
                trades_logged = state.trades_logged_today,
                limit = self.limit,
                "Daily trade limit reached, locking the session"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_locks_at_limit() {
        let gate = OvertradingGate::new(5, ResetPolicy::Never);
        let mut state = SessionState::new(day(1));

        for expected in 1..=4 {
            gate.record_accept(&mut state);
            assert_eq!(state.trades_logged_today, expected);
            assert!(!state.is_locked());
            assert!(gate.ensure_open(&state).is_ok());
        }

        // The fifth accept trips the switch
        gate.record_accept(&mut state);
        assert_eq!(state.trades_logged_today, 5);
        assert!(state.is_locked());
        assert!(state.daily_limit_reached);
        assert!(state.overtrading_flag);

        let err = gate.ensure_open(&state).unwrap_err();
        assert_eq!(err, SubmitError::SessionLocked { trades_logged: 5 });
    }

    #[test]
    fn test_never_policy_stays_locked_across_days() {
        let gate = OvertradingGate::new(1, ResetPolicy::Never);
        let mut state = SessionState::new(day(1));

        gate.record_accept(&mut state);
        assert!(state.is_locked());

        gate.roll_day(&mut state, day(2));
        assert!(state.is_locked());
        assert_eq!(state.session_day, day(1));
    }

    #[test]
    fn test_daily_policy_resets_on_new_day() {
        let gate = OvertradingGate::new(1, ResetPolicy::Daily);
        let mut state = SessionState::new(day(1));

        gate.record_accept(&mut state);
        assert!(state.is_locked());

        // Same day: still locked
        gate.roll_day(&mut state, day(1));
        assert!(state.is_locked());

        // Next day: counters cleared, gate open
        gate.roll_day(&mut state, day(2));
        assert!(!state.is_locked());
        assert_eq!(state.trades_logged_today, 0);
        assert!(!state.daily_limit_reached);
        assert_eq!(state.session_day, day(2));
    }
}
