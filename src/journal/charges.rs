//! Statutory and broker charges for closed trades (Indian market schedule).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::TradeKind;

/// Per-trade cost breakdown, each component rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeCharges {
    /// 0.03% of turnover, capped at 40 for both legs combined
    pub brokerage: Decimal,

    /// Securities Transaction Tax: 0.05% on the sell-side premium for
    /// options, 0.01% of turnover otherwise
    pub stt: Decimal,

    /// Exchange transaction charges, 0.00325% of turnover
    pub transaction_charges: Decimal,

    /// 18% GST on brokerage plus transaction charges
    pub gst: Decimal,

    /// Stamp duty, 0.003% on the buy side
    pub stamp_duty: Decimal,

    pub total: Decimal,
}

impl TradeCharges {
    /// Calculate charges for a round trip of `size` units bought at `entry`
    /// and sold at `exit`.
    pub fn calculate(size: u64, entry: Decimal, exit: Decimal, kind: TradeKind) -> Self {
        let qty = Decimal::from(size);
        let turnover = qty * (entry + exit);

        let brokerage = (turnover * dec!(0.0003)).min(dec!(40));

        let stt = if kind.is_option() {
            qty * exit * dec!(0.0005)
        } else {
            turnover * dec!(0.0001)
        };

        let transaction_charges = turnover * dec!(0.0000325);
        let gst = (brokerage + transaction_charges) * dec!(0.18);
        let stamp_duty = qty * entry * dec!(0.00003);

        let total = brokerage + stt + transaction_charges + gst + stamp_duty;

        Self {
            brokerage: brokerage.round_dp(2),
            stt: stt.round_dp(2),
            transaction_charges: transaction_charges.round_dp(2),
            gst: gst.round_dp(2),
            stamp_duty: stamp_duty.round_dp(2),
            total: total.round_dp(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_trade_charges() {
        // 200 units, entry 100, exit 110: turnover = 200 * 210 = 42000
        let charges = TradeCharges::calculate(200, dec!(100), dec!(110), TradeKind::Call);

        // brokerage = min(42000 * 0.0003, 40) = min(12.6, 40) = 12.6
        assert_eq!(charges.brokerage, dec!(12.60));
        // stt (option) = 200 * 110 * 0.0005 = 11
        assert_eq!(charges.stt, dec!(11.00));
        // txn = 42000 * 0.0000325 = 1.365, banker's rounding -> 1.36
        assert_eq!(charges.transaction_charges, dec!(1.36));
        // gst = (12.6 + 1.365) * 0.18 = 2.5137 -> 2.51
        assert_eq!(charges.gst, dec!(2.51));
        // stamp = 200 * 100 * 0.00003 = 0.6
        assert_eq!(charges.stamp_duty, dec!(0.60));
        // total from unrounded parts = 28.0787 -> 28.08
        assert_eq!(charges.total, dec!(28.08));
    }

    #[test]
    fn test_equity_stt_uses_turnover() {
        let charges = TradeCharges::calculate(200, dec!(100), dec!(110), TradeKind::Swing);

        // stt (equity) = 42000 * 0.0001 = 4.2
        assert_eq!(charges.stt, dec!(4.20));
    }

    #[test]
    fn test_brokerage_is_capped() {
        // Large turnover: 1000 * (500 + 520) = 1020000, 0.03% = 306 -> capped
        let charges = TradeCharges::calculate(1000, dec!(500), dec!(520), TradeKind::Swing);
        assert_eq!(charges.brokerage, dec!(40.00));
    }

    #[test]
    fn test_zero_size_is_all_zero() {
        let charges = TradeCharges::calculate(0, dec!(100), dec!(110), TradeKind::Call);
        assert_eq!(charges.total, dec!(0.00));
    }
}
