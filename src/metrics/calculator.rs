//! Calculator for journal dashboard statistics.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use statrs::statistics::Statistics;

use crate::journal::JournalEntry;

/// Point on the cumulative equity curve, one per closed trade.
#[derive(Debug, Clone, Serialize)]
pub struct EquityPoint {
    pub closed_at: DateTime<Utc>,
    pub net_pnl: Decimal,
    pub cumulative_net_pnl: Decimal,
}

/// R-multiple histogram bucket, clamped to [-3R, 3R].
#[derive(Debug, Clone, Serialize)]
pub struct RBucket {
    pub r: i32,
    pub count: u32,
}

/// Aggregate statistics over the journal.
///
/// Everything except the open/total counts is computed from closed trades
/// only; an empty journal yields all zeros.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JournalStats {
    pub total_trades: u32,
    pub open_trades: u32,
    pub closed_trades: u32,

    pub winning_trades: u32,
    pub losing_trades: u32,
    /// Fraction of closed trades with positive net P&L (0.0 to 1.0)
    pub win_rate: f64,

    pub gross_profit: Decimal,
    pub gross_loss: Decimal,
    /// Gross profit / gross loss
    pub profit_factor: f64,

    pub total_net_pnl: Decimal,
    pub best_trade: Decimal,
    pub worst_trade: Decimal,
    pub avg_trade: Decimal,
    pub avg_r_multiple: Decimal,

    /// Annualized over per-trade net P&L, 252 trading days
    pub sharpe_ratio: f64,

    /// Maximum peak-to-trough drawdown of the equity curve (0.0 to 1.0)
    pub max_drawdown_pct: f64,

    pub total_turnover: Decimal,
    pub total_charges: Decimal,
    /// Charges as a percent of turnover
    pub cost_pct: Decimal,

    pub equity_curve: Vec<EquityPoint>,
    pub r_distribution: Vec<RBucket>,
}

impl JournalStats {
    /// Compute dashboard statistics from the journal's entries.
    pub fn calculate(entries: &[JournalEntry]) -> Self {
        let mut stats = Self::default();
        stats.total_trades = entries.len() as u32;

        let mut closed: Vec<&JournalEntry> = entries.iter().filter(|e| !e.is_open()).collect();
        closed.sort_by_key(|e| e.closed_at);

        stats.closed_trades = closed.len() as u32;
        stats.open_trades = stats.total_trades - stats.closed_trades;

        if closed.is_empty() {
            return stats;
        }

        let pnls: Vec<Decimal> = closed.iter().filter_map(|e| e.net_pnl).collect();

        Self::calculate_pnl_stats(&mut stats, &pnls);
        Self::calculate_sharpe(&mut stats, &pnls);
        Self::calculate_drawdown(&mut stats, &pnls);
        Self::calculate_costs(&mut stats, &closed);

        let rs: Vec<Decimal> = closed.iter().filter_map(|e| e.r_multiple).collect();
        if !rs.is_empty() {
            stats.avg_r_multiple =
                (rs.iter().copied().sum::<Decimal>() / Decimal::from(rs.len() as u32)).round_dp(2);
        }

        // Equity curve in close order
        let mut equity = Decimal::ZERO;
        for entry in &closed {
            let pnl = entry.net_pnl.unwrap_or(Decimal::ZERO);
            equity += pnl;
            stats.equity_curve.push(EquityPoint {
                closed_at: entry.closed_at.unwrap_or_else(Utc::now),
                net_pnl: pnl,
                cumulative_net_pnl: equity,
            });
        }

        stats.r_distribution = Self::r_distribution(&closed);

        stats
    }

    fn calculate_pnl_stats(stats: &mut Self, pnls: &[Decimal]) {
        let (wins, losses): (Vec<_>, Vec<_>) = pnls.iter().partition(|&&p| p > Decimal::ZERO);

        stats.winning_trades = wins.len() as u32;
        stats.losing_trades = losses.len() as u32;
        stats.total_net_pnl = pnls.iter().copied().sum();

        if !pnls.is_empty() {
            stats.win_rate = wins.len() as f64 / pnls.len() as f64;
            stats.avg_trade = stats.total_net_pnl / Decimal::from(pnls.len() as u32);
            stats.best_trade = pnls.iter().copied().max().unwrap_or(Decimal::ZERO);
            stats.worst_trade = pnls.iter().copied().min().unwrap_or(Decimal::ZERO);
        }

        stats.gross_profit = wins.iter().copied().sum();
        stats.gross_loss = losses.iter().copied().map(|l: Decimal| l.abs()).sum();

        if stats.gross_loss > Decimal::ZERO {
            stats.profit_factor = stats.gross_profit.to_f64().unwrap_or(0.0)
                / stats.gross_loss.to_f64().unwrap_or(1.0);
        } else if stats.gross_profit > Decimal::ZERO {
            stats.profit_factor = f64::INFINITY;
        }
    }

    fn calculate_sharpe(stats: &mut Self, pnls: &[Decimal]) {
        if pnls.len() < 2 {
            return;
        }

        let returns: Vec<f64> = pnls.iter().filter_map(|p| p.to_f64()).collect();
        if returns.is_empty() {
            return;
        }

        let mean = returns.clone().mean();
        let std_dev = returns.clone().std_dev();

        // Annualized assuming one trade per trading day
        if std_dev > 0.0 {
            stats.sharpe_ratio = (mean / std_dev) * (252.0_f64).sqrt();
        }
    }

    /// Maximum drawdown from the cumulative equity walk.
    fn calculate_drawdown(stats: &mut Self, pnls: &[Decimal]) {
        let mut equity = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_dd_pct = 0.0f64;

        for pnl in pnls {
            equity += pnl;

            if equity > peak {
                peak = equity;
            }

            if peak > Decimal::ZERO {
                let dd = peak - equity;
                let dd_pct = dd.to_f64().unwrap_or(0.0) / peak.to_f64().unwrap_or(1.0);
                if dd_pct > max_dd_pct {
                    max_dd_pct = dd_pct;
                }
            }
        }

        stats.max_drawdown_pct = max_dd_pct;
    }

    fn calculate_costs(stats: &mut Self, closed: &[&JournalEntry]) {
        for entry in closed {
            if let Some(exit) = entry.exit_price {
                let qty = Decimal::from(entry.position_size);
                stats.total_turnover += qty * (entry.entry_price + exit);
            }
            if let Some(charges) = &entry.charges {
                stats.total_charges += charges.total;
            }
        }

        if stats.total_turnover > Decimal::ZERO {
            stats.cost_pct = (stats.total_charges / stats.total_turnover * dec!(100)).round_dp(4);
        }
    }

    fn r_distribution(closed: &[&JournalEntry]) -> Vec<RBucket> {
        let mut counts = [0u32; 7]; // buckets -3R..=3R

        for entry in closed {
            let Some(r) = entry.r_multiple else { continue };
            let bucket = r.round().to_i32().unwrap_or(0).clamp(-3, 3);
            counts[(bucket + 3) as usize] += 1;
        }

        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| RBucket {
                r: i as i32 - 3,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::ProposalDraft;
    use crate::risk::{RiskConfig, RiskEvaluator};

    fn open_entry(entry: &str, stop: &str, target: &str) -> JournalEntry {
        let mut d = ProposalDraft::default();
        d.set("symbol", "NIFTY").unwrap();
        d.set("kind", "swing").unwrap();
        d.set("entry", entry).unwrap();
        d.set("stop", stop).unwrap();
        d.set("target", target).unwrap();
        d.set("psych", "calm").unwrap();

        let config = RiskConfig::default();
        let proposal = d.build(&config).unwrap();
        let assessment = RiskEvaluator::new(config).evaluate(&proposal);
        JournalEntry::from_accepted(&proposal, &assessment, Utc::now())
    }

    fn closed_entry(entry: &str, stop: &str, target: &str, exit: &str) -> JournalEntry {
        let mut e = open_entry(entry, stop, target);
        e.close(exit.parse().unwrap(), Utc::now());
        e
    }

    #[test]
    fn test_empty_journal_is_all_zero() {
        let stats = JournalStats::calculate(&[]);

        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.total_net_pnl, Decimal::ZERO);
        assert!(stats.equity_curve.is_empty());
    }

    #[test]
    fn test_win_loss_aggregates() {
        let entries = vec![
            closed_entry("100", "95", "110", "110"), // winner
            closed_entry("100", "95", "110", "95"),  // loser
            closed_entry("100", "95", "110", "108"), // winner
        ];

        let stats = JournalStats::calculate(&entries);

        assert_eq!(stats.closed_trades, 3);
        assert_eq!(stats.winning_trades, 2);
        assert_eq!(stats.losing_trades, 1);
        assert!((stats.win_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!(stats.profit_factor > 1.0);
        assert!(stats.total_net_pnl > Decimal::ZERO);
        assert!(stats.best_trade > stats.worst_trade);
        assert!(stats.max_drawdown_pct > 0.0);
        assert!(stats.sharpe_ratio != 0.0);
        assert_eq!(stats.equity_curve.len(), 3);
        assert_eq!(
            stats.equity_curve.last().unwrap().cumulative_net_pnl,
            stats.total_net_pnl
        );
    }

    #[test]
    fn test_open_trades_are_excluded_from_pnl() {
        let entries = vec![
            open_entry("100", "95", "110"),
            closed_entry("100", "95", "110", "110"),
        ];
        let stats = JournalStats::calculate(&entries);

        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.open_trades, 1);
        assert_eq!(stats.closed_trades, 1);
        assert_eq!(stats.winning_trades, 1);
    }

    #[test]
    fn test_r_distribution_buckets() {
        let entries = vec![
            closed_entry("100", "95", "110", "110"), // net ~ +1.98R -> 2R
            closed_entry("100", "95", "110", "95"),  // net ~ -1.02R -> -1R
        ];

        let stats = JournalStats::calculate(&entries);
        assert_eq!(stats.avg_r_multiple, dec!(0.48)); // (1.98 - 1.02) / 2

        let total: u32 = stats.r_distribution.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
        assert_eq!(stats.r_distribution.len(), 7);
        assert_eq!(stats.r_distribution[0].r, -3);
        assert_eq!(stats.r_distribution[6].r, 3);

        let two_r = stats.r_distribution.iter().find(|b| b.r == 2).unwrap();
        assert_eq!(two_r.count, 1);
        let neg_one_r = stats.r_distribution.iter().find(|b| b.r == -1).unwrap();
        assert_eq!(neg_one_r.count, 1);
    }

    #[test]
    fn test_costs_accumulate() {
        let entries = vec![closed_entry("100", "95", "110", "110")];
        let stats = JournalStats::calculate(&entries);

        // 200 units at entry 100, exit 110: turnover 42000
        assert_eq!(stats.total_turnover, Decimal::from(42000u32));
        assert!(stats.total_charges > Decimal::ZERO);
        assert!(stats.cost_pct > Decimal::ZERO);
    }
}
