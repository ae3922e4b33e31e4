//! In-memory ledger of journaled trades.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::risk::SubmitError;

use super::entry::{JournalEntry, TradeStatus};

/// The session's trade journal. Lives for the process lifetime only;
/// persistence is deliberately out of scope.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted trade.
    pub fn log(&mut self, entry: JournalEntry) {
        info!(
            id = %entry.short_id(),
            symbol = %entry.symbol,
            kind = entry.kind.as_str(),
            size = entry.position_size,
            "Trade logged"
        );
        self.entries.push(entry);
    }

    /// Close the open entry whose id starts with `id_prefix`.
    pub fn close(
        &mut self,
        id_prefix: &str,
        exit_price: Decimal,
        closed_at: DateTime<Utc>,
    ) -> Result<&JournalEntry, SubmitError> {
        let needle = id_prefix.to_lowercase();
        let idx = self
            .entries
            .iter()
            .position(|e| e.is_open() && e.id.simple().to_string().starts_with(&needle))
            .ok_or_else(|| SubmitError::UnknownEntry {
                id: id_prefix.to_string(),
            })?;

        self.entries[idx].close(exit_price, closed_at);
        let entry = &self.entries[idx];
        info!(
            id = %entry.short_id(),
            symbol = %entry.symbol,
            net_pnl = %entry.net_pnl.unwrap_or(Decimal::ZERO),
            "Trade closed"
        );
        Ok(entry)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn open_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_open()).count()
    }

    pub fn closed(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter().filter(|e| e.status == TradeStatus::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::models::ProposalDraft;
    use crate::risk::{RiskConfig, RiskEvaluator};

    fn entry(symbol: &str) -> JournalEntry {
        let mut d = ProposalDraft::default();
        d.set("symbol", symbol).unwrap();
        d.set("kind", "swing").unwrap();
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
    fn test_close_by_id_prefix() {
        let mut journal = Journal::new();
        journal.log(entry("TCS"));

        let prefix = journal.entries()[0].short_id();
        let closed = journal.close(&prefix, dec!(108), Utc::now()).unwrap();

        assert_eq!(closed.exit_price, Some(dec!(108)));
        assert_eq!(journal.open_count(), 0);
        assert_eq!(journal.closed().count(), 1);
    }

    #[test]
    fn test_close_unknown_id_errors() {
        let mut journal = Journal::new();
        journal.log(entry("TCS"));

        let err = journal.close("zzzzzzzz", dec!(108), Utc::now()).unwrap_err();
        assert!(matches!(err, SubmitError::UnknownEntry { .. }));
    }

    #[test]
    fn test_closed_entry_cannot_close_again() {
        let mut journal = Journal::new();
        journal.log(entry("TCS"));

        let prefix = journal.entries()[0].short_id();
        journal.close(&prefix, dec!(108), Utc::now()).unwrap();

        let err = journal.close(&prefix, dec!(109), Utc::now()).unwrap_err();
        assert!(matches!(err, SubmitError::UnknownEntry { .. }));
    }
}
