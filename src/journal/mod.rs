//! Journal ledger: accepted trades, statutory charges, session orchestration.

mod charges;
mod entry;
mod ledger;
mod session;

pub use charges::TradeCharges;
pub use entry::{JournalEntry, TradeStatus};
pub use ledger::Journal;
pub use session::TradingSession;
