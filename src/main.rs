//! Options/Equity Trading Journal
//!
//! Logs trades through a position-sizing and psychology gate, keeps the
//! session journal, and renders aggregate statistics.

mod journal;
mod metrics;
mod models;
mod notify;
mod risk;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::journal::{Journal, TradingSession};
use crate::metrics::JournalStats;
use crate::models::{ProposalDraft, PsychologyState, TradeKind};
use crate::notify::{ConsoleSink, JsonSink, NotificationSink};
use crate::risk::{ResetPolicy, RiskConfig, RrPolicy};

/// Trading journal CLI.
#[derive(Parser)]
#[command(name = "tradelog")]
#[command(about = "Log trades with risk checks, psychology gating and an overtrading kill switch", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Emit submission outcomes as JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Risk-reward formula (price_delta, percent_delta)
    #[arg(long, default_value = "price_delta")]
    policy: String,

    /// Kill switch reset behavior (never, daily)
    #[arg(long, default_value = "never")]
    reset: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a proposed trade without journaling it
    Check {
        /// Instrument symbol
        #[arg(long, default_value = "UNNAMED")]
        symbol: String,

        /// Trade type (call, put, swing)
        #[arg(long, default_value = "swing")]
        kind: String,

        /// Entry price
        #[arg(long)]
        entry: String,

        /// Stop-loss price
        #[arg(long)]
        stop: String,

        /// Target price
        #[arg(long)]
        target: String,

        /// Account capital backing the position sizing
        #[arg(long)]
        capital: Option<String>,

        /// Risk per trade percent
        #[arg(long)]
        risk: Option<String>,

        /// Psychology state (calm, fomo, revenge, confident, tired, greedy)
        #[arg(long, default_value = "calm")]
        psychology: String,
    },

    /// Start an interactive journaling session
    Session {
        /// Account capital for the session
        #[arg(short, long)]
        capital: Option<f64>,

        /// Risk per trade percent for the session
        #[arg(short, long)]
        risk: Option<f64>,
    },

    /// Show the active risk configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Check {
            ref symbol,
            ref kind,
            ref entry,
            ref stop,
            ref target,
            ref capital,
            ref risk,
            ref psychology,
        } => {
            let config = build_config(&cli, None, None)?;

            let mut draft = ProposalDraft::default();
            draft.symbol = Some(symbol.clone());
            draft.kind = Some(kind.clone());
            draft.entry_price = Some(entry.clone());
            draft.stop_loss = Some(stop.clone());
            draft.target_price = Some(target.clone());
            draft.initial_capital = capital.clone();
            draft.risk_per_trade_pct = risk.clone();
            draft.psychology = Some(psychology.clone());

            // A throwaway session: same pipeline, nothing kept
            let mut session = TradingSession::new(config);
            let outcome = session.submit(&draft);

            let sink = make_sink(cli.json, true);
            sink.notify(&outcome);
        }

        Commands::Session { capital, risk } => {
            let config = build_config(&cli, capital, risk)?;

            info!(
                capital = %config.default_capital,
                risk_pct = %config.default_risk_pct,
                policy = %config.rr_policy,
                "Starting journaling session"
            );

            let session = TradingSession::new(config);
            let sink = make_sink(cli.json, false);
            run_session(session, sink.as_ref())?;
        }

        Commands::Config => {
            let config = build_config(&cli, None, None)?;
            let policy = RrPolicy::from_str(&config.rr_policy);

            println!("\n=== Risk Configuration ===\n");
            println!("Position Sizing:");
            println!("  Default Capital:      {}", config.default_capital);
            println!("  Default Risk/Trade:   {}%", config.default_risk_pct);
            println!("  Max Risk/Trade:       {}%", config.max_risk_pct);

            println!("\nTrade Acceptance:");
            println!("  Min Risk-Reward:      {}", config.min_risk_reward);
            println!("  Risk-Reward Formula:  {}", policy.as_str());
            println!("  Psychology Gate:      {}", if config.enforce_psychology { "on" } else { "off" });

            println!("\nOvertrading Kill Switch:");
            println!("  Daily Trade Limit:    {}", config.daily_trade_limit);
            println!("  Reset Policy:         {}", config.reset_policy.as_str());
        }
    }

    Ok(())
}

/// Apply CLI overrides on top of the default risk configuration.
fn build_config(cli: &Cli, capital: Option<f64>, risk: Option<f64>) -> Result<RiskConfig> {
    let mut config = RiskConfig {
        rr_policy: cli.policy.clone(),
        reset_policy: ResetPolicy::from_str(&cli.reset),
        ..Default::default()
    };

    if let Some(capital) = capital {
        config.default_capital = Decimal::try_from(capital)?;
    }
    if let Some(risk) = risk {
        config.default_risk_pct = Decimal::try_from(risk)?;
    }

    Ok(config)
}

fn make_sink(json: bool, dry_run: bool) -> Box<dyn NotificationSink> {
    if json {
        Box::new(JsonSink)
    } else {
        Box::new(ConsoleSink::new(dry_run))
    }
}

/// Interactive journaling loop. Counters live for the life of this loop,
/// the journal's "single page view".
fn run_session(mut session: TradingSession, sink: &dyn NotificationSink) -> Result<()> {
    let config = session.config();
    println!("\n=== Trading Journal Session ===");
    println!("Capital: {}", config.default_capital);
    println!("Risk per trade: {}%", config.default_risk_pct);
    println!("Daily trade limit: {}", config.daily_trade_limit);
    println!("\nType 'help' for commands, 'quit' to end the session.\n");

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("trade> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default().to_lowercase();

        match command.as_str() {
            "log" => {
                let mut draft = ProposalDraft::default();
                let mut parse_failed = false;

                for token in tokens {
                    let Some((key, value)) = token.split_once('=') else {
                        println!("Expected key=value, got '{}'", token);
                        parse_failed = true;
                        break;
                    };
                    if let Err(e) = draft.set(key, value) {
                        println!("Error: {}", e);
                        parse_failed = true;
                        break;
                    }
                }
                if parse_failed {
                    continue;
                }

                let outcome = session.submit(&draft);
                sink.notify(&outcome);
            }

            "close" => {
                let (Some(id), Some(exit)) = (tokens.next(), tokens.next()) else {
                    println!("Usage: close <id> <exit-price>");
                    continue;
                };

                match session.close_entry(id, exit) {
                    Ok(entry) => {
                        let net = entry.net_pnl.unwrap_or(Decimal::ZERO);
                        let sign = if net >= Decimal::ZERO { "+" } else { "" };
                        println!(
                            "Closed {} {} @ {} -> {} ({}{:.2} net, {}R)",
                            entry.short_id(),
                            entry.symbol,
                            entry.entry_price,
                            entry.exit_price.unwrap_or(Decimal::ZERO),
                            sign,
                            net,
                            entry.r_multiple.unwrap_or(Decimal::ZERO),
                        );
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }

            "journal" => print_journal(session.journal()),

            "stats" => print_stats(&session.stats()),

            "limits" => {
                let state = session.state();
                println!("\n=== Overtrading Gate ===");
                println!("State:            {}", state.gate.as_str());
                println!(
                    "Trades Today:     {} / {}",
                    state.trades_logged_today,
                    session.gate().limit()
                );
                println!("Limit Reached:    {}", if state.daily_limit_reached { "Yes" } else { "No" });
                println!("Overtrading Risk: {}", if state.overtrading_flag { "Yes" } else { "No" });
            }

            "help" => print_help(),

            "quit" | "exit" => break,

            other => println!("Unknown command '{}'. Type 'help' for commands.", other),
        }
    }

    // Session recap before the journal is gone
    if !session.journal().is_empty() {
        print_stats(&session.stats());
    }

    Ok(())
}

fn print_help() {
    println!("\nCommands:");
    println!("  log key=value ...    Log a trade through the risk checks");
    println!("                       fields: symbol, kind, entry, stop, target,");
    println!("                       capital, risk, psych, market, setup, notes");
    println!("  close <id> <exit>    Close an open trade at an exit price");
    println!("  journal              List journaled trades");
    println!("  stats                Show the session dashboard");
    println!("  limits               Show the overtrading gate state");
    println!("  quit                 End the session");

    println!("\nTrade types:");
    for kind in TradeKind::ALL {
        println!("  {:<10} {}", kind.as_str().to_lowercase(), kind.label());
    }

    println!("\nPsychology states:");
    for state in PsychologyState::ALL {
        println!("  {:<10} {}", state.as_str().to_lowercase(), state.label());
    }

    println!("\nExample:");
    println!("  log symbol=RELIANCE kind=call entry=100 stop=95 target=110 psych=calm");
}

fn print_journal(journal: &Journal) {
    if journal.is_empty() {
        println!("No trades recorded yet. Start by logging your first trade!");
        return;
    }

    println!(
        "\n{:<10} {:<17} {:<10} {:<6} {:>8} {:>9} {:>9} {:>6} {:<7} {:>12}",
        "ID", "LOGGED", "SYMBOL", "KIND", "SIZE", "ENTRY", "STOP", "RR", "STATUS", "NET P&L"
    );
    println!("{}", "-".repeat(104));

    for entry in journal.entries() {
        let net = entry
            .net_pnl
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<10} {:<17} {:<10} {:<6} {:>8} {:>9} {:>9} {:>6.2} {:<7} {:>12}",
            entry.short_id(),
            entry.logged_at.format("%Y-%m-%d %H:%M"),
            truncate(&entry.symbol, 10),
            entry.kind.as_str(),
            entry.position_size,
            entry.entry_price,
            entry.stop_loss,
            entry.risk_reward,
            entry.status.as_str(),
            net,
        );
    }

    println!("{} trades, {} open", journal.len(), journal.open_count());
}

fn print_stats(stats: &JournalStats) {
    println!("\n=== Dashboard ===");
    println!("Total Trades:   {} ({} open)", stats.total_trades, stats.open_trades);
    println!("Win Rate:       {:.1}%", stats.win_rate * 100.0);
    println!("Profit Factor:  {:.2}", stats.profit_factor);
    println!("Net P&L:        {:.2}", stats.total_net_pnl);
    println!("Best Trade:     {:.2}", stats.best_trade);
    println!("Worst Trade:    {:.2}", stats.worst_trade);
    println!("Average Trade:  {:.2}", stats.avg_trade);
    println!("Avg R Multiple: {}R", stats.avg_r_multiple);
    println!("Sharpe Ratio:   {:.2}", stats.sharpe_ratio);
    println!("Max Drawdown:   {:.1}%", stats.max_drawdown_pct * 100.0);

    println!("\n--- Trading Costs ---");
    println!("Total Turnover: {:.2}", stats.total_turnover);
    println!("Total Charges:  {:.2}", stats.total_charges);
    println!("Cost %:         {}%", stats.cost_pct);

    if stats.closed_trades > 0 {
        println!("\n--- R Distribution ---");
        for bucket in &stats.r_distribution {
            println!("{:>4}R  {}", bucket.r, bucket.count);
        }

        println!("\n--- Equity Curve ---");
        for point in &stats.equity_curve {
            println!(
                "  {}  {:>12.2}  (trade {:+.2})",
                point.closed_at.format("%Y-%m-%d %H:%M"),
                point.cumulative_net_pnl,
                point.net_pnl,
            );
        }
    }
}

/// Truncate a string with ellipsis if too long.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
