//! Attestor — Demo CLI
//!
//! Runs one or all of the demo scenarios. Each scenario uses real Attestor
//! components (whitelist gate, critic, audit sink, orchestrator) wired
//! around a simulated desktop/web/file environment.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- happy-path
//!   cargo run -p demo -- policy-denial
//!   cargo run -p demo -- retry-recovery
//!   cargo run -p demo -- retry-exhaustion
//!   cargo run -p demo -- verify-intent

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scenarios;
mod sim;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Attestor — verified action execution demo.
///
/// Each subcommand runs one or all of the scenarios, demonstrating the
/// policy gate, authority-hierarchy verification, retry rules, and audit
/// chain integrity.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Attestor runtime demo",
    long_about = "Runs Attestor demo scenarios showing whitelist enforcement,\n\
                  multi-source verification, retry/termination rules, and\n\
                  audit chain integrity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all scenarios in sequence.
    RunAll,
    /// Launch, type with verification, observe, close — all verified.
    HappyPath,
    /// A non-whitelisted app: terminal denial with zero attempts.
    PolicyDenial,
    /// A dropped launch caught by verification and recovered on retry.
    RetryRecovery,
    /// Two failed attempts ending as retry_exhausted.
    RetryExhaustion,
    /// A failed verification intent: terminal on the first attempt.
    VerifyIntent,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::HappyPath => scenarios::happy_path(),
        Command::PolicyDenial => scenarios::policy_denial(),
        Command::RetryRecovery => scenarios::retry_recovery(),
        Command::RetryExhaustion => scenarios::retry_exhaustion(),
        Command::VerifyIntent => scenarios::verify_intent_failure(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed.");
        }
        Err(e) => {
            eprintln!("Demo error: {e}");
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> attestor_contracts::error::AttestorResult<()> {
    scenarios::happy_path()?;
    scenarios::policy_denial()?;
    scenarios::retry_recovery()?;
    scenarios::retry_exhaustion()?;
    scenarios::verify_intent_failure()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Attestor — Verified Action Execution");
    println!("====================================");
    println!();
    println!("Pipeline per action:");
    println!("  [1] Whitelist gate evaluates the action → Allow / Deny (deny aborts, 0 attempts)");
    println!("  [2] Executor performs the action — its success claim is never trusted");
    println!("  [3] Primary authority (UIA / DOM / FILE) decides success");
    println!("  [4] On failure, vision is consulted — moves confidence, never success");
    println!("  [5] Up to 2 attempts; verification intents are terminal on first failure");
    println!("  [6] Exactly one immutable record per item on the SHA-256 audit chain");
    println!();
}
