//! # vend-cli
//!
//! Terminal front end for the vending machine.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info, vend crates at debug; override with RUST_LOG       │
//! │                                                                         │
//! │  2. Load Machine Config ──────────────────────────────────────────────► │
//! │     • $VEND_CONFIG or platform config dir, else defaults                │
//! │                                                                         │
//! │  3. Run Session ──────────────────────────────────────────────────────► │
//! │     • stdin lines in, prompts and change out                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod session;

use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vend_core::VendingMachine;

use crate::session::Session;

/// Loads config and runs an interactive session on stdin/stdout.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting vend");

    let config = config::load(None).context("Failed to load machine config")?;
    let machine = VendingMachine::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(machine, stdin.lock(), stdout.lock())
        .run()
        .context("Terminal session failed")?;

    info!("Session finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vend_core=trace` - Show trace for the core only
/// - Default: INFO, DEBUG for vend crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vend=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
