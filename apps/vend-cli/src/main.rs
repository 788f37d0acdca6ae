//! # vend
//!
//! Entry point for the terminal vending machine. The actual setup is in
//! lib.rs so the session can be tested without a real terminal.

fn main() -> anyhow::Result<()> {
    vend_cli::run()
}
