//! # Terminal Session
//!
//! Reads commands line by line and drives a [`VendingMachine`].
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  > crisps                                                               │
//! │  crisps costs £1.00. Insert coins (1p 2p 5p 10p 20p 50p £1 £2),        │
//! │  or 'cancel':                                                          │
//! │  50p                                                                   │
//! │  50p                                                                   │
//! │  Vending crisps. Change: none                                          │
//! │  > top                                                                 │
//! │  1. crisps                                                             │
//! │  > quit                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generic over `BufRead`/`Write` so tests can script a whole session.

use std::io::{self, BufRead, Write};

use tracing::{debug, warn};
use vend_core::{CoreError, Denomination, TokenSource, VendingMachine};

/// Typed during payment to give up and get coins back.
pub const CANCEL: &str = "cancel";

const HELP: &str = "\
Commands:
  <item>   buy an item, e.g. 'chocolate'
  menu     list items, prices and stock
  coins    show the coin bank
  top      best selling items
  reload   refill stock and coins
  status   dump machine state as JSON
  help     show this message
  quit     leave";

/// Pulls payment tokens from the session's input, one line per token.
///
/// Ends on end of input, a read error, or `cancel`.
struct LineTokens<'a, R> {
    input: &'a mut R,
}

impl<R: BufRead> TokenSource for LineTokens<'_, R> {
    fn next_token(&mut self) -> Option<String> {
        let line = match read_trimmed_line(&mut *self.input) {
            Ok(line) => line?,
            Err(e) => {
                warn!(error = %e, "Failed to read payment input");
                return None;
            }
        };
        if line.eq_ignore_ascii_case(CANCEL) {
            debug!("Payment cancelled");
            return None;
        }
        Some(line)
    }
}

fn read_trimmed_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// An interactive session over any line-based input and output.
pub struct Session<R, W> {
    machine: VendingMachine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(machine: VendingMachine, input: R, output: W) -> Self {
        Session {
            machine,
            input,
            output,
        }
    }

    /// Hands back the machine and output once the session is over.
    pub fn into_parts(self) -> (VendingMachine, W) {
        (self.machine, self.output)
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome! Type 'menu' to see what's on offer, 'help' for commands.")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let Some(line) = read_trimmed_line(&mut self.input)? else {
                break;
            };

            match line.as_str() {
                "" => continue,
                "quit" | "exit" => break,
                "help" => writeln!(self.output, "{}", HELP)?,
                "menu" => self.print_menu()?,
                "coins" => self.print_coins()?,
                "top" => self.print_top()?,
                "reload" => {
                    self.machine.reload_inventory();
                    self.machine.reload_coins();
                    writeln!(self.output, "Stock and coins reloaded.")?;
                }
                "status" => {
                    let json = serde_json::to_string_pretty(&self.machine.snapshot())
                        .map_err(io::Error::other)?;
                    writeln!(self.output, "{}", json)?;
                }
                other => {
                    let selected = self.machine.select_item(other).map(str::to_string);
                    match selected {
                        Some(item) => self.buy(&item)?,
                        None => writeln!(self.output, "Sorry, '{}' is not available.", other)?,
                    }
                }
            }
        }

        writeln!(self.output, "Goodbye.")?;
        Ok(())
    }

    fn buy(&mut self, item: &str) -> io::Result<()> {
        let labels: Vec<&str> = Denomination::ALL.iter().map(|d| d.label()).collect();
        writeln!(
            self.output,
            "{} costs {}. Insert coins ({}), or '{}':",
            item,
            self.machine.price_of(item),
            labels.join(" "),
            CANCEL
        )?;
        self.output.flush()?;

        let mut tokens = LineTokens {
            input: &mut self.input,
        };

        match self.machine.pay_for(item, &mut tokens) {
            Ok(outcome) if outcome.is_vended() => {
                writeln!(
                    self.output,
                    "Vending {}. Change: {}",
                    outcome.item(),
                    outcome.returned()
                )?;
            }
            Ok(outcome) => {
                writeln!(
                    self.output,
                    "Sorry, exact change cannot be given for {}. Returning: {}",
                    outcome.item(),
                    outcome.returned()
                )?;
            }
            Err(CoreError::PaymentIncomplete { tendered, .. }) => {
                writeln!(self.output, "Payment cancelled. Returning {}.", tendered)?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        for item in self.machine.inventory().iter() {
            let stock = if item.in_stock() {
                format!("{} left", item.available)
            } else {
                "sold out".to_string()
            };
            writeln!(
                self.output,
                "  {:<12} {:>6}  ({})",
                item.name,
                self.machine.price_of(&item.name).to_string(),
                stock
            )?;
        }
        Ok(())
    }

    fn print_coins(&mut self) -> io::Result<()> {
        let bank = self.machine.coin_bank();
        for denomination in Denomination::ALL.iter().rev() {
            writeln!(self.output, "  {:>3}  x{}", denomination, bank.count(*denomination))?;
        }
        writeln!(self.output, "  total {}", bank.total())?;
        Ok(())
    }

    fn print_top(&mut self) -> io::Result<()> {
        let top = self.machine.top_3_items();
        if top.is_empty() {
            writeln!(self.output, "Nothing sold yet.")?;
        }
        for (rank, item) in top.iter().enumerate() {
            writeln!(self.output, "{}. {}", rank + 1, item)?;
        }
        Ok(())
    }
}
