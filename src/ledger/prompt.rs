//! Line-oriented stock prompt.
//!
//! ```text
//! Enter command [a=add, r=remove, q=quit]: a
//! Barcode: 8801234567890
//! Quantity: 5
//! Added 5 of 8801234567890.
//! Current stock: {"8801234567890":5}
//! ```
//!
//! Barcode and quantity are always asked for, even when the command letter
//! is not recognised; the command is only rejected once both are read.
//! Ledger errors are printed and the prompt carries on.  `q` or end of
//! input ends the session.
//!
//! Quantities may use `_` as a digit separator.  Integers too large for the
//! ledger are answered with `Error: Quantity too large` (or, when negative,
//! `Error: Quantity must be positive`) instead of the malformed-input
//! message.

use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

use log::debug;

use super::{LedgerError, StockLedger};

pub const COMMAND_PROMPT: &str = "Enter command [a=add, r=remove, q=quit]: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Quit,
    Unknown,
}

impl Command {
    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "a" => Self::Add,
            "r" => Self::Remove,
            "q" => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

pub struct PromptSession<R, W> {
    ledger: StockLedger,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSession<R, W> {
    pub fn new(ledger: StockLedger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
        }
    }

    /// Run until `q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(line) = self.ask(COMMAND_PROMPT)? else {
                break;
            };
            let cmd = Command::parse(&line);
            if cmd == Command::Quit {
                break;
            }

            let Some(barcode) = self.ask("Barcode: ")? else {
                break;
            };
            let barcode = barcode.trim().to_owned();
            let Some(qty) = self.ask("Quantity: ")? else {
                break;
            };
            // An out-of-range quantity is a ledger error, reported in the
            // same order as the ledger would report it.
            let qty = match parse_quantity(&qty) {
                Ok(q) => Ok(q),
                Err(QuantityInput::NotInteger) => {
                    writeln!(self.output, "Please enter a valid integer quantity.")?;
                    continue;
                }
                Err(QuantityInput::OutOfRange(e)) => Err(e),
            };

            let result: Result<(&str, i64), LedgerError> = match (cmd, qty) {
                (Command::Add, Ok(q)) => self.ledger.add(&barcode, q).map(|_| ("Added", q)),
                (Command::Remove, Ok(q)) => self.ledger.remove(&barcode, q).map(|_| ("Removed", q)),
                (Command::Add, Err(e)) => Err(e),
                (Command::Remove, Err(e)) if self.ledger.contains(&barcode) => Err(e),
                (Command::Remove, Err(_)) => Err(LedgerError::UnknownItem(barcode.clone())),
                (Command::Quit | Command::Unknown, _) => {
                    writeln!(self.output, "Unknown command.")?;
                    continue;
                }
            };
            match result {
                Ok((verb, qty)) => {
                    debug!("stock: {} {} of {}", verb, qty, barcode);
                    writeln!(self.output, "{} {} of {}.", verb, qty, barcode)?;
                }
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            }

            let snapshot = serde_json::to_string(&self.ledger.snapshot()).map_err(io::Error::other)?;
            writeln!(self.output, "Current stock: {}", snapshot)?;
        }
        self.output.flush()
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    pub fn into_parts(self) -> (StockLedger, W) {
        (self.ledger, self.output)
    }

    /// Print `prompt` and read one line.  `None` at end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

enum QuantityInput {
    NotInteger,
    /// A well-formed integer that does not fit the ledger's range.
    OutOfRange(LedgerError),
}

/// Parse a typed quantity.  Accepts an optional sign and `_` between
/// digits (`1_000`).  Integers past `i64` are reported as ledger errors
/// rather than as malformed input.
fn parse_quantity(text: &str) -> Result<i64, QuantityInput> {
    let text = text.trim();
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let well_formed = body.starts_with(|c: char| c.is_ascii_digit())
        && body.ends_with(|c: char| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '_')
        && !body.contains("__");
    if !well_formed {
        return Err(QuantityInput::NotInteger);
    }

    let mut digits: String = body.chars().filter(|c| *c != '_').collect();
    if negative {
        digits.insert(0, '-');
    }
    digits.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => QuantityInput::OutOfRange(LedgerError::QuantityOverflow),
        IntErrorKind::NegOverflow => QuantityInput::OutOfRange(LedgerError::InvalidQuantity(i64::MIN)),
        _ => QuantityInput::NotInteger,
    })
}
