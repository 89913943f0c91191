//! stockctl — interactive barcode stock prompt over stdin/stdout.
//!
//! Logging defaults to `warn` so it does not interleave with the prompt;
//! set `RUST_LOG=debug` to trace every ledger change on stderr.
#![deny(unused_must_use)]

use std::io;

use anyhow::{Context, Result};

use skyctl::ledger::StockLedger;
use skyctl::ledger::prompt::PromptSession;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = PromptSession::new(StockLedger::new(), stdin.lock(), stdout.lock());
    session.run().context("stock prompt I/O failed")?;
    Ok(())
}
