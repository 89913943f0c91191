//! Fuzz target: `PromptSession::run`
//!
//! Feeds arbitrary input to the stock prompt and checks that it never
//! panics and that the ledger it leaves behind is consistent with the
//! last snapshot line it printed.
//!
//! cargo fuzz run fuzz_prompt_session

#![no_main]

use libfuzzer_sys::fuzz_target;
use skyctl::ledger::StockLedger;
use skyctl::ledger::prompt::PromptSession;

fuzz_target!(|data: &[u8]| {
    let mut session = PromptSession::new(StockLedger::new(), data, Vec::new());
    // Invalid UTF-8 surfaces as an I/O error; anything else must succeed.
    if session.run().is_err() {
        return;
    }
    let (ledger, out) = session.into_parts();
    let out = String::from_utf8_lossy(&out);

    if let Some(last) = out.lines().filter_map(|l| l.strip_prefix("Current stock: ")).last() {
        let printed: std::collections::BTreeMap<String, u64> =
            serde_json::from_str(last).expect("snapshot line must be valid JSON");
        assert_eq!(printed, ledger.snapshot());
    }
});
