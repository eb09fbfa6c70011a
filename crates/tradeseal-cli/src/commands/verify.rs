//! Verify command implementation.

use serde_json::json;
use tradeseal_canonical::{Publisher, RecordId};
use tradeseal_core::{Reconciler, Verdict};
use tradeseal_ledger::JournalLedger;
use tradeseal_store::JsonFileStore;

use crate::output::format_json;

pub fn run(
    record_id: String,
    store_path: String,
    ledger_path: String,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record_id = RecordId::parse(&record_id)?;
    // Verification only reads the ledger; the publisher identity is not used.
    let publisher = Publisher::parse("service:auditor")?;

    let store = JsonFileStore::open(&store_path)?;
    let ledger = JournalLedger::open(&ledger_path, publisher)?;
    let mut reconciler = Reconciler::new(store, ledger);

    let outcome = reconciler.verify(record_id)?;

    if json_output {
        println!("{}", format_json(&json!(&outcome)));
    } else {
        println!("record_id: {}", outcome.record_id);
        println!("verdict:   {:?}", outcome.verdict);
        println!("local:     {}", outcome.local_fingerprint);
        match outcome.ledger_fingerprints.as_slice() {
            [] => println!("ledger:    (no commitments published)"),
            fingerprints => {
                for (idx, fingerprint) in fingerprints.iter().enumerate() {
                    println!("ledger[{}]: {}", idx, fingerprint);
                }
            }
        }
    }

    if strict && outcome.verdict != Verdict::Verified {
        std::process::exit(1);
    }

    Ok(())
}
