//! Publish command implementation.

use std::time::{Duration, Instant};

use serde_json::json;
use tradeseal_canonical::{Publisher, RecordId};
use tradeseal_core::Reconciler;
use tradeseal_ledger::{JournalLedger, PublishOptions};
use tradeseal_store::JsonFileStore;

use crate::output::format_json;

pub fn run(
    record_id: String,
    store_path: String,
    ledger_path: String,
    publisher: String,
    timeout: Option<u64>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record_id = RecordId::parse(&record_id)?;
    let publisher = Publisher::parse(publisher)?;

    let store = JsonFileStore::open(&store_path)?;
    let ledger = JournalLedger::open(&ledger_path, publisher)?;
    let mut reconciler = Reconciler::new(store, ledger);

    let options = match timeout {
        Some(secs) => PublishOptions::with_deadline(Instant::now() + Duration::from_secs(secs)),
        None => PublishOptions::default(),
    };

    let publication = reconciler.commit_record(record_id, None, options)?;

    if publication.is_duplicate() {
        eprintln!(
            "warning: record {} already had {} ledger event(s); this publication is a duplicate",
            record_id,
            publication.prior_fingerprints.len()
        );
    }

    if json_output {
        println!(
            "{}",
            format_json(&json!({
                "event": publication.event,
                "duplicate": publication.is_duplicate(),
            }))
        );
    } else {
        println!(
            "published commitment for record {} at sequence {}",
            record_id,
            publication.event.sequence.position()
        );
        println!("fingerprint: {}", publication.event.fingerprint);
    }

    Ok(())
}
