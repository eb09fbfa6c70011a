//! List command implementation.

use serde_json::json;
use tradeseal_ledger::{JournalReader, ReadMode};

use crate::output::{format_event_row, format_json, print_event_table_header};

pub fn run(ledger_path: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = JournalReader::open(&ledger_path, ReadMode::Strict)?;

    let mut events = Vec::new();
    while let Some(event) = reader.read_event()? {
        events.push(event);
    }

    if json_output {
        println!("{}", format_json(&json!(events)));
    } else {
        print_event_table_header();
        for event in &events {
            println!("{}", format_event_row(event));
        }
        println!("{} event(s)", events.len());
    }

    Ok(())
}
