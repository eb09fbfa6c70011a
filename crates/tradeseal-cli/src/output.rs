//! Output formatting utilities.

use serde_json::Value;
use tradeseal_ledger::CommitmentEvent;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a commitment event as a table row.
pub fn format_event_row(event: &CommitmentEvent) -> String {
    format!(
        "{:<8} {:<12} {:<44} {}",
        event.sequence.position(),
        event.record_id,
        event.fingerprint,
        event.publisher
    )
}

/// Prints the commitment event table header.
pub fn print_event_table_header() {
    println!(
        "{:<8} {:<12} {:<44} {}",
        "SEQ", "RECORD_ID", "FINGERPRINT", "PUBLISHER"
    );
    println!("{}", "-".repeat(90));
}
