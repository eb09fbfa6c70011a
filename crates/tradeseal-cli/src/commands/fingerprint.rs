//! Fingerprint command implementation.

use std::io::Read;

use serde_json::json;
use tradeseal_canonical::{commit, Canonicalizer, Record};

use crate::output::format_json;

pub fn run(input: Option<String>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let contents = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let record: Record = serde_json::from_str(&contents)?;
    let canonicalizer = Canonicalizer::new();
    let form = canonicalizer.canonicalize(&record)?;
    let fingerprint = commit(&form)?;
    let canonical_text = String::from_utf8(form.into_bytes())?;

    if json_output {
        println!(
            "{}",
            format_json(&json!({
                "record_id": record.record_id,
                "canonical": canonical_text,
                "fingerprint": fingerprint,
            }))
        );
    } else {
        println!("record_id:   {}", record.record_id);
        println!("canonical:   {}", canonical_text);
        println!("fingerprint: {}", fingerprint);
    }

    Ok(())
}
