//! Integration tests for CLI commands.

use std::process::Command;

use tempfile::TempDir;

fn write_store(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "tradeseal", "--"])
        .args(args)
        .output()
        .expect("failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

const RECORDS: &str = r#"[
    {"record_id": 42, "fields": {"kwh": 10.5, "eur": 2.10, "buyer": "B", "seller": "S"}}
]"#;

const TAMPERED_RECORDS: &str = r#"[
    {"record_id": 42, "fields": {"kwh": 10.6, "eur": 2.10, "buyer": "B", "seller": "S"}}
]"#;

#[test]
fn fingerprint_prints_canonical_bytes() {
    let dir = TempDir::new().unwrap();
    let record = write_store(
        &dir,
        "record.json",
        r#"{"record_id": 42, "fields": {"kwh": 10.5, "buyer": "B"}}"#,
    );

    let (ok, stdout, _) = run_cli(&["fingerprint", &record]);
    assert!(ok);
    assert!(stdout.contains(r#""buyer":"B""#));
    assert!(stdout.contains(r#""kwh":"10.5000""#));
    assert!(stdout.contains("fingerprint:"));
}

#[test]
fn publish_then_verify_reports_verified() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir, "records.json", RECORDS);
    let ledger = dir.path().join("ledger.tsl");
    let ledger = ledger.to_string_lossy().to_string();

    let (ok, stdout, _) = run_cli(&["publish", "42", "--store", &store, "--ledger", &ledger]);
    assert!(ok, "publish failed: {}", stdout);
    assert!(stdout.contains("published commitment for record 42"));

    let (ok, stdout, _) = run_cli(&[
        "verify", "42", "--store", &store, "--ledger", &ledger, "--strict",
    ]);
    assert!(ok, "verify failed: {}", stdout);
    assert!(stdout.contains("Verified"));
}

#[test]
fn tampering_is_detected_and_strict_mode_fails() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir, "records.json", RECORDS);
    let ledger = dir.path().join("ledger.tsl");
    let ledger = ledger.to_string_lossy().to_string();

    let (ok, _, _) = run_cli(&["publish", "42", "--store", &store, "--ledger", &ledger]);
    assert!(ok);

    // Rewrite the off-chain snapshot with a mutated kwh value.
    let tampered = write_store(&dir, "tampered.json", TAMPERED_RECORDS);
    let (ok, stdout, _) = run_cli(&[
        "verify", "42", "--store", &tampered, "--ledger", &ledger, "--strict",
    ]);
    assert!(!ok);
    assert!(stdout.contains("Tampered"));
}

#[test]
fn duplicate_publication_warns_and_verify_is_ambiguous() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir, "records.json", RECORDS);
    let ledger = dir.path().join("ledger.tsl");
    let ledger = ledger.to_string_lossy().to_string();

    let (ok, _, _) = run_cli(&["publish", "42", "--store", &store, "--ledger", &ledger]);
    assert!(ok);
    let (ok, _, stderr) = run_cli(&["publish", "42", "--store", &store, "--ledger", &ledger]);
    assert!(ok);
    assert!(stderr.contains("duplicate"));

    let (ok, stdout, _) = run_cli(&["verify", "42", "--store", &store, "--ledger", &ledger]);
    assert!(ok);
    assert!(stdout.contains("AmbiguousPublication"));
}

#[test]
fn list_shows_published_events() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir, "records.json", RECORDS);
    let ledger = dir.path().join("ledger.tsl");
    let ledger = ledger.to_string_lossy().to_string();

    let (ok, _, _) = run_cli(&["publish", "42", "--store", &store, "--ledger", &ledger]);
    assert!(ok);

    let (ok, stdout, _) = run_cli(&["list", &ledger]);
    assert!(ok);
    assert!(stdout.contains("RECORD_ID"));
    assert!(stdout.contains("42"));
    assert!(stdout.contains("1 event(s)"));
}

#[test]
fn invalid_record_ids_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir, "records.json", RECORDS);
    let ledger = dir.path().join("ledger.tsl");
    let ledger = ledger.to_string_lossy().to_string();

    // Non-numeric text fails identifier validation, not argument parsing.
    let (ok, _, stderr) = run_cli(&[
        "verify", "forty-two", "--store", &store, "--ledger", &ledger,
    ]);
    assert!(!ok);
    assert!(stderr.contains("record_id ('forty-two') is not allowed"));

    // Negative ids fail the same way once past the argument parser.
    let (ok, _, stderr) = run_cli(&[
        "verify", "--store", &store, "--ledger", &ledger, "--", "-7",
    ]);
    assert!(!ok);
    assert!(stderr.contains("record_id ('-7') is not allowed"));
}
