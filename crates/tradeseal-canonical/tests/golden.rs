use serde_json::{json, Map, Value};

use tradeseal_canonical::{
    commit, fingerprint_record, Canonicalizer, Fingerprint, Record, RecordId, FINGERPRINT_LEN,
};

fn trade_record() -> Record {
    let mut fields = Map::new();
    fields.insert("kwh".to_string(), json!(10.5));
    fields.insert("eur".to_string(), json!(2.10));
    fields.insert("buyer".to_string(), json!("B"));
    fields.insert("seller".to_string(), json!("S"));
    Record::new(RecordId::new(42), fields)
}

#[test]
fn trade_record_canonicalizes_to_golden_bytes() {
    let form = Canonicalizer::new().canonicalize(&trade_record()).unwrap();
    assert_eq!(
        form.as_bytes(),
        br#"{"buyer":"B","eur":"2.1000","kwh":"10.5000","record_id":"42.0000","seller":"S"}"#
    );
}

#[test]
fn fingerprint_is_stable_across_invocations() {
    let canonicalizer = Canonicalizer::new();
    let first = fingerprint_record(&trade_record(), &canonicalizer).unwrap();
    let second = fingerprint_record(&trade_record(), &canonicalizer).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_bytes().len(), FINGERPRINT_LEN);
    assert_eq!(hex::encode(first.as_bytes()).len(), 64);
}

#[test]
fn single_field_mutation_changes_the_fingerprint() {
    let canonicalizer = Canonicalizer::new();
    let original = fingerprint_record(&trade_record(), &canonicalizer).unwrap();

    let mut tampered = trade_record();
    tampered.fields.insert("kwh".to_string(), json!(10.6));
    let mutated = fingerprint_record(&tampered, &canonicalizer).unwrap();

    assert_ne!(original, mutated);
}

#[test]
fn field_insertion_order_does_not_matter() {
    let canonicalizer = Canonicalizer::new();

    let mut reversed = Map::new();
    reversed.insert("seller".to_string(), json!("S"));
    reversed.insert("buyer".to_string(), json!("B"));
    reversed.insert("eur".to_string(), json!(2.10));
    reversed.insert("kwh".to_string(), json!(10.5));
    let permuted = Record::new(RecordId::new(42), reversed);

    assert_eq!(
        canonicalizer.canonicalize(&trade_record()).unwrap(),
        canonicalizer.canonicalize(&permuted).unwrap()
    );
}

#[test]
fn numeric_type_does_not_leak_into_the_commitment() {
    let canonicalizer = Canonicalizer::new();

    let as_int = Record::new(RecordId::new(1), {
        let mut m = Map::new();
        m.insert("qty".to_string(), json!(25));
        m
    });
    let as_float = Record::new(RecordId::new(1), {
        let mut m = Map::new();
        m.insert("qty".to_string(), json!(25.0));
        m
    });

    let a = commit(&canonicalizer.canonicalize(&as_int).unwrap()).unwrap();
    let b = commit(&canonicalizer.canonicalize(&as_float).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fingerprint_json_round_trip() {
    let canonicalizer = Canonicalizer::new();
    let fp = fingerprint_record(&trade_record(), &canonicalizer).unwrap();
    let encoded = serde_json::to_string(&fp).unwrap();
    let decoded: Fingerprint = serde_json::from_str(&encoded).unwrap();
    assert_eq!(fp, decoded);
}

#[test]
fn currency_amounts_canonicalize_at_fixed_scale() {
    // Exhaustive numeric-equivalence cases: integers, decimals, currency.
    let cases: &[(Value, &str)] = &[
        (json!(0), "0.0000"),
        (json!(7), "7.0000"),
        (json!(-7), "-7.0000"),
        (json!(0.1), "0.1000"),
        (json!(19.99), "19.9900"),
        (json!(1234.5), "1234.5000"),
        (json!(2.1), "2.1000"),
    ];
    let canonicalizer = Canonicalizer::new();
    for (value, expected) in cases {
        let mut m = Map::new();
        m.insert("amount".to_string(), value.clone());
        let form = canonicalizer
            .canonicalize(&Record::new(RecordId::new(1), m))
            .unwrap();
        let text = String::from_utf8(form.into_bytes()).unwrap();
        assert!(
            text.contains(&format!(r#""amount":"{}""#, expected)),
            "{} should canonicalize to {}, got {}",
            value,
            expected,
            text
        );
    }
}
