use proptest::prelude::*;
use serde_json::{json, Map, Value};

use tradeseal_canonical::{fingerprint_record, Canonicalizer, Record, RecordId};

fn field_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|i| json!(i)),
        (-1_000_000.0f64..1_000_000.0).prop_map(|f| json!(f)),
        "[ -~]{0,24}".prop_map(|s| json!(s)),
        any::<bool>().prop_map(|b| json!(b)),
    ]
}

fn field_map() -> impl Strategy<Value = Vec<(String, Value)>> {
    proptest::collection::vec((field_key(), field_value()), 1..8)
}

fn record_from(entries: &[(String, Value)]) -> Record {
    let mut map = Map::new();
    for (k, v) in entries {
        map.insert(k.clone(), v.clone());
    }
    Record::new(RecordId::new(42), map)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn canonicalization_is_deterministic(entries in field_map()) {
        let canonicalizer = Canonicalizer::new();
        let record = record_from(&entries);
        let first = fingerprint_record(&record, &canonicalizer).unwrap();
        let second = fingerprint_record(&record, &canonicalizer).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn insertion_order_never_reaches_the_bytes(entries in field_map()) {
        let canonicalizer = Canonicalizer::new();
        let forward = record_from(&entries);
        let mut reversed_entries = entries.clone();
        reversed_entries.reverse();
        let reversed = record_from(&reversed_entries);
        prop_assert_eq!(
            canonicalizer.canonicalize(&forward).unwrap(),
            canonicalizer.canonicalize(&reversed).unwrap()
        );
    }

    #[test]
    fn string_mutation_changes_the_fingerprint(
        entries in field_map(),
        key in field_key(),
        a in "[ -~]{1,16}",
        b in "[ -~]{1,16}",
    ) {
        prop_assume!(a != b);
        let canonicalizer = Canonicalizer::new();

        let mut left = record_from(&entries);
        left.fields.insert(key.clone(), json!(a));
        let mut right = record_from(&entries);
        right.fields.insert(key, json!(b));

        let fp_left = fingerprint_record(&left, &canonicalizer).unwrap();
        let fp_right = fingerprint_record(&right, &canonicalizer).unwrap();
        prop_assert_ne!(fp_left, fp_right);
    }

    #[test]
    fn record_id_is_bound_into_the_commitment(
        entries in field_map(),
        id_a in any::<u32>(),
        id_b in any::<u32>(),
    ) {
        prop_assume!(id_a != id_b);
        let canonicalizer = Canonicalizer::new();

        let mut map = Map::new();
        for (k, v) in &entries {
            map.insert(k.clone(), v.clone());
        }
        let left = Record::new(RecordId::new(u64::from(id_a)), map.clone());
        let right = Record::new(RecordId::new(u64::from(id_b)), map);

        prop_assert_ne!(
            fingerprint_record(&left, &canonicalizer).unwrap(),
            fingerprint_record(&right, &canonicalizer).unwrap()
        );
    }
}
