//! Canonical encoding must not depend on wire order.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use credtrust_vc::VerifiableCredential;

fn credential(types: &[String], claims: &[(String, i64)], field_order: &[usize]) -> VerifiableCredential {
    let mut subject = Map::new();
    subject.insert("id".into(), json!("did:example:holder"));
    for (name, value) in claims {
        subject.insert(name.clone(), json!(value));
    }

    let fields: [(&str, Value); 6] = [
        ("id", json!("did:example:holder#cred")),
        ("type", json!(types)),
        ("issuer", json!("did:example:issuer")),
        ("issuanceDate", json!("2024-01-01T00:00:00Z")),
        ("credentialSubject", Value::Object(subject)),
        ("proof", json!({"verificationMethod": "#key-1", "signature": "abcd"})),
    ];
    let mut obj = Map::new();
    for &i in field_order {
        let (name, value) = &fields[i];
        obj.insert((*name).to_string(), value.clone());
    }
    VerifiableCredential::from_json_value(&Value::Object(obj)).unwrap()
}

fn type_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Za-z]{1,12}", 1..6).prop_map(|s| s.into_iter().collect())
}

fn claims() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::hash_map("[a-zA-Z][a-zA-Z0-9]{0,8}", any::<i64>(), 0..8)
        .prop_map(|m| m.into_iter().filter(|(k, _)| k != "id").collect())
}

proptest! {
    #[test]
    fn type_and_claim_order_do_not_change_encoding(
        types in type_names(),
        claims in claims(),
        order in Just((0..6usize).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let identity: Vec<usize> = (0..6).collect();
        let baseline = credential(&types, &claims, &identity);

        let mut reversed_types = types.clone();
        reversed_types.reverse();
        let mut reversed_claims = claims.clone();
        reversed_claims.reverse();
        let permuted = credential(&reversed_types, &reversed_claims, &order);

        prop_assert_eq!(baseline.signing_input().unwrap(), permuted.signing_input().unwrap());
        prop_assert_eq!(
            baseline.to_json_string(false).unwrap(),
            permuted.to_json_string(false).unwrap()
        );
    }

    #[test]
    fn encoded_types_are_sorted_case_insensitively(types in type_names()) {
        let identity: Vec<usize> = (0..6).collect();
        let vc = credential(&types, &[], &identity);
        let encoded: Value = serde_json::from_str(vc.to_json_string(true).unwrap().as_str()).unwrap();
        let listed: Vec<String> = encoded["type"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        prop_assert!(listed.windows(2).all(|w| w[0].to_lowercase() <= w[1].to_lowercase()));
        prop_assert_eq!(listed.len(), types.len());
    }
}
