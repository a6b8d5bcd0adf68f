use dredd_transaction::{Error, Headers, Transaction};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    fn to_json(&self) -> Value {
        match self {
            Scalar::Text(s) => json!(s),
            Scalar::Integer(i) => json!(i),
            Scalar::Float(f) => json!(f),
        }
    }

    fn expected(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        ".*".prop_map(Scalar::Text),
        any::<i64>().prop_map(Scalar::Integer),
        any::<f64>()
            .prop_filter("JSON numbers are finite", |f| f.is_finite())
            .prop_map(Scalar::Float),
    ]
}

fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,15}"
}

fn unsupported() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{1,8}".prop_map(|key| json!({ key: "nested" })),
        Just(json!([["nested"]])),
    ]
}

fn single(name: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(name.to_string(), value);
    Value::Object(map)
}

proptest! {
    #[test]
    fn scalar_becomes_single_value(name in header_name(), value in scalar()) {
        let headers = Headers::from_value(&single(&name, value.to_json())).unwrap();

        prop_assert_eq!(headers.get(&name).unwrap(), &[value.expected()][..]);
    }

    #[test]
    fn array_keeps_order_and_length(name in header_name(), values in prop::collection::vec(scalar(), 0..8)) {
        let input = Value::Array(values.iter().map(Scalar::to_json).collect());
        let headers = Headers::from_value(&single(&name, input)).unwrap();

        let expected: Vec<String> = values.iter().map(Scalar::expected).collect();
        prop_assert_eq!(headers.get(&name).unwrap(), expected.as_slice());
    }

    #[test]
    fn unsupported_shapes_fail(name in header_name(), value in unsupported()) {
        match Headers::from_value(&single(&name, value)) {
            Err(Error::UnsupportedHeaderValueShape { name: reported, .. }) => {
                prop_assert_eq!(reported, name);
            }
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    #[test]
    fn non_object_input_is_malformed(value in prop_oneof![
        Just(json!([])),
        Just(json!(["X-Id", "1"])),
        any::<i64>().prop_map(|i| json!(i)),
        ".*".prop_map(|s| json!(s)),
    ]) {
        let bytes = serde_json::to_vec(&value).unwrap();

        match Headers::from_slice(&bytes) {
            Err(Error::MalformedInput(_)) => (),
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    #[test]
    fn encoded_headers_decode_to_themselves(
        map in prop::collection::btree_map(header_name(), prop::collection::vec(".*", 0..4), 0..6)
    ) {
        let headers = Headers::from(map.clone());
        let transaction = json!({ "real": { "headers": headers, "statusCode": 200 } });

        let decoded = Transaction::from_slice(&serde_json::to_vec(&transaction).unwrap()).unwrap();

        let round_tripped: BTreeMap<String, Vec<String>> = decoded.real.unwrap().headers.into();
        prop_assert_eq!(round_tripped, map);
    }

    #[test]
    fn test_order_points_are_kept_in_order(points in prop::collection::vec(".*", 0..6)) {
        let mut transaction = Transaction::default();
        for point in &points {
            transaction.add_test_order_point(point.as_str());
        }

        let encoded: Value = serde_json::from_slice(&transaction.to_vec().unwrap()).unwrap();
        match encoded.get("hooks_modifications") {
            Some(recorded) => prop_assert_eq!(recorded, &json!(points)),
            None => prop_assert!(points.is_empty()),
        }
    }
}
