/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
use collate_codec::{cbor, collate, json, Config, NumberKind, Value};

#[test]
fn json_collate_ordering_matches_value_ordering() {
    let config = Config::new();
    let docs = [
        "null",
        "false",
        "true",
        "-100",
        "0",
        "3.5",
        r#""apple""#,
        r#""banana""#,
        "[1,2]",
        r#"{"a":1}"#,
    ];
    let encoded: Vec<Vec<u8>> = docs
        .iter()
        .map(|d| json::to_collate(&config, d).unwrap())
        .collect();
    for w in encoded.windows(2) {
        assert!(w[0] < w[1], "{:?} should collate before {:?}", w[0], w[1]);
    }
}

#[test]
fn json_to_value_to_cbor_to_value_roundtrips() {
    let config = Config::new().with_number_kind(NumberKind::SmartNumber);
    let text = r#"{"id":42,"name":"widget","tags":["a","b"],"price":19.99,"active":true,"extra":null}"#;
    let value = json::to_value(&config, text).unwrap();
    let cbor_bytes = cbor::encode(&config, &value).unwrap();
    let back = cbor::decode_one(&config, &cbor_bytes).unwrap();
    assert_eq!(value, back);
}

#[test]
fn missing_literal_becomes_missing_value_and_back() {
    let config = Config::new();
    let text = format!(r#"{{"a":"{}"}}"#, config.missing_literal());
    let value = json::to_value(&config, &text).unwrap();
    match &value {
        Value::Map(pairs) => assert_eq!(pairs[0].1, Value::Missing),
        _ => panic!("expected a map"),
    }
    let back = json::from_value(&config, &value).unwrap();
    assert_eq!(back, text);
}

#[test]
fn collate_then_decode_preserves_array_and_map_shape() {
    let config = Config::new();
    let value = Value::Map(vec![
        ("z".into(), Value::Int(1)),
        ("a".into(), Value::Array(vec![Value::Bool(true), Value::Null])),
    ]);
    let bytes = collate::encode(&config, &value).unwrap();
    let decoded = collate::decode(&config, &bytes).unwrap();
    match decoded {
        Value::Map(pairs) => {
            assert_eq!(pairs.len(), 2);
            assert!(pairs.iter().any(|(k, _)| k == "z"));
            assert!(pairs.iter().any(|(k, _)| k == "a"));
        }
        _ => panic!("expected a map"),
    }
}

#[test]
fn cbor_indefinite_and_definite_length_encodings_decode_to_same_value() {
    let streamed = Config::new();
    let counted = Config::new().with_container_encoding(collate_codec::ContainerEncoding::LengthPrefix);
    let value = Value::Array(vec![Value::Uint(1), Value::Uint(2), Value::Uint(3)]);

    let a = cbor::encode(&streamed, &value).unwrap();
    let b = cbor::encode(&counted, &value).unwrap();
    assert_ne!(a, b, "the two encodings should differ in wire form");
    assert_eq!(cbor::decode_one(&streamed, &a).unwrap(), value);
    assert_eq!(cbor::decode_one(&counted, &b).unwrap(), value);
}
