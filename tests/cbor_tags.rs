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
use chrono::DateTime;
use collate_codec::{cbor, Config, Value};

#[test]
fn bignum_tags_roundtrip() {
    let config = Config::new();
    let pos = Value::BigIntPos(vec![0x01, 0x00]);
    let neg = Value::BigIntNeg(vec![0x01, 0x00]);
    for v in [pos, neg] {
        let bytes = cbor::encode(&config, &v).unwrap();
        assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
    }
}

#[test]
fn decimal_fraction_and_bigfloat_roundtrip() {
    let config = Config::new();
    let df = Value::DecimalFraction(-2, 12345);
    let bf = Value::BigFloat(3, -7);
    for v in [df, bf] {
        let bytes = cbor::encode(&config, &v).unwrap();
        assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
    }
}

#[test]
fn embedded_cbor_and_prefix_tags_roundtrip() {
    let config = Config::new();
    let inner = cbor::encode(&config, &Value::Uint(7)).unwrap();
    let v = Value::CborEnc(inner.clone().into());
    let bytes = cbor::encode(&config, &v).unwrap();
    assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
}

#[test]
fn uri_and_mime_and_regexp_tags_roundtrip() {
    let config = Config::new();
    for v in [
        Value::Uri("https://example.com/a".to_string()),
        Value::Mime("text/plain".to_string()),
        Value::Regexp("^[a-z]+$".to_string()),
    ] {
        let bytes = cbor::encode(&config, &v).unwrap();
        assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
    }
}

#[test]
fn invalid_regexp_text_fails_to_decode() {
    let config = Config::new();
    let v = Value::Regexp("[unterminated".to_string());
    let bytes = cbor::encode(&config, &v).unwrap();
    assert!(cbor::decode_one(&config, &bytes).is_err());
}

#[test]
fn base64_variants_roundtrip_through_text_form() {
    let config = Config::new();
    let data = vec![0xde, 0xad, 0xbe, 0xef, 0x01];
    for v in [Value::Base64(data.clone()), Value::Base64Url(data)] {
        let bytes = cbor::encode(&config, &v).unwrap();
        assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
    }
}

#[test]
fn datetime_tag_roundtrips() {
    let config = Config::new();
    let dt = DateTime::parse_from_rfc3339("2023-06-15T08:30:00+02:00").unwrap();
    let v = Value::DateTime(dt);
    let bytes = cbor::encode(&config, &v).unwrap();
    assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
}

#[test]
fn epoch_int_and_float_forms_roundtrip() {
    let config = Config::new();
    for v in [Value::Epoch(1_700_000_000), Value::EpochFloat(1_700_000_000.5)] {
        let bytes = cbor::encode(&config, &v).unwrap();
        assert_eq!(cbor::decode_one(&config, &bytes).unwrap(), v);
    }
}
