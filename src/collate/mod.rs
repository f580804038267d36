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
//! Order-preserving binary collation of the value tree.
//!
//! `encode` produces a byte string such that `memcmp` over two encoded values reproduces the
//! domain order `Missing < Null < False < True < Number < String < Array < Map`, recursively
//! within each class. `decode` is its inverse, up to the numeric precision trade-off documented
//! in [`numeric`].
mod composite;
mod numeric;
mod string;

use crate::config::Config;
use crate::constants::*;
use crate::error::{CollateError, Result};
use crate::value::Value;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Encode `value` into its collated byte form under `config`.
#[cfg_attr(feature = "trace", trace)]
pub fn encode(config: &Config, value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, config, value)?;
    Ok(out)
}

fn encode_into(out: &mut Vec<u8>, config: &Config, value: &Value) -> Result<()> {
    // `UnknownTag` has no collation representation of its own - it collates exactly as its
    // inner value - so it is peeled off before the generic `type_rank()` push below, which
    // would otherwise double-push a tag byte via its self-recursive rank.
    if let Value::UnknownTag(_, inner) = value {
        return encode_into(out, config, inner);
    }
    out.push(value.type_rank());
    match value {
        Value::Missing | Value::Null | Value::Bool(_) => {}
        Value::Int(n) => numeric::encode(out, *n as f64),
        Value::Uint(n) => numeric::encode(out, *n as f64),
        Value::Float(n) => numeric::encode(out, *n),
        Value::Epoch(n) => numeric::encode(out, *n as f64),
        Value::EpochFloat(n) => numeric::encode(out, *n),
        Value::String(s) => {
            string::encode(out, s);
            out.push(TERMINATOR);
        }
        Value::Uri(s) | Value::Regexp(s) | Value::Mime(s) => {
            string::encode(out, s);
            out.push(TERMINATOR);
        }
        Value::DateTime(dt) => {
            string::encode(out, &dt.to_rfc3339());
            out.push(TERMINATOR);
        }
        Value::Bytes(bytes) => {
            string::encode(out, &hex_string(bytes));
            out.push(TERMINATOR);
        }
        Value::BigIntPos(bytes) | Value::BigIntNeg(bytes) => {
            string::encode(out, &hex_string(bytes));
            out.push(TERMINATOR);
        }
        Value::CborEnc(bytes) | Value::CborPrefix(bytes) => {
            string::encode(out, &hex_string(bytes));
            out.push(TERMINATOR);
        }
        Value::Base64Url(bytes) | Value::Base64(bytes) => {
            string::encode(out, &hex_string(bytes));
            out.push(TERMINATOR);
        }
        Value::Array(items) => {
            composite::encode_array(out, config, items, encode_into)?;
        }
        Value::DecimalFraction(exponent, mantissa) | Value::BigFloat(exponent, mantissa) => {
            let items = [Value::Int(*exponent), Value::Int(*mantissa)];
            composite::encode_array(out, config, &items, encode_into)?;
        }
        Value::Map(pairs) => {
            composite::encode_map(out, config, pairs, encode_into)?;
        }
        Value::UnknownTag(..) => return Err(CollateError::invariant("UnknownTag must be unwrapped before dispatch")),
    }
    Ok(())
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a collated byte string back into a `Value`. Numbers decode as `Int`/`Uint` when
/// `config.number_kind()` is `SmartNumber` and the collated value is integral and in range,
/// otherwise as `Float` - extended CBOR-only forms (dates, bignums, tags) do not round-trip
/// through collation and always decode back as their plain `Value` reduction.
#[cfg_attr(feature = "trace", trace)]
pub fn decode(config: &Config, bytes: &[u8]) -> Result<Value> {
    let mut cursor = 0;
    let value = decode_item(bytes, &mut cursor, config)?;
    let value = coerce_number_kind(config, value);
    if cursor != bytes.len() {
        return Err(CollateError::malformed(cursor, "trailing bytes after collated value"));
    }
    Ok(value)
}

fn coerce_number_kind(config: &Config, value: Value) -> Value {
    use crate::config::NumberKind;
    match value {
        Value::Float(n) if config.number_kind() == NumberKind::SmartNumber && n.fract() == 0.0 => {
            if (0.0..=u64::MAX as f64).contains(&n) {
                Value::Uint(n as u64)
            } else if (i64::MIN as f64..0.0).contains(&n) {
                Value::Int(n as i64)
            } else {
                Value::Float(n)
            }
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| coerce_number_kind(config, v)).collect())
        }
        Value::Map(pairs) => Value::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k, coerce_number_kind(config, v)))
                .collect(),
        ),
        other => other,
    }
}

fn decode_item(bytes: &[u8], cursor: &mut usize, config: &Config) -> Result<Value> {
    let tag = *bytes
        .get(*cursor)
        .ok_or_else(|| CollateError::malformed(*cursor, "unexpected end of collated input"))?;
    *cursor += 1;
    match tag {
        TYPE_MISSING => Ok(Value::Missing),
        TYPE_NULL => Ok(Value::Null),
        TYPE_FALSE => Ok(Value::Bool(false)),
        TYPE_TRUE => Ok(Value::Bool(true)),
        TYPE_NUMBER => Ok(Value::Float(numeric::decode(bytes, cursor)?)),
        TYPE_STRING => {
            let s = string::decode(bytes, cursor)?;
            *cursor += 1; // the terminator `decode` left unconsumed
            Ok(Value::String(s))
        }
        TYPE_ARRAY => {
            let items = if config.array_len_prefix() {
                composite::decode_array_counted(bytes, cursor, |b, c| decode_item(b, c, config))?
            } else {
                composite::decode_array_stream(bytes, cursor, |b, c| decode_item(b, c, config))?
            };
            Ok(Value::Array(items))
        }
        TYPE_OBJ => {
            let pairs = if config.property_len_prefix() {
                composite::decode_map_counted(bytes, cursor, |b, c| decode_item(b, c, config))?
            } else {
                composite::decode_map_stream(bytes, cursor, |b, c| decode_item(b, c, config))?
            };
            Ok(Value::Map(pairs))
        }
        other => Err(CollateError::malformed(*cursor - 1, describe_bad_tag(other))),
    }
}

fn describe_bad_tag(_tag: u8) -> &'static str {
    "unrecognized collation type tag"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn cfg() -> Config {
        Config::new()
    }

    #[test]
    fn scalars_roundtrip() {
        let c = cfg();
        for v in [Value::Missing, Value::Null, Value::Bool(true), Value::Bool(false)] {
            let bytes = encode(&c, &v).unwrap();
            assert_eq!(decode(&c, &bytes).unwrap(), v);
        }
    }

    #[test]
    fn type_class_ordering_holds() {
        let c = cfg();
        let values = vec![
            Value::Missing,
            Value::Null,
            Value::Bool(false),
            Value::Bool(true),
            Value::Int(5),
            Value::String("a".into()),
            Value::Array(vec![Value::Int(1)]),
            Value::Map(vec![("a".into(), Value::Int(1))]),
        ];
        let encoded: Vec<Vec<u8>> = values.iter().map(|v| encode(&c, v).unwrap()).collect();
        for w in encoded.windows(2) {
            assert!(w[0] < w[1], "type classes must sort in domain order");
        }
    }

    #[test]
    fn array_roundtrips() {
        let c = cfg();
        let v = Value::Array(vec![Value::Int(1), Value::String("x".into()), Value::Null]);
        let bytes = encode(&c, &v).unwrap();
        let back = decode(&c, &bytes).unwrap();
        assert_eq!(
            back,
            Value::Array(vec![Value::Float(1.0), Value::String("x".into()), Value::Null])
        );
    }

    #[test]
    fn map_sorts_by_collated_key_regardless_of_insertion_order() {
        let c = cfg();
        let a = Value::Map(vec![("b".into(), Value::Int(1)), ("a".into(), Value::Int(2))]);
        let b = Value::Map(vec![("a".into(), Value::Int(2)), ("b".into(), Value::Int(1))]);
        assert_eq!(encode(&c, &a).unwrap(), encode(&c, &b).unwrap());
    }

    #[test]
    fn smart_number_kind_recovers_integers() {
        let c = cfg().with_number_kind(crate::config::NumberKind::SmartNumber);
        let bytes = encode(&c, &Value::Int(42)).unwrap();
        assert_eq!(decode(&c, &bytes).unwrap(), Value::Uint(42));
    }

    #[test]
    fn rejects_map_with_more_properties_than_numkeys() {
        let c = Config::new().with_pool_sizes(64, 2, 256, 64);
        let v = Value::Map(vec![
            ("a".into(), Value::Int(1)),
            ("b".into(), Value::Int(2)),
            ("c".into(), Value::Int(3)),
        ]);
        assert!(matches!(
            encode(&c, &v),
            Err(CollateError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn rejects_map_whose_values_exceed_itemlen() {
        let c = Config::new().with_pool_sizes(64, 16, 4, 64);
        let v = Value::Map(vec![("a".into(), Value::String("a longer string value".into()))]);
        assert!(matches!(
            encode(&c, &v),
            Err(CollateError::BufferTooSmall { .. })
        ));
    }
}
