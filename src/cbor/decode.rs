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
//! CBOR (RFC 8949) -> value tree decoder.
//!
//! Dispatch is a single match over the initial byte's major-type bits, the same shape as the
//! `parse_item` dispatch table this module is grounded on. Every `AnyUnsigned`-style argument
//! read goes through `read_argument`, which enforces minimal-length encoding is not required to
//! be checked on decode (RFC 8949 permits decoders to accept any length) but does enforce the
//! buffer actually contains the bytes it claims to.
use chrono::DateTime;

use crate::cbor::base64;
use crate::config::Config;
use crate::constants::*;
use crate::error::{CollateError, Result};
use crate::value::Value;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Decode a single CBOR item from the front of `bytes`. Trailing bytes are not an error - CBOR
/// streams may be concatenated - callers that want strict single-item decoding should check the
/// returned cursor via [`decode_one`].
#[cfg_attr(feature = "trace", trace)]
pub fn decode(config: &Config, bytes: &[u8]) -> Result<Value> {
    let mut cursor = 0;
    let value = parse_item(bytes, &mut cursor, config)?;
    Ok(value)
}

/// Decode exactly one CBOR item and require that it consumes the entire buffer.
#[cfg_attr(feature = "trace", trace)]
pub fn decode_one(config: &Config, bytes: &[u8]) -> Result<Value> {
    let mut cursor = 0;
    let value = parse_item(bytes, &mut cursor, config)?;
    if cursor != bytes.len() {
        return Err(CollateError::malformed(cursor, "trailing bytes after CBOR item"));
    }
    Ok(value)
}

fn read_argument(bytes: &[u8], cursor: &mut usize, ai: u8) -> Result<u64> {
    match ai {
        0..=23 => Ok(ai as u64),
        AI_ONE_BYTE => {
            let b = *bytes
                .get(*cursor)
                .ok_or_else(|| CollateError::malformed(*cursor, "truncated 1-byte argument"))?;
            *cursor += 1;
            Ok(b as u64)
        }
        AI_TWO_BYTES => read_n(bytes, cursor, 2),
        AI_FOUR_BYTES => read_n(bytes, cursor, 4),
        AI_EIGHT_BYTES => read_n(bytes, cursor, 8),
        _ => Err(CollateError::malformed(*cursor, "invalid additional-information value")),
    }
}

fn read_n(bytes: &[u8], cursor: &mut usize, n: usize) -> Result<u64> {
    let slice = bytes
        .get(*cursor..*cursor + n)
        .ok_or_else(|| CollateError::malformed(*cursor, "truncated multi-byte argument"))?;
    *cursor += n;
    let mut buf = [0u8; 8];
    buf[8 - n..].copy_from_slice(slice);
    Ok(u64::from_be_bytes(buf))
}

fn parse_item(bytes: &[u8], cursor: &mut usize, config: &Config) -> Result<Value> {
    let initial = *bytes
        .get(*cursor)
        .ok_or_else(|| CollateError::malformed(*cursor, "unexpected end of CBOR input"))?;
    *cursor += 1;
    let major = initial & !AI_MASK;
    let ai = initial & AI_MASK;

    match major {
        MT_UINT => Ok(Value::Uint(read_argument(bytes, cursor, ai)?)),
        MT_NINT => {
            let n = read_argument(bytes, cursor, ai)?;
            Ok(Value::Int(-1 - i64::try_from(n).map_err(|_| {
                CollateError::unsupported("negative integer magnitude out of i64 range")
            })?))
        }
        MT_BSTR => {
            let len = read_argument(bytes, cursor, ai)? as usize;
            let data = read_bytes(bytes, cursor, len)?;
            Ok(Value::Bytes(data))
        }
        MT_TSTR => {
            let len = read_argument(bytes, cursor, ai)? as usize;
            let data = read_bytes(bytes, cursor, len)?;
            let text = String::from_utf8(data)
                .map_err(|_| CollateError::malformed(*cursor, "CBOR text string is not UTF-8"))?;
            Ok(Value::String(text))
        }
        MT_ARRAY => {
            let items = if ai == AI_INDEFINITE {
                let mut items = Vec::new();
                while *bytes.get(*cursor).unwrap_or(&BREAK) != BREAK {
                    items.push(parse_item(bytes, cursor, config)?);
                }
                *cursor += 1;
                items
            } else {
                let len = read_argument(bytes, cursor, ai)? as usize;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(parse_item(bytes, cursor, config)?);
                }
                items
            };
            Ok(Value::Array(items))
        }
        MT_MAP => {
            let pairs = if ai == AI_INDEFINITE {
                let mut pairs = Vec::new();
                while *bytes.get(*cursor).unwrap_or(&BREAK) != BREAK {
                    pairs.push(parse_pair(bytes, cursor, config)?);
                }
                *cursor += 1;
                pairs
            } else {
                let len = read_argument(bytes, cursor, ai)? as usize;
                let mut pairs = Vec::with_capacity(len);
                for _ in 0..len {
                    pairs.push(parse_pair(bytes, cursor, config)?);
                }
                pairs
            };
            Ok(Value::Map(pairs))
        }
        MT_TAG => {
            let tag = read_argument(bytes, cursor, ai)?;
            parse_tagged(bytes, cursor, config, tag)
        }
        MT_SIMPLE => parse_simple(bytes, cursor, ai),
        _ => Err(CollateError::invariant("major type computed outside the eight 3-bit patterns")),
    }
}

fn read_bytes(bytes: &[u8], cursor: &mut usize, len: usize) -> Result<Vec<u8>> {
    let slice = bytes
        .get(*cursor..*cursor + len)
        .ok_or_else(|| CollateError::malformed(*cursor, "truncated byte/text string"))?;
    *cursor += len;
    Ok(slice.to_vec())
}

fn parse_pair(bytes: &[u8], cursor: &mut usize, config: &Config) -> Result<(String, Value)> {
    let key = parse_item(bytes, cursor, config)?;
    let value = parse_item(bytes, cursor, config)?;
    let key = key
        .as_str()
        .ok_or_else(|| CollateError::unsupported("CBOR map key must decode to a string"))?
        .to_owned();
    Ok((key, value))
}

fn parse_simple(bytes: &[u8], cursor: &mut usize, ai: u8) -> Result<Value> {
    match ai {
        SIMPLE_FALSE => Ok(Value::Bool(false)),
        SIMPLE_TRUE => Ok(Value::Bool(true)),
        SIMPLE_NULL => Ok(Value::Null),
        SIMPLE_UNDEFINED => Ok(Value::Missing),
        SIMPLE_F16 => {
            let n = read_n(bytes, cursor, 2)? as u16;
            Ok(Value::Float(half::f16::from_bits(n).to_f64()))
        }
        SIMPLE_F32 => {
            let n = read_n(bytes, cursor, 4)? as u32;
            Ok(Value::Float(f32::from_bits(n) as f64))
        }
        SIMPLE_F64 => {
            let n = read_n(bytes, cursor, 8)?;
            Ok(Value::Float(f64::from_bits(n)))
        }
        AI_ONE_BYTE => {
            let _ = read_n(bytes, cursor, 1)?;
            Err(CollateError::unsupported("extended simple values are not supported"))
        }
        _ => Err(CollateError::malformed(*cursor, "invalid major-7 additional-information value")),
    }
}

fn parse_tagged(bytes: &[u8], cursor: &mut usize, config: &Config, tag: u64) -> Result<Value> {
    match tag {
        TAG_DATETIME => {
            let inner = parse_item(bytes, cursor, config)?;
            let text = inner
                .as_str()
                .ok_or_else(|| CollateError::unsupported("tag 0 payload must be a text string"))?;
            let dt = DateTime::parse_from_rfc3339(text)
                .map_err(|_| CollateError::malformed(*cursor, "invalid RFC 3339 date-time"))?;
            Ok(Value::DateTime(dt))
        }
        TAG_EPOCH => {
            let inner = parse_item(bytes, cursor, config)?;
            match inner {
                Value::Uint(n) => Ok(Value::Epoch(i64::try_from(n).map_err(|_| {
                    CollateError::unsupported("epoch seconds out of i64 range")
                })?)),
                Value::Int(n) => Ok(Value::Epoch(n)),
                Value::Float(n) => Ok(Value::EpochFloat(n)),
                _ => Err(CollateError::unsupported("tag 1 payload must be a number")),
            }
        }
        TAG_POS_BIGNUM => Ok(Value::BigIntPos(expect_bytes(bytes, cursor, config)?)),
        TAG_NEG_BIGNUM => Ok(Value::BigIntNeg(expect_bytes(bytes, cursor, config)?)),
        TAG_DECIMAL_FRACTION => {
            let (e, m) = expect_exponent_mantissa(bytes, cursor, config)?;
            Ok(Value::DecimalFraction(e, m))
        }
        TAG_BIGFLOAT => {
            let (e, m) = expect_exponent_mantissa(bytes, cursor, config)?;
            Ok(Value::BigFloat(e, m))
        }
        TAG_CBOR_ENC => Ok(Value::CborEnc(expect_bytes(bytes, cursor, config)?.into())),
        TAG_URI => Ok(Value::Uri(expect_text(bytes, cursor, config)?)),
        TAG_BASE64URL => {
            let text = expect_text(bytes, cursor, config)?;
            Ok(Value::Base64Url(base64::decode_url(&text)?))
        }
        TAG_BASE64 => {
            let text = expect_text(bytes, cursor, config)?;
            Ok(Value::Base64(base64::decode_standard(&text)?))
        }
        TAG_REGEXP => {
            let text = expect_text(bytes, cursor, config)?;
            regex::Regex::new(&text)
                .map_err(|e| CollateError::RegexpCompile { offset: *cursor, reason: e.to_string() })?;
            Ok(Value::Regexp(text))
        }
        TAG_MIME => Ok(Value::Mime(expect_text(bytes, cursor, config)?)),
        TAG_CBOR_PREFIX => {
            let start = *cursor;
            let inner = parse_item(bytes, cursor, config)?;
            let _ = &inner;
            Ok(Value::CborPrefix(bytes[start..*cursor].to_vec().into()))
        }
        other => {
            let inner = parse_item(bytes, cursor, config)?;
            Ok(Value::UnknownTag(other, Box::new(inner)))
        }
    }
}

fn expect_bytes(bytes: &[u8], cursor: &mut usize, config: &Config) -> Result<Vec<u8>> {
    match parse_item(bytes, cursor, config)? {
        Value::Bytes(b) => Ok(b),
        _ => Err(CollateError::unsupported("expected a CBOR byte string")),
    }
}

fn expect_text(bytes: &[u8], cursor: &mut usize, config: &Config) -> Result<String> {
    match parse_item(bytes, cursor, config)? {
        Value::String(s) => Ok(s),
        _ => Err(CollateError::unsupported("expected a CBOR text string")),
    }
}

fn expect_exponent_mantissa(bytes: &[u8], cursor: &mut usize, config: &Config) -> Result<(i64, i64)> {
    match parse_item(bytes, cursor, config)? {
        Value::Array(items) if items.len() == 2 => {
            let e = as_i64(&items[0])?;
            let m = as_i64(&items[1])?;
            Ok((e, m))
        }
        _ => Err(CollateError::unsupported("expected a 2-element [exponent, mantissa] array")),
    }
}

fn as_i64(value: &Value) -> Result<i64> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Uint(n) => i64::try_from(*n).map_err(|_| CollateError::unsupported("mantissa/exponent out of i64 range")),
        _ => Err(CollateError::unsupported("expected an integer")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbor::encode;

    fn cfg() -> Config {
        Config::new()
    }

    #[test]
    fn roundtrips_scalars() {
        let c = cfg();
        for v in [Value::Null, Value::Bool(true), Value::Uint(200), Value::Int(-200)] {
            let bytes = encode::encode(&c, &v).unwrap();
            assert_eq!(decode_one(&c, &bytes).unwrap(), v);
        }
    }

    #[test]
    fn roundtrips_tagged_datetime() {
        let c = cfg();
        let dt = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap();
        let v = Value::DateTime(dt);
        let bytes = encode::encode(&c, &v).unwrap();
        assert_eq!(decode_one(&c, &bytes).unwrap(), v);
    }

    #[test]
    fn unknown_tag_round_trips_explicitly() {
        let c = cfg();
        let v = Value::UnknownTag(1000, Box::new(Value::Uint(7)));
        let bytes = encode::encode(&c, &v).unwrap();
        assert_eq!(decode_one(&c, &bytes).unwrap(), v);
    }

    #[test]
    fn indefinite_array_decodes() {
        let c = Config::new().with_container_encoding(crate::config::ContainerEncoding::Stream);
        let v = Value::Array(vec![Value::Uint(1), Value::Uint(2)]);
        let bytes = encode::encode(&c, &v).unwrap();
        assert_eq!(decode_one(&c, &bytes).unwrap(), v);
    }
}
