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
//! Value tree -> CBOR (RFC 8949) encoder.
use crate::cbor::base64;
use crate::config::{Config, ContainerEncoding};
use crate::constants::*;
use crate::error::Result;
use crate::value::Value;

#[cfg(feature = "trace")]
use func_trace::trace;

#[cfg(feature = "trace")]
func_trace::init_depth_var!();

/// Write the minimal-length initial byte plus argument for `major | n`, per RFC 8949 §3: the
/// smallest additional-information form that can hold `n` is always used.
fn write_head(out: &mut Vec<u8>, major: u8, n: u64) {
    if n <= AI_MAX_IMMEDIATE as u64 {
        out.push(major | n as u8);
    } else if n <= u8::MAX as u64 {
        out.push(major | AI_ONE_BYTE);
        out.push(n as u8);
    } else if n <= u16::MAX as u64 {
        out.push(major | AI_TWO_BYTES);
        out.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= u32::MAX as u64 {
        out.push(major | AI_FOUR_BYTES);
        out.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        out.push(major | AI_EIGHT_BYTES);
        out.extend_from_slice(&n.to_be_bytes());
    }
}

fn write_tag(out: &mut Vec<u8>, tag: u64) {
    write_head(out, MT_TAG, tag);
}

fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_head(out, MT_BSTR, bytes.len() as u64);
    out.extend_from_slice(bytes);
}

fn write_text(out: &mut Vec<u8>, text: &str) {
    write_head(out, MT_TSTR, text.len() as u64);
    out.extend_from_slice(text.as_bytes());
}

fn write_int(out: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        write_head(out, MT_UINT, n as u64);
    } else {
        write_head(out, MT_NINT, (-1 - n) as u64);
    }
}

/// Encode `value` to its CBOR representation under `config`.
#[cfg_attr(feature = "trace", trace)]
pub fn encode(config: &Config, value: &Value) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(&mut out, config, value)?;
    Ok(out)
}

fn encode_into(out: &mut Vec<u8>, config: &Config, value: &Value) -> Result<()> {
    match value {
        Value::Missing => out.push(MT_SIMPLE | SIMPLE_UNDEFINED),
        Value::Null => out.push(MT_SIMPLE | SIMPLE_NULL),
        Value::Bool(false) => out.push(MT_SIMPLE | SIMPLE_FALSE),
        Value::Bool(true) => out.push(MT_SIMPLE | SIMPLE_TRUE),
        Value::Int(n) => write_int(out, *n),
        Value::Uint(n) => write_head(out, MT_UINT, *n),
        Value::Float(n) => {
            out.push(MT_SIMPLE | SIMPLE_F64);
            out.extend_from_slice(&n.to_bits().to_be_bytes());
        }
        Value::String(s) => write_text(out, s),
        Value::Bytes(bytes) => write_bytes(out, bytes),
        Value::Array(items) => {
            encode_array_head(out, config, items.len());
            for item in items {
                encode_into(out, config, item)?;
            }
            if is_streamed(config) {
                out.push(BREAK);
            }
        }
        Value::Map(pairs) => {
            encode_map_head(out, config, pairs.len());
            for (key, item) in pairs {
                write_text(out, key);
                encode_into(out, config, item)?;
            }
            if is_streamed(config) {
                out.push(BREAK);
            }
        }
        Value::DateTime(dt) => {
            write_tag(out, TAG_DATETIME);
            write_text(out, &dt.to_rfc3339());
        }
        Value::Epoch(n) => {
            write_tag(out, TAG_EPOCH);
            write_int(out, *n);
        }
        Value::EpochFloat(n) => {
            write_tag(out, TAG_EPOCH);
            out.push(MT_SIMPLE | SIMPLE_F64);
            out.extend_from_slice(&n.to_bits().to_be_bytes());
        }
        Value::BigIntPos(bytes) => {
            write_tag(out, TAG_POS_BIGNUM);
            write_bytes(out, bytes);
        }
        Value::BigIntNeg(bytes) => {
            write_tag(out, TAG_NEG_BIGNUM);
            write_bytes(out, bytes);
        }
        Value::DecimalFraction(exponent, mantissa) => {
            write_tag(out, TAG_DECIMAL_FRACTION);
            // Always a definite 2-element array: there is nothing to stream and no BREAK
            // follows, unlike the general Array/Map arms above.
            write_head(out, MT_ARRAY, 2);
            write_int(out, *exponent);
            write_int(out, *mantissa);
        }
        Value::BigFloat(exponent, mantissa) => {
            write_tag(out, TAG_BIGFLOAT);
            write_head(out, MT_ARRAY, 2);
            write_int(out, *exponent);
            write_int(out, *mantissa);
        }
        Value::CborEnc(bytes) => {
            write_tag(out, TAG_CBOR_ENC);
            write_bytes(out, bytes);
        }
        Value::CborPrefix(bytes) => {
            write_tag(out, TAG_CBOR_PREFIX);
            out.extend_from_slice(bytes);
        }
        Value::Uri(s) => {
            write_tag(out, TAG_URI);
            write_text(out, s);
        }
        Value::Base64Url(bytes) => {
            write_tag(out, TAG_BASE64URL);
            write_text(out, &base64::encode_url(bytes));
        }
        Value::Base64(bytes) => {
            write_tag(out, TAG_BASE64);
            write_text(out, &base64::encode_standard(bytes));
        }
        Value::Regexp(s) => {
            write_tag(out, TAG_REGEXP);
            write_text(out, s);
        }
        Value::Mime(s) => {
            write_tag(out, TAG_MIME);
            write_text(out, s);
        }
        Value::UnknownTag(tag, inner) => {
            write_tag(out, *tag);
            encode_into(out, config, inner)?;
        }
    }
    Ok(())
}

fn is_streamed(config: &Config) -> bool {
    matches!(config.container_encoding(), ContainerEncoding::Stream)
}

fn encode_array_head(out: &mut Vec<u8>, config: &Config, len: usize) {
    if is_streamed(config) {
        out.push(MT_ARRAY | AI_INDEFINITE);
    } else {
        write_head(out, MT_ARRAY, len as u64);
    }
}

fn encode_map_head(out: &mut Vec<u8>, config: &Config, len: usize) {
    if is_streamed(config) {
        out.push(MT_MAP | AI_INDEFINITE);
    } else {
        write_head(out, MT_MAP, len as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::new().with_container_encoding(ContainerEncoding::LengthPrefix)
    }

    #[test]
    fn encodes_small_uint_as_immediate() {
        let bytes = encode(&cfg(), &Value::Uint(5)).unwrap();
        assert_eq!(bytes, vec![MT_UINT | 5]);
    }

    #[test]
    fn encodes_negative_int_with_offset_magnitude() {
        let bytes = encode(&cfg(), &Value::Int(-1)).unwrap();
        assert_eq!(bytes, vec![MT_NINT | 0]);
        let bytes = encode(&cfg(), &Value::Int(-10)).unwrap();
        assert_eq!(bytes, vec![MT_NINT | 9]);
    }

    #[test]
    fn encodes_definite_array() {
        let v = Value::Array(vec![Value::Uint(1), Value::Uint(2)]);
        let bytes = encode(&cfg(), &v).unwrap();
        assert_eq!(bytes, vec![MT_ARRAY | 2, MT_UINT | 1, MT_UINT | 2]);
    }

    #[test]
    fn encodes_indefinite_array_when_streamed() {
        let config = Config::new().with_container_encoding(ContainerEncoding::Stream);
        let v = Value::Array(vec![Value::Uint(1)]);
        let bytes = encode(&config, &v).unwrap();
        assert_eq!(bytes, vec![MT_ARRAY | AI_INDEFINITE, MT_UINT | 1, BREAK]);
    }
}
