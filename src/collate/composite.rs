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
//! Collation of arrays and maps.
//!
//! A map's entries are written in ascending order of their *collated key bytes*, not their
//! insertion order and not their plain-text key order - this is what makes two maps with the
//! same entries in different insertion orders collate identically. The sort is a two-phase
//! write: scan every key into scratch pulled from the config's pool, sort the scratch by
//! collated-key bytes, then copy `(key, value)` pairs into the output buffer in that order. This
//! mirrors the original `gson` library's `codepool`/`keypool` scratch-and-sort map encoder.
use crate::collate::{numeric, string};
use crate::config::Config;
use crate::constants::TERMINATOR;
use crate::error::{CollateError, Result};
use crate::value::Value;

/// Append the collated length prefix for `count`, when the config calls for one.
fn write_len_prefix(out: &mut Vec<u8>, count: usize) {
    numeric::encode(out, count as f64);
}

pub(crate) fn encode_array(
    out: &mut Vec<u8>,
    config: &Config,
    items: &[Value],
    encode_item: impl Fn(&mut Vec<u8>, &Config, &Value) -> Result<()>,
) -> Result<()> {
    if config.array_len_prefix() {
        write_len_prefix(out, items.len());
    }
    for item in items {
        encode_item(out, config, item)?;
    }
    out.push(TERMINATOR);
    Ok(())
}

pub(crate) fn encode_map(
    out: &mut Vec<u8>,
    config: &Config,
    pairs: &[(String, Value)],
    encode_item: impl Fn(&mut Vec<u8>, &Config, &Value) -> Result<()>,
) -> Result<()> {
    if pairs.len() > config.pools().numkeys {
        return Err(CollateError::too_small("object has more properties than the configured numkeys limit"));
    }

    // Two-phase write, mirroring the original library's codepool/keypool scratch-and-sort map
    // encoder: every value is collated once into `scratch` (bounded by itemlen), its byte range
    // recorded alongside its collated key, then the whole run is sorted by key and copied to
    // `out` - the key is re-encoded directly into `out` since it is cheap and needed in sorted
    // position anyway, while the value is only ever encoded once.
    let mut scratch = config.pools().acquire_item();
    let mut order = config.pools().acquire_kv();
    order.reserve(pairs.len());
    for (index, (key, value)) in pairs.iter().enumerate() {
        let mut key_bytes = Vec::with_capacity(string::encoded_len(key));
        string::encode(&mut key_bytes, key);

        let value_start = scratch.len();
        encode_item(&mut scratch, config, value)?;
        let value_end = scratch.len();
        if value_end > config.pools().itemlen {
            return Err(CollateError::too_small("object values exceed the configured itemlen limit"));
        }
        order.push((index, key_bytes, value_start, value_end));
    }
    order.sort_by(|a, b| a.1.cmp(&b.1));

    if config.property_len_prefix() {
        write_len_prefix(out, pairs.len());
    }
    for (index, _, value_start, value_end) in order.iter() {
        let (key, _) = &pairs[*index];
        encode_item(out, config, &Value::String(key.clone()))?;
        out.extend_from_slice(&scratch[*value_start..*value_end]);
    }
    out.push(TERMINATOR);
    Ok(())
}

/// Decode a stream-encoded array body: repeatedly decode items until the next byte is an
/// unescaped `TERMINATOR`, which is consumed and not included in any item.
pub(crate) fn decode_array_stream(
    bytes: &[u8],
    cursor: &mut usize,
    decode_item: impl Fn(&[u8], &mut usize) -> Result<Value>,
) -> Result<Vec<Value>> {
    let mut items = Vec::new();
    while bytes.get(*cursor) != Some(&TERMINATOR) {
        items.push(decode_item(bytes, cursor)?);
    }
    *cursor += 1;
    Ok(items)
}

/// Decode a length-prefixed array body.
pub(crate) fn decode_array_counted(
    bytes: &[u8],
    cursor: &mut usize,
    decode_item: impl Fn(&[u8], &mut usize) -> Result<Value>,
) -> Result<Vec<Value>> {
    let count = numeric::decode(bytes, cursor)?.round() as usize;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(decode_item(bytes, cursor)?);
    }
    if bytes.get(*cursor) == Some(&TERMINATOR) {
        *cursor += 1;
    }
    Ok(items)
}

pub(crate) fn decode_map_stream(
    bytes: &[u8],
    cursor: &mut usize,
    decode_item: impl Fn(&[u8], &mut usize) -> Result<Value>,
) -> Result<Vec<(String, Value)>> {
    let mut pairs = Vec::new();
    while bytes.get(*cursor) != Some(&TERMINATOR) {
        let key = decode_item(bytes, cursor)?;
        let value = decode_item(bytes, cursor)?;
        let key = key
            .as_str()
            .ok_or_else(|| crate::error::CollateError::malformed(*cursor, "map key is not a string"))?
            .to_owned();
        pairs.push((key, value));
    }
    *cursor += 1;
    Ok(pairs)
}

pub(crate) fn decode_map_counted(
    bytes: &[u8],
    cursor: &mut usize,
    decode_item: impl Fn(&[u8], &mut usize) -> Result<Value>,
) -> Result<Vec<(String, Value)>> {
    let count = numeric::decode(bytes, cursor)?.round() as usize;
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let key = decode_item(bytes, cursor)?;
        let value = decode_item(bytes, cursor)?;
        let key = key
            .as_str()
            .ok_or_else(|| crate::error::CollateError::malformed(*cursor, "map key is not a string"))?
            .to_owned();
        pairs.push((key, value));
    }
    if bytes.get(*cursor) == Some(&TERMINATOR) {
        *cursor += 1;
    }
    Ok(pairs)
}
