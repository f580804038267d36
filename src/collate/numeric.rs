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
//! Order-preserving numeric collation.
//!
//! Every number - whatever its `Value` representation - collates through the same IEEE-754
//! signed-magnitude transform, so an `Int`, a `Uint` and a `Float` holding the same mathematical
//! value always produce the same collated bytes. Integers outside `f64`'s 53-bit mantissa lose
//! precision under this transform; this codec accepts that trade-off in exchange for a single
//! consistent numeric ordering across representations (see DESIGN.md).
//!
//! The transform: take the `f64`'s raw bit pattern as a `u64`. If the sign bit is set (the value
//! is negative), invert every bit - this both clears the sign bit and reverses the magnitude
//! ordering, so among negative numbers the one with larger magnitude sorts first. If the sign
//! bit is clear (zero or positive), just set the sign bit - this keeps positive numbers ordered
//! among themselves and places them after every negative number. The 8 resulting bytes are
//! written big-endian, through the same byte-stuffing used for strings, so `TERMINATOR` (0x00)
//! never appears inside the payload.
use crate::constants::{NUM_NEG, NUM_POS, STUFF_ESCAPE, TERMINATOR};
use crate::error::{CollateError, Result};

/// Transform an `f64` into its order-preserving unsigned bit pattern.
fn transform(value: f64) -> u64 {
    // -0.0 and 0.0 must collate identically; canonicalize before taking the bit pattern.
    let value = if value == 0.0 { 0.0 } else { value };
    let bits = value.to_bits();
    if bits & (1 << 63) != 0 {
        !bits
    } else {
        bits | (1 << 63)
    }
}

/// Invert `transform`, recovering the original `f64` bit pattern.
fn untransform(word: u64) -> f64 {
    let bits = if word & (1 << 63) != 0 {
        word & !(1 << 63)
    } else {
        !word
    };
    f64::from_bits(bits)
}

/// Append the collated form of `value` to `out`: a sign byte followed by the byte-stuffed,
/// big-endian transformed word. Does not write the surrounding `TYPE_NUMBER` tag or terminator;
/// callers (the composite collator) own item framing.
pub(crate) fn encode(out: &mut Vec<u8>, value: f64) {
    out.push(if value.is_sign_negative() && value != 0.0 {
        NUM_NEG
    } else {
        NUM_POS
    });
    let word = transform(value);
    for byte in word.to_be_bytes() {
        if byte == TERMINATOR {
            out.push(TERMINATOR);
            out.push(STUFF_ESCAPE);
        } else {
            out.push(byte);
        }
    }
}

/// Read a collated number starting at `bytes[*cursor]`, advancing `*cursor` past it (but not
/// past the item terminator, which the caller consumes).
pub(crate) fn decode(bytes: &[u8], cursor: &mut usize) -> Result<f64> {
    let sign = *bytes
        .get(*cursor)
        .ok_or_else(|| CollateError::malformed(*cursor, "truncated number: missing sign byte"))?;
    if sign != NUM_NEG && sign != NUM_POS {
        return Err(CollateError::malformed(*cursor, "invalid number sign byte"));
    }
    *cursor += 1;

    let mut word_bytes = [0u8; 8];
    let mut filled = 0;
    while filled < 8 {
        let byte = *bytes.get(*cursor).ok_or_else(|| {
            CollateError::malformed(*cursor, "truncated number: not enough payload bytes")
        })?;
        if byte == TERMINATOR {
            let escape = *bytes.get(*cursor + 1).ok_or_else(|| {
                CollateError::malformed(*cursor, "truncated number: dangling stuff byte")
            })?;
            if escape != STUFF_ESCAPE {
                return Err(CollateError::malformed(
                    *cursor,
                    "truncated number: unstuffed terminator inside payload",
                ));
            }
            word_bytes[filled] = TERMINATOR;
            *cursor += 2;
        } else {
            word_bytes[filled] = byte;
            *cursor += 1;
        }
        filled += 1;
    }
    Ok(untransform(u64::from_be_bytes(word_bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(v: f64) -> f64 {
        let mut buf = Vec::new();
        encode(&mut buf, v);
        let mut cursor = 0;
        let out = decode(&buf, &mut cursor).unwrap();
        assert_eq!(cursor, buf.len());
        out
    }

    #[test]
    fn roundtrips_representative_values() {
        for v in [0.0, -0.0, 1.0, -1.0, 3.5, -3.5, 1e300, -1e300, f64::MIN_POSITIVE] {
            assert_eq!(roundtrip(v), v, "{v}");
        }
    }

    #[test]
    fn preserves_total_order() {
        let values = [-1e10, -3.5, -1.0, -0.0001, 0.0, 0.0001, 1.0, 3.5, 1e10];
        let mut encoded: Vec<Vec<u8>> = values
            .iter()
            .map(|v| {
                let mut buf = Vec::new();
                encode(&mut buf, *v);
                buf
            })
            .collect();
        let mut sorted = encoded.clone();
        sorted.sort();
        encoded.sort();
        assert_eq!(encoded, sorted);
        for w in encoded.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn negative_magnitude_reverses() {
        let mut small = Vec::new();
        encode(&mut small, -1.0);
        let mut large = Vec::new();
        encode(&mut large, -100.0);
        assert!(large < small, "larger-magnitude negative must sort first");
    }
}
