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
//! Order-preserving string collation.
//!
//! UTF-8 byte order already agrees with Unicode scalar value order, so a string collates as
//! its raw UTF-8 bytes, stuffed so `TERMINATOR` never appears inside the payload. `memcmp` over
//! two stuffed strings reproduces the same order as `memcmp` over the two original byte strings,
//! because the stuffing only ever lengthens a run of `0x00` bytes, it never reorders them
//! relative to any other byte value.
use crate::constants::{STUFF_ESCAPE, TERMINATOR};
use crate::error::{CollateError, Result};

pub(crate) fn encode(out: &mut Vec<u8>, s: &str) {
    for &byte in s.as_bytes() {
        if byte == TERMINATOR {
            out.push(TERMINATOR);
            out.push(STUFF_ESCAPE);
        } else {
            out.push(byte);
        }
    }
}

/// Read a stuffed string payload starting at `bytes[*cursor]`, stopping at the first
/// unstuffed `TERMINATOR` (which is left unconsumed, for the caller to strip as the item
/// boundary). Advances `*cursor` past the payload.
pub(crate) fn decode(bytes: &[u8], cursor: &mut usize) -> Result<String> {
    let mut raw = Vec::new();
    loop {
        match bytes.get(*cursor) {
            None => {
                return Err(CollateError::malformed(*cursor, "unterminated collated string"))
            }
            Some(&TERMINATOR) => {
                if bytes.get(*cursor + 1) == Some(&STUFF_ESCAPE) {
                    raw.push(TERMINATOR);
                    *cursor += 2;
                } else {
                    break;
                }
            }
            Some(&byte) => {
                raw.push(byte);
                *cursor += 1;
            }
        }
    }
    String::from_utf8(raw)
        .map_err(|_| CollateError::malformed(*cursor, "collated string is not valid UTF-8"))
}

pub(crate) fn encoded_len(s: &str) -> usize {
    s.as_bytes()
        .iter()
        .map(|b| if *b == TERMINATOR { 2 } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(s: &str) -> String {
        let mut buf = Vec::new();
        encode(&mut buf, s);
        buf.push(TERMINATOR);
        let mut cursor = 0;
        let out = decode(&buf, &mut cursor).unwrap();
        assert_eq!(cursor, buf.len() - 1);
        out
    }

    #[test]
    fn roundtrips_plain_text() {
        assert_eq!(roundtrip("hello"), "hello");
        assert_eq!(roundtrip(""), "");
        assert_eq!(roundtrip("unicode: \u{1F980}"), "unicode: \u{1F980}");
    }

    #[test]
    fn stuffs_embedded_nul() {
        let s = "a\u{0}b";
        let mut buf = Vec::new();
        encode(&mut buf, s);
        assert_eq!(buf, vec![b'a', TERMINATOR, STUFF_ESCAPE, b'b']);
        assert_eq!(roundtrip(s), s);
    }

    #[test]
    fn preserves_lexicographic_order() {
        let values = ["", "a", "aa", "ab", "b", "b\u{0}", "ba"];
        for pair in values.windows(2) {
            let mut a = Vec::new();
            encode(&mut a, pair[0]);
            let mut b = Vec::new();
            encode(&mut b, pair[1]);
            assert!(a < b, "{:?} should sort before {:?}", pair[0], pair[1]);
        }
    }
}
