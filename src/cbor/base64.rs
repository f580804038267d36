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
//! Base64 / base64url codecs for CBOR tags 33 and 34 (RFC 4648), with padding.
use crate::error::{CollateError, Result};

const STANDARD: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const URL_SAFE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn encode_with(alphabet: &[u8; 64], bytes: &[u8]) -> String {
    let mut out = String::with_capacity((bytes.len() + 2) / 3 * 4);
    for chunk in bytes.chunks(3) {
        let b0 = chunk[0];
        let b1 = *chunk.get(1).unwrap_or(&0);
        let b2 = *chunk.get(2).unwrap_or(&0);
        let n = ((b0 as u32) << 16) | ((b1 as u32) << 8) | b2 as u32;
        out.push(alphabet[(n >> 18 & 0x3f) as usize] as char);
        out.push(alphabet[(n >> 12 & 0x3f) as usize] as char);
        out.push(if chunk.len() > 1 { alphabet[(n >> 6 & 0x3f) as usize] as char } else { '=' });
        out.push(if chunk.len() > 2 { alphabet[(n & 0x3f) as usize] as char } else { '=' });
    }
    out
}

fn decode_with(alphabet: &[u8; 64], text: &str) -> Result<Vec<u8>> {
    let lookup = |c: u8| -> Result<u32> {
        alphabet
            .iter()
            .position(|&a| a == c)
            .map(|p| p as u32)
            .ok_or_else(|| CollateError::unsupported("invalid base64 character"))
    };
    let clean: Vec<u8> = text.bytes().filter(|&b| b != b'=').collect();
    let mut out = Vec::with_capacity(clean.len() * 3 / 4 + 3);
    for chunk in clean.chunks(4) {
        let mut n = 0u32;
        for &c in chunk {
            n = (n << 6) | lookup(c)?;
        }
        n <<= 6 * (4 - chunk.len());
        let bytes = n.to_be_bytes();
        out.extend_from_slice(&bytes[1..1 + (chunk.len() * 3 / 4).max(1)]);
    }
    out.truncate(clean.len() * 3 / 4);
    Ok(out)
}

pub(crate) fn encode_standard(bytes: &[u8]) -> String {
    encode_with(STANDARD, bytes)
}

pub(crate) fn encode_url(bytes: &[u8]) -> String {
    encode_with(URL_SAFE, bytes).trim_end_matches('=').to_string()
}

pub(crate) fn decode_standard(text: &str) -> Result<Vec<u8>> {
    decode_with(STANDARD, text)
}

pub(crate) fn decode_url(text: &str) -> Result<Vec<u8>> {
    decode_with(URL_SAFE, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_standard() {
        for data in [b"".as_slice(), b"f", b"fo", b"foo", b"foob", b"fooba", b"foobar"] {
            let encoded = encode_standard(data);
            assert_eq!(decode_standard(&encoded).unwrap(), data);
        }
        assert_eq!(encode_standard(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn roundtrips_url_safe() {
        let data = [0xfb, 0xff, 0xbf];
        let encoded = encode_url(&data);
        assert!(!encoded.contains('+') && !encoded.contains('/'));
        assert_eq!(decode_url(&encoded).unwrap(), data);
    }
}
