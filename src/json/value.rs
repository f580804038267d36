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
//! JSON text <-> value tree.
use crate::config::{Config, NumberKind, SpaceKind};
use crate::error::{CollateError, Result};
use crate::value::Value;

/// Parse a complete JSON document into a `Value`. Trailing non-whitespace after the document is
/// rejected, matching the original library's `strict`-independent top-level behavior.
pub fn parse(config: &Config, text: &str) -> Result<Value> {
    let bytes = text.as_bytes();
    let mut cursor = skip_ws(bytes, 0, config);
    let (value, next) = parse_value(bytes, cursor, config)?;
    cursor = skip_ws(bytes, next, config);
    if cursor != bytes.len() {
        return Err(CollateError::malformed(cursor, "trailing data after JSON document"));
    }
    Ok(value)
}

fn is_space(byte: u8, kind: SpaceKind) -> bool {
    match kind {
        SpaceKind::AsciiSpace => matches!(byte, b' ' | b'\t' | b'\r' | b'\n'),
        SpaceKind::UnicodeSpace => matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c),
    }
}

fn skip_ws(bytes: &[u8], mut cursor: usize, config: &Config) -> usize {
    while cursor < bytes.len() && is_space(bytes[cursor], config.space_kind()) {
        cursor += 1;
    }
    cursor
}

fn parse_value(bytes: &[u8], cursor: usize, config: &Config) -> Result<(Value, usize)> {
    let byte = *bytes
        .get(cursor)
        .ok_or_else(|| CollateError::malformed(cursor, "unexpected end of JSON input"))?;
    match byte {
        b'n' => expect_literal(bytes, cursor, "null", Value::Null),
        b't' => expect_literal(bytes, cursor, "true", Value::Bool(true)),
        b'f' => expect_literal(bytes, cursor, "false", Value::Bool(false)),
        b'"' => parse_string_value(bytes, cursor, config),
        b'[' => parse_array(bytes, cursor, config),
        b'{' => parse_object(bytes, cursor, config),
        b'-' | b'0'..=b'9' => parse_number(bytes, cursor, config),
        _ => Err(CollateError::malformed(cursor, "unexpected character in JSON input")),
    }
}

fn expect_literal(bytes: &[u8], cursor: usize, literal: &'static str, value: Value) -> Result<(Value, usize)> {
    let end = cursor + literal.len();
    if bytes.get(cursor..end) == Some(literal.as_bytes()) {
        Ok((value, end))
    } else {
        Err(CollateError::malformed(cursor, "invalid literal in JSON input"))
    }
}

fn parse_number(bytes: &[u8], start: usize, config: &Config) -> Result<(Value, usize)> {
    let mut cursor = start;
    if bytes.get(cursor) == Some(&b'-') {
        cursor += 1;
    }
    let int_start = cursor;
    while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
        cursor += 1;
    }
    if cursor == int_start {
        return Err(CollateError::malformed(start, "invalid number: missing digits"));
    }
    let mut is_integral = true;
    if bytes.get(cursor) == Some(&b'.') {
        is_integral = false;
        cursor += 1;
        let frac_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor == frac_start {
            return Err(CollateError::malformed(start, "invalid number: missing fraction digits"));
        }
    }
    if matches!(bytes.get(cursor), Some(&b'e') | Some(&b'E')) {
        is_integral = false;
        cursor += 1;
        if matches!(bytes.get(cursor), Some(&b'+') | Some(&b'-')) {
            cursor += 1;
        }
        let exp_start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor == exp_start {
            return Err(CollateError::malformed(start, "invalid number: missing exponent digits"));
        }
    }
    let text = std::str::from_utf8(&bytes[start..cursor])
        .map_err(|_| CollateError::malformed(start, "invalid number: not UTF-8"))?;
    let value = match config.number_kind() {
        NumberKind::FloatNumber => Value::Float(
            text.parse::<f64>()
                .map_err(|_| CollateError::malformed(start, "invalid number literal"))?,
        ),
        NumberKind::SmartNumber if is_integral => {
            if let Ok(n) = text.parse::<u64>() {
                Value::Uint(n)
            } else if let Ok(n) = text.parse::<i64>() {
                Value::Int(n)
            } else {
                Value::Float(
                    text.parse::<f64>()
                        .map_err(|_| CollateError::malformed(start, "invalid number literal"))?,
                )
            }
        }
        NumberKind::SmartNumber => Value::Float(
            text.parse::<f64>()
                .map_err(|_| CollateError::malformed(start, "invalid number literal"))?,
        ),
    };
    Ok((value, cursor))
}

/// Decode a JSON string literal starting at the opening quote, returning the decoded text and
/// the cursor just past the closing quote. The unescaped bytes are accumulated in scratch
/// pulled from `config`'s pool, capped at `config`'s `strlen` knob.
fn scan_string(bytes: &[u8], start: usize, config: &Config) -> Result<(String, usize)> {
    debug_assert_eq!(bytes.get(start), Some(&b'"'));
    let mut cursor = start + 1;
    let mut out = config.pools().acquire_string();
    loop {
        if out.len() > config.pools().strlen {
            return Err(CollateError::too_small("decoded JSON string exceeds the configured strlen limit"));
        }
        let byte = *bytes
            .get(cursor)
            .ok_or_else(|| CollateError::malformed(cursor, "unterminated JSON string"))?;
        match byte {
            b'"' => {
                cursor += 1;
                break;
            }
            b'\\' => {
                let esc = *bytes.get(cursor + 1).ok_or_else(|| {
                    CollateError::malformed(cursor, "dangling escape in JSON string")
                })?;
                cursor += 2;
                match esc {
                    b'"' => out.push(b'"'),
                    b'\\' => out.push(b'\\'),
                    b'/' => out.push(b'/'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0c),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'u' => {
                        let (cp, next) = scan_unicode_escape(bytes, cursor)?;
                        cursor = next;
                        let mut buf = [0u8; 4];
                        out.extend_from_slice(cp.encode_utf8(&mut buf).as_bytes());
                    }
                    _ => return Err(CollateError::malformed(cursor, "invalid escape in JSON string")),
                }
            }
            _ => {
                out.push(byte);
                cursor += 1;
            }
        }
    }
    let s = String::from_utf8(out.to_vec())
        .map_err(|_| CollateError::malformed(start, "JSON string is not valid UTF-8"))?;
    Ok((s, cursor))
}

/// `cursor` points at the `u` of a `\u` escape; returns the decoded scalar value and the cursor
/// just past the escape (consuming a second `\uXXXX` surrogate pair if needed).
fn scan_unicode_escape(bytes: &[u8], cursor: usize) -> Result<(char, usize)> {
    let hi = hex4(bytes, cursor)?;
    let mut next = cursor + 4;
    if (0xd800..=0xdbff).contains(&hi) {
        if bytes.get(next..next + 2) == Some(b"\\u") {
            let lo = hex4(bytes, next + 2)?;
            if (0xdc00..=0xdfff).contains(&lo) {
                let combined = 0x10000 + ((hi - 0xd800) << 10) + (lo - 0xdc00);
                next += 6;
                let ch = char::from_u32(combined)
                    .ok_or_else(|| CollateError::malformed(cursor, "invalid surrogate pair"))?;
                return Ok((ch, next));
            }
        }
        return Err(CollateError::malformed(cursor, "unpaired high surrogate in \\u escape"));
    }
    let ch = char::from_u32(hi).unwrap_or('\u{FFFD}');
    Ok((ch, next))
}

fn hex4(bytes: &[u8], cursor: usize) -> Result<u32> {
    let text = bytes
        .get(cursor..cursor + 4)
        .ok_or_else(|| CollateError::malformed(cursor, "truncated \\u escape"))?;
    let text = std::str::from_utf8(text)
        .map_err(|_| CollateError::malformed(cursor, "invalid \\u escape"))?;
    u32::from_str_radix(text, 16).map_err(|_| CollateError::malformed(cursor, "invalid \\u escape"))
}

fn parse_string_value(bytes: &[u8], cursor: usize, config: &Config) -> Result<(Value, usize)> {
    let (s, next) = scan_string(bytes, cursor, config)?;
    if config.do_missing() && s == config.missing_literal() {
        Ok((Value::Missing, next))
    } else {
        Ok((Value::String(s), next))
    }
}

fn parse_array(bytes: &[u8], start: usize, config: &Config) -> Result<(Value, usize)> {
    let mut cursor = skip_ws(bytes, start + 1, config);
    let mut items = Vec::new();
    if bytes.get(cursor) == Some(&b']') {
        return Ok((Value::Array(items), cursor + 1));
    }
    loop {
        let (value, next) = parse_value(bytes, cursor, config)?;
        items.push(value);
        cursor = skip_ws(bytes, next, config);
        match bytes.get(cursor) {
            Some(&b',') => cursor = skip_ws(bytes, cursor + 1, config),
            Some(&b']') => return Ok((Value::Array(items), cursor + 1)),
            _ => return Err(CollateError::malformed(cursor, "expected ',' or ']' in JSON array")),
        }
    }
}

fn parse_object(bytes: &[u8], start: usize, config: &Config) -> Result<(Value, usize)> {
    let mut cursor = skip_ws(bytes, start + 1, config);
    let mut pairs = Vec::new();
    if bytes.get(cursor) == Some(&b'}') {
        return Ok((Value::Map(pairs), cursor + 1));
    }
    loop {
        if bytes.get(cursor) != Some(&b'"') {
            return Err(CollateError::malformed(cursor, "expected string key in JSON object"));
        }
        let (key, next) = scan_string(bytes, cursor, config)?;
        cursor = skip_ws(bytes, next, config);
        if bytes.get(cursor) != Some(&b':') {
            return Err(CollateError::malformed(cursor, "expected ':' in JSON object"));
        }
        cursor = skip_ws(bytes, cursor + 1, config);
        let (value, next) = parse_value(bytes, cursor, config)?;
        pairs.push((key, value));
        cursor = skip_ws(bytes, next, config);
        match bytes.get(cursor) {
            Some(&b',') => cursor = skip_ws(bytes, cursor + 1, config),
            Some(&b'}') => return Ok((Value::Map(pairs), cursor + 1)),
            _ => return Err(CollateError::malformed(cursor, "expected ',' or '}' in JSON object")),
        }
    }
}

/// Render a `Value` back to JSON text.
pub fn write(config: &Config, value: &Value) -> Result<String> {
    let mut out = String::new();
    write_into(&mut out, config, value)?;
    Ok(out)
}

fn write_into(out: &mut String, config: &Config, value: &Value) -> Result<()> {
    match value {
        Value::Missing => {
            if config.do_missing() {
                write_json_string(out, config.missing_literal());
            } else {
                out.push_str("null");
            }
        }
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Uint(n) => out.push_str(&n.to_string()),
        Value::Float(n) | Value::EpochFloat(n) => out.push_str(&format_float(*n)),
        Value::Epoch(n) => out.push_str(&n.to_string()),
        Value::String(s) | Value::Uri(s) | Value::Regexp(s) | Value::Mime(s) => {
            write_json_string(out, s)
        }
        Value::DateTime(dt) => write_json_string(out, &dt.to_rfc3339()),
        Value::Bytes(bytes) | Value::BigIntPos(bytes) | Value::BigIntNeg(bytes) => {
            write_json_string(out, &hex_string(bytes))
        }
        Value::CborEnc(bytes) | Value::CborPrefix(bytes) => {
            write_json_string(out, &hex_string(bytes))
        }
        Value::Base64(bytes) | Value::Base64Url(bytes) => {
            write_json_string(out, &hex_string(bytes))
        }
        Value::DecimalFraction(exponent, mantissa) | Value::BigFloat(exponent, mantissa) => {
            out.push('[');
            out.push_str(&exponent.to_string());
            out.push(',');
            out.push_str(&mantissa.to_string());
            out.push(']');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_into(out, config, item)?;
            }
            out.push(']');
        }
        Value::Map(pairs) => {
            out.push('{');
            for (i, (key, item)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(out, key);
                out.push(':');
                write_into(out, config, item)?;
            }
            out.push('}');
        }
        Value::UnknownTag(_, inner) => write_into(out, config, inner)?,
    }
    Ok(())
}

fn format_float(n: f64) -> String {
    if n.is_finite() {
        format!("{n}")
    } else {
        "null".to_string()
    }
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::new()
    }

    #[test]
    fn parses_scalars() {
        let c = cfg();
        assert_eq!(parse(&c, "null").unwrap(), Value::Null);
        assert_eq!(parse(&c, "true").unwrap(), Value::Bool(true));
        assert_eq!(parse(&c, "false").unwrap(), Value::Bool(false));
        assert_eq!(parse(&c, "  42 ").unwrap(), Value::Float(42.0));
    }

    #[test]
    fn parses_smart_numbers() {
        let c = cfg().with_number_kind(NumberKind::SmartNumber);
        assert_eq!(parse(&c, "42").unwrap(), Value::Uint(42));
        assert_eq!(parse(&c, "-42").unwrap(), Value::Int(-42));
        assert_eq!(parse(&c, "4.2").unwrap(), Value::Float(4.2));
    }

    #[test]
    fn parses_strings_with_escapes() {
        let c = cfg();
        assert_eq!(
            parse(&c, r#""a\nbA""#).unwrap(),
            Value::String("a\nbA".to_string())
        );
    }

    #[test]
    fn missing_literal_roundtrips() {
        let c = cfg();
        let literal = format!("\"{}\"", c.missing_literal());
        assert_eq!(parse(&c, &literal).unwrap(), Value::Missing);
        assert_eq!(write(&c, &Value::Missing).unwrap(), literal);
    }

    #[test]
    fn parses_and_writes_containers() {
        let c = cfg();
        let text = r#"{"a":[1,2,"x"],"b":null}"#;
        let value = parse(&c, text).unwrap();
        let back = write(&c, &value).unwrap();
        assert_eq!(back, text);
    }

    #[test]
    fn rejects_trailing_garbage() {
        let c = cfg();
        assert!(parse(&c, "null garbage").is_err());
    }

    #[test]
    fn rejects_string_longer_than_strlen() {
        let c = Config::new().with_pool_sizes(4, 16, 256, 64);
        assert!(parse(&c, r#""hello world""#).is_err());
    }
}
