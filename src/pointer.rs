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
//! RFC 6901 JSON Pointer: parsing, encoding, resolution and enumeration over the value tree.
use crate::config::Config;
use crate::error::{CollateError, Result};
use crate::value::Value;

/// Split a JSON Pointer string into its unescaped reference-token segments.
///
/// `~1` unescapes to `/` and `~0` unescapes to `~`; per RFC 6901 these must be applied in that
/// order (decoding `~01` as `~1` then `/` would be wrong). An empty pointer has zero segments;
/// `"/"` has one segment, the empty string. `pointer`'s length is capped by `config`'s `ptrlen`
/// knob.
pub fn parse_pointer(config: &Config, pointer: &str) -> Result<Vec<String>> {
    if pointer.len() > config.pools().ptrlen {
        return Err(CollateError::too_small("JSON pointer exceeds the configured ptrlen limit"));
    }
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(CollateError::malformed(0, "JSON pointer must start with '/' or be empty"));
    }
    let mut segments = config.pools().acquire_ptr();
    for segment in pointer[1..].split('/') {
        segments.push(unescape_segment(segment)?);
    }
    Ok(segments.to_vec())
}

fn unescape_segment(segment: &str) -> Result<String> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return Err(CollateError::malformed(0, "invalid '~' escape in JSON pointer")),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

fn escape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(c),
        }
    }
    out
}

/// Join reference-token segments into a JSON Pointer string.
pub fn encode_pointer(segments: &[String]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(&escape_segment(segment));
    }
    out
}

/// Resolve a JSON Pointer against `root`, returning `None` when any segment fails to resolve
/// (missing object key, out-of-range or non-numeric array index) rather than erroring - a miss
/// is a valid outcome for a pointer, not a malformed-input condition.
pub fn resolve_pointer<'a>(config: &Config, root: &'a Value, pointer: &str) -> Result<Option<&'a Value>> {
    let segments = parse_pointer(config, pointer)?;
    let mut current = root;
    for segment in &segments {
        current = match current {
            Value::Map(_) => match current.get(segment) {
                Some(v) => v,
                None => return Ok(None),
            },
            Value::Array(_) => {
                let index: usize = match segment.parse() {
                    Ok(i) => i,
                    Err(_) => return Ok(None),
                };
                match current.index(index) {
                    Some(v) => v,
                    None => return Ok(None),
                }
            }
            _ => return Ok(None),
        };
    }
    Ok(Some(current))
}

/// Enumerate every JSON Pointer reachable from `root`, depth-first, including the root itself
/// (the empty pointer `""`).
pub fn list_pointers(_config: &Config, root: &Value) -> Vec<String> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(root, &mut path, &mut out);
    out
}

fn walk(value: &Value, path: &mut Vec<String>, out: &mut Vec<String>) {
    out.push(encode_pointer(path));
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                walk(item, path, out);
                path.pop();
            }
        }
        Value::Map(pairs) => {
            for (key, item) in pairs {
                path.push(key.clone());
                walk(item, path, out);
                path.pop();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc6901_vectors() {
        let cases: &[(&str, &[&str])] = &[
            ("", &[]),
            ("/", &[""]),
            ("/foo", &["foo"]),
            ("/foo/0", &["foo", "0"]),
            ("/a~1b", &["a/b"]),
            ("/c%d", &["c%d"]),
            ("/e^f", &["e^f"]),
            ("/g|h", &["g|h"]),
            ("/i\\j", &["i\\j"]),
            ("/k\"l", &["k\"l"]),
            ("/ ", &[" "]),
            ("/m~0n", &["m~n"]),
            ("/g~1n~1r", &["g/n/r"]),
            ("/g/n/r", &["g", "n", "r"]),
        ];
        let config = Config::new();
        for (input, expected) in cases {
            let segments = parse_pointer(&config, input).unwrap();
            assert_eq!(segments, *expected, "input {input:?}");
        }
    }

    #[test]
    fn encode_is_inverse_of_parse() {
        let config = Config::new();
        let cases = ["", "/", "/foo", "/foo/0", "/a~1b", "/m~0n", "/g~1n~1r"];
        for input in cases {
            let segments = parse_pointer(&config, input).unwrap();
            assert_eq!(encode_pointer(&segments), input);
        }
    }

    #[test]
    fn resolves_nested_values() {
        let config = Config::new();
        let root = Value::Map(vec![(
            "foo".into(),
            Value::Array(vec![Value::Int(10), Value::Int(20)]),
        )]);
        assert_eq!(resolve_pointer(&config, &root, "/foo/1").unwrap(), Some(&Value::Int(20)));
        assert_eq!(resolve_pointer(&config, &root, "/foo/9").unwrap(), None);
        assert_eq!(resolve_pointer(&config, &root, "/missing").unwrap(), None);
        assert_eq!(resolve_pointer(&config, &root, "").unwrap(), Some(&root));
    }

    #[test]
    fn rejects_pointer_longer_than_ptrlen() {
        let config = Config::new().with_pool_sizes(64, 16, 256, 8);
        assert!(parse_pointer(&config, "/this-pointer-is-too-long").is_err());
    }

    #[test]
    fn lists_every_reachable_pointer() {
        let root = Value::Map(vec![
            ("a".into(), Value::Int(1)),
            ("b".into(), Value::Array(vec![Value::Int(2)])),
        ]);
        let mut pointers = list_pointers(&Config::new(), &root);
        pointers.sort();
        assert_eq!(pointers, vec!["", "/a", "/b", "/b/0"]);
    }
}
