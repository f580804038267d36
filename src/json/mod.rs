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
//! JSON transforms: text <-> value tree, and text <-> collated form.
pub mod value;

use crate::collate;
use crate::config::Config;
use crate::error::Result;
use crate::value::Value;

/// Parse JSON text directly into its collated byte form.
pub fn to_collate(config: &Config, text: &str) -> Result<Vec<u8>> {
    let parsed = value::parse(config, text)?;
    collate::encode(config, &parsed)
}

/// Decode a collated byte form directly into JSON text.
pub fn from_collate(config: &Config, bytes: &[u8]) -> Result<String> {
    let decoded = collate::decode(config, bytes)?;
    value::write(config, &decoded)
}

/// Parse JSON text into a `Value`.
pub fn to_value(config: &Config, text: &str) -> Result<Value> {
    value::parse(config, text)
}

/// Render a `Value` back to JSON text.
pub fn from_value(config: &Config, value: &Value) -> Result<String> {
    value::write(config, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collate_roundtrip_preserves_ordering_relation() {
        let c = Config::new();
        let a = to_collate(&c, "1").unwrap();
        let b = to_collate(&c, "2").unwrap();
        assert!(a < b);
    }
}
