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
//! The in-memory value tree shared by the JSON, CBOR and collation transforms.
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;

/// A single node of the value tree.
///
/// Dispatch on `Value` is always a match over the discriminant - there is no dynamic typing
/// anywhere downstream of parsing, which keeps the collation and CBOR encoders total functions
/// over a closed set of variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    /// An untagged CBOR byte string. JSON has no native byte-string type; it round-trips
    /// through JSON as a lowercase hex string.
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    /// Key-value pairs in original insertion order. Collation sorts by the collated key blob;
    /// this type does not itself enforce sortedness or dedup keys at construction time.
    Map(Vec<(String, Value)>),

    /// Tag 0: RFC 3339 date-time.
    DateTime(DateTime<FixedOffset>),
    /// Tag 1, integer-seconds form.
    Epoch(i64),
    /// Tag 1, fractional-seconds form.
    EpochFloat(f64),
    /// Tag 2: positive big integer, stored as big-endian magnitude bytes.
    BigIntPos(Vec<u8>),
    /// Tag 3: negative big integer, stored as big-endian magnitude bytes (the value is
    /// `-1 - magnitude`, matching CBOR's encoding rule; arithmetic over it is out of scope).
    BigIntNeg(Vec<u8>),
    /// Tag 4: decimal fraction, `(exponent, mantissa)`.
    DecimalFraction(i64, i64),
    /// Tag 5: big float, `(exponent, mantissa)`.
    BigFloat(i64, i64),
    /// Tag 24: an embedded CBOR-encoded item, carried as its raw bytes.
    CborEnc(Arc<[u8]>),
    Uri(String),
    Base64Url(Vec<u8>),
    Base64(Vec<u8>),
    /// Tag 35: a regular expression. Compilation happens at decode time; the source text is
    /// retained so the value can still be round-tripped through CBOR/JSON without a regex
    /// dependency at the value-tree layer.
    Regexp(String),
    Mime(String),
    /// Tag 55799, the "magic" CBOR prefix marker.
    CborPrefix(Arc<[u8]>),
    /// A tag number this codec does not assign a dedicated variant to (spec.md §9: prefer an
    /// explicit variant over silently treating every unknown tag as a CBOR prefix).
    UnknownTag(u64, Box<Value>),
}

impl Value {
    /// The collation ordering class for this value, used only to order the *classes*
    /// themselves; ordering within a class is handled by the numeric/string/composite
    /// collators.
    pub(crate) fn type_rank(&self) -> u8 {
        use crate::constants::*;
        match self {
            Value::Missing => TYPE_MISSING,
            Value::Null => TYPE_NULL,
            Value::Bool(false) => TYPE_FALSE,
            Value::Bool(true) => TYPE_TRUE,
            Value::Int(_) | Value::Uint(_) | Value::Float(_) => TYPE_NUMBER,
            Value::String(_) | Value::Bytes(_) | Value::Uri(_) | Value::Regexp(_) | Value::Mime(_) => {
                TYPE_STRING
            }
            Value::Array(_) => TYPE_ARRAY,
            Value::Map(_) => TYPE_OBJ,
            // Extended (CBOR-only) forms collate via their natural reduction: timestamps and
            // epochs behave like numbers/strings of their underlying representation.
            Value::DateTime(_) => TYPE_STRING,
            Value::Epoch(_) => TYPE_NUMBER,
            Value::EpochFloat(_) => TYPE_NUMBER,
            Value::BigIntPos(_) | Value::BigIntNeg(_) => TYPE_STRING,
            Value::DecimalFraction(..) | Value::BigFloat(..) => TYPE_ARRAY,
            Value::CborEnc(_) | Value::CborPrefix(_) | Value::Base64Url(_) | Value::Base64(_) => {
                TYPE_STRING
            }
            Value::UnknownTag(_, inner) => inner.type_rank(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Uri(s) | Value::Regexp(s) | Value::Mime(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a key in a `Map` value. Returns `None` for non-map values or a missing key,
    /// matching a JSON Pointer traversal miss rather than panicking.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Index into an `Array` value.
    pub fn index(&self, i: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(i),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}
