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
//! `collate-codec`: JSON, CBOR, order-preserving binary collation, and JSON Pointer, all built
//! around one shared [`Value`] tree and [`Config`].
//!
//! ```
//! use collate_codec::{Config, Value, collate, json};
//!
//! let config = Config::new();
//! let value = json::to_value(&config, r#"{"b": 2, "a": 1}"#).unwrap();
//! let a = collate::encode(&config, &value).unwrap();
//! let b = collate::encode(&config, &Value::Map(vec![
//!     ("a".into(), Value::Float(1.0)),
//!     ("b".into(), Value::Float(2.0)),
//! ])).unwrap();
//! assert_eq!(a, b); // maps collate by sorted key regardless of insertion order
//! ```
pub mod cbor;
pub mod collate;
mod config;
mod constants;
mod error;
pub mod json;
mod pointer;
mod pool;
mod value;

pub use config::{Config, ContainerEncoding, NumberKind, SpaceKind, DEFAULT_MISSING_LITERAL};
pub use error::{CollateError, Result};
pub use pointer::{encode_pointer, list_pointers, parse_pointer, resolve_pointer};
pub use value::Value;
