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
//! Error type shared by the JSON, CBOR, collation and value-tree transforms.
use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, CollateError>;

/// `CollateError` reports everything that can go wrong converting between JSON, CBOR, the
/// collation form and the in-memory value tree.
///
/// Decode-time variants carry the byte offset at which the failure was detected. Every
/// fallible operation in this crate returns a `Result` - none of the four codecs ever panic
/// on caller-supplied input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollateError {
    #[error("malformed input at byte {offset}: {reason}")]
    MalformedInput { offset: usize, reason: &'static str },

    #[error("buffer too small: {reason}")]
    BufferTooSmall { reason: &'static str },

    #[error("value not representable in target encoding: {reason}")]
    UnsupportedValue { reason: &'static str },

    #[error("failed to compile regexp at byte {offset}: {reason}")]
    RegexpCompile { offset: usize, reason: String },

    #[error("internal invariant broken: {reason}")]
    InvariantBroken { reason: &'static str },
}

impl CollateError {
    #[inline]
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Self {
        CollateError::MalformedInput { offset, reason }
    }

    #[inline]
    pub(crate) fn too_small(reason: &'static str) -> Self {
        CollateError::BufferTooSmall { reason }
    }

    #[inline]
    pub(crate) fn unsupported(reason: &'static str) -> Self {
        CollateError::UnsupportedValue { reason }
    }

    #[inline]
    pub(crate) fn invariant(reason: &'static str) -> Self {
        CollateError::InvariantBroken { reason }
    }
}
