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
//! Shared configuration.
//!
//! `Config` is immutable once built: every `with_*` setter consumes `self` and returns a new
//! `Config`, so a `Config` can be cloned and handed to concurrent callers without a lock. The
//! scratch pools it owns are the only part of the picture that need synchronized mutation, and
//! they provide their own (see `pool`).
use std::sync::Arc;

use crate::pool::Pools;

/// How numbers decoded from JSON are represented in the value tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    /// Every JSON number becomes `Value::Float`.
    FloatNumber,
    /// A JSON number without a fraction or exponent becomes `Value::Int`/`Value::Uint`;
    /// anything else becomes `Value::Float`.
    SmartNumber,
}

/// Which ASCII/Unicode code points the JSON scanner treats as insignificant whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
    /// `' '`, `'\t'`, `'\r'`, `'\n'` only.
    AsciiSpace,
    /// `AsciiSpace` plus the Unicode `White_Space` code points.
    UnicodeSpace,
}

/// How array/object length is recorded in the collated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEncoding {
    /// Prefix the container with its element count.
    LengthPrefix,
    /// Omit the count; rely on the terminator byte to find the end of the container.
    Stream,
}

/// Configuration shared by the JSON, CBOR, collation and JSON Pointer transforms.
///
/// Build one with [`Config::new`], adjust it with the `with_*` methods, and clone it wherever a
/// `&Config` or owned `Config` is needed - cloning is cheap, the scratch pools are behind an
/// `Arc`.
#[derive(Clone)]
pub struct Config {
    number_kind: NumberKind,
    space_kind: SpaceKind,
    container_encoding: ContainerEncoding,
    strict: bool,
    do_missing: bool,
    missing_literal: Arc<str>,
    array_len_prefix: bool,
    property_len_prefix: bool,
    pools: Arc<Pools>,
}

/// The literal the original `gson` library used in its `Missing` scenario: a string unlikely to
/// collide with legitimate data, placed where a value is absent rather than emitting nothing.
pub const DEFAULT_MISSING_LITERAL: &str = "~[]{}falsenilNA~";

// The original library's default for the key-reference pool (`keypool`) is `MaxKeys = 1024`;
// the other three knobs mirror it at a comparable order of magnitude since their original
// defaults are not preserved upstream. Exceeding any of them is a `BufferTooSmall` error, not
// a silent truncation, so these need to be generous enough for ordinary documents.
const DEFAULT_STRLEN: usize = 4096;
const DEFAULT_NUMKEYS: usize = 1024;
const DEFAULT_ITEMLEN: usize = 16384;
const DEFAULT_PTRLEN: usize = 1024;

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("number_kind", &self.number_kind)
            .field("space_kind", &self.space_kind)
            .field("container_encoding", &self.container_encoding)
            .field("strict", &self.strict)
            .field("do_missing", &self.do_missing)
            .field("missing_literal", &self.missing_literal)
            .field("array_len_prefix", &self.array_len_prefix)
            .field("property_len_prefix", &self.property_len_prefix)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// The default configuration: float numbers, Unicode whitespace, streaming (no length
    /// prefix) containers except object properties, non-strict parsing, missing values
    /// preserved via the sentinel literal. Mirrors the original library's `NewDefaultConfig`.
    pub fn new() -> Self {
        Config {
            number_kind: NumberKind::FloatNumber,
            space_kind: SpaceKind::UnicodeSpace,
            container_encoding: ContainerEncoding::Stream,
            strict: false,
            do_missing: true,
            missing_literal: Arc::from(DEFAULT_MISSING_LITERAL),
            array_len_prefix: false,
            property_len_prefix: true,
            pools: Arc::new(Pools::new(
                DEFAULT_STRLEN,
                DEFAULT_NUMKEYS,
                DEFAULT_ITEMLEN,
                DEFAULT_PTRLEN,
            )),
        }
    }

    pub fn with_number_kind(mut self, kind: NumberKind) -> Self {
        self.number_kind = kind;
        self
    }

    pub fn with_space_kind(mut self, kind: SpaceKind) -> Self {
        self.space_kind = kind;
        self
    }

    pub fn with_container_encoding(mut self, enc: ContainerEncoding) -> Self {
        self.container_encoding = enc;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether a JSON value equal to the missing literal decodes to `Value::Missing` rather
    /// than `Value::String`, and whether `Value::Missing` encodes back to the literal.
    pub fn with_missing(mut self, do_missing: bool) -> Self {
        self.do_missing = do_missing;
        self
    }

    pub fn with_missing_literal(mut self, literal: impl Into<Arc<str>>) -> Self {
        self.missing_literal = literal.into();
        self
    }

    pub fn with_array_len_prefix(mut self, prefix: bool) -> Self {
        self.array_len_prefix = prefix;
        self
    }

    pub fn with_property_len_prefix(mut self, prefix: bool) -> Self {
        self.property_len_prefix = prefix;
        self
    }

    /// Rebuild the scratch pools with new size hints. Existing buffers already checked out
    /// continue to use their pool's old sizing; only buffers acquired after this call see the
    /// new hints.
    pub fn with_pool_sizes(
        mut self,
        strlen: usize,
        numkeys: usize,
        itemlen: usize,
        ptrlen: usize,
    ) -> Self {
        self.pools = Arc::new(Pools::new(strlen, numkeys, itemlen, ptrlen));
        self
    }

    pub fn number_kind(&self) -> NumberKind {
        self.number_kind
    }

    pub fn space_kind(&self) -> SpaceKind {
        self.space_kind
    }

    pub fn container_encoding(&self) -> ContainerEncoding {
        self.container_encoding
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn do_missing(&self) -> bool {
        self.do_missing
    }

    pub fn missing_literal(&self) -> &str {
        &self.missing_literal
    }

    pub fn array_len_prefix(&self) -> bool {
        self.array_len_prefix
    }

    pub fn property_len_prefix(&self) -> bool {
        self.property_len_prefix
    }

    pub(crate) fn pools(&self) -> &Pools {
        &self.pools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_original_library_defaults() {
        let c = Config::new();
        assert_eq!(c.number_kind(), NumberKind::FloatNumber);
        assert_eq!(c.space_kind(), SpaceKind::UnicodeSpace);
        assert_eq!(c.container_encoding(), ContainerEncoding::Stream);
        assert!(!c.strict());
        assert!(c.do_missing());
        assert_eq!(c.missing_literal(), DEFAULT_MISSING_LITERAL);
        assert!(!c.array_len_prefix());
        assert!(c.property_len_prefix());
    }

    #[test]
    fn with_methods_do_not_mutate_in_place() {
        let base = Config::new();
        let strict = base.clone().with_strict(true);
        assert!(!base.strict());
        assert!(strict.strict());
    }
}
