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
//! Byte-level constants for the collation alphabet and the CBOR wire format.

/// Collation type tags, in the order that makes `memcmp` reproduce the domain order:
/// `Missing < Null < False < True < Number < String < Array < Obj`.
pub const TYPE_MISSING: u8 = 0x10;
pub const TYPE_NULL: u8 = 0x20;
pub const TYPE_FALSE: u8 = 0x30;
pub const TYPE_TRUE: u8 = 0x40;
pub const TYPE_NUMBER: u8 = 0x50;
pub const TYPE_STRING: u8 = 0x60;
pub const TYPE_ARRAY: u8 = 0x70;
pub const TYPE_OBJ: u8 = 0x80;

/// Sentinel byte that terminates every collated item. Payload bytes are stuffed so this value
/// never appears literally inside a payload.
pub const TERMINATOR: u8 = 0x00;
/// Escape byte used by string/float byte-stuffing: a literal `0x00` in the payload is rewritten
/// as `TERMINATOR ESCAPE`.
pub const STUFF_ESCAPE: u8 = 0x01;

/// Sub-tags within `TYPE_NUMBER` so that integers and floats stay mutually comparable:
/// negative numbers sort before non-negative numbers of either representation.
pub const NUM_NEG: u8 = 0x00;
pub const NUM_POS: u8 = 0x01;

/// CBOR major type bit patterns (top 3 bits of the initial byte).
pub const MT_UINT: u8 = 0b000_00000;
pub const MT_NINT: u8 = 0b001_00000;
pub const MT_BSTR: u8 = 0b010_00000;
pub const MT_TSTR: u8 = 0b011_00000;
pub const MT_ARRAY: u8 = 0b100_00000;
pub const MT_MAP: u8 = 0b101_00000;
pub const MT_TAG: u8 = 0b110_00000;
pub const MT_SIMPLE: u8 = 0b111_00000;

/// Additional-information bitmask (low 5 bits of the initial byte).
pub const AI_MASK: u8 = 0b000_11111;
/// Largest immediate value encodable directly on the AI bits.
pub const AI_MAX_IMMEDIATE: u8 = 23;
pub const AI_ONE_BYTE: u8 = 24;
pub const AI_TWO_BYTES: u8 = 25;
pub const AI_FOUR_BYTES: u8 = 26;
pub const AI_EIGHT_BYTES: u8 = 27;
pub const AI_INDEFINITE: u8 = 31;
/// The CBOR "break" byte that closes an indefinite-length container.
pub const BREAK: u8 = 0xff;

/// Simple-value selectors under major type 7.
pub const SIMPLE_FALSE: u8 = 20;
pub const SIMPLE_TRUE: u8 = 21;
pub const SIMPLE_NULL: u8 = 22;
pub const SIMPLE_UNDEFINED: u8 = 23;
pub const SIMPLE_F16: u8 = 25;
pub const SIMPLE_F32: u8 = 26;
pub const SIMPLE_F64: u8 = 27;

/// CBOR tag numbers recognized by this codec (spec.md §4.5).
pub const TAG_DATETIME: u64 = 0;
pub const TAG_EPOCH: u64 = 1;
pub const TAG_POS_BIGNUM: u64 = 2;
pub const TAG_NEG_BIGNUM: u64 = 3;
pub const TAG_DECIMAL_FRACTION: u64 = 4;
pub const TAG_BIGFLOAT: u64 = 5;
pub const TAG_CBOR_ENC: u64 = 24;
pub const TAG_URI: u64 = 32;
pub const TAG_BASE64URL: u64 = 33;
pub const TAG_BASE64: u64 = 34;
pub const TAG_REGEXP: u64 = 35;
pub const TAG_MIME: u64 = 36;
pub const TAG_CBOR_PREFIX: u64 = 55799;
