/*
 * Copyright (C) 2026 The vc128 Authors
 *
 * This file is part of vc128.
 *
 * vc128 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * vc128 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with vc128. If not, see <https://www.gnu.org/licenses/>.
 */

//! Base-128 binary-to-text encoding.
//!
//! Every seven bytes of input become eight symbols drawn from a 128-symbol
//! alphabet of ASCII characters and Cyrillic letters that cannot be confused
//! with Latin ones. Encoded blocks are framed as ‘`{’ … ‘}’.
//!
//! Mixed encoding leaves printable text (ASCII and well-formed UTF-8) as it
//! is and frames only the bytes that are not, so mostly-textual input stays
//! readable:
//!
//! ```
//! let input = b"name: \xff\xfe\x00 (three raw bytes)";
//! let encoded = vc128::encode(input, true);
//! assert!(encoded.starts_with(b"name: `{"));
//! assert_eq!(vc128::decode(&encoded).unwrap(), input);
//! ```

#[macro_use]
mod digit;

pub mod alphabet;
mod codec;
pub mod decode;
pub mod encode;
pub mod scan;
pub mod segment;
mod unwrap;
mod wrap;

const BYTES_PER_CHUNK: usize = 7;
const DIGITS_PER_CHUNK: usize = 8;

const START: [u8; 2] = *b"`{";
const END: u8 = b'}';

pub use alphabet::{Alphabet, Mode, Symbol};
pub use codec::{Codec, Config};
pub use decode::{DecodeError, DecodeResult};
pub use digit::Digit;

/// Encodes `bytes` with the default [`Config`]. See [`Codec::encode`].
pub fn encode(bytes: &[u8], mixed: bool) -> Vec<u8> {
    Codec::default().encode(bytes, mixed)
}

/// Decodes bare or mixed data. See [`Codec::decode`].
pub fn decode(text: &[u8]) -> DecodeResult<Vec<u8>> {
    Codec::default().decode(text)
}
