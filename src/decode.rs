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

//! Functions and types for decoding base-128 data.

use super::alphabet::{is_ignorable, Alphabet};
use super::unwrap::{self, Layout, Piece};
use super::Digit;
use super::{BYTES_PER_CHUNK, DIGITS_PER_CHUNK};

use core::array;
use core::iter::{Flatten, Fuse, FusedIterator, Take};
use log::{debug, trace};
use thiserror::Error;

/// An error encountered while decoding.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A byte outside the alphabet appeared in encoded data. `offset` is the
    /// position of the byte in the decoder's input.
    #[error("invalid character {byte:#04x} at offset {offset}")]
    InvalidCharacter { byte: u8, offset: usize },
}

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Folds groups of eight digits back into seven bytes. A final group of `m`
/// digits is padded with [`Digit::MAX`] and yields `m - 1` bytes.
struct DigitsToUnflatBytes<I>(I);

type DigitsToUnflatBytesItem = Take<array::IntoIter<u8, BYTES_PER_CHUNK>>;

impl<I> Iterator for DigitsToUnflatBytes<I>
where
    I: FusedIterator<Item = Digit>,
{
    type Item = DigitsToUnflatBytesItem;

    fn next(&mut self) -> Option<Self::Item> {
        let mut digits = [Digit::MAX; DIGITS_PER_CHUNK];
        let mut len = 0;
        self.0.by_ref().take(DIGITS_PER_CHUNK).for_each(|d| {
            digits[len] = d;
            len += 1;
        });

        if len == 0 {
            return None;
        }

        let [_, a, b, c, d, e, f, g] = digits
            .iter()
            .fold(0_u64, |sum, &d| sum << 7 | u64::from(d))
            .to_be_bytes();
        Some(IntoIterator::into_iter([a, b, c, d, e, f, g]).take(len - 1))
    }
}

impl<I: FusedIterator<Item = Digit>> FusedIterator for DigitsToUnflatBytes<I> {}

/// Iterator returned by [`decode_digits`].
pub struct DigitDecoder<I: Iterator<Item = Digit>>(
    Flatten<DigitsToUnflatBytes<Fuse<I>>>,
);

impl<I> Iterator for DigitDecoder<I>
where
    I: Iterator<Item = Digit>,
{
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn fold<B, F>(self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.0.fold(init, f)
    }
}

impl<I: Iterator<Item = Digit>> FusedIterator for DigitDecoder<I> {}

/// Converts base-128 digits back to bytes. Every digit sequence decodes;
/// only sequences produced by [`encode_to_digits`] round-trip exactly.
///
/// [`encode_to_digits`]: crate::encode::encode_to_digits
pub fn decode_digits<I>(digits: I) -> DigitDecoder<I::IntoIter>
where
    I: IntoIterator<Item = Digit>,
{
    DigitDecoder(DigitsToUnflatBytes(digits.into_iter().fuse()).flatten())
}

/// Number of bytes produced for `len` digits.
pub const fn decoded_len(len: usize) -> usize {
    let full = len / DIGITS_PER_CHUNK * BYTES_PER_CHUNK;
    match len % DIGITS_PER_CHUNK {
        0 => full,
        rem => full + rem - 1,
    }
}

/// Looks up every symbol in `content`, skipping whitespace. `offset` is the
/// position of `content` within the whole input, for error reporting.
fn to_digits(
    alphabet: &Alphabet,
    content: &[u8],
    offset: usize,
) -> DecodeResult<Vec<Digit>> {
    content
        .iter()
        .enumerate()
        .filter(|&(_, &byte)| !is_ignorable(byte))
        .map(|(i, &byte)| {
            alphabet.value(byte).ok_or(DecodeError::InvalidCharacter {
                byte,
                offset: offset + i,
            })
        })
        .collect()
}

enum Part<'a> {
    Text(&'a [u8]),
    Digits(Vec<Digit>),
}

/// Decodes bare or framed text. All symbols are validated before any bytes
/// are produced.
pub(crate) fn decode_text(
    alphabet: &Alphabet,
    text: &[u8],
) -> DecodeResult<Vec<u8>> {
    let pieces = match unwrap::layout(text) {
        Layout::Bare(content) => {
            let digits = to_digits(alphabet, content, 0)?;
            trace!("decoding {} bare digits", digits.len());
            return Ok(decode_digits(digits).collect());
        }
        Layout::Framed(pieces) => pieces,
    };

    let parts = pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Text(text) => Ok(Part::Text(text)),
            Piece::Block {
                content,
                offset,
            } => to_digits(alphabet, content, offset).map(Part::Digits),
        })
        .collect::<DecodeResult<Vec<_>>>()?;

    debug!(
        "decoding {} blocks from {} bytes of framed text",
        parts.iter().filter(|p| matches!(p, Part::Digits(_))).count(),
        text.len(),
    );

    let mut out = Vec::with_capacity(text.len());
    for part in parts {
        match part {
            Part::Text(text) => out.extend_from_slice(text),
            Part::Digits(digits) => out.extend(decode_digits(digits)),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Mode;
    use crate::encode::encode_to_digits;

    fn digits(values: &[u8]) -> Vec<Digit> {
        values.iter().map(|&v| Digit::new(v).unwrap()).collect()
    }

    #[test]
    fn full_group() {
        let bytes: Vec<u8> = decode_digits(digits(&[127; 8])).collect();
        assert_eq!(bytes, [0xff; 7]);
        let bytes: Vec<u8> =
            decode_digits(digits(&[0, 0, 32, 32, 24, 16, 10, 6])).collect();
        assert_eq!(bytes, [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn partial_groups() {
        let bytes: Vec<u8> = decode_digits(digits(&[127, 64])).collect();
        assert_eq!(bytes, [0xff]);
        for m in 1..DIGITS_PER_CHUNK {
            let input = vec![Digit::MAX; DIGITS_PER_CHUNK + m];
            let len = decode_digits(input).count();
            assert_eq!(len, BYTES_PER_CHUNK + m - 1);
            assert_eq!(decoded_len(DIGITS_PER_CHUNK + m), len);
        }
        assert_eq!(decode_digits(digits(&[5])).count(), 0);
    }

    #[test]
    fn digits_round_trip() {
        for len in 0..=3 * BYTES_PER_CHUNK {
            let input: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
            let decoded: Vec<u8> =
                decode_digits(encode_to_digits(input.iter().copied())).collect();
            assert_eq!(decoded, input);
        }
    }

    #[test]
    fn skips_whitespace_and_lead_bytes() {
        let alphabet = Alphabet::new(Mode::Native);
        assert_eq!(decode_text(&alphabet, b" |a\r\n").unwrap(), [0xff]);
        let native = decode_text(&alphabet, "ББ".as_bytes()).unwrap();
        let legacy = decode_text(&alphabet, &[0xc1, 0xc1]).unwrap();
        assert_eq!(native, legacy);
    }

    #[test]
    fn reports_first_invalid_byte() {
        let alphabet = Alphabet::new(Mode::Native);
        assert_eq!(
            decode_text(&alphabet, b"ab~cd\""),
            Err(DecodeError::InvalidCharacter {
                byte: b'~',
                offset: 2,
            }),
        );
        assert_eq!(
            decode_text(&alphabet, b"text `{ab}more`{a\"}"),
            Err(DecodeError::InvalidCharacter {
                byte: b'"',
                offset: 17,
            }),
        );
    }

    #[test]
    fn framed_text_is_spliced() {
        let alphabet = Alphabet::new(Mode::Native);
        let decoded = decode_text(&alphabet, b"abc`{|a}def`{}g").unwrap();
        assert_eq!(decoded, b"abc\xffdefg");
    }
}
