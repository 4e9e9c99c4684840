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

use super::alphabet::Alphabet;
use super::encode::{encode_to_digits, encoded_len};
use super::{END, START};

/// Appends symbols to `out`, starting a new line every `width` symbols.
/// Lines are counted in symbols, which may be longer than one byte.
fn write_wrapped<'a, I>(symbols: I, width: usize, out: &mut Vec<u8>)
where
    I: Iterator<Item = &'a [u8]>,
{
    symbols.enumerate().for_each(|(i, symbol)| {
        if width > 0 && i > 0 && i % width == 0 {
            out.push(b'\n');
        }
        out.extend_from_slice(symbol);
    });
}

/// Appends the encoding of `bytes` to `out`, between ‘`{’ and ‘}’ if
/// `framed` is true. Markers are never split across lines.
pub(crate) fn write_block(
    alphabet: &Alphabet,
    bytes: &[u8],
    width: usize,
    framed: bool,
    out: &mut Vec<u8>,
) {
    let len = encoded_len(bytes.len());
    out.reserve(len * 2 + len / width.max(1) + START.len() + 1);
    if framed {
        out.extend_from_slice(&START);
    }
    let symbols = encode_to_digits(bytes.iter().copied())
        .map(|d| alphabet.symbol(d).as_bytes());
    write_wrapped(symbols, width, out);
    if framed {
        out.push(END);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Mode;

    fn block(bytes: &[u8], width: usize, framed: bool) -> Vec<u8> {
        let mut out = Vec::new();
        let alphabet = Alphabet::get(Mode::Native);
        write_block(alphabet, bytes, width, framed, &mut out);
        out
    }

    #[test]
    fn empty_block() {
        assert_eq!(block(&[], 80, true), b"`{}");
        assert!(block(&[], 80, false).is_empty());
    }

    #[test]
    fn wraps_inside_markers() {
        assert_eq!(block(&[0xff; 14], 5, true), b"`{|||||\n|||||\n|||||\n|}");
        assert_eq!(block(&[0xff; 14], 0, false), [b'|'; 16]);
        assert_eq!(block(&[0xff; 7], 8, false), [b'|'; 8]);
    }

    #[test]
    fn wraps_by_symbol_not_byte() {
        // Every digit is 85, a two-byte symbol.
        let bytes = [0xab, 0x56, 0xad, 0x5a, 0xb5, 0x6a, 0xd5];
        let text = String::from_utf8(block(&bytes, 4, false)).unwrap();
        assert_eq!(text, "ББББ\nББББ");
    }
}
