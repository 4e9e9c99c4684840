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

//! The 128-symbol alphabet and its inverse.

use super::Digit;

use core::fmt::{self, Display, Formatter};
use std::sync::OnceLock;

/// Selects which variant of the alphabet is used for encoding.
///
/// Both variants decode identically: data produced under either one is
/// accepted by an [`Alphabet`] of any mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// UTF-8 output. Cyrillic letters take two bytes.
    #[default]
    Native,
    /// Single-byte output. Cyrillic letters are Windows-1251 bytes.
    Legacy,
}

const ASCII_LEN: usize = 85;
const ASCII_FIRST: u8 = b'!';

// Would otherwise be '"', '\'', '[', '\\' and ']'.
const FILLER_POSITIONS: [usize; 5] = [1, 6, 58, 59, 60];
const FILLER_FIRST: u8 = b'v';

/// Cyrillic letters with no look-alike in the Latin alphabet.
const LETTERS: [char; 42] = [
    'Б', 'в', 'Г', 'г', 'Д', 'д', 'Ж', 'ж', 'з', 'И', 'и', 'Й', 'й', 'к',
    'Л', 'л', 'м', 'н', 'П', 'р', 'т', 'Ф', 'ф', 'Ц', 'ц', 'Ч', 'ч', 'Ш',
    'ш', 'Щ', 'щ', 'Ъ', 'ъ', 'Ы', 'ы', 'ь', 'Э', 'э', 'Ю', 'ю', 'Я', 'я',
];

/// [`LETTERS`] in Windows-1251.
const LETTERS_CP1251: [u8; 42] = [
    0xc1, 0xe2, 0xc3, 0xe3, 0xc4, 0xe4, 0xc6, 0xe6, 0xe7, 0xc8, 0xe8, 0xc9,
    0xe9, 0xea, 0xcb, 0xeb, 0xec, 0xed, 0xcf, 0xf0, 0xf2, 0xd4, 0xf4, 0xd6,
    0xf6, 0xd7, 0xf7, 0xd8, 0xf8, 0xd9, 0xf9, 0xda, 0xfa, 0xdb, 0xfb, 0xfc,
    0xdd, 0xfd, 0xde, 0xfe, 0xdf, 0xff,
];

const SEPARATOR: u8 = b'|';

/// Lead bytes of the two-byte native symbols. The trailing byte alone
/// identifies the letter, so these are skipped when decoding.
const NATIVE_LEAD_BYTES: [u8; 2] = [0xd0, 0xd1];

/// Returns whether `byte` carries no information when decoding.
pub(crate) fn is_ignorable(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r') || NATIVE_LEAD_BYTES.contains(&byte)
}

/// A single encoded symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
    bytes: [u8; 2],
    len: u8,
    glyph: char,
}

impl Symbol {
    const fn single(byte: u8) -> Self {
        Self {
            bytes: [byte, 0],
            len: 1,
            glyph: byte as char,
        }
    }

    /// The bytes written to encoded output.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// The character this symbol displays as, regardless of mode.
    pub fn glyph(&self) -> char {
        self.glyph
    }
}

/// An encoding table for one [`Mode`] together with the decoding table
/// shared by both modes.
///
/// Tables are immutable once built. [`Alphabet::get`] returns a shared
/// instance that is built on first use.
#[derive(Clone, Debug)]
pub struct Alphabet {
    mode: Mode,
    symbols: [Symbol; 128],
    values: [Option<Digit>; 256],
}

fn register(values: &mut [Option<Digit>; 256], key: u8, digit: Digit) {
    let previous = values[usize::from(key)].replace(digit);
    debug_assert!(
        previous.map_or(true, |p| p == digit),
        "decode key {:#04x} maps to two values",
        key,
    );
}

impl Alphabet {
    /// Builds the tables for `mode`.
    pub fn new(mode: Mode) -> Self {
        let mut symbols = [Symbol::single(SEPARATOR); 128];
        let mut values = [None; 256];

        let mut filler = FILLER_FIRST;
        for (i, symbol) in symbols[..ASCII_LEN].iter_mut().enumerate() {
            let byte = if FILLER_POSITIONS.contains(&i) {
                filler += 1;
                filler - 1
            } else {
                ASCII_FIRST + i as u8
            };
            *symbol = Symbol::single(byte);
            register(&mut values, byte, Digit::from_low_bits(i as u64));
        }

        let letters = LETTERS.iter().zip(LETTERS_CP1251.iter());
        for (p, (&letter, &legacy)) in letters.enumerate() {
            let i = ASCII_LEN + p;
            let digit = Digit::from_low_bits(i as u64);
            let mut buf = [0; 4];
            let utf8 = letter.encode_utf8(&mut buf).as_bytes();
            debug_assert!(utf8.len() == 2 && NATIVE_LEAD_BYTES.contains(&utf8[0]));

            register(&mut values, utf8[1], digit);
            register(&mut values, legacy, digit);
            symbols[i] = match mode {
                Mode::Native => Symbol {
                    bytes: [utf8[0], utf8[1]],
                    len: 2,
                    glyph: letter,
                },
                Mode::Legacy => Symbol {
                    bytes: [legacy, 0],
                    len: 1,
                    glyph: letter,
                },
            };
        }

        symbols[usize::from(Digit::MAX)] = Symbol::single(SEPARATOR);
        register(&mut values, SEPARATOR, Digit::MAX);

        Self {
            mode,
            symbols,
            values,
        }
    }

    /// Returns the shared alphabet for `mode`, building it if necessary.
    pub fn get(mode: Mode) -> &'static Self {
        static NATIVE: OnceLock<Alphabet> = OnceLock::new();
        static LEGACY: OnceLock<Alphabet> = OnceLock::new();
        match mode {
            Mode::Native => NATIVE.get_or_init(|| Self::new(Mode::Native)),
            Mode::Legacy => LEGACY.get_or_init(|| Self::new(Mode::Legacy)),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn symbol(&self, digit: Digit) -> &Symbol {
        &self.symbols[usize::from(digit)]
    }

    /// All 128 symbols in digit order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.iter()
    }

    /// Looks up the digit for a byte of encoded data. Native symbols are
    /// keyed by their trailing byte.
    pub fn value(&self, byte: u8) -> Option<Digit> {
        self.values[usize::from(byte)]
    }

    pub fn is_valid(&self, byte: u8) -> bool {
        self.value(byte).is_some()
    }
}

const TABLE_ROWS: usize = 16;
const TABLE_COLUMNS: usize = 128 / TABLE_ROWS;
const CELL_WIDTH: usize = " 127  x |".len();

/// Prints the alphabet as a table, with digits running down the columns.
impl Display for Alphabet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(1 + TABLE_COLUMNS * CELL_WIDTH);
        writeln!(f, "{}", border)?;
        for row in 0..TABLE_ROWS {
            write!(f, "|")?;
            for column in 0..TABLE_COLUMNS {
                let i = column * TABLE_ROWS + row;
                write!(f, " {:>3}  {} |", i, self.symbols[i].glyph)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", border)
    }
}
