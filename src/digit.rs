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

/// A base-128 digit: an index into an [`Alphabet`](crate::Alphabet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

macro_rules! const_digit {
    ($n:expr) => {{
        use crate::digit::Digit;
        const DIGIT: Digit = Digit::__const($n);
        DIGIT
    }};
}

impl Digit {
    /// The largest digit, also used to pad the final group when decoding.
    pub const MAX: Self = Self(127);

    /// Returns `None` if `x` is not less than 128.
    pub fn new(x: u8) -> Option<Self> {
        (x < 128).then(|| Self(x))
    }

    /// Takes the low seven bits of `x`.
    pub(crate) fn from_low_bits(x: u64) -> Self {
        Self((x & 0x7f) as u8)
    }

    #[doc(hidden)]
    pub(crate) const fn __const(n: u8) -> Self {
        const BOUNDS_CHECK: [u8; 1] = [0];
        Self(n + BOUNDS_CHECK[(n >= 128) as usize])
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl From<Digit> for usize {
    fn from(d: Digit) -> usize {
        usize::from(d.0)
    }
}

impl From<Digit> for u64 {
    fn from(d: Digit) -> u64 {
        u64::from(d.0)
    }
}
