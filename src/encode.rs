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

//! Functions and types for encoding base-128 data.

use super::Digit;
use super::{BYTES_PER_CHUNK, DIGITS_PER_CHUNK};

use core::array;
use core::iter::{Flatten, Fuse, FusedIterator, Take};

/// Splits bytes into groups of seven and yields the base-128 digits of each
/// group. A final group of `n` bytes yields `n + 1` digits.
struct BytesToUnflatDigits<I>(I);

type BytesToUnflatDigitsItem = Take<array::IntoIter<Digit, DIGITS_PER_CHUNK>>;

impl<I> Iterator for BytesToUnflatDigits<I>
where
    I: FusedIterator<Item = u8>,
{
    type Item = BytesToUnflatDigitsItem;

    fn next(&mut self) -> Option<Self::Item> {
        let mut num_bytes = 0;
        let mut sum = 0_u64;
        self.0
            .by_ref()
            .map(u64::from)
            .enumerate()
            .take(BYTES_PER_CHUNK)
            .for_each(|(i, n)| {
                num_bytes += 1;
                sum |= n << (8 * (BYTES_PER_CHUNK - 1 - i));
            });

        if num_bytes == 0 {
            return None;
        }

        let mut digits = [const_digit!(0); DIGITS_PER_CHUNK];
        digits.iter_mut().rev().for_each(|d| {
            *d = Digit::from_low_bits(sum);
            sum >>= 7;
        });
        Some(IntoIterator::into_iter(digits).take(num_bytes + 1))
    }
}

impl<I: FusedIterator<Item = u8>> FusedIterator for BytesToUnflatDigits<I> {}

/// Iterator returned by [`encode_to_digits`].
pub struct DigitEncoder<I: Iterator<Item = u8>>(
    Flatten<BytesToUnflatDigits<Fuse<I>>>,
);

impl<I> Iterator for DigitEncoder<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Digit;

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

impl<I: Iterator<Item = u8>> FusedIterator for DigitEncoder<I> {}

/// Converts bytes to base-128 digits without any alphabet or framing.
pub fn encode_to_digits<I>(bytes: I) -> DigitEncoder<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    DigitEncoder(BytesToUnflatDigits(bytes.into_iter().fuse()).flatten())
}

/// Number of digits produced for `len` input bytes.
pub const fn encoded_len(len: usize) -> usize {
    let full = len / BYTES_PER_CHUNK * DIGITS_PER_CHUNK;
    match len % BYTES_PER_CHUNK {
        0 => full,
        rem => full + rem + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(bytes: &[u8]) -> Vec<u8> {
        encode_to_digits(bytes.iter().copied()).map(u8::from).collect()
    }

    #[test]
    fn full_group() {
        assert_eq!(digits(&[0; 7]), [0; 8]);
        assert_eq!(digits(&[0xff; 7]), [127; 8]);
        assert_eq!(
            digits(&[0, 1, 2, 3, 4, 5, 6]),
            [0, 0, 32, 32, 24, 16, 10, 6],
        );
    }

    #[test]
    fn partial_groups_keep_leading_digits() {
        assert_eq!(digits(&[0xff]), [127, 64]);
        assert_eq!(digits(&[0x80, 0x01]), [64, 0, 32]);
        for n in 1..BYTES_PER_CHUNK {
            let input = vec![0xa5; BYTES_PER_CHUNK + n];
            assert_eq!(digits(&input).len(), DIGITS_PER_CHUNK + n + 1);
            assert_eq!(encoded_len(input.len()), DIGITS_PER_CHUNK + n + 1);
        }
        assert!(digits(&[]).is_empty());
    }
}
