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

//! Finds runs of bytes that can pass through mixed encoding as text.

use super::START;

use core::ops::RangeInclusive;

/// Result of [`scan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scan {
    /// Every character starting before the limit is safe. `end` is the
    /// offset just past the last one; a multi-byte character may carry it
    /// past the limit.
    Clean { end: usize },
    /// `at` is the first byte that does not start a safe character, or the
    /// start of a ‘`{’ marker.
    Stop { at: usize },
}

const CONTINUATION: RangeInclusive<u8> = 0x80..=0xbf;

/// Length of the safe character at the start of `bytes`: printable ASCII,
/// CR, LF, or a well-formed multi-byte UTF-8 sequence.
fn char_len(bytes: &[u8]) -> Option<usize> {
    let (second, len) = match *bytes.first()? {
        b'\n' | b'\r' | 0x20..=0x7e => return Some(1),
        0xc2..=0xdf => (CONTINUATION, 2),
        0xe0 => (0xa0..=0xbf, 3),
        0xed => (0x80..=0x9f, 3),
        0xe1..=0xef => (CONTINUATION, 3),
        0xf0 => (0x90..=0xbf, 4),
        0xf1..=0xf3 => (CONTINUATION, 4),
        0xf4 => (0x80..=0x8f, 4),
        _ => return None,
    };
    let tail = bytes.get(1..len)?;
    let valid = second.contains(&tail[0])
        && tail[1..].iter().all(|b| CONTINUATION.contains(b));
    valid.then(|| len)
}

/// Scans `buf` from `from` for safe characters, stopping once `limit` is
/// reached. A multi-byte sequence cut off by the end of `buf` is not safe.
pub fn scan(buf: &[u8], from: usize, limit: usize) -> Scan {
    debug_assert!(limit <= buf.len());
    let mut i = from;
    while i < limit {
        let rest = &buf[i..];
        if rest.starts_with(&START) {
            return Scan::Stop { at: i };
        }
        match char_len(rest) {
            Some(len) => i += len,
            None => return Scan::Stop { at: i },
        }
    }
    Scan::Clean { end: i }
}
