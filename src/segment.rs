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

//! Splits input into literal text and binary runs for mixed encoding.

use super::scan::{scan, Scan};
use super::BYTES_PER_CHUNK;

use core::ops::Range;
use log::{debug, trace};

/// Restart offsets tried after a scan stops.
const MAX_SHIFT: usize = BYTES_PER_CHUNK;

/// How far past a stop a restarted scan must stay clean to end a binary run.
const LOOKAHEAD: usize = 256;

/// Literal runs no longer than this are folded into the preceding segment.
/// A block of this size costs about as much as the text it would replace.
const MAX_FOLDED_LITERAL: usize = BYTES_PER_CHUNK;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Copied to the output unchanged.
    Literal,
    /// Encoded and framed.
    Binary,
}

/// A range of the input and how it is encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub range: Range<usize>,
}

impl Segment {
    pub fn new(kind: SegmentKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
        }
    }
}

#[derive(Default)]
struct Segments(Vec<Segment>);

impl Segments {
    fn push_literal(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(last) if range.len() <= MAX_FOLDED_LITERAL => {
                last.range.end = range.end;
            }
            _ => self.0.push(Segment::new(SegmentKind::Literal, range)),
        }
    }

    fn push_binary(&mut self, range: Range<usize>) {
        trace!("binary run at {}..{}", range.start, range.end);
        match self.0.last_mut() {
            Some(last) if last.kind == SegmentKind::Binary => {
                last.range.end = range.end;
            }
            _ => self.0.push(Segment::new(SegmentKind::Binary, range)),
        }
    }
}

/// Finds where text resumes after a scan stopped at `at`.
///
/// Restarts are tried one byte at a time up to [`MAX_SHIFT`] bytes ahead;
/// the first that stays clean for [`LOOKAHEAD`] bytes (or to the end of
/// `buf`) wins. Failing that, skips by the restart that got furthest, so
/// that the caller's next scan stops no earlier than that restart did.
fn resync(buf: &[u8], at: usize) -> usize {
    let horizon = buf.len().min(at + LOOKAHEAD);
    let mut best = (at, 1);
    for shift in 1..=MAX_SHIFT {
        let from = at + shift;
        if from >= buf.len() {
            return buf.len();
        }
        match scan(buf, from, horizon) {
            Scan::Clean { .. } => return from,
            Scan::Stop { at: reach } => {
                if reach > best.0 {
                    best = (reach, shift);
                }
            }
        }
    }
    at + best.1
}

/// Partitions `buf` into segments that cover it in order, with no gaps or
/// overlaps. Consecutive segments never share a kind, except that the first
/// segment may be a short literal.
pub fn segment(buf: &[u8]) -> Vec<Segment> {
    let mut segments = Segments::default();
    let mut pos = 0;
    while pos < buf.len() {
        let stop = match scan(buf, pos, buf.len()) {
            Scan::Clean { end } => end,
            Scan::Stop { at } => at,
        };
        segments.push_literal(pos..stop);
        if stop == buf.len() {
            break;
        }
        let resume = resync(buf, stop);
        segments.push_binary(stop..resume);
        pos = resume;
    }

    debug!(
        "split {} bytes into {} segments",
        buf.len(),
        segments.0.len(),
    );
    segments.0
}

#[cfg(test)]
mod tests {
    use super::SegmentKind::{Binary, Literal};
    use super::*;

    fn kinds(buf: &[u8]) -> Vec<(SegmentKind, Range<usize>)> {
        segment(buf).into_iter().map(|s| (s.kind, s.range)).collect()
    }

    #[test]
    fn empty_and_plain_text() {
        assert!(segment(b"").is_empty());
        assert_eq!(kinds(b"plain text\r\n"), [(Literal, 0..12)]);
        assert_eq!(kinds(b"ab"), [(Literal, 0..2)]);
    }

    #[test]
    fn noise_is_one_binary_run() {
        assert_eq!(kinds(&[0xff; 20]), [(Binary, 0..20)]);
        assert_eq!(kinds(&[0; 3]), [(Binary, 0..3)]);
    }

    #[test]
    fn text_resumes_after_one_bad_byte() {
        let mut buf = b"ab\xff".to_vec();
        buf.extend_from_slice(b"this tail is long enough");
        let len = buf.len();
        assert_eq!(
            kinds(&buf),
            [(Literal, 0..2), (Binary, 2..3), (Literal, 3..len)],
        );
    }

    #[test]
    fn short_literals_are_folded() {
        // The trailing literal is too short to stand alone.
        assert_eq!(kinds(b"\xffabc"), [(Binary, 0..4)]);

        // Skipping ahead by the furthest-reaching restart leaves "abcdef"
        // as a six-byte literal, which joins the binary run.
        let mut buf = b"\xffabcdef".to_vec();
        buf.extend_from_slice(&[0xff; 10]);
        assert_eq!(kinds(&buf), [(Binary, 0..17)]);

        let mut buf = b"\xffabcdefgh".to_vec();
        buf.extend_from_slice(&[0xff; 10]);
        assert_eq!(
            kinds(&buf),
            [(Binary, 0..1), (Literal, 1..9), (Binary, 9..19)],
        );
    }

    #[test]
    fn smallest_clean_shift_wins() {
        // Every restart after the bad byte would be clean.
        let buf = b"text\xff and some more text";
        let len = buf.len();
        assert_eq!(
            kinds(buf),
            [(Literal, 0..4), (Binary, 4..5), (Literal, 5..len)],
        );

        let mut buf = b"text\xff\xfe".to_vec();
        buf.extend_from_slice(b" and some more text");
        let len = buf.len();
        assert_eq!(
            kinds(&buf),
            [(Literal, 0..4), (Binary, 4..6), (Literal, 6..len)],
        );
    }

    #[test]
    fn equal_reach_takes_smallest_shift() {
        // Every restart stops at the same bad byte.
        let mut buf = vec![0xff];
        buf.extend_from_slice(b"abcdefgh");
        buf.extend_from_slice(&[0xff; 4]);
        assert_eq!(resync(&buf, 0), 1);
        assert_eq!(
            kinds(&buf),
            [(Binary, 0..1), (Literal, 1..9), (Binary, 9..13)],
        );

        // The restart at 1 lands on a continuation byte. The rest all stop
        // at offset 9, so the first of them is taken.
        let mut buf = vec![0xff, 0x80];
        buf.extend_from_slice(b"abcdefg");
        buf.extend_from_slice(&[0xff; 4]);
        assert_eq!(resync(&buf, 0), 2);
    }

    #[test]
    fn markers_are_never_literal() {
        let buf = b"see `{ this } and then more plain text";
        let segments = segment(buf);
        assert_eq!(segments[0], Segment::new(Literal, 0..4));
        assert_eq!(segments[1], Segment::new(Binary, 4..5));
        for s in segments.iter().filter(|s| s.kind == Literal) {
            assert!(!buf[s.range.clone()].windows(2).any(|w| w == b"`{"));
        }
    }

    #[test]
    fn long_binary_runs_advance() {
        let mut buf = vec![0x01; 1000];
        buf.extend_from_slice(b"then a line of text");
        let segments = segment(&buf);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], Segment::new(Binary, 0..1000));
    }
}
