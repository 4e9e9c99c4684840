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

use super::{END, START};

/// A run of decoder input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    /// Text outside any block, copied to the output unchanged.
    Text(&'a [u8]),
    /// The contents of a ‘`{’ … ‘}’ block. `offset` is where `content`
    /// starts in the whole input.
    Block { content: &'a [u8], offset: usize },
}

/// How decoder input is laid out.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Layout<'a> {
    /// No start marker: the whole input is encoded data.
    Bare(&'a [u8]),
    /// Text interleaved with framed blocks.
    Framed(Vec<Piece<'a>>),
}

fn find_start(text: &[u8], from: usize) -> Option<usize> {
    text[from..]
        .windows(START.len())
        .position(|w| w == START.as_slice())
        .map(|i| from + i)
}

/// Splits `text` at its markers in a single pass. A block missing its ‘}’
/// runs to the end of the input.
pub(crate) fn layout(text: &[u8]) -> Layout<'_> {
    let mut next = match find_start(text, 0) {
        Some(start) => Some(start),
        None => return Layout::Bare(text),
    };

    let mut pieces = Vec::new();
    let mut pos = 0;
    while let Some(start) = next {
        if start > pos {
            pieces.push(Piece::Text(&text[pos..start]));
        }
        let offset = start + START.len();
        let end = text[offset..]
            .iter()
            .position(|&b| b == END)
            .map_or(text.len(), |i| offset + i);
        pieces.push(Piece::Block {
            content: &text[offset..end],
            offset,
        });
        pos = text.len().min(end + 1);
        next = find_start(text, pos);
    }
    if pos < text.len() {
        pieces.push(Piece::Text(&text[pos..]));
    }
    Layout::Framed(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare() {
        assert_eq!(layout(b""), Layout::Bare(b""));
        assert_eq!(layout(b"ab|cd}"), Layout::Bare(b"ab|cd}"));
        assert_eq!(layout(b"ab`c{"), Layout::Bare(b"ab`c{"));
    }

    #[test]
    fn framed() {
        assert_eq!(
            layout(b"`{}"),
            Layout::Framed(vec![Piece::Block {
                content: b"",
                offset: 2,
            }]),
        );
        assert_eq!(
            layout(b"x}``{ab}}`{c"),
            Layout::Framed(vec![
                Piece::Text(b"x}`"),
                Piece::Block {
                    content: b"ab",
                    offset: 5,
                },
                Piece::Text(b"}"),
                Piece::Block {
                    content: b"c",
                    offset: 11,
                },
            ]),
        );
    }
}
