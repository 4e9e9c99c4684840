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

use super::alphabet::{Alphabet, Mode};
use super::decode::{self, DecodeResult};
use super::segment::{segment, SegmentKind};
use super::wrap::write_block;

use log::debug;

/// Used by [`Codec::new`] to configure encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// The alphabet variant used for output. Decoding accepts either
    /// variant. [default: native]
    pub mode: Mode,
    /// Number of symbols per line within an encoded block. Zero disables
    /// line breaks. [default: 80]
    pub wrap_width: usize,
    /// Whether bare (non-mixed) output is surrounded by ‘`{’ and ‘}’. Mixed
    /// output is always framed. [default: true]
    pub frame_bare: bool,
}

impl Config {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            mode: Mode::Native,
            wrap_width: 80,
            frame_bare: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes and decodes with a fixed [`Config`].
#[derive(Clone, Copy, Debug)]
pub struct Codec {
    alphabet: &'static Alphabet,
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Self {
            alphabet: Alphabet::get(config.mode),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alphabet(&self) -> &'static Alphabet {
        self.alphabet
    }

    /// Encodes `bytes`, leaving printable text as is if `mixed` is true.
    /// Never fails.
    pub fn encode(&self, bytes: &[u8], mixed: bool) -> Vec<u8> {
        if mixed {
            self.encode_mixed(bytes)
        } else {
            self.encode_bare(bytes)
        }
    }

    /// Encodes all of `bytes` as a single block.
    pub fn encode_bare(&self, bytes: &[u8]) -> Vec<u8> {
        self.block(bytes, self.config.frame_bare)
    }

    /// Copies printable runs of `bytes` to the output and encodes everything
    /// else in framed blocks.
    ///
    /// In legacy mode the output is a single framed block.
    ///
    /// Native input with nothing to encode is returned unchanged. Such
    /// output has no block, so [`Codec::decode`] treats it as bare data and
    /// does not give back the original text.
    pub fn encode_mixed(&self, bytes: &[u8]) -> Vec<u8> {
        if self.config.mode == Mode::Legacy {
            return self.block(bytes, true);
        }

        let mut out = Vec::with_capacity(bytes.len());
        let segments = segment(bytes);
        for s in &segments {
            let part = &bytes[s.range.clone()];
            match s.kind {
                SegmentKind::Literal => out.extend_from_slice(part),
                SegmentKind::Binary => self.write_block(part, true, &mut out),
            }
        }
        debug!(
            "mixed encoding: {} bytes in, {} bytes out",
            bytes.len(),
            out.len(),
        );
        out
    }

    /// Decodes bare or mixed data. The input is checked in full before any
    /// output is produced.
    pub fn decode(&self, text: &[u8]) -> DecodeResult<Vec<u8>> {
        decode::decode_text(self.alphabet, text)
    }

    fn block(&self, bytes: &[u8], framed: bool) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_block(bytes, framed, &mut out);
        out
    }

    fn write_block(&self, bytes: &[u8], framed: bool, out: &mut Vec<u8>) {
        write_block(self.alphabet, bytes, self.config.wrap_width, framed, out);
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(Config::new())
    }
}
