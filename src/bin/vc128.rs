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

use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};
use vc128::{Codec, Config, Mode};

/// Encodes or decodes base-128 data from [FILE] and writes the result to
/// standard output.
#[derive(Parser)]
#[command(name = "vc128", version, about, long_about = None)]
struct Cli {
    /// Input file. If missing or "-", the data is read from standard input.
    file: Option<PathBuf>,

    /// Decode data instead of encoding
    #[arg(short, long)]
    decode: bool,

    /// Leave printable text as is and encode only the bytes that are not
    #[arg(short, long, conflicts_with = "decode")]
    mixed: bool,

    /// Alphabet used for encoded output
    #[arg(long, value_enum, default_value = "native")]
    mode: AlphabetMode,

    /// Symbols per line of encoded output (0 for no line breaks)
    #[arg(short, long, value_name = "N", default_value_t = 80)]
    wrap: usize,

    /// When encoding, don't output the wrapping '`{' and '}'
    #[arg(long)]
    no_wrapper: bool,

    /// Print the alphabet and exit
    #[arg(long)]
    table: bool,

    /// Log progress to standard error
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlphabetMode {
    /// UTF-8 output
    Native,
    /// Single-byte Windows-1251 output
    Legacy,
}

impl From<AlphabetMode> for Mode {
    fn from(mode: AlphabetMode) -> Self {
        match mode {
            AlphabetMode::Native => Mode::Native,
            AlphabetMode::Legacy => Mode::Legacy,
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    let result = match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => File::open(path)
            .with_context(|| {
                format!("could not open file '{}'", path.display())
            })?
            .read_to_end(&mut input),
        None => stdin().lock().read_to_end(&mut input),
    };
    result.context("could not read input")?;
    Ok(input)
}

fn write_output(output: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(stdout().lock());
    writer
        .write_all(output)
        .and_then(|_| writer.flush())
        .context("could not write to standard output")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = Config::new();
    config.mode = cli.mode.into();
    config.wrap_width = cli.wrap;
    config.frame_bare = !cli.no_wrapper;
    let codec = Codec::new(config);

    if cli.table {
        print!("{}", codec.alphabet());
        return Ok(());
    }

    let input = read_input(cli.file.as_deref())?;
    let output = if cli.decode {
        codec.decode(&input).context("input is not valid vc128 data")?
    } else {
        codec.encode(&input, cli.mixed)
    };
    debug!("read {} bytes, writing {} bytes", input.len(), output.len());
    write_output(&output)
}
