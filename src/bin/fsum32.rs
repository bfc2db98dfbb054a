// fsum32 — 16-bit and 32-bit ones' complement checksums with ASCII digests

use std::ffi::{OsStr, OsString};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

use anyhow::{Result, anyhow, bail};
use clap::{ArgAction, Parser};
use clap::error::ErrorKind;

use sum32_rs::ascii;
use sum32_rs::checksum::{
    LiteralError, checksum_bytes, checksum_file, checksum_stdin, from_literal, parse_literal,
};
use sum32_rs::common::io::is_directory;
use sum32_rs::common::{io_error_msg, reset_sigpipe};
use sum32_rs::report::{Mode, Report, write_terse, write_verbose};

const TOOL_NAME: &str = "fsum32";
const USAGE: &str = "fsum32 [-v] [-c] [-p] [-i <ascii>] [<file>|<number>]";

#[derive(Parser)]
#[command(
    name = "fsum32",
    version,
    override_usage = USAGE,
    about = "Accumulate the 32 bit and 16 bit 1's complement checksums of a file, \
             standard input, a decimal checksum, or an ASCII coded checksum"
)]
struct Cli {
    /// Report both checksums, their complements, digests and the file size
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,

    /// Report only the ASCII coded complement of the 32-bit checksum
    #[arg(short = 'c', action = ArgAction::Count)]
    code: u8,

    /// Permute the digest characters for FITS keyword alignment
    #[arg(short = 'p', action = ArgAction::Count)]
    permute: u8,

    /// Invert the transformation given an ASCII coded checksum
    #[arg(short = 'i', value_name = "ASCII", allow_hyphen_values = true)]
    inverse: Option<OsString>,

    /// File to checksum, or a decimal 32-bit checksum; '-' reads standard input
    #[arg(value_name = "FILE|NUMBER")]
    target: Option<OsString>,
}

impl Cli {
    fn verbose(&self) -> bool {
        self.verbose > 0
    }

    fn code(&self) -> bool {
        self.code > 0
    }

    fn permute(&self) -> bool {
        self.permute > 0
    }
}

/// Resolve the input mode and compute the checksum pair for it.
fn resolve(cli: &Cli) -> Result<Report> {
    if let Some(digest) = &cli.inverse {
        let bytes = ascii::decode(digest.as_encoded_bytes(), cli.permute())
            .map_err(|e| anyhow!("{}: {}", digest.to_string_lossy(), e))?;
        let pair = checksum_bytes(&bytes);
        return Ok(Report::streamed(Mode::Inverse, pair, bytes.len() as u64));
    }

    let name = match cli.target.as_deref() {
        None => None,
        Some(n) if n == OsStr::new("-") => None,
        Some(n) => Some(n),
    };
    let Some(name) = name else {
        let (pair, size) = checksum_stdin().map_err(|e| anyhow!("-: {}", io_error_msg(&e)))?;
        return Ok(Report::streamed(Mode::Stdin, pair, size));
    };

    let display = name.to_string_lossy();
    let path = Path::new(name);
    if is_directory(path) {
        bail!("{}: Is a directory", display);
    }

    match checksum_file(path) {
        Ok((pair, size)) => Ok(Report::streamed(Mode::File, pair, size)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Not a file: treat the operand as a previously computed 32-bit sum.
            match name.to_str().map(parse_literal) {
                Some(Ok(raw)) => Ok(Report::literal(from_literal(raw))),
                Some(Err(err @ LiteralError::OutOfRange(_))) => Err(err.into()),
                _ => Err(anyhow!("{}: {}", display, io_error_msg(&e))),
            }
        }
        Err(e) => Err(anyhow!("{}: {}", display, io_error_msg(&e))),
    }
}

fn write_report(out: &mut impl Write, cli: &Cli, report: &Report) -> io::Result<()> {
    if cli.verbose() {
        write_verbose(out, report, cli.permute())
    } else {
        write_terse(out, report, cli.code(), cli.permute())
    }
}

fn main() {
    reset_sigpipe();

    if std::env::args_os().len() <= 1 {
        eprintln!("usage: {}", USAGE);
        process::exit(1);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            let _ = e.print();
            process::exit(1);
        }
    };

    let report = match resolve(&cli) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}: {}", TOOL_NAME, e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = write_report(&mut out, &cli, &report).and_then(|_| out.flush()) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            process::exit(0);
        }
        eprintln!("{}: write error: {}", TOOL_NAME, io_error_msg(&e));
        process::exit(1);
    }
}
