use std::io::{self, Write};

use crate::ascii::{encode_complement16, encode_complement32, encode16, encode32};
use crate::checksum::ChecksumPair;

/// Where a checksum pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    File,
    Stdin,
    /// Decimal literal folded directly; there is no byte count.
    Literal,
    /// Bytes recovered from an ASCII digest.
    Inverse,
}

/// Settled result of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub mode: Mode,
    pub pair: ChecksumPair,
    /// Total bytes summed. Meaningless in literal mode.
    pub bytes: u64,
}

impl Report {
    pub fn streamed(mode: Mode, pair: ChecksumPair, size: u64) -> Self {
        Report {
            mode,
            pair,
            bytes: size,
        }
    }

    pub fn literal(pair: ChecksumPair) -> Self {
        Report {
            mode: Mode::Literal,
            pair,
            bytes: 0,
        }
    }

    /// Byte count to report, if the pair was summed over a real stream.
    #[inline]
    pub fn size(&self) -> Option<u64> {
        match self.mode {
            Mode::Literal => None,
            Mode::File | Mode::Stdin | Mode::Inverse => Some(self.bytes),
        }
    }
}

/// Both sums with their complements and digests, plus the file size.
pub fn write_verbose(out: &mut impl Write, report: &Report, permute: bool) -> io::Result<()> {
    let ChecksumPair { sum16, sum32 } = report.pair;
    let complement = report.pair.complement();

    write!(out, "\nchecksum16:  {:05} = ", sum16)?;
    encode16(sum16, permute).write_padded(out, 8)?;
    write!(out, "\ncomplement:  {:05} = ", complement.sum16)?;
    encode_complement16(sum16, permute).write_padded(out, 8)?;
    out.write_all(b"\n")?;

    write!(out, "\nchecksum32:  {:010} = ", sum32)?;
    encode32(sum32, permute).write_padded(out, 16)?;
    write!(out, "\ncomplement:  {:010} = ", complement.sum32)?;
    encode_complement32(sum32, permute).write_padded(out, 16)?;
    out.write_all(b"\n")?;

    if let Some(size) = report.size() {
        write!(out, "\n file size:  {} bytes\n\n", size)?;
    }
    Ok(())
}

/// One line: the complement digest when `code` is set, otherwise the
/// decimal 32-bit sum, or `sum_zeroed` when it is all ones.
pub fn write_terse(
    out: &mut impl Write,
    report: &Report,
    code: bool,
    permute: bool,
) -> io::Result<()> {
    let sum32 = report.pair.sum32;
    if code {
        encode_complement32(sum32, permute).write_padded(out, 16)?;
        out.write_all(b"\n")
    } else if report.pair.is_zeroed() {
        out.write_all(b"sum_zeroed\n")
    } else {
        writeln!(out, "{:010}", sum32)
    }
}
