use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;

use crate::common::io::open_noatime;

/// FITS logical record length in bytes.
const RECORD: usize = 2880;

/// Chunk size used when streaming files and stdin: ten FITS records.
pub const RECORD_BLOCK: usize = 10 * RECORD;

/// Words folded per inner batch. Keeps the u64 lane sums far below overflow
/// (2^20 words of at most 2^32 each) no matter how large a single chunk is.
const FOLD_BATCH: usize = 1 << 20;

/// The 16-bit and 32-bit ones'-complement sums of one byte stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecksumPair {
    pub sum16: u16,
    pub sum32: u32,
}

impl ChecksumPair {
    /// Bitwise complement of both sums.
    #[inline]
    pub fn complement(self) -> ChecksumPair {
        ChecksumPair {
            sum16: !self.sum16,
            sum32: !self.sum32,
        }
    }

    /// True when the 32-bit sum is all ones, i.e. the data already embeds
    /// its own complement and verifies to negative zero.
    #[inline]
    pub fn is_zeroed(self) -> bool {
        self.sum32 == u32::MAX
    }
}

/// Add two 32-bit values with end-around carry.
#[inline]
pub fn ones_add32(a: u32, b: u32) -> u32 {
    let (sum, carry) = a.overflowing_add(b);
    sum + carry as u32
}

/// Add two 16-bit values with end-around carry.
#[inline]
pub fn ones_add16(a: u16, b: u16) -> u16 {
    let (sum, carry) = a.overflowing_add(b);
    sum + carry as u16
}

/// Fold a raw 32-bit sum into its 16-bit ones'-complement equivalent.
///
/// The high and low halves are added and any carry out of bit 16 is
/// wrapped back into bit 0 until none remains. `fold(0x0001_0000) == 1`.
#[inline]
pub fn fold(raw32: u32) -> u16 {
    let mut acc = (raw32 >> 16) + (raw32 & 0xFFFF);
    while acc >> 16 != 0 {
        acc = (acc & 0xFFFF) + (acc >> 16);
    }
    acc as u16
}

#[inline]
fn fold64_to_32(mut acc: u64) -> u32 {
    while acc >> 32 != 0 {
        acc = (acc & 0xFFFF_FFFF) + (acc >> 32);
    }
    acc as u32
}

#[inline]
fn fold64_to_16(mut acc: u64) -> u16 {
    while acc >> 16 != 0 {
        acc = (acc & 0xFFFF) + (acc >> 16);
    }
    acc as u16
}

/// Running checksum state for a byte stream fed in arbitrary chunks.
///
/// Bytes are grouped into big-endian 4-byte words for the 32-bit sum and
/// big-endian 2-byte words for the 16-bit sum. A word split across two
/// chunks is held back in `pending` until it completes, so chunk boundaries
/// never introduce padding; only `finish` zero-pads the final partial word.
#[derive(Debug, Clone, Copy, Default)]
pub struct Accumulator {
    sum16: u16,
    sum32: u32,
    pending: [u8; 4],
    pending_len: usize,
    bytes: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk. Returns the number of bytes consumed (always the
    /// chunk length).
    pub fn update(&mut self, chunk: &[u8]) -> usize {
        self.bytes += chunk.len() as u64;
        let mut data = chunk;

        if self.pending_len > 0 {
            let take = (4 - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];
            if self.pending_len < 4 {
                return chunk.len();
            }
            let word = self.pending;
            self.add_words(&word);
            self.pending_len = 0;
        }

        let whole = data.len() & !3;
        self.add_words(&data[..whole]);

        let rest = &data[whole..];
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();

        chunk.len()
    }

    /// By-value form of [`update`](Self::update).
    #[inline]
    pub fn accumulate(mut self, chunk: &[u8]) -> Self {
        self.update(chunk);
        self
    }

    /// Total bytes fed so far.
    #[inline]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Settle the sums, zero-padding a trailing partial word.
    pub fn finish(mut self) -> ChecksumPair {
        if self.pending_len > 0 {
            let mut word = [0u8; 4];
            word[..self.pending_len].copy_from_slice(&self.pending[..self.pending_len]);
            self.add_words(&word);
            self.pending_len = 0;
        }
        ChecksumPair {
            sum16: self.sum16,
            sum32: self.sum32,
        }
    }

    // `data.len()` must be a multiple of 4.
    fn add_words(&mut self, data: &[u8]) {
        for batch in data.chunks(FOLD_BATCH * 4) {
            let mut acc32 = 0u64;
            let mut acc16 = 0u64;
            for word in batch.chunks_exact(4) {
                let hi = u16::from_be_bytes([word[0], word[1]]) as u64;
                let lo = u16::from_be_bytes([word[2], word[3]]) as u64;
                acc32 += (hi << 16) | lo;
                acc16 += hi + lo;
            }
            self.sum32 = ones_add32(self.sum32, fold64_to_32(acc32));
            self.sum16 = ones_add16(self.sum16, fold64_to_16(acc16));
        }
    }
}

/// Checksum an in-memory buffer in one call.
pub fn checksum_bytes(data: &[u8]) -> ChecksumPair {
    Accumulator::new().accumulate(data).finish()
}

/// Checksum everything readable from `reader`, in [`RECORD_BLOCK`] chunks.
/// Returns the settled pair and the total byte count.
pub fn checksum_reader<R: Read>(mut reader: R) -> io::Result<(ChecksumPair, u64)> {
    let mut buf = vec![0u8; RECORD_BLOCK];
    let mut acc = Accumulator::new();
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        acc.update(&buf[..n]);
    }
    let bytes = acc.bytes();
    Ok((acc.finish(), bytes))
}

/// Checksum a file by path. The handle is closed before returning.
pub fn checksum_file(path: &Path) -> io::Result<(ChecksumPair, u64)> {
    let file = open_noatime(path)?;
    checksum_reader(file)
}

/// Checksum standard input.
pub fn checksum_stdin() -> io::Result<(ChecksumPair, u64)> {
    checksum_reader(io::stdin().lock())
}

/// A decimal literal that cannot stand in for a 32-bit checksum.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("invalid checksum literal '{0}'")]
    NotDecimal(String),
    #[error("checksum literal '{0}' does not fit in 32 bits")]
    OutOfRange(String),
}

/// Parse a non-negative decimal literal as a raw 32-bit sum.
pub fn parse_literal(s: &str) -> Result<u32, LiteralError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LiteralError::NotDecimal(s.to_string()));
    }
    s.parse::<u32>()
        .map_err(|_| LiteralError::OutOfRange(s.to_string()))
}

/// Treat `raw32` as an already computed 32-bit sum and derive its 16-bit
/// counterpart by folding.
#[inline]
pub fn from_literal(raw32: u32) -> ChecksumPair {
    ChecksumPair {
        sum16: fold(raw32),
        sum32: raw32,
    }
}
