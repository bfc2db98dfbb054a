use std::io::{self, Write};

use thiserror::Error;

/// Added to each value byte to land it in the printable range.
pub const OFFSET: u8 = 0x30;

/// Width of the encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Sum16,
    Sum32,
}

impl Width {
    /// Digest length in characters (one per value byte).
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            Width::Sum16 => 2,
            Width::Sum32 => 4,
        }
    }

    #[inline]
    pub fn mask(self) -> u32 {
        match self {
            Width::Sum16 => 0xFFFF,
            Width::Sum32 => 0xFFFF_FFFF,
        }
    }

    fn from_len(len: usize) -> Option<Width> {
        match len {
            2 => Some(Width::Sum16),
            4 => Some(Width::Sum32),
            _ => None,
        }
    }
}

/// A rejected inverse-mode digest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("invalid digest length {0} (expected 2 or 4 characters)")]
    InvalidLength(usize),
}

/// Fixed-length character rendering of a checksum value.
///
/// Characters are `byte + OFFSET` with wrapping, so values with bytes at or
/// above `0xD0` produce non-ASCII bytes. The digest is therefore kept as raw
/// bytes rather than a `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiDigest {
    buf: [u8; 4],
    len: usize,
}

impl AsciiDigest {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn width(&self) -> Width {
        if self.len == 2 { Width::Sum16 } else { Width::Sum32 }
    }

    /// Write the digest right-aligned in a field of `width` columns, like
    /// printf's `%Ns`.
    pub fn write_padded(&self, out: &mut impl Write, width: usize) -> io::Result<()> {
        for _ in self.len..width {
            out.write_all(b" ")?;
        }
        out.write_all(self.as_bytes())
    }
}

/// Encode the low `width` bits of `value`, most significant byte first.
///
/// With `permute`, the characters are rotated one position to the right
/// (position i moves to i+1, the last wraps to 0) so the digest stays
/// aligned when embedded at an offset that is not a multiple of its length.
pub fn encode(value: u32, width: Width, permute: bool) -> AsciiDigest {
    let n = width.bytes();
    let be = (value & width.mask()).to_be_bytes();
    let mut buf = [0u8; 4];
    for (dst, &b) in buf.iter_mut().zip(&be[4 - n..]) {
        *dst = b.wrapping_add(OFFSET);
    }
    if permute {
        buf[..n].rotate_right(1);
    }
    AsciiDigest { buf, len: n }
}

#[inline]
pub fn encode16(value: u16, permute: bool) -> AsciiDigest {
    encode(value as u32, Width::Sum16, permute)
}

#[inline]
pub fn encode32(value: u32, permute: bool) -> AsciiDigest {
    encode(value, Width::Sum32, permute)
}

/// Digest of the ones' complement of `value`. The value is complemented
/// before byte decomposition.
#[inline]
pub fn encode_complement16(value: u16, permute: bool) -> AsciiDigest {
    encode16(!value, permute)
}

#[inline]
pub fn encode_complement32(value: u32, permute: bool) -> AsciiDigest {
    encode32(!value, permute)
}

/// Recover the byte sequence an encoded digest was built from.
///
/// Undoes the rotation when `permute` is set, then subtracts [`OFFSET`]
/// from each character with wrapping, which inverts `encode` exactly for
/// every byte value. Only 2- and 4-character digests are accepted.
pub fn decode(digest: &[u8], permute: bool) -> Result<Vec<u8>, DigestError> {
    if Width::from_len(digest.len()).is_none() {
        return Err(DigestError::InvalidLength(digest.len()));
    }
    let mut bytes: Vec<u8> = digest.iter().map(|c| c.wrapping_sub(OFFSET)).collect();
    if permute {
        bytes.rotate_left(1);
    }
    Ok(bytes)
}
