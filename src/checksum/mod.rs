mod core;


pub use self::core::{
    Accumulator, ChecksumPair, LiteralError, RECORD_BLOCK, checksum_bytes, checksum_file,
    checksum_reader, checksum_stdin, fold, from_literal, ones_add16, ones_add32, parse_literal,
};
