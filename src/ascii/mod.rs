mod core;


pub use self::core::{
    AsciiDigest, DigestError, OFFSET, Width, decode, encode, encode_complement16,
    encode_complement32, encode16, encode32,
};
