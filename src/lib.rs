#![allow(clippy::len_without_is_empty)]

/// Use mimalloc as the global allocator for the binary and tests.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod ascii;
pub mod checksum;
pub mod common;
pub mod report;
