//! Bank-specific statement parsers.

pub mod sbi;
