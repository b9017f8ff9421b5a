//! mab-ingest: statement text segmentation, transaction building and bank-specific parsers.

pub mod builder;
pub mod classify;
pub mod parsers;
pub mod segment;
pub mod types;

pub use builder::TransactionBuilder;
pub use classify::{KeywordClassifier, TransactionClassifier};
pub use parsers::sbi::{parse_sbi_text, parse_sbi_text_with};
pub use segment::LineClassifier;
pub use types::{Extraction, ExtractionOutcome, RawLine, TransactionBlock};
