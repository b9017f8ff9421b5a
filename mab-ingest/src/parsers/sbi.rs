//! SBI savings-account statement parser (text)
//!
//! Expects the output of a PDF-to-text step: a preamble, then a table headed
//! `Txn Date | Value Date | Description | Ref No./Cheque No. | Debit | Credit | Balance`
//! whose rows may wrap over several lines.

use mab_core::{EventSink, ParseEvent, Result, TracingSink};
use tracing::debug;

use crate::builder::TransactionBuilder;
use crate::classify::{KeywordClassifier, TransactionClassifier};
use crate::segment::LineClassifier;
use crate::types::{Extraction, ExtractionOutcome};

/// Parse statement text with the default keyword classifier, reporting to `tracing`.
pub fn parse_sbi_text(text: &str) -> Result<Extraction> {
    parse_sbi_text_with(text, KeywordClassifier::default(), &TracingSink)
}

/// Parse statement text into transactions in document order.
///
/// A block that cannot be built is reported to `sink` and skipped; it never aborts the
/// rest of the document.
pub fn parse_sbi_text_with<C: TransactionClassifier>(
    text: &str,
    classifier: C,
    sink: &dyn EventSink,
) -> Result<Extraction> {
    let lines = LineClassifier::new()?;
    let builder = TransactionBuilder::new(classifier)?;

    let segmentation = lines.segment(text, sink);
    debug!(
        blocks = segmentation.blocks.len(),
        lines = segmentation.lines_scanned,
        "statement segmented"
    );

    let transactions: Vec<_> = segmentation
        .blocks
        .iter()
        .filter_map(|block| builder.build(block, sink))
        .collect();

    let outcome = match (segmentation.header_line, transactions.is_empty()) {
        (None, _) => ExtractionOutcome::HeaderNotFound,
        (Some(_), true) => ExtractionOutcome::NoTransactions,
        (Some(_), false) => ExtractionOutcome::Parsed,
    };

    sink.emit(ParseEvent::ExtractionFinished {
        blocks: segmentation.blocks.len(),
        transactions: transactions.len(),
    });

    Ok(Extraction {
        outcome,
        transactions,
        lines_scanned: segmentation.lines_scanned,
        blocks: segmentation.blocks.len(),
    })
}
