//! Transaction builder: turns one block into a typed [`Transaction`].
//!
//! SBI rows end with `<amount> <balance>`, e.g. `... 1,000.00 5,000.00`. The last
//! decimal figure is the running balance and the one before it is the movement.

use mab_core::{EventSink, ParseEvent, Result, Transaction};
use regex::Regex;

use crate::classify::TransactionClassifier;
use crate::segment::parse_statement_date;
use crate::types::TransactionBlock;

pub struct TransactionBuilder<C> {
    amount_re: Regex,
    classifier: C,
}

impl<C: TransactionClassifier> TransactionBuilder<C> {
    pub fn new(classifier: C) -> Result<Self> {
        // Whole whitespace-separated token only, so "12,345.678" or "A1.00" never match.
        let amount_re = Regex::new(r"^\d[\d,]*\.\d{2}$")?;
        Ok(Self {
            amount_re,
            classifier,
        })
    }

    /// Every amount in `text`, in order, with thousands separators removed
    pub fn amounts(&self, text: &str) -> Vec<f64> {
        text.split_whitespace()
            .filter(|token| self.amount_re.is_match(token))
            .filter_map(|token| token.replace(',', "").parse().ok())
            .collect()
    }

    /// Build a transaction from `block`.
    ///
    /// Returns `None` only when the block's date is not a real calendar date. Blocks
    /// with missing figures still produce a transaction with zeroed values.
    pub fn build(&self, block: &TransactionBlock, sink: &dyn EventSink) -> Option<Transaction> {
        let line = block.start();

        let Some(date) = parse_statement_date(&block.date_text) else {
            sink.emit(ParseEvent::BlockRejected {
                line,
                reason: format!("invalid date '{}'", block.date_text),
            });
            return None;
        };

        let text = block.joined();
        let amounts = self.amounts(&text);

        let (movement_amount, balance) = match amounts.as_slice() {
            [] => (None, 0.0),
            [balance] => (None, *balance),
            [.., amount, balance] => (Some(*amount), *balance),
        };

        if amounts.len() < 2 {
            sink.emit(ParseEvent::DegradedBlock {
                line,
                amounts: amounts.len(),
            });
        }

        let movement = self.classifier.classify(&text, movement_amount);
        sink.emit(ParseEvent::TransactionBuilt {
            line,
            movement,
            balance,
        });

        Some(Transaction::new(
            date,
            block.date_text.as_str(),
            movement,
            balance,
            block.first_line(),
        ))
    }
}
