use mab_core::{Error, Result, Transaction};
use serde::Serialize;

/// A line of extracted text with its 0-based position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub position: usize,
    pub text: String,
}

/// Lines describing one transaction: a date line plus its continuation lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBlock {
    /// Date substring matched on the opening line, verbatim
    pub date_text: String,
    pub lines: Vec<RawLine>,
}

impl TransactionBlock {
    pub fn new(date_text: impl Into<String>, first: RawLine) -> Self {
        Self {
            date_text: date_text.into(),
            lines: vec![first],
        }
    }

    pub fn push(&mut self, line: RawLine) {
        self.lines.push(line);
    }

    /// Position of the opening line
    pub fn start(&self) -> usize {
        self.lines.first().map(|l| l.position).unwrap_or(0)
    }

    pub fn first_line(&self) -> &str {
        self.lines.first().map(|l| l.text.trim()).unwrap_or("")
    }

    /// All lines joined with single spaces
    pub fn joined(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How an extraction ended. `NoTransactions` and `HeaderNotFound` both yield an empty
/// list but mean different things to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    Parsed,
    /// Header found, but no dated rows followed it
    NoTransactions,
    /// The transaction table header never appeared
    HeaderNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub outcome: ExtractionOutcome,
    pub transactions: Vec<Transaction>,
    pub lines_scanned: usize,
    pub blocks: usize,
}

impl Extraction {
    /// Treat a missing header as an error instead of an empty result
    pub fn require_header(self) -> Result<Self> {
        match self.outcome {
            ExtractionOutcome::HeaderNotFound => Err(Error::HeaderNotFound {
                lines: self.lines_scanned,
            }),
            _ => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(position: usize, text: &str) -> RawLine {
        RawLine {
            position,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_block_joins_with_single_spaces() {
        let mut block = TransactionBlock::new("2 Jan 2024", line(4, "2 Jan 2024  NEFT"));
        block.push(line(5, "ACME PAYROLL"));
        assert_eq!(block.start(), 4);
        assert_eq!(block.first_line(), "2 Jan 2024  NEFT");
        assert_eq!(block.joined(), "2 Jan 2024  NEFT ACME PAYROLL");
    }

    #[test]
    fn test_require_header() {
        let missing = Extraction {
            outcome: ExtractionOutcome::HeaderNotFound,
            transactions: Vec::new(),
            lines_scanned: 12,
            blocks: 0,
        };
        assert!(matches!(
            missing.require_header(),
            Err(Error::HeaderNotFound { lines: 12 })
        ));

        let empty = Extraction {
            outcome: ExtractionOutcome::NoTransactions,
            transactions: Vec::new(),
            lines_scanned: 12,
            blocks: 0,
        };
        assert!(empty.require_header().is_ok());
    }
}
