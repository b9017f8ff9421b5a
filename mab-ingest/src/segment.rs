//! Line classifier: splits extracted statement text into transaction blocks.
//!
//! Expected extracted-text section (SBI-style savings statement):
//!   Txn Date    Value Date   Description                 Ref No./Cheque No.   Debit   Credit   Balance
//!   17 Sep 2024 17 Sep 2024  BY TRANSFER-NEFT*HDFC0000001*N261...                   1,000.00 5,000.00
//!                            ACME PAYROLL
//!
//! Rows wrap across lines, so a block runs from one dated line to the next.

use chrono::NaiveDate;
use mab_core::{EventSink, ParseEvent, Result};
use regex::Regex;

use crate::types::{RawLine, TransactionBlock};

const HEADER_TOKENS: [&str; 3] = ["Txn Date", "Date", "Description"];
const REPEATED_HEADER: &str = "Txn Date";

/// Parse "17 Sep 2024" (any whitespace between parts)
pub fn parse_statement_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<_> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    let month = match parts[1] {
        "Jan" => 1,
        "Feb" => 2,
        "Mar" => 3,
        "Apr" => 4,
        "May" => 5,
        "Jun" => 6,
        "Jul" => 7,
        "Aug" => 8,
        "Sep" => 9,
        "Oct" => 10,
        "Nov" => 11,
        "Dec" => 12,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Result of segmenting one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    /// Position of the first header line, if one was found
    pub header_line: Option<usize>,
    pub blocks: Vec<TransactionBlock>,
    pub lines_scanned: usize,
}

pub struct LineClassifier {
    date_re: Regex,
}

impl LineClassifier {
    pub fn new() -> Result<Self> {
        let date_re = Regex::new(
            r"\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{4}",
        )?;
        Ok(Self { date_re })
    }

    pub fn is_header(&self, line: &str) -> bool {
        HEADER_TOKENS.iter().all(|t| line.contains(t))
    }

    /// First date substring on the line, verbatim
    pub fn date_in<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.date_re.find(line).map(|m| m.as_str())
    }

    pub fn segment(&self, text: &str, sink: &dyn EventSink) -> Segmentation {
        let mut header_line = None;
        let mut blocks = Vec::new();
        let mut current: Option<TransactionBlock> = None;
        let mut lines_scanned = 0;

        for (position, line) in text.lines().enumerate() {
            lines_scanned += 1;

            if header_line.is_none() {
                if self.is_header(line) {
                    header_line = Some(position);
                    sink.emit(ParseEvent::HeaderDetected { line: position });
                }
                continue;
            }

            if line.trim().is_empty() || line.contains(REPEATED_HEADER) {
                continue;
            }

            let raw = RawLine {
                position,
                text: line.to_string(),
            };

            if let Some(date_text) = self.date_in(line) {
                if let Some(done) = current.take() {
                    blocks.push(done);
                }
                sink.emit(ParseEvent::BlockOpened {
                    line: position,
                    date_text: date_text.to_string(),
                });
                current = Some(TransactionBlock::new(date_text, raw));
            } else if let Some(block) = current.as_mut() {
                block.push(raw);
            }
        }

        if let Some(done) = current.take() {
            blocks.push(done);
        }

        if header_line.is_none() {
            sink.emit(ParseEvent::HeaderNotFound { lines_scanned });
        }

        Segmentation {
            header_line,
            blocks,
            lines_scanned,
        }
    }
}
