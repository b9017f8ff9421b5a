//! Parse diagnostics.
//!
//! Parsers report what they see through an [`EventSink`] instead of logging inline.
//! The CLI installs [`TracingSink`]; tests use [`MemorySink`] to assert on events.

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::transaction::Movement;

/// Discrete observations made while turning statement text into transactions.
/// `line` is the 0-based position of the line in the input text.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    HeaderDetected { line: usize },
    HeaderNotFound { lines_scanned: usize },
    BlockOpened { line: usize, date_text: String },
    /// Block had fewer than two amounts; figures were defaulted
    DegradedBlock { line: usize, amounts: usize },
    /// Block could not become a transaction at all
    BlockRejected { line: usize, reason: String },
    TransactionBuilt {
        line: usize,
        movement: Movement,
        balance: f64,
    },
    ExtractionFinished { blocks: usize, transactions: usize },
}

pub trait EventSink {
    fn emit(&self, event: ParseEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ParseEvent) {
        match event {
            ParseEvent::HeaderDetected { line } => debug!(line, "statement header detected"),
            ParseEvent::HeaderNotFound { lines_scanned } => {
                warn!(lines_scanned, "statement header not found")
            }
            ParseEvent::BlockOpened { line, date_text } => {
                debug!(line, date = %date_text, "transaction block opened")
            }
            ParseEvent::DegradedBlock { line, amounts } => {
                debug!(line, amounts, "block has too few amounts, using defaults")
            }
            ParseEvent::BlockRejected { line, reason } => {
                warn!(line, %reason, "transaction block rejected")
            }
            ParseEvent::TransactionBuilt {
                line,
                movement,
                balance,
            } => debug!(line, ?movement, balance, "transaction built"),
            ParseEvent::ExtractionFinished {
                blocks,
                transactions,
            } => info!(blocks, transactions, "extraction finished"),
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ParseEvent) {}
}

/// Collects events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ParseEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ParseEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: ParseEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: ParseEvent) {
        (**self).emit(event)
    }
}
