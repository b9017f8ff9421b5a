//! Transaction records extracted from bank statements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Money movement of a single statement row.
///
/// Amounts are non-negative; the variant carries the direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum Movement {
    Debit(f64),
    Credit(f64),
    /// No movement figure could be isolated (zero or one amount on the row)
    Unclassified,
}

impl Movement {
    pub fn debit(&self) -> f64 {
        match self {
            Movement::Debit(amount) => *amount,
            _ => 0.0,
        }
    }

    pub fn credit(&self) -> f64 {
        match self {
            Movement::Credit(amount) => *amount,
            _ => 0.0,
        }
    }

    /// Negative for debits, positive for credits
    pub fn signed(&self) -> f64 {
        self.credit() - self.debit()
    }

    pub fn is_debit(&self) -> bool {
        matches!(self, Movement::Debit(_))
    }
}

/// One parsed statement row. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TransactionRecord", try_from = "TransactionRecord")]
pub struct Transaction {
    date: NaiveDate,
    date_text: String,
    movement: Movement,
    balance: f64,
    description: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        date_text: impl Into<String>,
        movement: Movement,
        balance: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            date_text: date_text.into(),
            movement,
            balance,
            description: description.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Date exactly as it appeared in the statement ("17 Sep 2024")
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn debit(&self) -> f64 {
        self.movement.debit()
    }

    pub fn credit(&self) -> f64 {
        self.movement.credit()
    }

    /// Signed movement: negative for debits
    pub fn amount(&self) -> f64 {
        self.movement.signed()
    }

    /// Running balance after this row
    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Flat wire form of a [`Transaction`] (JSON/CSV).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub date_text: String,
    pub debit: f64,
    pub credit: f64,
    pub amount: f64,
    pub balance: f64,
    pub description: String,
}

impl From<Transaction> for TransactionRecord {
    fn from(t: Transaction) -> Self {
        Self {
            date: t.date,
            debit: t.debit(),
            credit: t.credit(),
            amount: t.amount(),
            balance: t.balance,
            date_text: t.date_text,
            description: t.description,
        }
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(r: TransactionRecord) -> Result<Self, Self::Error> {
        for amount in [r.debit, r.credit] {
            if amount < 0.0 {
                return Err(Error::NegativeAmount {
                    date: r.date,
                    amount,
                });
            }
        }

        let movement = match (r.debit > 0.0, r.credit > 0.0) {
            (true, true) => return Err(Error::ConflictingMovement { date: r.date }),
            (true, false) => Movement::Debit(r.debit),
            (false, true) => Movement::Credit(r.credit),
            (false, false) => Movement::Unclassified,
        };

        Ok(Transaction::new(
            r.date,
            r.date_text,
            movement,
            r.balance,
            r.description,
        ))
    }
}
