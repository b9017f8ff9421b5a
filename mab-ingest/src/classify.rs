//! Debit/credit classification strategies.
//!
//! Statement text rarely says which column an amount came from once the table is
//! flattened, so the direction of a movement is decided by a pluggable strategy.

use mab_core::Movement;

pub const DEFAULT_DEBIT_KEYWORDS: [&str; 3] = ["debit", "transfer to", "paid to"];

pub trait TransactionClassifier {
    /// `amount` is the movement figure isolated by the builder, `None` when the block
    /// did not carry one.
    fn classify(&self, block_text: &str, amount: Option<f64>) -> Movement;
}

impl<F> TransactionClassifier for F
where
    F: Fn(&str, Option<f64>) -> Movement,
{
    fn classify(&self, block_text: &str, amount: Option<f64>) -> Movement {
        self(block_text, amount)
    }
}

/// Debit if the block mentions any keyword (case-insensitive), credit otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DEBIT_KEYWORDS)
    }
}

impl KeywordClassifier {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_debit(&self, block_text: &str) -> bool {
        let text = block_text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

impl TransactionClassifier for KeywordClassifier {
    fn classify(&self, block_text: &str, amount: Option<f64>) -> Movement {
        match amount {
            None => Movement::Unclassified,
            Some(a) if self.is_debit(block_text) => Movement::Debit(a),
            Some(a) => Movement::Credit(a),
        }
    }
}
