//! Headline figures over an extracted transaction list.

use std::collections::BTreeMap;

use mab_core::{MonthKey, Transaction, round2};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub total_transactions: usize,
    pub total_debits: f64,
    pub total_credits: f64,
    /// Net change: credits minus debits
    pub total_amount: f64,
    pub average_transaction: f64,
}

impl ExtractionSummary {
    pub fn from_transactions(txns: &[Transaction]) -> Self {
        let total_debits: f64 = txns.iter().map(|t| t.debit()).sum();
        let total_credits: f64 = txns.iter().map(|t| t.credit()).sum();
        let total_amount = total_credits - total_debits;
        let average_transaction = if txns.is_empty() {
            0.0
        } else {
            total_amount / txns.len() as f64
        };

        Self {
            total_transactions: txns.len(),
            total_debits: round2(total_debits),
            total_credits: round2(total_credits),
            total_amount: round2(total_amount),
            average_transaction: round2(average_transaction),
        }
    }
}

/// Transaction-weighted balance figures for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// e.g. "Sep 2024"
    pub month: String,
    pub month_key: MonthKey,
    pub min_balance: f64,
    pub avg_balance: f64,
}

/// One entry per month with transactions, oldest first
pub fn monthly_summary(txns: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<MonthKey, Vec<f64>> = BTreeMap::new();
    for t in txns {
        months
            .entry(MonthKey::from_date(t.date()))
            .or_default()
            .push(t.balance());
    }

    months
        .into_iter()
        .map(|(key, balances)| {
            let min = balances.iter().copied().fold(f64::INFINITY, f64::min);
            let avg = balances.iter().sum::<f64>() / balances.len() as f64;
            MonthlySummary {
                month: key.label(),
                month_key: key,
                min_balance: round2(min),
                avg_balance: round2(avg),
            }
        })
        .collect()
}
