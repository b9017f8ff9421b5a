//! Monthly Average Balance (MAB) statistics.
//!
//! Each month is measured over the days its transactions actually span, not the
//! calendar month, so a statement that starts on the 17th is not diluted by the 16
//! uncovered days before it.

use std::collections::BTreeMap;

use mab_core::{Currency, MonthKey, Result, Transaction, round2};
use serde::Serialize;
use tracing::debug;

use crate::timeline::{DailyBalances, daily_balances};

pub const MAB_FORMULA: &str = "MAB = Sum of daily balances / Number of days";

/// Audit trail for one month's MAB figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MabCalculation {
    pub sum_of_daily_balances: f64,
    pub number_of_days: usize,
    pub formula: String,
    pub calculation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStatistic {
    pub month: MonthKey,
    pub min_balance: f64,
    pub max_balance: f64,
    /// MAB, rounded to 2 decimals
    pub avg_balance: f64,
    pub days_maintained: usize,
    pub daily_balances: DailyBalances,
    pub mab_calculation: MabCalculation,
}

pub type MonthlyStatistics = BTreeMap<MonthKey, MonthlyStatistic>;

/// Group transactions by calendar month. Within a month rows are stably sorted by
/// date, so same-day rows keep their document order.
pub fn partition_by_month(txns: &[Transaction]) -> BTreeMap<MonthKey, Vec<Transaction>> {
    let mut months: BTreeMap<MonthKey, Vec<Transaction>> = BTreeMap::new();
    for t in txns {
        months
            .entry(MonthKey::from_date(t.date()))
            .or_default()
            .push(t.clone());
    }
    for rows in months.values_mut() {
        rows.sort_by_key(|t| t.date());
    }
    months
}

/// Per-month min/max/MAB. An empty transaction list yields an empty map.
pub fn monthly_statistics(txns: &[Transaction], currency: &Currency) -> Result<MonthlyStatistics> {
    let mut out = MonthlyStatistics::new();

    for (month, rows) in partition_by_month(txns) {
        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            continue;
        };
        let days = daily_balances(&rows, first.date(), last.date())?;
        let stat = summarize_month(month, days, currency);
        debug!(
            month = %month,
            days = stat.days_maintained,
            mab = stat.avg_balance,
            "monthly statistics computed"
        );
        out.insert(month, stat);
    }

    Ok(out)
}

fn summarize_month(month: MonthKey, days: DailyBalances, currency: &Currency) -> MonthlyStatistic {
    let total = days.sum();
    let count = days.len();
    let mab = days.average().unwrap_or(0.0);

    let calculation = format!(
        "MAB = {} / {} days = {}",
        currency.format(total),
        count,
        currency.format(mab)
    );

    MonthlyStatistic {
        month,
        min_balance: round2(days.min().unwrap_or(0.0)),
        max_balance: round2(days.max().unwrap_or(0.0)),
        avg_balance: round2(mab),
        days_maintained: count,
        mab_calculation: MabCalculation {
            sum_of_daily_balances: round2(total),
            number_of_days: count,
            formula: MAB_FORMULA.to_string(),
            calculation,
        },
        daily_balances: days,
    }
}
