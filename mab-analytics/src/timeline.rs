//! Balance timeline: one carried-forward balance per calendar day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mab_core::{Error, Result, Transaction};
use serde::Serialize;

/// Date → end-of-day balance, contiguous over the queried range
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DailyBalances(BTreeMap<NaiveDate, f64>);

impl DailyBalances {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.0.get(&date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.0.iter().map(|(d, b)| (*d, *b))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn sum(&self) -> f64 {
        self.values().sum()
    }

    pub fn min(&self) -> Option<f64> {
        self.values().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    /// Sum of daily balances over the number of days; `None` when empty
    pub fn average(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum() / self.len() as f64)
        }
    }
}

/// Fails with [`Error::UnorderedTransactions`] unless dates never decrease.
///
/// Same-day rows are resolved by document order, so callers must not reorder rows
/// within a day either; a stable sort by date keeps that intact.
pub fn ensure_chronological(txns: &[Transaction]) -> Result<()> {
    for (index, pair) in txns.windows(2).enumerate() {
        if pair[1].date() < pair[0].date() {
            return Err(Error::UnorderedTransactions {
                index: index + 1,
                date: pair[1].date(),
                previous: pair[0].date(),
            });
        }
    }
    Ok(())
}

/// Build the daily balance series for `[start, end]` (inclusive).
///
/// The balance is seeded from the first transaction, so days before it carry that
/// row's balance. On a day with several rows the last one wins. Rows outside the range
/// are ignored.
pub fn daily_balances(
    txns: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DailyBalances> {
    let first = txns.first().ok_or(Error::EmptyTimelineInput)?;
    if start > end {
        return Err(Error::InvalidRange { start, end });
    }
    ensure_chronological(txns)?;

    let mut current = first.balance();
    let mut next = 0;
    let mut days = BTreeMap::new();

    for day in start.iter_days().take_while(|d| *d <= end) {
        while next < txns.len() && txns[next].date() < day {
            next += 1;
        }
        while next < txns.len() && txns[next].date() == day {
            current = txns[next].balance();
            next += 1;
        }
        days.insert(day, current);
    }

    Ok(DailyBalances(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mab_core::Movement;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn txn(date: NaiveDate, balance: f64) -> Transaction {
        Transaction::new(
            date,
            date.format("%-d %b %Y").to_string(),
            Movement::Unclassified,
            balance,
            "row",
        )
    }

    #[test]
    fn test_carry_forward_and_seed() {
        let txns = vec![txn(jan(2), 100.0), txn(jan(5), 300.0)];
        let days = daily_balances(&txns, jan(1), jan(6)).unwrap();

        let values: Vec<f64> = days.values().collect();
        assert_eq!(values, vec![100.0, 100.0, 100.0, 100.0, 300.0, 300.0]);
        assert_eq!(days.get(jan(1)), Some(100.0));
        assert_eq!(days.get(jan(5)), Some(300.0));
    }

    #[test]
    fn test_one_entry_per_day() {
        let txns = vec![txn(jan(3), 1.0)];
        let start = jan(1);
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days = daily_balances(&txns, start, end).unwrap();
        assert_eq!(days.len() as i64, (end - start).num_days() + 1);

        let dates: Vec<_> = days.iter().map(|(d, _)| d).collect();
        for w in dates.windows(2) {
            assert_eq!(w[1], w[0].succ_opt().unwrap());
        }
    }

    #[test]
    fn test_same_day_last_row_wins() {
        let txns = vec![txn(jan(1), 10.0), txn(jan(2), 20.0), txn(jan(2), 15.0), txn(jan(3), 30.0)];
        let days = daily_balances(&txns, jan(1), jan(3)).unwrap();
        assert_eq!(days.get(jan(2)), Some(15.0));
    }

    #[test]
    fn test_single_day_range() {
        let txns = vec![txn(jan(4), 50.0), txn(jan(4), 75.0)];
        let days = daily_balances(&txns, jan(4), jan(4)).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days.get(jan(4)), Some(75.0));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = daily_balances(&[], jan(1), jan(2)).unwrap_err();
        assert!(matches!(err, Error::EmptyTimelineInput));
    }

    #[test]
    fn test_unordered_input_is_an_error() {
        let txns = vec![txn(jan(5), 1.0), txn(jan(2), 2.0)];
        let err = daily_balances(&txns, jan(1), jan(6)).unwrap_err();
        assert!(matches!(err, Error::UnorderedTransactions { index: 1, .. }));
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let txns = vec![txn(jan(2), 1.0)];
        assert!(matches!(
            daily_balances(&txns, jan(3), jan(1)),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_statistics() {
        let txns = vec![txn(jan(1), 100.0), txn(jan(3), 400.0)];
        let days = daily_balances(&txns, jan(1), jan(4)).unwrap();
        assert_eq!(days.sum(), 1000.0);
        assert_eq!(days.min(), Some(100.0));
        assert_eq!(days.max(), Some(400.0));
        assert_eq!(days.average(), Some(250.0));
        assert_eq!(DailyBalances::default().average(), None);
    }
}
