//! Everything the analytics produce for one statement, in one serializable value.

use mab_core::{Currency, Result, Transaction};
use serde::Serialize;
use tracing::info;

use crate::maintenance::{MaintenanceAnalysis, analyze_maintenance};
use crate::monthly::{MonthlyStatistics, monthly_statistics};
use crate::summary::{ExtractionSummary, MonthlySummary, monthly_summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementReport {
    pub summary: ExtractionSummary,
    pub monthly_summary: Vec<MonthlySummary>,
    pub monthly_statistics: MonthlyStatistics,
    pub maintenance: MaintenanceAnalysis,
}

pub fn build_report(
    txns: &[Transaction],
    target: Option<f64>,
    currency: &Currency,
) -> Result<StatementReport> {
    let report = StatementReport {
        summary: ExtractionSummary::from_transactions(txns),
        monthly_summary: monthly_summary(txns),
        monthly_statistics: monthly_statistics(txns, currency)?,
        maintenance: analyze_maintenance(txns, target, currency),
    };

    info!(
        transactions = report.summary.total_transactions,
        months = report.monthly_statistics.len(),
        status = ?report.maintenance.status,
        "statement analyzed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maintenance::MaintenanceStatus;
    use chrono::NaiveDate;
    use mab_core::Movement;

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], Some(1000.0), &Currency::default()).unwrap();
        assert_eq!(report.summary.total_transactions, 0);
        assert!(report.monthly_summary.is_empty());
        assert!(report.monthly_statistics.is_empty());
        assert_eq!(report.maintenance.status, MaintenanceStatus::NoTransactions);
    }

    #[test]
    fn test_report_serializes_month_keys() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 17).unwrap();
        let txns = vec![Transaction::new(date, "17 Sep 2024", Movement::Credit(1.0), 10.0, "x")];
        let report = build_report(&txns, None, &Currency::default()).unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["monthly_statistics"]["2024-09"]["avg_balance"], 10.0);
        assert_eq!(v["monthly_statistics"]["2024-09"]["daily_balances"]["2024-09-17"], 10.0);
        assert_eq!(v["monthly_summary"][0]["month"], "Sep 2024");
        assert_eq!(v["maintenance"]["status"], "no_target");
    }
}
