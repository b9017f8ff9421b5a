use chrono::NaiveDate;
use mab_analytics::{
    Guidance, MaintenanceStatus, build_report, daily_balances, monthly_statistics,
};
use mab_core::{Currency, MemorySink, MonthKey, Movement, ParseEvent};
use mab_ingest::{ExtractionOutcome, KeywordClassifier, parse_sbi_text_with};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_statement.txt")
}

fn sample_text() -> String {
    std::fs::read_to_string(sample_path()).expect("sample_statement.txt should exist")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_extracts_sample_statement() {
    let sink = MemorySink::new();
    let ex = parse_sbi_text_with(&sample_text(), KeywordClassifier::default(), &sink).unwrap();

    assert_eq!(ex.outcome, ExtractionOutcome::Parsed);
    assert_eq!(ex.transactions.len(), 8);

    let movements: Vec<Movement> = ex.transactions.iter().map(|t| t.movement()).collect();
    assert_eq!(
        movements,
        vec![
            Movement::Credit(8000.0),
            Movement::Debit(5000.0),
            Movement::Debit(2000.0),
            Movement::Debit(3000.0),
            Movement::Credit(5000.0),
            Movement::Debit(500.0),
            Movement::Credit(120.0),
            Movement::Unclassified,
        ]
    );

    for t in &ex.transactions {
        assert!(t.debit() == 0.0 || t.credit() == 0.0);
    }

    // The balance adjustment row carries only the balance figure
    let last = ex.transactions.last().unwrap();
    assert_eq!(last.balance(), 14620.0);
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, ParseEvent::DegradedBlock { amounts: 1, .. })));
}

#[test]
fn test_full_report_from_sample() {
    let ex = parse_sbi_text_with(&sample_text(), KeywordClassifier::default(), &MemorySink::new()).unwrap();
    let report = build_report(&ex.transactions, Some(15000.0), &Currency::default()).unwrap();

    assert_eq!(report.summary.total_transactions, 8);
    assert_eq!(report.summary.total_credits, 13120.0);
    assert_eq!(report.summary.total_debits, 10500.0);
    assert_eq!(report.summary.total_amount, 2620.0);
    assert_eq!(report.summary.average_transaction, 327.5);

    let months: Vec<String> = report.monthly_statistics.keys().map(|k| k.to_string()).collect();
    assert_eq!(months, vec!["2024-08", "2024-09", "2024-10"]);

    let aug = &report.monthly_statistics[&MonthKey { year: 2024, month: 8 }];
    assert_eq!(aug.days_maintained, 3);
    assert_eq!(aug.avg_balance, 18333.33);
    assert_eq!(aug.min_balance, 15000.0);
    assert_eq!(aug.max_balance, 20000.0);

    let sep = &report.monthly_statistics[&MonthKey { year: 2024, month: 9 }];
    assert_eq!(sep.days_maintained, 29);
    // Two rows on 2 Sep: the later one (10,000.00) is the day's balance
    assert_eq!(sep.daily_balances.get(date(2024, 9, 2)), Some(10000.0));
    assert_eq!(sep.mab_calculation.sum_of_daily_balances, 387120.0);
    assert_eq!(sep.avg_balance, 13348.97);
    assert_eq!(sep.min_balance, 10000.0);

    let oct = &report.monthly_statistics[&MonthKey { year: 2024, month: 10 }];
    assert_eq!(oct.days_maintained, 1);
    assert_eq!(oct.avg_balance, 14620.0);

    let labels: Vec<&str> = report.monthly_summary.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(labels, vec!["Aug 2024", "Sep 2024", "Oct 2024"]);
    assert_eq!(report.monthly_summary[0].avg_balance, 17500.0);
    assert_eq!(report.monthly_summary[1].avg_balance, 13424.0);
    assert_eq!(report.monthly_summary[1].min_balance, 10000.0);

    let m = &report.maintenance;
    assert_eq!(m.status, MaintenanceStatus::BelowTarget);
    assert_eq!(m.average_balance, 14592.5);
    assert_eq!(m.maintenance_percentage, 97.3);
    assert_eq!(m.balance_difference, 407.5);
    assert!(m.is_below_target);
    assert_eq!(
        m.guidance,
        Guidance::TopUp {
            shortfall: 407.5,
            monthly_deposit: 135.83,
            minimum_balance: 15000.0,
        }
    );
    let period = m.statement_period.as_ref().unwrap();
    assert_eq!(period.start, "August 2024");
    assert_eq!(period.end, "October 2024");
}

#[test]
fn test_timeline_length_matches_range() {
    let ex = parse_sbi_text_with(&sample_text(), KeywordClassifier::default(), &MemorySink::new()).unwrap();
    let start = date(2024, 8, 28);
    let end = date(2024, 10, 5);
    let days = daily_balances(&ex.transactions, start, end).unwrap();
    assert_eq!(days.len() as i64, (end - start).num_days() + 1);
    assert_eq!(days.get(date(2024, 10, 4)), Some(14620.0));
    assert_eq!(days.get(date(2024, 8, 31)), Some(15000.0));
}

#[test]
fn test_mab_identity_holds_for_every_month() {
    let ex = parse_sbi_text_with(&sample_text(), KeywordClassifier::default(), &MemorySink::new()).unwrap();
    let stats = monthly_statistics(&ex.transactions, &Currency::default()).unwrap();
    for stat in stats.values() {
        let expected = stat.daily_balances.sum() / stat.daily_balances.len() as f64;
        assert_eq!(stat.avg_balance, (expected * 100.0).round() / 100.0);
    }
}

#[test]
fn test_header_less_text_is_reported_distinctly() {
    let text = sample_text().replace("Txn Date", "Posting");
    let ex = parse_sbi_text_with(&text, KeywordClassifier::default(), &MemorySink::new()).unwrap();
    assert_eq!(ex.outcome, ExtractionOutcome::HeaderNotFound);
    assert!(ex.transactions.is_empty());
    assert!(ex.require_header().is_err());
}
