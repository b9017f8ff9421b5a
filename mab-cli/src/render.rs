use anyhow::Result;
use mab_analytics::{Guidance, StatementReport};
use mab_core::{Currency, Transaction, TransactionRecord};
use std::fmt::Write as _;
use std::io::Write;

pub fn write_transactions_csv<W: Write>(out: W, txns: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for t in txns {
        wtr.serialize(TransactionRecord::from(t.clone()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn render_report_text(report: &StatementReport, currency: &Currency) -> String {
    let mut s = String::new();
    let sum = &report.summary;

    let _ = writeln!(s, "# Statement analysis\n");
    let _ = writeln!(s, "Transactions:   {}", sum.total_transactions);
    let _ = writeln!(s, "Total credits:  {}", currency.format(sum.total_credits));
    let _ = writeln!(s, "Total debits:   {}", currency.format(sum.total_debits));
    let _ = writeln!(s, "Net change:     {}", currency.format(sum.total_amount));

    if !report.monthly_statistics.is_empty() {
        let _ = writeln!(s, "\n## Monthly average balance\n");
        for stat in report.monthly_statistics.values() {
            let _ = writeln!(
                s,
                "{}  MAB {}  min {}  max {}  ({} days)",
                stat.month,
                currency.format(stat.avg_balance),
                currency.format(stat.min_balance),
                currency.format(stat.max_balance),
                stat.days_maintained
            );
            let _ = writeln!(s, "         {}", stat.mab_calculation.calculation);
        }
    }

    let m = &report.maintenance;
    let _ = writeln!(s, "\n## Target maintenance\n");
    if let Some(period) = &m.statement_period {
        let _ = writeln!(s, "Period:   {} to {}", period.start, period.end);
    }
    let _ = writeln!(s, "Average:  {}", currency.format(m.average_balance));
    let _ = writeln!(s, "Status:   {}", m.status_text);
    match m.guidance {
        Guidance::TopUp {
            shortfall,
            monthly_deposit,
            minimum_balance,
        } => {
            let _ = writeln!(
                s,
                "Shortfall {}: deposit {} monthly or keep at least {}",
                currency.format(shortfall),
                currency.format(monthly_deposit),
                currency.format(minimum_balance)
            );
        }
        Guidance::InvestExcess { excess } => {
            let _ = writeln!(s, "Excess:   {}", currency.format(excess));
        }
        Guidance::OnTrack { .. } | Guidance::None => {}
    }
    let _ = writeln!(s, "\n{}", m.recommendation);

    s
}
