//! Target balance maintenance analysis.
//!
//! Works on transaction balances directly (one sample per row), which is coarser
//! than the day-weighted MAB in [`crate::monthly`] and meant for summary reporting.

use mab_core::{Currency, Transaction, round1, round2};
use serde::Serialize;

/// Averages above this multiple of the target trigger an "invest the excess" nudge
pub const EXCESS_MULTIPLIER: f64 = 1.5;

/// Shortfalls are spread over this many monthly deposits
pub const CATCH_UP_MONTHS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    NoTransactions,
    NoTarget,
    Maintained,
    BelowTarget,
}

/// Numeric side of the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Guidance {
    None,
    OnTrack { headroom: f64 },
    InvestExcess { excess: f64 },
    TopUp {
        shortfall: f64,
        monthly_deposit: f64,
        minimum_balance: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    /// e.g. "September 2024"
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceAnalysis {
    pub average_balance: f64,
    pub min_balance: f64,
    pub max_balance: f64,
    pub target_balance: f64,
    pub maintenance_percentage: f64,
    pub status: MaintenanceStatus,
    pub status_text: String,
    pub recommendation: String,
    pub guidance: Guidance,
    pub statement_period: Option<StatementPeriod>,
    pub balance_difference: f64,
    pub is_below_target: bool,
}

/// Compare the average transaction balance against `target`.
///
/// A missing, zero or negative target means "no target".
pub fn analyze_maintenance(
    txns: &[Transaction],
    target: Option<f64>,
    currency: &Currency,
) -> MaintenanceAnalysis {
    let target = target.filter(|t| *t > 0.0).unwrap_or(0.0);

    let (Some(start), Some(end)) = (
        txns.iter().map(|t| t.date()).min(),
        txns.iter().map(|t| t.date()).max(),
    ) else {
        return MaintenanceAnalysis {
            average_balance: 0.0,
            min_balance: 0.0,
            max_balance: 0.0,
            target_balance: target,
            maintenance_percentage: 0.0,
            status: MaintenanceStatus::NoTransactions,
            status_text: "No transactions found".to_string(),
            recommendation: "Unable to provide recommendation without transaction data"
                .to_string(),
            guidance: Guidance::None,
            statement_period: None,
            balance_difference: 0.0,
            is_below_target: false,
        };
    };

    let balances: Vec<f64> = txns.iter().map(|t| t.balance()).collect();
    let average = balances.iter().sum::<f64>() / balances.len() as f64;
    let min = balances.iter().copied().fold(f64::INFINITY, f64::min);
    let max = balances.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let percentage = if target > 0.0 {
        average / target * 100.0
    } else {
        0.0
    };

    let (status, status_text, recommendation, guidance) = if target == 0.0 {
        (
            MaintenanceStatus::NoTarget,
            "No target balance specified".to_string(),
            "Set a target balance to receive maintenance recommendations".to_string(),
            Guidance::None,
        )
    } else if average >= target {
        let excess = average - target;
        let status_text = format!("Target balance maintained ({:.1}% of target)", percentage);
        if average > target * EXCESS_MULTIPLIER {
            (
                MaintenanceStatus::Maintained,
                status_text,
                format!(
                    "Your average balance of {} exceeds the target by {}. \
                     Consider investing the excess funds while maintaining your target balance.",
                    currency.format(average),
                    currency.format(excess)
                ),
                Guidance::InvestExcess {
                    excess: round2(excess),
                },
            )
        } else {
            (
                MaintenanceStatus::Maintained,
                status_text,
                format!(
                    "Great job! Your average balance of {} is meeting the target requirement \
                     of {} and exceeds it by {}.",
                    currency.format(average),
                    currency.format(target),
                    currency.format(excess)
                ),
                Guidance::OnTrack {
                    headroom: round2(excess),
                },
            )
        }
    } else {
        let shortfall = target - average;
        let monthly_deposit = shortfall / CATCH_UP_MONTHS;
        let minimum_balance = target.max(average + monthly_deposit);
        (
            MaintenanceStatus::BelowTarget,
            format!("Below target ({:.1}% of target)", percentage),
            format!(
                "To reach your target balance of {}, please maintain a minimum balance of {} \
                 or deposit {} monthly. This will help you build up to the required average \
                 balance of {}.",
                currency.format(target),
                currency.format(minimum_balance),
                currency.format(monthly_deposit),
                currency.format(target)
            ),
            Guidance::TopUp {
                shortfall: round2(shortfall),
                monthly_deposit: round2(monthly_deposit),
                minimum_balance: round2(minimum_balance),
            },
        )
    };

    MaintenanceAnalysis {
        average_balance: round2(average),
        min_balance: round2(min),
        max_balance: round2(max),
        target_balance: target,
        maintenance_percentage: round1(percentage),
        status,
        status_text,
        recommendation,
        guidance,
        statement_period: Some(StatementPeriod {
            start: start.format("%B %Y").to_string(),
            end: end.format("%B %Y").to_string(),
        }),
        balance_difference: round2((target - average).abs()),
        is_below_target: target > average,
    }
}
