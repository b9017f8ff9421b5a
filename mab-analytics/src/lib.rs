//! mab-analytics: daily balance timelines, monthly average balance and target maintenance

pub mod maintenance;
pub mod monthly;
pub mod report;
pub mod summary;
pub mod timeline;

pub use maintenance::{
    Guidance, MaintenanceAnalysis, MaintenanceStatus, StatementPeriod, analyze_maintenance,
};
pub use monthly::{MabCalculation, MonthlyStatistic, MonthlyStatistics, monthly_statistics};
pub use report::{StatementReport, build_report};
pub use summary::{ExtractionSummary, MonthlySummary, monthly_summary};
pub use timeline::{DailyBalances, daily_balances, ensure_chronological};
