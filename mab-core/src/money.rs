//! Rounding and display helpers for monetary values.
//!
//! Analytics keep full `f64` precision internally and round only the figures they
//! report.

use serde::{Deserialize, Serialize};

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Currency used in human-readable report text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
        }
    }
}

impl Currency {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// "₹12,345.60"
    pub fn format(&self, value: f64) -> String {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}{}", sign, self.symbol, group_thousands(round2(value).abs()))
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}.{}", grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1234.5678), 1234.57);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(-10.126), -10.13);
    }

    #[test]
    fn test_format_groups_thousands() {
        let inr = Currency::default();
        assert_eq!(inr.format(0.0), "₹0.00");
        assert_eq!(inr.format(999.5), "₹999.50");
        assert_eq!(inr.format(1000.0), "₹1,000.00");
        assert_eq!(inr.format(1234567.891), "₹1,234,567.89");
        assert_eq!(inr.format(-2500.0), "-₹2,500.00");
    }

    #[test]
    fn test_custom_symbol() {
        assert_eq!(Currency::new("$").format(12.3), "$12.30");
    }
}
