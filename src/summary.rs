use crate::schema::AllocationResult;
use crate::utils::format_fixed;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyLine {
    pub usage_kwh: String,
    pub percent: String,
    pub cost: String,
}

/// Display strings for a results table: the quarter and its calendar days,
/// usage in whole kWh, percentages with one decimal, amounts with two
/// decimals behind the currency label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationSummary {
    pub period: String,
    pub date_range: String,
    pub total_usage_kwh: String,
    pub total_cost: String,
    pub primary: PartyLine,
    pub secondary: PartyLine,
}

impl AllocationSummary {
    pub fn from_result(result: &AllocationResult, currency: &str) -> Self {
        let money = |amount: f64| format!("{} {}", currency, format_fixed(amount, 2));
        let percent = |value: f64| format!("{}%", format_fixed(value, 1));

        Self {
            period: result.period.to_string(),
            date_range: format!(
                "{} to {}",
                result.period.start_date().format("%Y-%m-%d"),
                result.period.end_date().format("%Y-%m-%d")
            ),
            total_usage_kwh: format_fixed(result.total_usage, 0),
            total_cost: money(result.total_bill),
            primary: PartyLine {
                usage_kwh: format_fixed(result.primary_usage, 0),
                percent: percent(result.primary_percent),
                cost: money(result.primary_share),
            },
            secondary: PartyLine {
                usage_kwh: format_fixed(result.secondary_usage, 0),
                percent: percent(result.secondary_percent),
                cost: money(result.secondary_share),
            },
        }
    }
}

impl fmt::Display for AllocationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Period: {} ({})", self.period, self.date_range)?;
        writeln!(f, "{:<10} {:>10} {:>8} {:>14}", "", "kWh", "Share", "Cost")?;
        for (label, line) in [("Primary", &self.primary), ("Secondary", &self.secondary)] {
            writeln!(
                f,
                "{:<10} {:>10} {:>8} {:>14}",
                label, line.usage_kwh, line.percent, line.cost
            )?;
        }
        write!(
            f,
            "{:<10} {:>10} {:>8} {:>14}",
            "Total", self.total_usage_kwh, "", self.total_cost
        )
    }
}
