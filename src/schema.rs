use crate::error::{BillSplitError, Result};
use crate::utils::{last_day_of_month, quarter_of_month};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UsageRecord {
    #[schemars(description = "Start of the charging session as reported by the station (wall-clock time)")]
    pub timestamp: NaiveDateTime,

    #[schemars(description = "Energy delivered during the session in kWh. Never negative.")]
    pub energy_kwh: f64,
}

impl UsageRecord {
    pub fn period(&self) -> Period {
        Period::from_datetime(&self.timestamp)
    }
}

/// A calendar quarter. Ordering is chronological: year first, then quarter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Period {
    #[schemars(description = "Calendar year")]
    pub year: i32,

    #[schemars(description = "Quarter of the year, 1 to 4 (ceil(month / 3))")]
    pub quarter: u8,
}

impl Period {
    pub fn new(year: i32, quarter: u8) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(BillSplitError::InvalidPeriod(format!("{} Q{}", year, quarter)));
        }
        Ok(Self { year, quarter })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: quarter_of_month(date.month()),
        }
    }

    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self::from_date(dt.date())
    }

    fn first_month(&self) -> u32 {
        (self.quarter.saturating_sub(1) as u32) * 3 + 1
    }

    /// First calendar day of the quarter.
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.first_month(), 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the quarter.
    pub fn end_date(&self) -> NaiveDate {
        last_day_of_month(self.year, self.first_month() + 2)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Q{}", self.year, self.quarter)
    }
}

impl FromStr for Period {
    type Err = BillSplitError;

    /// Parses labels in the format "2024 Q3"
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || BillSplitError::InvalidPeriod(s.to_string());

        let (year, quarter) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let quarter: u8 = quarter
            .trim()
            .strip_prefix('Q')
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;

        Self::new(year, quarter).map_err(|_| invalid())
    }
}

/// Energy consumed by the primary party within a single period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodUsage {
    pub period: Period,
    pub total_energy_kwh: f64,
    pub record_count: usize,
}

/// Numbers for one allocation. Built fresh per calculation and validated on
/// construction; every field is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationInput {
    primary_usage: f64,
    secondary_usage: f64,
    total_bill: f64,
}

impl AllocationInput {
    pub fn new(primary_usage: f64, secondary_usage: f64, total_bill: f64) -> Result<Self> {
        Ok(Self {
            primary_usage: validate_amount("primary_usage", primary_usage)?,
            secondary_usage: validate_amount("secondary_usage", secondary_usage)?,
            total_bill: validate_amount("total_bill", total_bill)?,
        })
    }

    pub fn primary_usage(&self) -> f64 {
        self.primary_usage
    }

    pub fn secondary_usage(&self) -> f64 {
        self.secondary_usage
    }

    pub fn total_bill(&self) -> f64 {
        self.total_bill
    }
}

fn validate_amount(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(BillSplitError::InvalidInput { field, value });
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AllocationResult {
    #[schemars(description = "The quarter the bill covers, the most recent one found in the usage export")]
    pub period: Period,

    #[schemars(description = "Primary plus secondary usage in kWh")]
    pub total_usage: f64,

    #[schemars(description = "Usage summed from the charging-station export for the period, in kWh")]
    pub primary_usage: f64,

    #[schemars(description = "Usage entered manually for the secondary party, in kWh")]
    pub secondary_usage: f64,

    #[schemars(
        description = "Amount owed by the primary party. Computed as the remainder of the bill, so primary_share + secondary_share == total_bill exactly whenever total_usage > 0."
    )]
    pub primary_share: f64,

    #[schemars(description = "Amount owed by the secondary party, proportional to its usage")]
    pub secondary_share: f64,

    #[schemars(description = "Primary usage as a percentage of total usage (0-100)")]
    pub primary_percent: f64,

    #[schemars(description = "Secondary usage as a percentage of total usage (0-100)")]
    pub secondary_percent: f64,

    #[schemars(description = "The bill amount that was split")]
    pub total_bill: f64,

    #[schemars(description = "Ready-to-send notification for the secondary party")]
    pub message: String,
}

impl AllocationResult {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AllocationResult)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
