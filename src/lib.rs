//! # Charging Bill Split
//!
//! A library for splitting a shared electricity bill between two parties.
//! One party's usage comes from a charging-station export (CSV), the other
//! party's usage is entered by hand.
//!
//! ## Core Concepts
//!
//! - **Usage export**: delimited text with a `Charging Start Time` and an
//!   `Energy Delivered (kWh)` column somewhere in its header row
//! - **Period**: a calendar quarter; the bill always covers the most recent
//!   quarter present in the export
//! - **Shares**: the secondary party pays in proportion to its usage, the
//!   primary party pays the remainder, so both shares add up to the bill
//!   exactly
//!
//! ## Example
//!
//! ```rust,ignore
//! use charging_bill_split::*;
//!
//! let export = "\
//! Charging Start Time,Energy Delivered (kWh)
//! 2024-07-01 08:00:00,10
//! 2024-08-15 19:30:00,5
//! ";
//!
//! let result = split_bill(export, 5.0, 100.0).unwrap();
//! assert_eq!(result.period.to_string(), "2024 Q3");
//! assert_eq!(result.secondary_share, 25.0);
//! println!("{}", result.message);
//! ```

pub mod aggregator;
pub mod allocator;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod input;
pub mod message;
pub mod schema;
pub mod summary;
pub mod utils;

pub use aggregator::{aggregate, latest_period, usage_in_period};
pub use allocator::{allocate, split_shares, BillAllocator, Shares};
pub use config::{Language, SplitConfig, ENERGY_COLUMN, START_TIME_COLUMN};
pub use error::{BillSplitError, Result};
pub use ingestion::{parse_records, parse_records_with, try_parse_records};
pub use input::{is_ready, parse_form_number, FormState};
pub use message::build_message;
pub use schema::*;
pub use summary::{AllocationSummary, PartyLine};

use log::{debug, info};

/// Runs the whole pipeline for one request: parse the export, pick the most
/// recent quarter, split the bill. Holds nothing but its configuration, so a
/// single processor can serve any number of independent requests.
#[derive(Debug, Clone, Default)]
pub struct BillSplitProcessor {
    config: SplitConfig,
}

impl BillSplitProcessor {
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    pub fn process(
        &self,
        raw_text: &str,
        secondary_usage: f64,
        total_bill: f64,
    ) -> Result<AllocationResult> {
        // The primary usage is not known yet; validate the caller's numbers first.
        AllocationInput::new(0.0, secondary_usage, total_bill)?;

        let records = try_parse_records(raw_text, &self.config)?;
        if records.is_empty() {
            return Err(BillSplitError::NoUsableRows);
        }
        debug!("Usage export yielded {} records", records.len());

        let usage = aggregate(&records)?;
        let input = AllocationInput::new(usage.total_energy_kwh, secondary_usage, total_bill)?;
        let result = BillAllocator::new(&self.config).allocate(usage.period, &input);

        info!(
            "Split {} {:.2} for {}: primary {:.2} ({:.1}%), secondary {:.2} ({:.1}%)",
            self.config.currency,
            result.total_bill,
            result.period,
            result.primary_share,
            result.primary_percent,
            result.secondary_share,
            result.secondary_percent
        );

        Ok(result)
    }

    pub fn summarize(&self, result: &AllocationResult) -> AllocationSummary {
        AllocationSummary::from_result(result, &self.config.currency)
    }
}

pub fn split_bill(raw_text: &str, secondary_usage: f64, total_bill: f64) -> Result<AllocationResult> {
    BillSplitProcessor::default().process(raw_text, secondary_usage, total_bill)
}
