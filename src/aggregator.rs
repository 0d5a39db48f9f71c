use crate::error::{BillSplitError, Result};
use crate::schema::{Period, PeriodUsage, UsageRecord};
use log::debug;

/// Most recent quarter present in `records`.
pub fn latest_period(records: &[UsageRecord]) -> Option<Period> {
    records.iter().map(UsageRecord::period).max()
}

/// Sums the energy of every record that falls into `period`.
pub fn usage_in_period(records: &[UsageRecord], period: Period) -> PeriodUsage {
    let (total_energy_kwh, record_count) = records
        .iter()
        .filter(|record| period.contains(record.timestamp.date()))
        .fold((0.0, 0), |(sum, count), record| {
            (sum + record.energy_kwh, count + 1)
        });

    PeriodUsage {
        period,
        total_energy_kwh,
        record_count,
    }
}

/// Selects the most recent quarter in the records and totals its energy.
///
/// Fails with [`BillSplitError::EmptyData`] when there is nothing to
/// aggregate; a period whose records all delivered 0 kWh is a valid result.
pub fn aggregate(records: &[UsageRecord]) -> Result<PeriodUsage> {
    let period = latest_period(records).ok_or(BillSplitError::EmptyData)?;
    let usage = usage_in_period(records, period);

    debug!(
        "Aggregated {} of {} records into {}: {:.3} kWh",
        usage.record_count,
        records.len(),
        period,
        usage.total_energy_kwh
    );

    Ok(usage)
}
