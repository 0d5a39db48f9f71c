use crate::config::{Language, SplitConfig};
use crate::message::build_message;
use crate::schema::{AllocationInput, AllocationResult, Period};

/// Monetary split of one bill between the two parties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shares {
    pub primary: f64,
    pub secondary: f64,
}

pub struct BillAllocator<'a> {
    language: Language,
    currency: &'a str,
}

impl<'a> BillAllocator<'a> {
    pub fn new(config: &'a SplitConfig) -> Self {
        Self {
            language: config.language,
            currency: &config.currency,
        }
    }

    pub fn allocate(&self, period: Period, input: &AllocationInput) -> AllocationResult {
        let primary_usage = input.primary_usage();
        let secondary_usage = input.secondary_usage();
        let total_bill = input.total_bill();
        let total_usage = primary_usage + secondary_usage;

        let (shares, primary_percent, secondary_percent) = if total_usage > 0.0 {
            (
                split_shares(secondary_usage, total_usage, total_bill),
                primary_usage / total_usage * 100.0,
                secondary_usage / total_usage * 100.0,
            )
        } else {
            (
                Shares {
                    primary: 0.0,
                    secondary: 0.0,
                },
                0.0,
                0.0,
            )
        };

        let mut result = AllocationResult {
            period,
            total_usage,
            primary_usage,
            secondary_usage,
            primary_share: shares.primary,
            secondary_share: shares.secondary,
            primary_percent,
            secondary_percent,
            total_bill,
            message: String::new(),
        };
        result.message = build_message(&result, self.language, self.currency);

        result
    }
}

/// Splits `total_bill` by usage. The secondary share is the proportional
/// one; the primary share is whatever is left, so the two add up to the
/// bill exactly. Requires `total_usage > 0`.
pub fn split_shares(secondary_usage: f64, total_usage: f64, total_bill: f64) -> Shares {
    let secondary = secondary_usage / total_usage * total_bill;
    let primary = total_bill - secondary;
    reconcile(total_bill, primary, secondary)
}

/// `(bill - s) + s` can miss `bill` by one ulp when both roundings hit a
/// round-half-to-even tie. That only happens when the primary share is at
/// least half the bill, where `bill - primary` is exact (Sterbenz), so the
/// secondary share is re-derived from the primary one.
fn reconcile(total_bill: f64, primary: f64, secondary: f64) -> Shares {
    if primary + secondary == total_bill {
        return Shares { primary, secondary };
    }

    Shares {
        primary,
        secondary: total_bill - primary,
    }
}

pub fn allocate(period: Period, input: &AllocationInput) -> AllocationResult {
    let config = SplitConfig::default();
    BillAllocator::new(&config).allocate(period, input)
}
