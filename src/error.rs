use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillSplitError {
    #[error("No header row with both required columns found in usage export")]
    HeaderNotFound,

    #[error("Required column '{0}' is missing from the header row")]
    MissingColumn(String),

    #[error("Usage export contains no readable data rows")]
    NoUsableRows,

    #[error("No usage records to aggregate")]
    EmptyData,

    #[error("Invalid value for {field}: {value} (must be a finite, non-negative number)")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("Invalid period label: {0}. Expected 'YYYY QN'")]
    InvalidPeriod(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BillSplitError {
    /// True for the failures a user sees as "could not read the file, check
    /// the format".
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            Self::HeaderNotFound | Self::MissingColumn(_) | Self::NoUsableRows | Self::EmptyData
        )
    }
}

pub type Result<T> = std::result::Result<T, BillSplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_are_grouped() {
        assert!(BillSplitError::HeaderNotFound.is_source_error());
        assert!(BillSplitError::MissingColumn("x".to_string()).is_source_error());
        assert!(BillSplitError::NoUsableRows.is_source_error());
        assert!(BillSplitError::EmptyData.is_source_error());
        assert!(!BillSplitError::InvalidInput {
            field: "total_bill",
            value: -1.0
        }
        .is_source_error());
        assert!(!BillSplitError::InvalidConfig("delimiter".to_string()).is_source_error());
    }
}
