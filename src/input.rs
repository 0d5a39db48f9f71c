//! Form-side helpers: turning typed-in text into numbers and deciding when a
//! split can be requested.

/// Reads a number typed into a form field. Empty, unparseable and non-finite
/// text all count as 0.
pub fn parse_form_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Snapshot of the form, taken fresh every time readiness is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormState {
    pub has_primary_data: bool,
    pub secondary_usage: f64,
    pub total_bill: f64,
}

impl FormState {
    pub fn new(has_primary_data: bool, secondary_usage: f64, total_bill: f64) -> Self {
        Self {
            has_primary_data,
            secondary_usage,
            total_bill,
        }
    }

    pub fn from_fields(has_primary_data: bool, secondary_usage: &str, total_bill: &str) -> Self {
        Self::new(
            has_primary_data,
            parse_form_number(secondary_usage),
            parse_form_number(total_bill),
        )
    }
}

/// Whether the split can be requested.
///
/// The strict branch wants a usage export, secondary usage and a bill. The
/// fallback branch accepts the export and secondary usage alone, so in
/// practice the bill amount never gates readiness; a zero bill still splits
/// into two zero shares.
pub fn is_ready(state: &FormState) -> bool {
    if state.has_primary_data && state.secondary_usage > 0.0 && state.total_bill > 0.0 {
        true
    } else {
        state.has_primary_data && state.secondary_usage > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_number() {
        assert_eq!(parse_form_number("12.5"), 12.5);
        assert_eq!(parse_form_number(" 40 "), 40.0);
        assert_eq!(parse_form_number(""), 0.0);
        assert_eq!(parse_form_number("abc"), 0.0);
        assert_eq!(parse_form_number("NaN"), 0.0);
        assert_eq!(parse_form_number("-3"), -3.0);
    }

    #[test]
    fn test_ready_with_all_inputs() {
        assert!(is_ready(&FormState::new(true, 5.0, 100.0)));
    }

    #[test]
    fn test_not_ready_without_export_or_secondary_usage() {
        assert!(!is_ready(&FormState::new(false, 5.0, 100.0)));
        assert!(!is_ready(&FormState::new(true, 0.0, 100.0)));
        assert!(!is_ready(&FormState::new(true, -1.0, 100.0)));
        assert!(!is_ready(&FormState::default()));
    }

    #[test]
    fn test_bill_does_not_gate_readiness() {
        assert!(is_ready(&FormState::new(true, 5.0, 0.0)));
        assert!(is_ready(&FormState::from_fields(true, "5", "")));
    }
}
