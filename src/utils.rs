use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Timestamp layouts tried in order when reading the start-time column.
/// Dotted dates are read day-first, slashed dates month-first.
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
];

pub fn quarter_of_month(month: u32) -> u8 {
    month.div_ceil(3) as u8
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Parses a station timestamp. RFC 3339 values keep their wall-clock time
/// and drop the offset; everything else is tried against `formats` in order,
/// first as a date-time and then as a bare date at midnight.
pub fn parse_timestamp<S: AsRef<str>>(raw: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    formats.iter().map(|f| f.as_ref()).find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    })
}

/// Parses an energy reading in kWh. Rejects negative and non-finite values.
pub fn parse_energy(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|kwh| kwh.is_finite() && *kwh >= 0.0)
}

/// Formats `value` with a fixed number of decimals, rounding halves away from
/// zero the way receipts do ("2.5" shows as "3", not "2").
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0.00" for tiny negative float noise.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_quarter_of_month() {
        let quarters: Vec<u8> = (1..=12).map(quarter_of_month).collect();
        assert_eq!(quarters, vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(
            last_day_of_month(2023, 2),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2023, 12),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let formats = DEFAULT_TIMESTAMP_FORMATS;
        let expected = ymd_hms(2024, 7, 1, 18, 30, 0);

        assert_eq!(parse_timestamp("2024-07-01 18:30:00", formats), Some(expected));
        assert_eq!(parse_timestamp("2024-07-01T18:30:00", formats), Some(expected));
        assert_eq!(parse_timestamp("2024-07-01 18:30", formats), Some(expected));
        assert_eq!(parse_timestamp("01.07.2024 18:30", formats), Some(expected));
        assert_eq!(parse_timestamp("07/01/2024 18:30:00", formats), Some(expected));
        assert_eq!(parse_timestamp("  2024-07-01 18:30:00 ", formats), Some(expected));

        let date_only = parse_timestamp("2024-07-01", formats).unwrap();
        assert_eq!(date_only, ymd_hms(2024, 7, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_timestamp_rfc3339_keeps_wall_clock() {
        // Late on New Year's Eve local time stays in Q4.
        let dt = parse_timestamp("2023-12-31T23:30:00+01:00", DEFAULT_TIMESTAMP_FORMATS).unwrap();
        assert_eq!(dt.year(), 2023);
        assert_eq!(dt.month(), 12);
        assert_eq!(dt.hour(), 23);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let formats = DEFAULT_TIMESTAMP_FORMATS;
        assert_eq!(parse_timestamp("", formats), None);
        assert_eq!(parse_timestamp("not a date", formats), None);
        assert_eq!(parse_timestamp("2024-13-01 10:00", formats), None);
        assert_eq!(parse_timestamp("2024-02-30", formats), None);
    }

    #[test]
    fn test_parse_timestamp_custom_formats() {
        let formats = vec!["%Y%m%d %H%M".to_string()];
        assert_eq!(
            parse_timestamp("20240701 1830", formats.as_slice()),
            Some(ymd_hms(2024, 7, 1, 18, 30, 0))
        );
        assert_eq!(parse_timestamp("2024-07-01 18:30", formats.as_slice()), None);
    }

    #[test]
    fn test_parse_energy() {
        assert_eq!(parse_energy("12.5"), Some(12.5));
        assert_eq!(parse_energy(" 0 "), Some(0.0));
        assert_eq!(parse_energy("-1.0"), None);
        assert_eq!(parse_energy("abc"), None);
        assert_eq!(parse_energy(""), None);
        assert_eq!(parse_energy("NaN"), None);
        assert_eq!(parse_energy("inf"), None);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(15.0, 0), "15");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(25.0, 1), "25.0");
        assert_eq!(format_fixed(33.333333, 1), "33.3");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(100.0, 2), "100.00");
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
    }
}
