use crate::config::SplitConfig;
use crate::error::{BillSplitError, Result};
use crate::schema::UsageRecord;
use crate::utils::{parse_energy, parse_timestamp};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};

/// Reads a charging-station export with the default column names and
/// timestamp formats. Never fails: a source without a usable header yields an
/// empty vector, and rows that cannot be read are skipped.
pub fn parse_records(raw_text: &str) -> Vec<UsageRecord> {
    parse_records_with(raw_text, &SplitConfig::default())
}

pub fn parse_records_with(raw_text: &str, config: &SplitConfig) -> Vec<UsageRecord> {
    match try_parse_records(raw_text, config) {
        Ok(records) => records,
        Err(e) => {
            warn!("Could not read usage export: {}", e);
            Vec::new()
        }
    }
}

/// Like [`parse_records_with`] but reports why a source could not be read.
///
/// The header row does not have to be the first line: exports often carry a
/// preamble, so the first line mentioning both required column names is
/// taken as the header. Everything above it is ignored.
///
/// Every line is split on the delimiter as is. Quotes carry no meaning, so a
/// stray `"` only spoils the row it sits in.
pub fn try_parse_records(raw_text: &str, config: &SplitConfig) -> Result<Vec<UsageRecord>> {
    let text = raw_text.trim_start_matches('\u{feff}');

    let header_offset = find_header_offset(text, config).ok_or(BillSplitError::HeaderNotFound)?;
    debug!("Located usage export header at byte offset {}", header_offset);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .delimiter(config.delimiter_byte())
        .from_reader(text[header_offset..].as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| BillSplitError::HeaderNotFound)?
        .clone();
    let columns = ColumnIndex::locate(&headers, config)?;

    let records: Vec<UsageRecord> = reader
        .records()
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(e) => {
                debug!("Skipping unreadable row: {}", e);
                None
            }
        })
        .filter(|row| row.len() >= headers.len())
        .filter_map(|row| columns.extract(&row, config))
        .collect();

    debug!(
        "Parsed {} usage records from a {}-column export",
        records.len(),
        headers.len()
    );

    Ok(records)
}

fn find_header_offset(text: &str, config: &SplitConfig) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.contains(config.start_time_column.as_str())
            && line.contains(config.energy_column.as_str())
        {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

struct ColumnIndex {
    start_time: usize,
    energy: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord, config: &SplitConfig) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| BillSplitError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            start_time: position(config.start_time_column.as_str())?,
            energy: position(config.energy_column.as_str())?,
        })
    }

    fn extract(&self, row: &StringRecord, config: &SplitConfig) -> Option<UsageRecord> {
        let raw_time = row.get(self.start_time)?;
        let raw_energy = row.get(self.energy)?;

        let Some(timestamp) = parse_timestamp(raw_time, &config.timestamp_formats) else {
            debug!("Skipping row with unreadable start time '{}'", raw_time);
            return None;
        };
        let Some(energy_kwh) = parse_energy(raw_energy) else {
            debug!("Skipping row with unreadable energy '{}'", raw_energy);
            return None;
        };

        Some(UsageRecord {
            timestamp,
            energy_kwh,
        })
    }
}
