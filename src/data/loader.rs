use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use super::model::{Record, RecordStore};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const DATE: &str = "Date";
const AVERAGE_PRICE: &str = "AveragePrice";
const TOTAL_VOLUME: &str = "Total Volume";
const TOTAL_BAGS: &str = "Total Bags";
const TYPE: &str = "type";
const REGION: &str = "region";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Positions of the required columns inside a header row.
///
/// Any other columns (the unnamed index, PLU volumes, bag sizes, `year`)
/// are ignored.
struct ColumnIndex {
    date: usize,
    average_price: usize,
    total_volume: usize,
    total_bags: usize,
    kind: usize,
    region: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(Self {
            date: find(DATE)?,
            average_price: find(AVERAGE_PRICE)?,
            total_volume: find(TOTAL_VOLUME)?,
            total_bags: find(TOTAL_BAGS)?,
            kind: find(TYPE)?,
            region: find(REGION)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the sales table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<RecordStore, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Parse a CSV byte stream into a [`RecordStore`].
///
/// The first bad row aborts the load; a partially loaded store is never
/// returned.
pub fn load_reader<R: Read>(reader: R) -> Result<RecordStore, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        // Header is line 1.
        let row = i + 2;
        let raw = result?;
        records.push(parse_row(&raw, &columns, row)?);
    }

    let store = RecordStore::from_records(records)?;
    log::debug!(
        "parsed {} records, {} regions, {} types",
        store.len(),
        store.distinct_regions().len(),
        store.distinct_types().len()
    );
    Ok(store)
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_row(raw: &StringRecord, columns: &ColumnIndex, row: usize) -> Result<Record, LoadError> {
    let field = |idx: usize| raw.get(idx).unwrap_or("");

    let date_text = field(columns.date);
    let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT).map_err(|_| {
        LoadError::InvalidDate {
            row,
            value: date_text.to_string(),
        }
    })?;

    let average_price = parse_number(field(columns.average_price), AVERAGE_PRICE, row)?;
    if average_price <= 0.0 {
        return Err(invalid(AVERAGE_PRICE, field(columns.average_price), row));
    }
    let total_volume = parse_number(field(columns.total_volume), TOTAL_VOLUME, row)?;
    let total_bags = parse_number(field(columns.total_bags), TOTAL_BAGS, row)?;

    let kind = field(columns.kind);
    if kind.is_empty() {
        return Err(invalid(TYPE, kind, row));
    }
    let region = field(columns.region);
    if region.is_empty() {
        return Err(invalid(REGION, region, row));
    }

    Ok(Record::new(
        date,
        average_price,
        total_volume,
        total_bags,
        kind,
        region,
    ))
}

/// Parse a non-negative, finite decimal.
fn parse_number(text: &str, column: &'static str, row: usize) -> Result<f64, LoadError> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(invalid(column, text, row)),
    }
}

fn invalid(column: &'static str, value: &str, row: usize) -> LoadError {
    LoadError::InvalidNumber {
        row,
        column,
        value: value.to_string(),
    }
}
