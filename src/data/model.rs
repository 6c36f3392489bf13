use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Record – one row of the sales table
// ---------------------------------------------------------------------------

/// Weekly avocado sales for one region and one type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    /// Always `date.year()`; only [`Record::new`] sets it.
    year: i32,
    pub average_price: f64,
    pub total_volume: f64,
    pub total_bags: f64,
    /// Product type, e.g. `conventional` or `organic`.
    pub kind: String,
    pub region: String,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        average_price: f64,
        total_volume: f64,
        total_bags: f64,
        kind: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            date,
            year: date.year(),
            average_price,
            total_volume,
            total_bags,
            kind: kind.into(),
            region: region.into(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

// ---------------------------------------------------------------------------
// RecordStore – the complete loaded table
// ---------------------------------------------------------------------------

/// Immutable, date-ordered table with pre-computed option lists.
///
/// Built once at startup and only read afterwards, so it can be shared
/// between views without synchronisation.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    regions: Vec<String>,
    kinds: Vec<String>,
    first_date: NaiveDate,
    last_date: NaiveDate,
}

// A store is never empty, so `len` has no `is_empty` partner.
#[allow(clippy::len_without_is_empty)]
impl RecordStore {
    /// Sort by date (stable) and build the distinct-value indices.
    pub fn from_records(mut records: Vec<Record>) -> Result<Self, LoadError> {
        records.sort_by_key(|r| r.date);

        let (first_date, last_date) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Err(LoadError::Empty),
        };

        let regions: BTreeSet<&str> = records.iter().map(|r| r.region.as_str()).collect();
        let kinds: BTreeSet<&str> = records.iter().map(|r| r.kind.as_str()).collect();
        let regions = regions.into_iter().map(str::to_string).collect();
        let kinds = kinds.into_iter().map(str::to_string).collect();

        Ok(Self {
            records,
            regions,
            kinds,
            first_date,
            last_date,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Sorted, de-duplicated region names.
    pub fn distinct_regions(&self) -> &[String] {
        &self.regions
    }

    /// Sorted, de-duplicated product types.
    pub fn distinct_types(&self) -> &[String] {
        &self.kinds
    }

    /// Earliest and latest observed dates (inclusive).
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_date, self.last_date)
    }
}
