use chrono::NaiveDate;
use serde::Serialize;

use super::model::{Record, RecordStore};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Filter parameters: what the controls currently select
// ---------------------------------------------------------------------------

/// Region, type and inclusive date window chosen in the side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterParams {
    pub region: String,
    pub kind: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterParams {
    /// Initial selection: configured region/type over the full date range.
    ///
    /// Falls back to the first available value when the preferred default
    /// does not occur in the data.
    pub fn defaults_for(store: &RecordStore, config: &DashboardConfig) -> Self {
        let pick = |options: &[String], preferred: &str| {
            if options.iter().any(|o| o == preferred) {
                preferred.to_string()
            } else {
                options.first().cloned().unwrap_or_default()
            }
        };
        let (start, end) = store.date_range();
        Self {
            region: pick(store.distinct_regions(), &config.default_region),
            kind: pick(store.distinct_types(), &config.default_type),
            start,
            end,
        }
    }

    /// Keep both dates inside the store's observed range, and keep
    /// `start <= end` by moving `end` up when the window is inverted.
    pub fn clamp_to(&mut self, store: &RecordStore) {
        let (first, last) = store.date_range();
        self.start = self.start.clamp(first, last);
        self.end = self.end.clamp(first, last);
        if self.start > self.end {
            self.end = self.start;
        }
    }
}

// ---------------------------------------------------------------------------
// Typed predicate
// ---------------------------------------------------------------------------

/// Conjunction of equality predicates on region/type and an inclusive date
/// window. A `None` dimension is not constrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter<'a> {
    region: Option<&'a str>,
    kind: Option<&'a str>,
    start: NaiveDate,
    end: NaiveDate,
}

impl<'a> From<&'a FilterParams> for RecordFilter<'a> {
    fn from(params: &'a FilterParams) -> Self {
        Self {
            region: Some(params.region.as_str()),
            kind: Some(params.kind.as_str()),
            start: params.start,
            end: params.end,
        }
    }
}

impl<'a> RecordFilter<'a> {
    /// Drop the region predicate (compare across regions).
    pub fn ignoring_region(mut self) -> Self {
        self.region = None;
        self
    }

    /// Drop the type predicate (compare across types).
    pub fn ignoring_type(mut self) -> Self {
        self.kind = None;
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.region.map_or(true, |r| record.region == r)
            && self.kind.map_or(true, |k| record.kind == k)
            && self.start <= record.date
            && record.date <= self.end
    }
}

/// Records passing `predicate`, in input order.
///
/// An inverted window (`start > end`) simply matches nothing.
pub fn filter<'r, I>(records: I, predicate: &RecordFilter<'_>) -> Vec<&'r Record>
where
    I: IntoIterator<Item = &'r Record>,
{
    records
        .into_iter()
        .filter(|r| predicate.matches(r))
        .collect()
}
