use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::model::Record;

// ---------------------------------------------------------------------------
// Grouping key, metric column and reduction
// ---------------------------------------------------------------------------

/// Column a subset is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Region,
    Type,
    Year,
}

/// Numeric column reduced inside each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    AveragePrice,
    TotalVolume,
    TotalBags,
}

impl Metric {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::AveragePrice => record.average_price,
            Metric::TotalVolume => record.total_volume,
            Metric::TotalBags => record.total_bags,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Mean,
}

/// A concrete grouping value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    Text(String),
    Year(i32),
}

impl GroupKey {
    fn of(self, record: &Record) -> KeyValue {
        match self {
            GroupKey::Region => KeyValue::Text(record.region.clone()),
            GroupKey::Type => KeyValue::Text(record.kind.clone()),
            GroupKey::Year => KeyValue::Year(record.year()),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Text(s) => write!(f, "{s}"),
            KeyValue::Year(y) => write!(f, "{y}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// One group of an aggregation result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: KeyValue,
    pub metric: f64,
    /// Number of records in the group (always >= 1).
    pub count: usize,
}

/// Group `records` by `key` and reduce `metric` with `op`.
///
/// Text keys come out in first-seen order, years ascending. Groups exist
/// only for keys that occur in the input, so an empty input yields no
/// groups.
pub fn aggregate<'r, I>(records: I, key: GroupKey, metric: Metric, op: AggregateOp) -> Vec<Group>
where
    I: IntoIterator<Item = &'r Record>,
{
    // (key, sum, count) in first-seen order
    let mut acc: Vec<(KeyValue, f64, usize)> = Vec::new();
    let mut slots: HashMap<KeyValue, usize> = HashMap::new();

    for record in records {
        let k = key.of(record);
        let v = metric.value(record);
        match slots.get(&k) {
            Some(&i) => {
                acc[i].1 += v;
                acc[i].2 += 1;
            }
            None => {
                slots.insert(k.clone(), acc.len());
                acc.push((k, v, 1));
            }
        }
    }

    if key == GroupKey::Year {
        acc.sort_by(|a, b| a.0.cmp(&b.0));
    }

    acc.into_iter()
        .map(|(key, sum, count)| Group {
            key,
            metric: match op {
                AggregateOp::Sum => sum,
                AggregateOp::Mean => sum / count as f64,
            },
            count,
        })
        .collect()
}

/// The `n` largest groups: metric descending, key ascending on ties.
pub fn top_n(mut groups: Vec<Group>, n: usize) -> Vec<Group> {
    groups.sort_by(|a, b| match b.metric.total_cmp(&a.metric) {
        Ordering::Equal => a.key.cmp(&b.key),
        other => other,
    });
    groups.truncate(n);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(date: (i32, u32, u32), price: f64, volume: f64, kind: &str, region: &str) -> Record {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        Record::new(date, price, volume, volume / 2.0, kind, region)
    }

    fn text(s: &str) -> KeyValue {
        KeyValue::Text(s.to_string())
    }

    #[test]
    fn mean_by_type_in_first_seen_order() {
        let records = [
            rec((2015, 1, 4), 1.20, 100.0, "organic", "Albany"),
            rec((2015, 1, 4), 0.90, 50.0, "conventional", "Albany"),
            rec((2015, 1, 11), 1.40, 200.0, "organic", "Albany"),
        ];
        let groups = aggregate(&records, GroupKey::Type, Metric::AveragePrice, AggregateOp::Mean);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, text("organic"));
        assert!((groups[0].metric - 1.30).abs() < 1e-12);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].key, text("conventional"));
        assert!((groups[1].metric - 0.90).abs() < 1e-12);
    }

    #[test]
    fn years_are_ascending() {
        let records = [
            rec((2017, 6, 4), 1.0, 7.0, "organic", "Albany"),
            rec((2015, 6, 7), 1.0, 3.0, "organic", "Albany"),
            rec((2016, 6, 5), 1.0, 5.0, "organic", "Albany"),
            rec((2015, 6, 14), 1.0, 4.0, "organic", "Albany"),
        ];
        let groups = aggregate(&records, GroupKey::Year, Metric::TotalVolume, AggregateOp::Sum);
        let keys: Vec<KeyValue> = groups.iter().map(|g| g.key.clone()).collect();
        assert_eq!(keys, [KeyValue::Year(2015), KeyValue::Year(2016), KeyValue::Year(2017)]);
        assert_eq!(groups[0].metric, 7.0);
    }

    #[test]
    fn empty_input_has_no_groups() {
        let groups = aggregate(
            std::iter::empty::<&Record>(),
            GroupKey::Region,
            Metric::TotalVolume,
            AggregateOp::Mean,
        );
        assert!(groups.is_empty());
    }

    #[test]
    fn top_n_breaks_ties_by_key() {
        let groups = vec![
            Group { key: text("b"), metric: 5.0, count: 1 },
            Group { key: text("a"), metric: 5.0, count: 1 },
            Group { key: text("c"), metric: 9.0, count: 1 },
            Group { key: text("d"), metric: 1.0, count: 1 },
        ];
        let top = top_n(groups, 3);
        let keys: Vec<String> = top.iter().map(|g| g.key.to_string()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn top_n_shorter_than_n() {
        let groups = vec![Group { key: text("only"), metric: 1.0, count: 1 }];
        assert_eq!(top_n(groups, 10).len(), 1);
    }
}
