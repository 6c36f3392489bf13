//! Chart-ready series for the six dashboard views.
//!
//! Every function here is a pure mapping from the record store and the
//! current [`FilterParams`] to plain data; the UI only draws what it gets.

use chrono::NaiveDate;
use serde::Serialize;

use crate::data::aggregate::{aggregate, top_n, AggregateOp, Group, GroupKey, Metric};
use crate::data::filter::{filter, FilterParams, RecordFilter};
use crate::data::model::{Record, RecordStore};

// ---------------------------------------------------------------------------
// Chart specification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Position along the category/time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Date(NaiveDate),
    Number(f64),
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: XValue,
    pub y: f64,
    /// Text drawn on the bar, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Presentation hints carried with every series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub title: &'static str,
    pub x_title: Option<&'static str>,
    pub y_title: Option<&'static str>,
    /// Hex colours (`#RRGGBB` or `#RRGGBBAA`); bars cycle through them.
    pub colors: Vec<&'static str>,
    pub orientation: Orientation,
    /// Prefix for value-axis ticks, e.g. `$`.
    pub value_prefix: Option<&'static str>,
    /// First category at the top of a horizontal bar chart.
    pub reversed_categories: bool,
    pub height: Option<f32>,
    pub marker_size: Option<f32>,
    pub opacity: Option<f32>,
}

impl ChartStyle {
    fn new(title: &'static str, colors: Vec<&'static str>) -> Self {
        Self {
            title,
            x_title: None,
            y_title: None,
            colors,
            orientation: Orientation::Vertical,
            value_prefix: None,
            reversed_categories: false,
            height: None,
            marker_size: None,
            opacity: None,
        }
    }

    fn axes(mut self, x: &'static str, y: &'static str) -> Self {
        self.x_title = Some(x);
        self.y_title = Some(y);
        self
    }

    fn dollars(mut self) -> Self {
        self.value_prefix = Some("$");
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
    pub style: ChartStyle,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[cfg(test)]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// All six charts for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filters: FilterParams,
    pub price: ChartSpec,
    pub volume: ChartSpec,
    pub top_regions: ChartSpec,
    pub price_by_type: ChartSpec,
    pub volume_by_year: ChartSpec,
    pub bags_vs_price: ChartSpec,
}

impl Dashboard {
    pub fn charts(&self) -> [&ChartSpec; 6] {
        [
            &self.price,
            &self.volume,
            &self.top_regions,
            &self.price_by_type,
            &self.volume_by_year,
            &self.bags_vs_price,
        ]
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ---------------------------------------------------------------------------
// Pipeline: filter -> aggregate -> chart specs
// ---------------------------------------------------------------------------

/// Recompute every chart for `params`.
///
/// Top regions ignores the region selection and price-by-type ignores the
/// type selection, so those two charts compare across the dropped dimension.
pub fn compute_dashboard(store: &RecordStore, params: &FilterParams, top: usize) -> Dashboard {
    let full = RecordFilter::from(params);
    let selected = filter(store.records(), &full);

    let by_region = aggregate(
        filter(store.records(), &full.clone().ignoring_region()),
        GroupKey::Region,
        Metric::TotalVolume,
        AggregateOp::Sum,
    );
    let mut by_type = aggregate(
        filter(store.records(), &full.clone().ignoring_type()),
        GroupKey::Type,
        Metric::AveragePrice,
        AggregateOp::Mean,
    );
    // Sorted by type name so each type keeps its colour.
    by_type.sort_by(|a, b| a.key.cmp(&b.key));
    let by_year = aggregate(
        selected.iter().copied(),
        GroupKey::Year,
        Metric::TotalVolume,
        AggregateOp::Sum,
    );

    Dashboard {
        filters: params.clone(),
        price: price_chart(&selected),
        volume: volume_chart(&selected),
        top_regions: top_regions_chart(top_n(by_region, top)),
        price_by_type: price_by_type_chart(by_type),
        volume_by_year: volume_by_year_chart(by_year),
        bags_vs_price: bags_vs_price_chart(&selected),
    }
}

fn series<F>(records: &[&Record], y: F) -> Vec<ChartPoint>
where
    F: Fn(&Record) -> f64,
{
    records
        .iter()
        .map(|r| ChartPoint {
            x: XValue::Date(r.date),
            y: y(*r),
            label: None,
        })
        .collect()
}

fn price_chart(records: &[&Record]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        points: series(records, |r| r.average_price),
        style: ChartStyle::new("Average Price of Avocados", vec!["#407E60B8"]).dollars(),
    }
}

fn volume_chart(records: &[&Record]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        points: series(records, |r| r.total_volume),
        style: ChartStyle::new("Avocados Sold", vec!["#73CE99"]),
    }
}

fn top_regions_chart(groups: Vec<Group>) -> ChartSpec {
    let points = groups
        .into_iter()
        .map(|g| ChartPoint {
            label: Some(format!("{:.0}", g.metric.round())),
            x: XValue::Category(g.key.to_string()),
            y: g.metric,
        })
        .collect();
    let mut style = ChartStyle::new("Top 10 Regions by Avocados Sold", vec!["#80C09AD5"])
        .axes("Total Volume", "Region");
    style.orientation = Orientation::Horizontal;
    style.reversed_categories = true;
    style.height = Some(500.0);
    ChartSpec {
        kind: ChartKind::Bar,
        points,
        style,
    }
}

fn price_by_type_chart(groups: Vec<Group>) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        points: category_points(groups),
        style: ChartStyle::new("Average Price by Avocado Type", vec!["#AEEAC4EA", "#08843ED6"])
            .dollars(),
    }
}

fn volume_by_year_chart(groups: Vec<Group>) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        points: category_points(groups),
        style: ChartStyle::new("Total Volume by Year", vec!["#2A87468A"]).axes("Year", "Volume"),
    }
}

fn bags_vs_price_chart(records: &[&Record]) -> ChartSpec {
    let points = records
        .iter()
        .map(|r| ChartPoint {
            x: XValue::Number(Metric::TotalBags.value(r)),
            y: Metric::AveragePrice.value(r),
            label: None,
        })
        .collect();
    let mut style = ChartStyle::new("Total Bags vs Average Price", vec!["#27AE85E7"])
        .axes("Total Bags", "Average Price ($)");
    style.marker_size = Some(8.0);
    style.opacity = Some(0.6);
    ChartSpec {
        kind: ChartKind::Scatter,
        points,
        style,
    }
}

fn category_points(groups: Vec<Group>) -> Vec<ChartPoint> {
    groups
        .into_iter()
        .map(|g| ChartPoint {
            x: XValue::Category(g.key.to_string()),
            y: g.metric,
            label: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    const FIXTURE: &str = "\
Date,AveragePrice,Total Volume,Total Bags,type,region
2015-01-11,1.40,200,20,organic,Albany
2015-01-04,1.20,100,10,organic,Albany
2015-01-04,0.90,900,90,conventional,Albany
2015-03-01,2.00,50,5,organic,Albany
";

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january_organic() -> FilterParams {
        FilterParams {
            region: "Albany".into(),
            kind: "organic".into(),
            start: day(2015, 1, 1),
            end: day(2015, 1, 31),
        }
    }

    #[test]
    fn albany_organic_january() {
        let store = load_reader(FIXTURE.as_bytes()).unwrap();
        let dash = compute_dashboard(&store, &january_organic(), 10);

        let dates: Vec<XValue> = dash.price.points.iter().map(|p| p.x.clone()).collect();
        assert_eq!(
            dates,
            [XValue::Date(day(2015, 1, 4)), XValue::Date(day(2015, 1, 11))]
        );
        assert_eq!(dash.price.values(), [1.20, 1.40]);
        assert_eq!(dash.volume.values(), [100.0, 200.0]);

        let by_type: Vec<(XValue, f64)> = dash
            .price_by_type
            .points
            .iter()
            .map(|p| (p.x.clone(), p.y))
            .collect();
        assert_eq!(by_type.len(), 2);
        let organic = by_type
            .iter()
            .find(|(x, _)| *x == XValue::Category("organic".into()))
            .unwrap();
        let conventional = by_type
            .iter()
            .find(|(x, _)| *x == XValue::Category("conventional".into()))
            .unwrap();
        assert!((organic.1 - 1.30).abs() < 1e-9);
        assert!((conventional.1 - 0.90).abs() < 1e-9);
    }

    #[test]
    fn scatter_and_year_follow_full_filter() {
        let store = load_reader(FIXTURE.as_bytes()).unwrap();
        let dash = compute_dashboard(&store, &january_organic(), 10);

        assert_eq!(dash.bags_vs_price.points.len(), 2);
        assert_eq!(dash.bags_vs_price.points[0].x, XValue::Number(10.0));
        assert_eq!(dash.volume_by_year.points.len(), 1);
        assert_eq!(
            dash.volume_by_year.points[0].x,
            XValue::Category("2015".into())
        );
        assert_eq!(dash.volume_by_year.points[0].y, 300.0);
    }

    #[test]
    fn top_regions_are_labelled_with_rounded_volume() {
        let csv = "\
Date,AveragePrice,Total Volume,Total Bags,type,region
2015-01-04,1.0,100.4,1,organic,Albany
2015-01-04,1.0,250.6,1,organic,Boston
2015-01-04,1.0,999,1,conventional,Chicago
";
        let store = load_reader(csv.as_bytes()).unwrap();
        let dash = compute_dashboard(&store, &january_organic(), 10);
        let labels: Vec<Option<String>> = dash
            .top_regions
            .points
            .iter()
            .map(|p| p.label.clone())
            .collect();
        assert_eq!(labels, [Some("251".to_string()), Some("100".to_string())]);
        assert_eq!(dash.top_regions.points[0].x, XValue::Category("Boston".into()));
        assert_eq!(dash.top_regions.style.orientation, Orientation::Horizontal);
    }

    #[test]
    fn empty_selection_gives_empty_series() {
        let store = load_reader(FIXTURE.as_bytes()).unwrap();
        let mut params = january_organic();
        params.start = day(2016, 1, 1);
        params.end = day(2016, 12, 31);
        let dash = compute_dashboard(&store, &params, 10);
        assert!(dash.charts().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn price_by_type_colours_follow_type_name() {
        // organic appears first in the file
        let store = load_reader(FIXTURE.as_bytes()).unwrap();
        let dash = compute_dashboard(&store, &january_organic(), 10);
        let types: Vec<XValue> = dash
            .price_by_type
            .points
            .iter()
            .map(|p| p.x.clone())
            .collect();
        assert_eq!(
            types,
            [
                XValue::Category("conventional".into()),
                XValue::Category("organic".into())
            ]
        );
        assert_eq!(dash.price_by_type.style.colors, ["#AEEAC4EA", "#08843ED6"]);
    }

    #[test]
    fn export_is_valid_json() {
        let store = load_reader(FIXTURE.as_bytes()).unwrap();
        let dash = compute_dashboard(&store, &january_organic(), 10);
        let json = dash.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["price"]["kind"], "line");
        assert_eq!(value["price"]["points"][0]["x"], "2015-01-04");
        assert_eq!(value["filters"]["region"], "Albany");
        assert_eq!(value["top_regions"]["style"]["orientation"], "horizontal");
    }
}
