use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::data::filter::FilterParams;
use crate::data::loader::load_file;
use crate::data::model::RecordStore;
use crate::view_model::{compute_dashboard, Dashboard};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded table; replaced wholesale on File → Open, never mutated.
    pub store: RecordStore,

    /// Current control values.
    pub filters: FilterParams,

    /// Charts for `filters` (recomputed on every change).
    pub dashboard: Dashboard,

    /// Number of records matching all four predicates.
    pub matching: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: RecordStore, config: DashboardConfig) -> Self {
        let filters = FilterParams::defaults_for(&store, &config);
        let dashboard = compute_dashboard(&store, &filters, config.top_regions);
        let matching = dashboard.price.points.len();
        Self {
            config,
            store,
            filters,
            dashboard,
            matching,
            status_message: None,
        }
    }

    /// Recompute the dashboard after a filter change.
    pub fn refresh(&mut self) {
        self.dashboard = compute_dashboard(&self.store, &self.filters, self.config.top_regions);
        self.matching = self.dashboard.price.points.len();
        log::debug!(
            "recomputed dashboard for {:?}: {} matching records",
            self.filters,
            self.matching
        );
    }

    pub fn set_region(&mut self, region: &str) {
        if self.filters.region != region {
            self.filters.region = region.to_string();
            self.refresh();
        }
    }

    pub fn set_type(&mut self, kind: &str) {
        if self.filters.kind != kind {
            self.filters.kind = kind.to_string();
            self.refresh();
        }
    }

    /// Apply a new date window, kept inside the observed range.
    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        if (start, end) == (self.filters.start, self.filters.end) {
            return;
        }
        self.filters.start = start;
        self.filters.end = end;
        self.filters.clamp_to(&self.store);
        self.refresh();
    }

    /// Back to the configured defaults over the full date range.
    pub fn reset_filters(&mut self) {
        self.filters = FilterParams::defaults_for(&self.store, &self.config);
        self.refresh();
    }

    /// Swap in a freshly loaded table and reset the controls.
    pub fn set_store(&mut self, store: RecordStore) {
        self.filters = FilterParams::defaults_for(&store, &self.config);
        self.store = store;
        self.status_message = None;
        self.refresh();
    }

    /// Load another CSV. On failure the current table stays in place and the
    /// error is reported through `status_message`.
    pub fn reload_from(&mut self, path: &Path) {
        match load_file(path) {
            Ok(store) => {
                log::info!(
                    "Loaded {} records from {} ({} regions)",
                    store.len(),
                    path.display(),
                    store.distinct_regions().len()
                );
                self.set_store(store);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the current charts as pretty-printed JSON.
    pub fn export_dashboard(&self, path: &Path) -> Result<()> {
        let json = self
            .dashboard
            .to_json_pretty()
            .context("serialising dashboard")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported dashboard to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    const FIXTURE: &str = "\
Date,AveragePrice,Total Volume,Total Bags,type,region
2015-01-04,1.20,100,10,organic,Albany
2015-01-11,1.40,200,20,organic,Albany
2015-01-04,0.90,900,90,conventional,Albany
2016-01-03,1.10,400,40,organic,Boston
";

    fn state() -> AppState {
        AppState::new(load_reader(FIXTURE.as_bytes()).unwrap(), DashboardConfig::default())
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_with_configured_defaults() {
        let s = state();
        assert_eq!(s.filters.region, "Albany");
        assert_eq!(s.filters.kind, "organic");
        assert_eq!(s.matching, 2);
    }

    #[test]
    fn control_changes_recompute_charts() {
        let mut s = state();
        s.set_type("conventional");
        assert_eq!(s.matching, 1);
        assert_eq!(s.dashboard.price.values(), [0.90]);

        s.set_region("Boston");
        assert_eq!(s.matching, 0);
        assert!(s.dashboard.volume.is_empty());

        s.set_type("organic");
        assert_eq!(s.dashboard.volume.values(), [400.0]);

        s.reset_filters();
        assert_eq!(s.filters.region, "Albany");
        assert_eq!(s.matching, 2);
    }

    #[test]
    fn dates_are_clamped() {
        let mut s = state();
        s.set_dates(day(2000, 1, 1), day(2015, 1, 5));
        assert_eq!(s.filters.start, day(2015, 1, 4));
        assert_eq!(s.filters.end, day(2015, 1, 5));
        assert_eq!(s.matching, 1);
    }

    #[test]
    fn failed_reload_keeps_current_table() {
        let mut s = state();
        s.reload_from(Path::new("no/such/file.csv"));
        assert_eq!(s.store.len(), 4);
        assert!(s.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }

    #[test]
    fn export_writes_current_selection() {
        let s = state();
        let dir = std::env::temp_dir().join("avocado_analytics_export_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dashboard.json");

        s.export_dashboard(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["filters"]["kind"], "organic");
        assert_eq!(value["price"]["points"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn export_to_missing_directory_fails_with_context() {
        let s = state();
        let err = s
            .export_dashboard(Path::new("no/such/dir/dashboard.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("writing"));
    }
}
