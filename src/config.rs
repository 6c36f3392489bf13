use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Static settings for the dashboard process.
///
/// There are no flags or environment overrides; the data file is read from
/// `data_path` relative to the working directory.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Preferred initial region; the first region is used if absent.
    pub default_region: String,
    /// Preferred initial type; the first type is used if absent.
    pub default_type: String,
    /// Number of regions shown in the top-regions chart.
    pub top_regions: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("assets/avocado.csv"),
            window_title: "Avocado Analytics: Understand Your Avocados!".to_string(),
            window_size: [1280.0, 900.0],
            min_window_size: [720.0, 480.0],
            default_region: "Albany".to_string(),
            default_type: "organic".to_string(),
            top_regions: 10,
        }
    }
}
