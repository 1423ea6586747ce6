use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Overpass interpreter endpoint queried for recycling amenities.
    pub overpass_url: String,
    pub query_timeout_secs: u64,
    pub user_agent: String,
    pub search_radius_m: u32,
    /// Live results are truncated to this many nearest records.
    pub max_results: usize,
    /// Optional YAML override for the filter-to-category mapping.
    pub filter_rules_path: Option<PathBuf>,
}
