use std::path::PathBuf;

use url::Url;

use crate::fetch::FetchSettings;

pub const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com";
pub const DEFAULT_OUTPUT_DIR: &str = "Data";
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 16;

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Site root that roster paths and profile hrefs are resolved against.
    pub base_url: Url,
    pub output_dir: PathBuf,
    /// Upper bound on profile fetches in flight for one letter.
    pub max_concurrent_fetches: usize,
    pub fetch: FetchSettings,
}

impl CrawlConfig {
    pub fn new(base_url: Url, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url,
            output_dir: output_dir.into(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            fetch: FetchSettings::default(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        let base_url = Url::parse(DEFAULT_BASE_URL).expect("default base url");
        Self::new(base_url, DEFAULT_OUTPUT_DIR)
    }
}
