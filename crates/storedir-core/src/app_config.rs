use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Page hosting the country dropdown and the store list.
    pub directory_url: String,
    /// W3C WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    pub headless: bool,
    /// Directory the timestamped report is written into.
    pub output_dir: PathBuf,
    pub element_wait_secs: u64,
    pub country_settle_ms: u64,
    pub item_settle_ms: u64,
    pub scroll_pause_ms: u64,
    pub scroll_step_px: u32,
    pub max_scroll_attempts: u32,
}
