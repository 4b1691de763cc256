use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://api.bseindia.com/BseIndiaAPI/api/AnnGetData/w";
pub const DEFAULT_PDF_BASE_URL: &str = "https://www.bseindia.com/xml-data/corpfiling/AttachLive";
pub const DEFAULT_WARMUP_URL: &str = "https://www.bseindia.com/corporates/ann.html";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Runtime settings for one tracker run, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Number of calendar days to fetch, counting today.
    pub days_back: u32,
    pub output_dir: PathBuf,
    /// Optional YAML rules file; built-in rules are used when `None`.
    pub rules_path: Option<PathBuf>,
    pub log_level: String,
    pub api_url: String,
    pub pdf_base_url: String,
    /// Page requested once before fetching to pick up session cookies.
    pub warmup_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub max_pages: u32,
}
