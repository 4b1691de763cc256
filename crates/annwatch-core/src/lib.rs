//! Domain types and configuration shared by every annwatch crate.

pub mod analysis_config;
pub mod app_config;
pub mod config;
pub mod error;
pub mod types;

pub use analysis_config::{
    load_analysis_config, parse_analysis_config, AnalysisConfig, CategoryBias, CategoryRule,
    FilterConfig, HighlightConfig, ReportSettings, ScoringConfig, Thresholds,
};
pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use types::{AnnouncementRecord, Category, Implication, ScoredAnnouncement};
