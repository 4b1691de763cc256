//! Announcement analysis for annwatch.
//!
//! Assigns each announcement a category, pulls out the numeric highlights from
//! its body, and rates its likely investment implication by keyword counting.
//! Everything here is synchronous and driven by an explicit [`AnalysisConfig`]
//! value; nothing reads global state.
//!
//! [`AnalysisConfig`]: annwatch_core::AnalysisConfig

pub mod categorize;
pub mod filter;
pub mod highlights;
pub mod pipeline;
pub mod scorer;

pub use categorize::categorize;
pub use filter::{filter_records, FilterStats};
pub use highlights::{extract_highlights, SEPARATOR};
pub use pipeline::{score_announcement, score_announcements};
pub use scorer::{assess, assess_implication, classify, score_text, Assessment, KeywordTally};
