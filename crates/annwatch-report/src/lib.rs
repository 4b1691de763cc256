//! Spreadsheet report generation for annwatch.
//!
//! Aggregates scored announcements into [`SummaryStats`] and writes a
//! two-sheet `.xlsx` workbook: a `Summary` sheet and an `Announcements`
//! detail sheet.

pub mod error;
pub mod summary;
pub mod workbook;

pub use error::ReportError;
pub use summary::SummaryStats;
pub use workbook::{
    render_report, report_file_name, write_report, ReportOptions, DETAIL_HEADERS, DETAIL_SHEET,
    MAX_CELL_CHARS, MAX_URL_CHARS, SUMMARY_SHEET,
};
