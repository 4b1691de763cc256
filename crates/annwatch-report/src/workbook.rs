//! Two-sheet `.xlsx` report writer.
//!
//! The workbook is serialized in memory, written to a temporary file in the
//! target directory, and persisted over the target so a failed run never
//! leaves a half-written report.
//!
//! Feed text is untrusted: cell text is capped at Excel's limit and a link
//! Excel would reject is written as plain text, so one odd record never costs
//! the rest of the report.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use annwatch_core::{Category, Implication, ScoredAnnouncement};
use chrono::{NaiveDate, NaiveDateTime};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::ReportError;
use crate::summary::SummaryStats;

pub const SUMMARY_SHEET: &str = "Summary";
pub const DETAIL_SHEET: &str = "Announcements";

pub const DETAIL_HEADERS: [&str; 9] = [
    "Company",
    "Scrip Code",
    "Category",
    "Subject",
    "Date",
    "Time",
    "Key Highlights",
    "Investment Implication",
    "PDF Link",
];

const DETAIL_COLUMN_WIDTHS: [f64; 9] = [30.0, 12.0, 18.0, 50.0, 12.0, 10.0, 40.0, 20.0, 50.0];
const IMPLICATION_COLUMN: u16 = 7;
const PDF_COLUMN: u16 = 8;
const PDF_LINK_TEXT: &str = "View PDF";

/// Excel's limit on characters in one cell.
pub const MAX_CELL_CHARS: usize = 32_767;
/// Longest URL written as a hyperlink; Excel rejects longer ones.
pub const MAX_URL_CHARS: usize = 2_079;

const REPORT_TITLE: &str = "India Corporate Announcements";
const HEADER_BLUE: u32 = 0x1F_4E_79;

const DATE_FORMAT: &str = "%d %b %Y";
const TIME_FORMAT: &str = "%I:%M %p";

/// Settings for one report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Companies listed in the summary's top-companies table.
    pub top_companies: usize,
    /// Timestamp printed on the summary sheet.
    pub generated_at: NaiveDateTime,
}

/// `India_Corporate_Announcements_YYYYMMDD.xlsx` for the given run date.
#[must_use]
pub fn report_file_name(date: NaiveDate) -> String {
    format!("India_Corporate_Announcements_{}.xlsx", date.format("%Y%m%d"))
}

/// Write the report to `path`, replacing any existing file.
///
/// Missing parent directories are created. Returns the path written.
///
/// # Errors
///
/// - [`ReportError::CreateDir`] if the parent directory cannot be created.
/// - [`ReportError::Xlsx`] if the workbook cannot be assembled.
/// - [`ReportError::Write`] if the file cannot be written or moved into place;
///   the temporary file is removed when that happens.
pub fn write_report(
    path: &Path,
    scored: &[ScoredAnnouncement],
    options: &ReportOptions,
) -> Result<PathBuf, ReportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir {
        path: dir.display().to_string(),
        source: e,
    })?;

    let bytes = render_report(scored, options)?;

    let write_error = |source: std::io::Error| ReportError::Write {
        path: path.display().to_string(),
        source,
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".annwatch-")
        .suffix(".xlsx.tmp")
        .tempfile_in(dir)
        .map_err(write_error)?;
    tmp.write_all(&bytes).map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;

    tracing::info!(
        path = %path.display(),
        rows = scored.len(),
        bytes = bytes.len(),
        "report written"
    );
    Ok(path.to_path_buf())
}

/// Build the workbook and serialize it to `.xlsx` bytes.
///
/// # Errors
///
/// Returns [`ReportError::Xlsx`] if any cell, format, or sheet operation fails.
pub fn render_report(
    scored: &[ScoredAnnouncement],
    options: &ReportOptions,
) -> Result<Vec<u8>, ReportError> {
    let stats = SummaryStats::from_scored(scored, options.top_companies);

    let mut workbook = Workbook::new();
    workbook.push_worksheet(summary_sheet(&stats, options)?);
    workbook.push_worksheet(detail_sheet(scored)?);
    Ok(workbook.save_to_buffer()?)
}

fn summary_sheet(stats: &SummaryStats, options: &ReportOptions) -> Result<Worksheet, ReportError> {
    let title = Format::new().set_bold().set_font_size(14);
    let label = Format::new().set_bold();
    let header = header_format();
    let cell = Format::new().set_border(FormatBorder::Thin);

    let mut ws = Worksheet::new();
    ws.set_name(SUMMARY_SHEET)?;
    ws.set_column_width(0, 28)?;
    ws.set_column_width(1, 18)?;

    ws.write_string_with_format(0, 0, REPORT_TITLE, &title)?;

    let generated = options.generated_at.format("%d %b %Y %I:%M %p").to_string();
    ws.write_string_with_format(1, 0, "Generated", &label)?;
    ws.write_string(1, 1, &generated)?;

    let range = match stats.date_range {
        Some((first, last)) if first == last => first.format(DATE_FORMAT).to_string(),
        Some((first, last)) => format!(
            "{} to {}",
            first.format(DATE_FORMAT),
            last.format(DATE_FORMAT)
        ),
        None => "No announcements".to_string(),
    };
    ws.write_string_with_format(2, 0, "Date Range", &label)?;
    ws.write_string(2, 1, &range)?;

    ws.write_string_with_format(3, 0, "Total Announcements", &label)?;
    ws.write_number(3, 1, count(stats.total_count))?;

    let mut row: u32 = 5;
    ws.write_string_with_format(row, 0, "Category", &header)?;
    ws.write_string_with_format(row, 1, "Count", &header)?;
    for category in Category::ALL {
        row += 1;
        ws.write_string_with_format(row, 0, category.label(), &cell)?;
        ws.write_number_with_format(row, 1, count(stats.category_count(category)), &cell)?;
    }

    row += 2;
    ws.write_string_with_format(row, 0, "Investment Implication", &header)?;
    ws.write_string_with_format(row, 1, "Count", &header)?;
    for implication in Implication::ALL {
        row += 1;
        let fill = cell
            .clone()
            .set_background_color(Color::RGB(implication_fill(implication)));
        ws.write_string_with_format(row, 0, implication.label(), &fill)?;
        ws.write_number_with_format(
            row,
            1,
            count(stats.implication_count(implication)),
            &cell,
        )?;
    }

    row += 2;
    ws.write_string_with_format(row, 0, "Top Companies", &header)?;
    ws.write_string_with_format(row, 1, "Announcements", &header)?;
    for (company, n) in &stats.top_companies {
        row += 1;
        ws.write_string_with_format(row, 0, cell_text(company), &cell)?;
        ws.write_number_with_format(row, 1, count(*n), &cell)?;
    }

    Ok(ws)
}

fn detail_sheet(scored: &[ScoredAnnouncement]) -> Result<Worksheet, ReportError> {
    let header = header_format();
    let cell = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap()
        .set_border(FormatBorder::Thin);

    let mut ws = Worksheet::new();
    ws.set_name(DETAIL_SHEET)?;

    for (col, (title, width)) in (0u16..).zip(DETAIL_HEADERS.iter().zip(DETAIL_COLUMN_WIDTHS)) {
        ws.write_string_with_format(0, col, *title, &header)?;
        ws.set_column_width(col, width)?;
    }
    ws.set_row_height(0, 25)?;

    let mut last_row: u32 = 0;
    for item in scored {
        last_row += 1;
        let record = &item.record;
        let date = record.date.format(DATE_FORMAT).to_string();
        let time = record.time.format(TIME_FORMAT).to_string();
        let values: [&str; 7] = [
            &record.company,
            &record.scrip_code,
            item.category.label(),
            &record.subject,
            &date,
            &time,
            &item.highlights,
        ];
        for (col, value) in (0u16..).zip(values) {
            ws.write_string_with_format(last_row, col, cell_text(value), &cell)?;
        }

        let fill = cell
            .clone()
            .set_background_color(Color::RGB(implication_fill(item.implication)));
        ws.write_string_with_format(last_row, IMPLICATION_COLUMN, item.implication.label(), &fill)?;

        write_pdf_link(&mut ws, last_row, &record.pdf_url, &cell)?;
    }

    ws.set_freeze_panes(1, 0)?;
    ws.autofilter(0, 0, last_row, PDF_COLUMN)?;

    Ok(ws)
}

/// Hyperlink the PDF cell, or fall back to the URL as plain text when Excel
/// would not accept it as a link.
fn write_pdf_link(
    ws: &mut Worksheet,
    row: u32,
    url: &str,
    cell: &Format,
) -> Result<(), ReportError> {
    if url.is_empty() {
        ws.write_string_with_format(row, PDF_COLUMN, "", cell)?;
        return Ok(());
    }

    if url.chars().count() <= MAX_URL_CHARS {
        match ws.write_url_with_text(row, PDF_COLUMN, url, PDF_LINK_TEXT) {
            Ok(_) => return Ok(()),
            Err(e) => {
                tracing::warn!(row, error = %e, "PDF link rejected, writing it as text");
            }
        }
    } else {
        tracing::warn!(
            row,
            chars = url.chars().count(),
            "PDF link too long for a hyperlink, writing it as text"
        );
    }

    ws.write_string_with_format(row, PDF_COLUMN, cell_text(url), cell)?;
    Ok(())
}

/// `text` cut to [`MAX_CELL_CHARS`] on a char boundary.
fn cell_text(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_size(11)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_BLUE))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
}

fn implication_fill(implication: Implication) -> u32 {
    match implication {
        Implication::Positive => 0xC6_EF_CE,
        Implication::Neutral => 0xFF_EB_9C,
        Implication::Cautious => 0xFF_C7_CE,
    }
}

fn count(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}
