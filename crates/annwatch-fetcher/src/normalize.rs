//! Normalization from raw feed rows to [`AnnouncementRecord`].
//!
//! Normalization never fails: a row with missing or unparseable fields gets
//! safe defaults and the affected fields are reported in
//! [`Normalized::defaulted`] so the caller can log them.

use annwatch_core::AnnouncementRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::types::RawAnnouncement;

/// Subjects longer than this are cut on a char boundary.
pub const MAX_SUBJECT_CHARS: usize = 200;

const UNKNOWN_COMPANY: &str = "Unknown";

/// A field that was absent or unusable and replaced by a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Company,
    ScripCode,
    Subject,
    Timestamp,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingField::Company => write!(f, "company"),
            MissingField::ScripCode => write!(f, "scrip_code"),
            MissingField::Subject => write!(f, "subject"),
            MissingField::Timestamp => write!(f, "timestamp"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub record: AnnouncementRecord,
    /// Fields that were defaulted. Empty for a well-formed row.
    pub defaulted: Vec<MissingField>,
}

/// Normalizes a raw feed row into an [`AnnouncementRecord`].
///
/// `fallback_date` is the day the row was requested for; it is used (at
/// midnight) when the row's timestamp is missing or unparseable. The body text
/// prefers the longer `MORE` field over `HEADLINE`.
#[must_use]
pub fn normalize_announcement(
    raw: RawAnnouncement,
    fallback_date: NaiveDate,
    pdf_base_url: &str,
) -> Normalized {
    let mut defaulted = Vec::new();

    let company = first_non_empty(raw.company, raw.company_name).unwrap_or_else(|| {
        defaulted.push(MissingField::Company);
        UNKNOWN_COMPANY.to_string()
    });

    let scrip_code = first_non_empty(raw.scrip_code, raw.symbol).unwrap_or_else(|| {
        defaulted.push(MissingField::ScripCode);
        String::new()
    });

    let subject = first_non_empty(raw.subject, raw.subject_alt)
        .map(|s| truncate_chars(&s, MAX_SUBJECT_CHARS))
        .unwrap_or_else(|| {
            defaulted.push(MissingField::Subject);
            String::new()
        });

    // An absent body is normal, not a malformed row.
    let body_text = non_empty(raw.more)
        .or_else(|| non_empty(raw.headline))
        .unwrap_or_default();

    let source_category = non_empty(raw.category).unwrap_or_default();

    let timestamp = [raw.news_dt, raw.date, raw.dt_tm]
        .into_iter()
        .filter_map(non_empty)
        .find_map(|value| parse_news_timestamp(&value));
    let (date, time) = if let Some(ts) = timestamp {
        (ts.date(), ts.time())
    } else {
        defaulted.push(MissingField::Timestamp);
        (fallback_date, NaiveTime::MIN)
    };

    let pdf_url = first_non_empty(raw.attachment, raw.attachment_alt)
        .map(|name| {
            format!(
                "{}/{}",
                pdf_base_url.trim_end_matches('/'),
                name.trim_start_matches('/')
            )
        })
        .unwrap_or_default();

    Normalized {
        record: AnnouncementRecord {
            company,
            scrip_code,
            source_category,
            subject,
            body_text,
            date,
            time,
            pdf_url,
        },
        defaulted,
    }
}

/// Parses the timestamp formats seen in the feed.
///
/// Accepted (first match wins):
/// - RFC 3339 with offset: `2024-01-15T14:30:00+05:30`, `...Z`
/// - ISO without offset: `2024-01-15T14:30:00`, `2024-01-15T14:30:00.123`
/// - `2024-01-15 14:30:00`
/// - `15-Jan-2024 14:30:00`, `15 Jan 2024 14:30`
/// - date only: `2024-01-15`, `15-Jan-2024` (midnight)
pub(crate) fn parse_news_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%d-%b-%Y %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%d %b %Y %H:%M",
    ];
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%d %b %Y"];

    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    None
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// The BSE field when it has content, else the NSE-style alternate.
fn first_non_empty(primary: Option<String>, alternate: Option<String>) -> Option<String> {
    non_empty(primary).or_else(|| non_empty(alternate))
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
