//! Raw response shapes of the BSE `AnnGetData` endpoint.
//!
//! The endpoint answers `{"Table": [...rows], "Table1": [{"ROWCNT": n}]}`.
//! Field types drift between string and number across rows, so every field is
//! read leniently and kept optional; [`crate::normalize`] decides defaults.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One page of the announcements feed.
///
/// Rows are kept as raw JSON so a single odd row can be skipped without
/// failing the whole page.
#[derive(Debug, Deserialize)]
pub struct AnnouncementPage {
    #[serde(rename = "Table", default)]
    pub table: Vec<Value>,
    #[serde(rename = "Table1", default)]
    pub table1: Vec<RowCount>,
}

impl AnnouncementPage {
    /// Total number of rows the server reports for the query, if present.
    #[must_use]
    pub fn row_count(&self) -> Option<u64> {
        self.table1.first().and_then(|r| r.row_count)
    }
}

#[derive(Debug, Deserialize)]
pub struct RowCount {
    #[serde(rename = "ROWCNT", default, deserialize_with = "lenient_u64")]
    pub row_count: Option<u64>,
}

/// A single announcement row as sent by the exchange.
///
/// The NSE-style feed uses different names for some fields. Both spellings are
/// kept as separate fields, since a row may carry both; [`crate::normalize`]
/// prefers the BSE name and falls back to the alternate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnnouncement {
    #[serde(rename = "SLONGNAME", default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(rename = "COMPANY_NAME", default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,

    #[serde(rename = "SCRIP_CD", default, deserialize_with = "lenient_string")]
    pub scrip_code: Option<String>,
    #[serde(rename = "SYMBOL", default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,

    #[serde(rename = "NEWSSUB", default, deserialize_with = "lenient_string")]
    pub subject: Option<String>,
    #[serde(rename = "SUBJECT", default, deserialize_with = "lenient_string")]
    pub subject_alt: Option<String>,

    #[serde(rename = "HEADLINE", default, deserialize_with = "lenient_string")]
    pub headline: Option<String>,

    #[serde(rename = "MORE", default, deserialize_with = "lenient_string")]
    pub more: Option<String>,

    #[serde(rename = "CATEGORYNAME", default, deserialize_with = "lenient_string")]
    pub category: Option<String>,

    #[serde(rename = "NEWS_DT", default, deserialize_with = "lenient_string")]
    pub news_dt: Option<String>,
    #[serde(rename = "DATE", default, deserialize_with = "lenient_string")]
    pub date: Option<String>,

    #[serde(rename = "DT_TM", default, deserialize_with = "lenient_string")]
    pub dt_tm: Option<String>,

    #[serde(rename = "ATTACHMENTNAME", default, deserialize_with = "lenient_string")]
    pub attachment: Option<String>,
    #[serde(rename = "ATTACHMENT", default, deserialize_with = "lenient_string")]
    pub attachment_alt: Option<String>,
}

/// Accepts a string, number, or bool; anything else (null, arrays, objects)
/// becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
