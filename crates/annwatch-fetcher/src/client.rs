//! HTTP client for the BSE `AnnGetData` announcements endpoint.
//!
//! Requests are issued strictly one after another: each day in the range, and
//! each page within a day, with a fixed delay in between. A day that still
//! fails after retries is logged and skipped so one bad response never drops
//! the rest of the run.

use std::time::Duration;

use annwatch_core::{AnnouncementRecord, AppConfig};
use chrono::{Days, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::normalize::normalize_announcement;
use crate::rate_limit::retry_with_backoff;
use crate::types::{AnnouncementPage, RawAnnouncement};

const EXCHANGE_ORIGIN: &str = "https://www.bseindia.com";

/// Connection and pacing settings for [`AnnouncementClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub pdf_base_url: String,
    pub warmup_url: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
    pub max_pages: u32,
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            pdf_base_url: config.pdf_base_url.clone(),
            warmup_url: config.warmup_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            request_delay_ms: config.request_delay_ms,
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            max_pages: config.max_pages,
        }
    }
}

/// Everything one fetch run produced.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Normalized records in fetch order: newest day first, feed order within a day.
    pub records: Vec<AnnouncementRecord>,
    /// Days that failed after all retries and were skipped.
    pub failed_days: Vec<NaiveDate>,
    /// Records that needed at least one defaulted field.
    pub defaulted_records: usize,
}

/// Client for the exchange announcements API.
///
/// Uses a cookie store so the optional warm-up request can pick up the
/// session cookies the API expects.
pub struct AnnouncementClient {
    client: Client,
    api_url: Url,
    pdf_base_url: String,
    warmup_url: Option<String>,
    request_delay: Duration,
    max_retries: u32,
    backoff_base_secs: u64,
    max_pages: u32,
}

impl AnnouncementClient {
    /// Creates a client with the configured timeout, headers, and retry policy.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if `api_url` does not parse.
    /// - [`FetchError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self, FetchError> {
        let api_url = Url::parse(&options.api_url).map_err(|e| FetchError::InvalidUrl {
            url: options.api_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.bseindia.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static(EXCHANGE_ORIGIN));

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(options.user_agent)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            api_url,
            pdf_base_url: options.pdf_base_url,
            warmup_url: options.warmup_url,
            request_delay: Duration::from_millis(options.request_delay_ms),
            max_retries: options.max_retries,
            backoff_base_secs: options.backoff_base_secs,
            max_pages: options.max_pages.max(1),
        })
    }

    /// Fetches `days_back` calendar days ending at `today`, newest first.
    ///
    /// Never fails as a whole: failing days are recorded in
    /// [`FetchOutcome::failed_days`].
    pub async fn fetch_range(&self, days_back: u32, today: NaiveDate) -> FetchOutcome {
        self.warm_up().await;

        let mut outcome = FetchOutcome::default();
        let days: Vec<NaiveDate> = (0..days_back)
            .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
            .collect();

        for (idx, day) in days.iter().copied().enumerate() {
            if idx > 0 {
                self.pause().await;
            }

            match self.fetch_day(day).await {
                Ok(rows) => {
                    tracing::info!(
                        day = %day.format("%d-%b-%Y"),
                        rows = rows.len(),
                        "fetched announcements"
                    );
                    for raw in rows {
                        let normalized = normalize_announcement(raw, day, &self.pdf_base_url);
                        if !normalized.defaulted.is_empty() {
                            let fields: Vec<String> = normalized
                                .defaulted
                                .iter()
                                .map(ToString::to_string)
                                .collect();
                            tracing::warn!(
                                day = %day,
                                scrip = %normalized.record.scrip_code,
                                fields = %fields.join(","),
                                "malformed announcement, substituted defaults"
                            );
                            outcome.defaulted_records += 1;
                        }
                        outcome.records.push(normalized.record);
                    }
                }
                Err(e) => {
                    tracing::error!(day = %day, error = %e, "failed to fetch announcements, skipping day");
                    outcome.failed_days.push(day);
                }
            }
        }

        outcome
    }

    /// Fetches every page for a single day.
    ///
    /// Stops when the server's reported row count is reached, a page comes
    /// back empty, the row count is missing, or `max_pages` is hit.
    ///
    /// # Errors
    ///
    /// Returns the first page error after retries are exhausted; rows from
    /// earlier pages of the same day are discarded.
    pub async fn fetch_day(&self, day: NaiveDate) -> Result<Vec<RawAnnouncement>, FetchError> {
        let mut rows = Vec::new();
        let mut seen = 0u64;
        let mut page_no = 1u32;

        loop {
            let page = self.fetch_page(day, page_no).await?;
            let page_len = page.table.len();
            let total = page.row_count();
            seen = seen.saturating_add(u64::try_from(page_len).unwrap_or(u64::MAX));

            for value in page.table {
                match serde_json::from_value::<RawAnnouncement>(value) {
                    Ok(raw) => rows.push(raw),
                    Err(e) => {
                        tracing::warn!(day = %day, page = page_no, error = %e, "skipping unreadable row");
                    }
                }
            }

            let more_available = total.is_some_and(|total| seen < total);
            if page_len == 0 || !more_available {
                break;
            }
            if page_no >= self.max_pages {
                tracing::warn!(
                    day = %day,
                    max_pages = self.max_pages,
                    "page limit reached before all rows were fetched"
                );
                break;
            }

            page_no += 1;
            self.pause().await;
        }

        Ok(rows)
    }

    /// Fetches one page of announcements with automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`FetchError::RateLimited`]: HTTP 429 after all retries.
    /// - [`FetchError::UnexpectedStatus`]: any other non-2xx status (5xx retried).
    /// - [`FetchError::Http`]: network failure after all retries.
    /// - [`FetchError::Deserialize`]: body is not the expected JSON (not retried).
    async fn fetch_page(
        &self,
        day: NaiveDate,
        page_no: u32,
    ) -> Result<AnnouncementPage, FetchError> {
        let url = self.page_url(day, page_no);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(FetchError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<AnnouncementPage>(&body).map_err(|e| {
                    FetchError::Deserialize {
                        context: format!("announcements for {day} page {page_no}"),
                        source: e,
                    }
                })
            }
        })
        .await
    }

    /// Builds the query URL for one day and page.
    fn page_url(&self, day: NaiveDate, page_no: u32) -> Url {
        let date = day.format("%Y%m%d").to_string();
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("pageno", &page_no.to_string())
            .append_pair("strCat", "-1")
            .append_pair("strPrevDate", &date)
            .append_pair("strScrip", "")
            .append_pair("strSearch", "P")
            .append_pair("strToDate", &date)
            .append_pair("strType", "C");
        url
    }

    /// Best-effort request that primes the cookie store. Failures are logged only.
    async fn warm_up(&self) {
        let Some(warmup_url) = &self.warmup_url else {
            return;
        };
        match self.client.get(warmup_url).send().await {
            Ok(resp) => {
                tracing::debug!(status = resp.status().as_u16(), "warm-up request complete");
            }
            Err(e) => {
                tracing::warn!(url = %warmup_url, error = %e, "warm-up request failed, continuing");
            }
        }
        self.pause().await;
    }

    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
