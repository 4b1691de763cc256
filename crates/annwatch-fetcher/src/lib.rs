//! Fetcher for exchange corporate announcements.
//!
//! Pulls the BSE `AnnGetData` feed one day and one page at a time, retries
//! transient failures with back-off, and normalizes raw rows into
//! [`annwatch_core::AnnouncementRecord`] values. Rows with missing fields are
//! kept with safe defaults rather than dropped.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod rate_limit;

pub use client::{AnnouncementClient, ClientOptions, FetchOutcome};
pub use error::FetchError;
pub use normalize::{normalize_announcement, MissingField, Normalized};
pub use types::{AnnouncementPage, RawAnnouncement};
