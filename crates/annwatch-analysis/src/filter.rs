//! Record filters and within-run duplicate suppression.
//!
//! Runs before scoring: duplicates are collapsed first, then the company and
//! scrip filters apply, then the optional `max_announcements` cap.

use std::collections::HashSet;

use annwatch_core::{AnnouncementRecord, FilterConfig};
use chrono::{NaiveDate, NaiveTime};

/// Subject prefix length used in the duplicate key.
const DEDUP_SUBJECT_CHARS: usize = 50;

/// How many records each stage removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub duplicates: usize,
    pub excluded: usize,
    pub untracked: usize,
    pub truncated: usize,
}

impl FilterStats {
    #[must_use]
    pub fn removed(&self) -> usize {
        self.duplicates + self.excluded + self.untracked + self.truncated
    }
}

/// Apply dedup, filters, and the record cap, keeping input order.
#[must_use]
pub fn filter_records(
    records: Vec<AnnouncementRecord>,
    filters: &FilterConfig,
) -> (Vec<AnnouncementRecord>, FilterStats) {
    let mut stats = FilterStats::default();
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(records.len());

    for record in records {
        if !seen.insert(dedup_key(&record)) {
            stats.duplicates += 1;
            continue;
        }
        match track_decision(&record, filters) {
            Decision::Keep => kept.push(record),
            Decision::Excluded => stats.excluded += 1,
            Decision::Untracked => stats.untracked += 1,
        }
    }

    if filters.max_announcements > 0 && kept.len() > filters.max_announcements {
        stats.truncated = kept.len() - filters.max_announcements;
        kept.truncate(filters.max_announcements);
    }

    if stats.removed() > 0 {
        tracing::debug!(
            duplicates = stats.duplicates,
            excluded = stats.excluded,
            untracked = stats.untracked,
            truncated = stats.truncated,
            kept = kept.len(),
            "filtered announcements"
        );
    }

    (kept, stats)
}

#[derive(Debug, PartialEq, Eq)]
enum Decision {
    Keep,
    Excluded,
    Untracked,
}

fn track_decision(record: &AnnouncementRecord, filters: &FilterConfig) -> Decision {
    let company = record.company.to_lowercase();
    let partial = |needle: &String| {
        let needle = needle.trim().to_lowercase();
        !needle.is_empty() && company.contains(&needle)
    };

    if filters.exclude_companies.iter().any(partial) {
        return Decision::Excluded;
    }
    if filters.track_scrip_codes.is_empty() && filters.track_companies.is_empty() {
        return Decision::Keep;
    }
    if filters
        .track_scrip_codes
        .iter()
        .any(|code| code.trim() == record.scrip_code)
    {
        return Decision::Keep;
    }
    if filters.track_companies.iter().any(partial) {
        return Decision::Keep;
    }
    Decision::Untracked
}

fn dedup_key(record: &AnnouncementRecord) -> (String, String, NaiveDate, NaiveTime) {
    let subject: String = record.subject.chars().take(DEDUP_SUBJECT_CHARS).collect();
    (record.scrip_code.clone(), subject, record.date, record.time)
}
