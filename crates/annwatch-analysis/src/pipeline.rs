//! Scoring pipeline: categorize, extract highlights, assess implication.

use annwatch_core::{AnalysisConfig, AnnouncementRecord, ScoredAnnouncement};

use crate::categorize::categorize;
use crate::highlights::extract_highlights;
use crate::scorer::assess_implication;

/// Score one record.
///
/// 1. Categorize from the subject (falling back to the exchange category).
/// 2. Extract highlights from the body text.
/// 3. Assess the implication from subject plus highlights and the category bias.
#[must_use]
pub fn score_announcement(
    record: AnnouncementRecord,
    config: &AnalysisConfig,
) -> ScoredAnnouncement {
    let category = categorize(
        &record.subject,
        &record.source_category,
        &config.category_rules,
    );
    let highlights = extract_highlights(&record.body_text, &config.highlights);
    let implication = assess_implication(&record.subject, &highlights, category, &config.scoring);

    ScoredAnnouncement {
        record,
        category,
        highlights,
        implication,
    }
}

/// Score every record, preserving input order.
///
/// Empty input yields an empty vector.
#[must_use]
pub fn score_announcements(
    records: Vec<AnnouncementRecord>,
    config: &AnalysisConfig,
) -> Vec<ScoredAnnouncement> {
    let scored: Vec<ScoredAnnouncement> = records
        .into_iter()
        .map(|record| score_announcement(record, config))
        .collect();
    tracing::debug!(count = scored.len(), "scored announcements");
    scored
}
