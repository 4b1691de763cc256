//! Keyword-count implication scorer.
//!
//! Counts case-insensitive, non-overlapping occurrences of the configured
//! positive and negative keywords, adds the per-category bias, and maps the
//! net score onto [`Implication`] with the configured thresholds.

use annwatch_core::{Category, Implication, ScoringConfig, Thresholds};

/// Raw keyword hit counts for one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordTally {
    pub positive: usize,
    pub negative: usize,
}

impl KeywordTally {
    /// `positive - negative`, saturating at the `i64` bounds.
    #[must_use]
    pub fn net(self) -> i64 {
        to_i64(self.positive).saturating_sub(to_i64(self.negative))
    }
}

/// Full breakdown of one implication decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub tally: KeywordTally,
    pub bias: i32,
    pub net: i64,
    pub implication: Implication,
}

/// Count positive and negative keyword occurrences in `text`.
#[must_use]
pub fn score_text(text: &str, config: &ScoringConfig) -> KeywordTally {
    let lower = text.to_lowercase();
    KeywordTally {
        positive: count_occurrences(&lower, &config.positive_keywords),
        negative: count_occurrences(&lower, &config.negative_keywords),
    }
}

/// Map a net score onto an [`Implication`].
///
/// `net > positive_above` is Positive, `net < cautious_below` is Cautious,
/// anything in between is Neutral.
#[must_use]
pub fn classify(net: i64, thresholds: &Thresholds) -> Implication {
    if net > i64::from(thresholds.positive_above) {
        Implication::Positive
    } else if net < i64::from(thresholds.cautious_below) {
        Implication::Cautious
    } else {
        Implication::Neutral
    }
}

/// Score `subject + " " + highlights`, add the category bias, and classify.
#[must_use]
pub fn assess(
    subject: &str,
    highlights: &str,
    category: Category,
    config: &ScoringConfig,
) -> Assessment {
    let tally = score_text(&format!("{subject} {highlights}"), config);
    let bias = config.bias_for(category);
    let net = tally.net().saturating_add(i64::from(bias));
    Assessment {
        tally,
        bias,
        net,
        implication: classify(net, &config.thresholds),
    }
}

/// Shorthand for [`assess`] when only the rating is needed.
#[must_use]
pub fn assess_implication(
    subject: &str,
    highlights: &str,
    category: Category,
    config: &ScoringConfig,
) -> Implication {
    assess(subject, highlights, category, config).implication
}

fn count_occurrences(lower_text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .filter(|kw| !kw.is_empty())
        .map(|kw| lower_text.matches(kw.as_str()).count())
        .sum()
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
