//! Aggregate counts for the summary sheet.

use std::collections::{BTreeMap, HashMap};

use annwatch_core::{Category, Implication, ScoredAnnouncement};
use chrono::NaiveDate;

/// Counts derived from one run's scored announcements.
///
/// Every [`Category`] and [`Implication`] has an entry, zero when absent, so
/// `counts_by_category` and `counts_by_implication` each sum to `total_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryStats {
    pub total_count: usize,
    /// Keyed in display order (`Category` orders by declaration).
    pub counts_by_category: BTreeMap<Category, usize>,
    pub counts_by_implication: BTreeMap<Implication, usize>,
    /// Highest counts first; equal counts ordered by company name.
    pub top_companies: Vec<(String, usize)>,
    /// Earliest and latest announcement dates, `None` for an empty run.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SummaryStats {
    /// Build the summary for `scored`, keeping at most `top_n` companies.
    #[must_use]
    pub fn from_scored(scored: &[ScoredAnnouncement], top_n: usize) -> Self {
        let mut counts_by_category: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|c| (*c, 0)).collect();
        let mut counts_by_implication: BTreeMap<Implication, usize> =
            Implication::ALL.iter().map(|i| (*i, 0)).collect();
        let mut per_company: HashMap<&str, usize> = HashMap::new();
        let mut date_range: Option<(NaiveDate, NaiveDate)> = None;

        for item in scored {
            *counts_by_category.entry(item.category).or_default() += 1;
            *counts_by_implication.entry(item.implication).or_default() += 1;
            *per_company.entry(item.record.company.as_str()).or_default() += 1;

            let day = item.record.date;
            date_range = Some(match date_range {
                Some((first, last)) => (first.min(day), last.max(day)),
                None => (day, day),
            });
        }

        let mut top_companies: Vec<(String, usize)> = per_company
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        top_companies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_companies.truncate(top_n);

        Self {
            total_count: scored.len(),
            counts_by_category,
            counts_by_implication,
            top_companies,
            date_range,
        }
    }

    #[must_use]
    pub fn category_count(&self, category: Category) -> usize {
        self.counts_by_category.get(&category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn implication_count(&self, implication: Implication) -> usize {
        self.counts_by_implication
            .get(&implication)
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use annwatch_core::AnnouncementRecord;
    use chrono::NaiveTime;

    use super::*;

    fn scored(company: &str, day: u32, category: Category, implication: Implication) -> ScoredAnnouncement {
        ScoredAnnouncement {
            record: AnnouncementRecord {
                company: company.to_string(),
                scrip_code: "500001".to_string(),
                source_category: String::new(),
                subject: "Update".to_string(),
                body_text: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                time: NaiveTime::MIN,
                pdf_url: String::new(),
            },
            category,
            highlights: String::new(),
            implication,
        }
    }

    #[test]
    fn empty_input_has_all_zero_counts() {
        let stats = SummaryStats::from_scored(&[], 10);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.counts_by_category.len(), Category::ALL.len());
        assert!(stats.counts_by_category.values().all(|&n| n == 0));
        assert_eq!(stats.counts_by_implication.len(), 3);
        assert!(stats.counts_by_implication.values().all(|&n| n == 0));
        assert!(stats.top_companies.is_empty());
        assert_eq!(stats.date_range, None);
    }

    #[test]
    fn counts_by_category_and_implication() {
        let items = vec![
            scored("Alpha", 15, Category::Dividend, Implication::Positive),
            scored("Beta", 16, Category::Dividend, Implication::Neutral),
            scored("Gamma", 14, Category::Other, Implication::Cautious),
        ];
        let stats = SummaryStats::from_scored(&items, 10);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.category_count(Category::Dividend), 2);
        assert_eq!(stats.category_count(Category::Other), 1);
        assert_eq!(stats.category_count(Category::Rating), 0);
        assert_eq!(stats.implication_count(Implication::Positive), 1);
        assert_eq!(stats.implication_count(Implication::Cautious), 1);
        assert_eq!(
            stats.date_range,
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
            ))
        );
    }

    #[test]
    fn top_companies_sorted_by_count_then_name() {
        let items = vec![
            scored("Zeta", 15, Category::Other, Implication::Neutral),
            scored("Beta", 15, Category::Other, Implication::Neutral),
            scored("Zeta", 15, Category::Other, Implication::Neutral),
            scored("Alpha", 15, Category::Other, Implication::Neutral),
        ];
        let stats = SummaryStats::from_scored(&items, 2);
        assert_eq!(
            stats.top_companies,
            vec![("Zeta".to_string(), 2), ("Alpha".to_string(), 1)]
        );
    }

    #[test]
    fn categories_iterate_in_display_order() {
        let stats = SummaryStats::from_scored(&[], 10);
        let keys: Vec<Category> = stats.counts_by_category.keys().copied().collect();
        assert_eq!(keys, Category::ALL.to_vec());
    }

    #[test]
    fn from_scored_is_deterministic() {
        let items = vec![
            scored("Alpha", 15, Category::Dividend, Implication::Positive),
            scored("Beta", 16, Category::Rating, Implication::Cautious),
        ];
        assert_eq!(
            SummaryStats::from_scored(&items, 10),
            SummaryStats::from_scored(&items, 10)
        );
    }
}
