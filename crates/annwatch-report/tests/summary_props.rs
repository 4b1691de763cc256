use annwatch_core::{AnnouncementRecord, Category, Implication, ScoredAnnouncement};
use annwatch_report::SummaryStats;
use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;

const COMPANIES: &[&str] = &["Alpha Ltd", "Beta Ltd", "Gamma Ltd", "Delta Ltd"];

fn arb_scored() -> impl Strategy<Value = ScoredAnnouncement> {
    (
        proptest::sample::select(COMPANIES),
        proptest::sample::select(Category::ALL.to_vec()),
        proptest::sample::select(Implication::ALL.to_vec()),
        1u32..28,
    )
        .prop_map(|(company, category, implication, day)| ScoredAnnouncement {
            record: AnnouncementRecord {
                company: company.to_string(),
                scrip_code: "500001".to_string(),
                source_category: String::new(),
                subject: "Update".to_string(),
                body_text: String::new(),
                date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
                time: NaiveTime::MIN,
                pdf_url: String::new(),
            },
            category,
            highlights: String::new(),
            implication,
        })
}

proptest! {
    #[test]
    fn category_and_implication_counts_sum_to_total(
        items in proptest::collection::vec(arb_scored(), 0..60),
        top_n in 0usize..6,
    ) {
        let stats = SummaryStats::from_scored(&items, top_n);
        let by_category: usize = stats.counts_by_category.values().sum();
        let by_implication: usize = stats.counts_by_implication.values().sum();
        prop_assert_eq!(stats.total_count, items.len());
        prop_assert_eq!(by_category, stats.total_count);
        prop_assert_eq!(by_implication, stats.total_count);
        prop_assert_eq!(stats.counts_by_category.len(), Category::ALL.len());
        prop_assert_eq!(stats.counts_by_implication.len(), Implication::ALL.len());
    }

    #[test]
    fn summary_is_idempotent(items in proptest::collection::vec(arb_scored(), 0..60)) {
        prop_assert_eq!(
            SummaryStats::from_scored(&items, 10),
            SummaryStats::from_scored(&items, 10)
        );
    }

    #[test]
    fn top_companies_are_bounded_and_sorted(
        items in proptest::collection::vec(arb_scored(), 0..60),
        top_n in 0usize..6,
    ) {
        let stats = SummaryStats::from_scored(&items, top_n);
        prop_assert!(stats.top_companies.len() <= top_n);
        for pair in stats.top_companies.windows(2) {
            let (a_name, a_count) = &pair[0];
            let (b_name, b_count) = &pair[1];
            prop_assert!(a_count > b_count || (a_count == b_count && a_name < b_name));
        }
    }
}
