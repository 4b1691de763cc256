//! Tunable analysis rules: category rules, keyword sets, thresholds, and
//! report/filter settings.
//!
//! Every section is optional in the YAML rules file; missing sections fall
//! back to the built-in tables below. Keywords are lowercased on load so the
//! matchers can compare against lowercased text.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::Category;
use crate::ConfigError;

/// Full set of tunable analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Ordered category rules; the first rule with a matching keyword wins.
    pub category_rules: Vec<CategoryRule>,
    pub scoring: ScoringConfig,
    pub highlights: HighlightConfig,
    pub report: ReportSettings,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    pub thresholds: Thresholds,
    /// Extra positive weight added for announcements of a given category.
    pub category_bias: Vec<CategoryBias>,
}

/// `net > positive_above` is Positive, `net < cautious_below` is Cautious.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub positive_above: i32,
    pub cautious_below: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBias {
    pub category: Category,
    pub bonus: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    pub max_matches: usize,
    pub max_chars: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub top_companies: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Scrip codes to keep. Empty keeps everything not excluded.
    pub track_scrip_codes: Vec<String>,
    /// Partial, case-insensitive company names to keep.
    pub track_companies: Vec<String>,
    /// Partial, case-insensitive company names to drop.
    pub exclude_companies: Vec<String>,
    /// Upper bound on records kept per run; `0` means unlimited.
    pub max_announcements: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            category_rules: default_category_rules(),
            scoring: ScoringConfig::default(),
            highlights: HighlightConfig::default(),
            report: ReportSettings::default(),
            filters: FilterConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_keywords: owned(DEFAULT_POSITIVE_KEYWORDS),
            negative_keywords: owned(DEFAULT_NEGATIVE_KEYWORDS),
            thresholds: Thresholds::default(),
            category_bias: vec![
                CategoryBias {
                    category: Category::Dividend,
                    bonus: 2,
                },
                CategoryBias {
                    category: Category::OrderWin,
                    bonus: 2,
                },
                CategoryBias {
                    category: Category::Expansion,
                    bonus: 2,
                },
                CategoryBias {
                    category: Category::FundRaising,
                    bonus: 1,
                },
            ],
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_matches: 4,
            max_chars: 200,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { top_companies: 10 }
    }
}

impl ScoringConfig {
    /// Bonus configured for `category`, or `0`.
    #[must_use]
    pub fn bias_for(&self, category: Category) -> i32 {
        self.category_bias
            .iter()
            .filter(|b| b.category == category)
            .map(|b| b.bonus)
            .sum()
    }
}

const DEFAULT_POSITIVE_KEYWORDS: &[&str] = &[
    "profit increase",
    "profit up",
    "revenue growth",
    "dividend",
    "bonus",
    "acquisition",
    "expansion",
    "new order",
    "contract win",
    "upgrade",
    "record",
    "highest ever",
    "beat estimates",
    "outperform",
    "growth",
    "investment",
    "capex",
    "new plant",
    "capacity addition",
    "margin improvement",
    "cost reduction",
    "positive outlook",
    "strong demand",
    "market share gain",
    "debt reduction",
    "new product launch",
    "partnership",
    "strategic alliance",
    "buyback",
];

const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "profit decline",
    "profit down",
    "revenue decline",
    "loss",
    "downgrade",
    "resign",
    "exit",
    "closure",
    "default",
    "penalty",
    "fraud",
    "miss estimates",
    "underperform",
    "weak",
    "challenging",
    "headwinds",
    "margin pressure",
    "cost increase",
    "debt increase",
    "impairment",
    "write-off",
    "negative outlook",
    "demand weakness",
    "market share loss",
    "legal issues",
    "regulatory action",
    "winding up",
    "insolvency",
    "liquidation",
];

fn default_category_rules() -> Vec<CategoryRule> {
    let rule = |category: Category, keywords: &[&str]| CategoryRule {
        category,
        keywords: owned(keywords),
    };

    vec![
        rule(Category::BoardMeeting, &["board meeting", "meeting of board"]),
        rule(
            Category::FinancialResults,
            &[
                "financial result",
                "quarterly result",
                "annual result",
                "q1",
                "q2",
                "q3",
                "q4",
            ],
        ),
        rule(
            Category::Dividend,
            &["dividend", "interim dividend", "final dividend"],
        ),
        rule(
            Category::AgmEgm,
            &["agm", "egm", "annual general", "extraordinary general"],
        ),
        rule(Category::Acquisition, &["acquisition", "acquire", "takeover"]),
        rule(Category::Investment, &["investment", "invest", "stake"]),
        rule(
            Category::FundRaising,
            &[
                "fund raising",
                "qip",
                "preferential",
                "rights issue",
                "fpo",
                "ipo",
            ],
        ),
        rule(
            Category::MergerDemerger,
            &["merger", "demerger", "amalgamation", "scheme of arrangement"],
        ),
        rule(
            Category::ChangeInDirectors,
            &["director", "appointment", "resignation", "cessation"],
        ),
        rule(
            Category::CorporateAction,
            &["bonus", "split", "buyback", "corporate action"],
        ),
        rule(
            Category::InvestorPresentation,
            &["investor presentation", "analyst meet", "investor meet"],
        ),
        rule(
            Category::ConcallTranscript,
            &["concall", "conference call", "earnings call", "transcript"],
        ),
        rule(Category::OrderWin, &["order", "contract", "award", "mandate"]),
        rule(
            Category::Expansion,
            &["expansion", "capacity", "capex", "new plant", "new facility"],
        ),
        rule(
            Category::Rating,
            &["rating", "credit rating", "upgrade", "downgrade"],
        ),
    ]
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// Load analysis rules from `path`, or return the built-in rules when `None`.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_analysis_config(path: Option<&Path>) -> Result<AnalysisConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_analysis_config(&content)
}

/// Parse, normalize, and validate a YAML rules document.
///
/// # Errors
///
/// Returns `ConfigError::RulesFileParse` on malformed YAML or unknown keys and
/// `ConfigError::Validation` when the rules are inconsistent.
pub fn parse_analysis_config(yaml: &str) -> Result<AnalysisConfig, ConfigError> {
    // An empty document means "all defaults".
    let mut config: AnalysisConfig = if yaml.trim().is_empty() {
        AnalysisConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    normalize_keywords(&mut config);
    validate_analysis_config(&config)?;
    Ok(config)
}

fn normalize_keywords(config: &mut AnalysisConfig) {
    let lower = |words: &mut Vec<String>| {
        for word in words.iter_mut() {
            *word = word.trim().to_lowercase();
        }
    };

    for rule in &mut config.category_rules {
        lower(&mut rule.keywords);
    }
    lower(&mut config.scoring.positive_keywords);
    lower(&mut config.scoring.negative_keywords);
}

fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    let thresholds = config.scoring.thresholds;
    if thresholds.cautious_below > thresholds.positive_above {
        return Err(ConfigError::Validation(format!(
            "cautious_below ({}) must not exceed positive_above ({})",
            thresholds.cautious_below, thresholds.positive_above
        )));
    }

    for rule in &config.category_rules {
        if rule.category == Category::Other {
            return Err(ConfigError::Validation(
                "'Other' is the fallback category and cannot have a rule".to_string(),
            ));
        }
        if rule.keywords.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(format!(
                "rule for '{}' contains an empty keyword",
                rule.category
            )));
        }
    }

    for (name, words) in [
        ("positive_keywords", &config.scoring.positive_keywords),
        ("negative_keywords", &config.scoring.negative_keywords),
    ] {
        if words.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(format!(
                "{name} contains an empty keyword"
            )));
        }
    }

    let positive: HashSet<&str> = config
        .scoring
        .positive_keywords
        .iter()
        .map(String::as_str)
        .collect();
    if let Some(both) = config
        .scoring
        .negative_keywords
        .iter()
        .find(|w| positive.contains(w.as_str()))
    {
        return Err(ConfigError::Validation(format!(
            "keyword '{both}' is listed as both positive and negative"
        )));
    }

    if config.highlights.max_matches == 0 || config.highlights.max_chars == 0 {
        return Err(ConfigError::Validation(
            "highlights.max_matches and highlights.max_chars must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = parse_analysis_config("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(validate_analysis_config(&AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn default_rules_start_with_board_meeting() {
        let config = AnalysisConfig::default();
        assert_eq!(config.category_rules[0].category, Category::BoardMeeting);
        assert_eq!(config.category_rules.len(), Category::ALL.len() - 1);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let yaml = r"
scoring:
  thresholds:
    positive_above: 2
    cautious_below: -2
";
        let config = parse_analysis_config(yaml).unwrap();
        assert_eq!(config.scoring.thresholds.positive_above, 2);
        assert_eq!(config.scoring.thresholds.cautious_below, -2);
        assert_eq!(
            config.scoring.positive_keywords,
            ScoringConfig::default().positive_keywords
        );
        assert_eq!(config.category_rules, default_category_rules());
        assert_eq!(config.report.top_companies, 10);
    }

    #[test]
    fn keywords_are_lowercased_and_trimmed() {
        let yaml = r"
category_rules:
  - category: Dividend
    keywords: ['  Interim DIVIDEND ']
scoring:
  positive_keywords: ['Record Date']
  negative_keywords: ['PENALTY']
";
        let config = parse_analysis_config(yaml).unwrap();
        assert_eq!(config.category_rules[0].keywords, vec!["interim dividend"]);
        assert_eq!(config.scoring.positive_keywords, vec!["record date"]);
        assert_eq!(config.scoring.negative_keywords, vec!["penalty"]);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let yaml = r"
scoring:
  thresholds:
    positive_above: -1
    cautious_below: 1
";
        let result = parse_analysis_config(yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("cautious_below")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn rule_for_other_is_rejected() {
        let yaml = r"
category_rules:
  - category: Other
    keywords: [misc]
";
        assert!(matches!(
            parse_analysis_config(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let yaml = r"
scoring:
  negative_keywords: ['loss', '   ']
";
        assert!(matches!(
            parse_analysis_config(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn keyword_in_both_sets_is_rejected() {
        let yaml = r"
scoring:
  positive_keywords: [growth]
  negative_keywords: [Growth]
";
        let result = parse_analysis_config(yaml);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("growth")),
            "expected Validation error, got: {result:?}"
        );
    }

    #[test]
    fn unknown_category_label_fails_to_parse() {
        let yaml = r"
category_rules:
  - category: Gossip
    keywords: [rumour]
";
        assert!(matches!(
            parse_analysis_config(yaml),
            Err(ConfigError::RulesFileParse(_))
        ));
    }

    #[test]
    fn unknown_section_fails_to_parse() {
        assert!(matches!(
            parse_analysis_config("scorring: {}"),
            Err(ConfigError::RulesFileParse(_))
        ));
    }

    #[test]
    fn zero_highlight_matches_is_rejected() {
        let yaml = r"
highlights:
  max_matches: 0
";
        assert!(matches!(
            parse_analysis_config(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn bias_for_sums_matching_entries() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.bias_for(Category::Dividend), 2);
        assert_eq!(scoring.bias_for(Category::FundRaising), 1);
        assert_eq!(scoring.bias_for(Category::Other), 0);
    }

    #[test]
    fn defaults_round_trip_through_yaml() {
        let yaml = serde_yaml::to_string(&AnalysisConfig::default()).unwrap();
        let parsed = parse_analysis_config(&yaml).unwrap();
        assert_eq!(parsed, AnalysisConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let result = load_analysis_config(Some(Path::new("/nonexistent/annwatch/rules.yaml")));
        assert!(
            matches!(result, Err(ConfigError::RulesFileIo { ref path, .. }) if path.contains("rules.yaml")),
            "expected RulesFileIo, got: {result:?}"
        );
    }

    #[test]
    fn no_path_returns_defaults() {
        assert_eq!(
            load_analysis_config(None).unwrap(),
            AnalysisConfig::default()
        );
    }
}
