//! Offline `classify` and `rules` commands.

use annwatch_analysis::{assess, categorize, extract_highlights};
use annwatch_core::AnalysisConfig;

/// Score one announcement and render the result as aligned `key: value` lines.
pub(crate) fn format_classification(
    subject: &str,
    body: &str,
    source_category: &str,
    analysis: &AnalysisConfig,
) -> String {
    let category = categorize(subject, source_category, &analysis.category_rules);
    let highlights = extract_highlights(body, &analysis.highlights);
    let assessment = assess(subject, &highlights, category, &analysis.scoring);

    let shown = if highlights.is_empty() {
        "-"
    } else {
        highlights.as_str()
    };

    format!(
        "category:    {category}\n\
         highlights:  {shown}\n\
         keywords:    +{} / -{} (bias {:+})\n\
         net score:   {}\n\
         implication: {}\n",
        assessment.tally.positive,
        assessment.tally.negative,
        assessment.bias,
        assessment.net,
        assessment.implication
    )
}

/// Serialize the effective rules back to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_rules(analysis: &AnalysisConfig) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(analysis)?)
}
