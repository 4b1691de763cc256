//! Numeric highlight extraction from announcement bodies.

use std::sync::LazyLock;

use annwatch_core::HighlightConfig;
use regex::Regex;

/// Separator placed between highlight snippets.
pub const SEPARATOR: &str = " | ";

/// One alternation, tried left to right at each position:
/// 1. a financial term followed by an amount (`net profit of Rs 120 crore`),
/// 2. a currency-prefixed amount (`Rs. 1,250.50 lakh`, `₹40`, `USD 3 million`),
/// 3. a percentage (`25%`, `12.5 %`).
///
/// Every branch needs an ASCII digit, so digit-free text never matches.
static HIGHLIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:net\s+profit|revenue|profit|ebitda|pat|income|sales|dividend)
            \s*(?:of\b|at\b|:)?\s*
            (?:(?:\brs\.?|\binr\b|₹|\$|\busd\b)\s*)?
            [0-9](?:[0-9,]*[0-9])?(?:\.[0-9]+)?
            (?:\s*%|\s*(?:crore|cr|lakh|million|billion|per\s+share)\b)?
        |
        (?:\brs\.?|\binr\b|₹|\$|\busd\b)\s*
            [0-9](?:[0-9,]*[0-9])?(?:\.[0-9]+)?
            (?:\s*(?:crore|cr|lakh|million|billion|per\s+share)\b)?
        |
        [0-9]+(?:\.[0-9]+)?\s*%
        ",
    )
    .expect("valid highlight regex")
});

/// Extract numeric and financial snippets from `body_text`.
///
/// Returns at most `config.max_matches` distinct snippets in order of
/// appearance joined with `" | "`, cut to `config.max_chars` characters.
/// Returns an empty string when nothing matches.
#[must_use]
pub fn extract_highlights(body_text: &str, config: &HighlightConfig) -> String {
    if body_text.is_empty() || config.max_matches == 0 || config.max_chars == 0 {
        return String::new();
    }

    let mut snippets: Vec<&str> = Vec::new();
    for m in HIGHLIGHT_RE.find_iter(body_text) {
        let snippet = m.as_str().trim();
        if snippet.is_empty() || snippets.contains(&snippet) {
            continue;
        }
        snippets.push(snippet);
        if snippets.len() >= config.max_matches {
            break;
        }
    }

    truncate_chars(&snippets.join(SEPARATOR), config.max_chars)
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}
