//! `run` command: fetch, filter, score, and write the report.

use std::path::{Path, PathBuf};

use annwatch_analysis::{filter_records, score_announcements, FilterStats};
use annwatch_core::{AnalysisConfig, AppConfig, Category, Implication};
use annwatch_fetcher::{AnnouncementClient, ClientOptions, FetchOutcome};
use annwatch_report::{report_file_name, write_report, ReportOptions, SummaryStats};
use anyhow::Context;
use chrono::Local;

/// Resolved arguments for one `run` invocation.
#[derive(Debug, Clone)]
pub(crate) struct RunArgs {
    pub days: u32,
    pub output_dir: PathBuf,
    pub rules: Option<PathBuf>,
    pub dry_run: bool,
}

/// Load the analysis rules, falling back to the built-in set.
///
/// # Errors
///
/// Returns an error if the rules file cannot be read, parsed, or validated.
pub(crate) fn load_rules(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    annwatch_core::load_analysis_config(path).with_context(|| match path {
        Some(p) => format!("failed to load rules file {}", p.display()),
        None => "failed to load built-in rules".to_string(),
    })
}

/// Fetch the last `args.days` days, score every announcement, print a summary,
/// and write the report unless `args.dry_run` is set.
///
/// Days that fail to fetch are logged and skipped; the report covers whatever
/// was fetched, including nothing at all.
///
/// # Errors
///
/// Returns an error if the rules cannot be loaded, the HTTP client cannot be
/// built, or the report cannot be written.
pub(crate) async fn run_announcements(config: &AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    if args.days == 0 {
        anyhow::bail!("--days must be at least 1");
    }

    let analysis = load_rules(args.rules.as_deref())?;
    let client = AnnouncementClient::new(ClientOptions::from_app_config(config))
        .context("failed to build announcements client")?;

    let today = Local::now().date_naive();
    tracing::info!(days = args.days, today = %today, "fetching announcements");
    let outcome = client.fetch_range(args.days, today).await;

    if !outcome.failed_days.is_empty() {
        tracing::warn!(
            failed = outcome.failed_days.len(),
            days = args.days,
            "some days could not be fetched and were skipped"
        );
    }

    let fetch_summary = FetchSummary::from(&outcome);
    let (records, filter_stats) = filter_records(outcome.records, &analysis.filters);
    let scored = score_announcements(records, &analysis);
    let stats = SummaryStats::from_scored(&scored, analysis.report.top_companies);

    print!("{}", format_run_summary(&stats, &fetch_summary, &filter_stats));

    if args.dry_run {
        println!("dry-run: report not written");
        return Ok(());
    }

    let path = args.output_dir.join(report_file_name(today));
    let options = ReportOptions {
        top_companies: analysis.report.top_companies,
        generated_at: Local::now().naive_local(),
    };
    let written = write_report(&path, &scored, &options)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    println!("report written: {}", written.display());

    Ok(())
}

/// Fetch-side counters shown in the run summary.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FetchSummary {
    pub fetched: usize,
    pub failed_days: usize,
    pub defaulted: usize,
}

impl From<&FetchOutcome> for FetchSummary {
    fn from(outcome: &FetchOutcome) -> Self {
        Self {
            fetched: outcome.records.len(),
            failed_days: outcome.failed_days.len(),
            defaulted: outcome.defaulted_records,
        }
    }
}

/// Plain-text summary printed after a run. Categories with no announcements
/// are omitted; implications are always listed.
pub(crate) fn format_run_summary(
    stats: &SummaryStats,
    fetch: &FetchSummary,
    filters: &FilterStats,
) -> String {
    let mut lines = vec![format!(
        "fetched {} announcements ({} days failed, {} with defaulted fields)",
        fetch.fetched, fetch.failed_days, fetch.defaulted
    )];
    if filters.removed() > 0 {
        lines.push(format!(
            "filtered out {} ({} duplicates, {} excluded, {} untracked, {} over limit)",
            filters.removed(),
            filters.duplicates,
            filters.excluded,
            filters.untracked,
            filters.truncated
        ));
    }
    lines.push(format!("total: {}", stats.total_count));

    lines.push(format!("{:<25}COUNT", "CATEGORY"));
    lines.extend(Category::ALL.into_iter().filter_map(|category| {
        let n = stats.category_count(category);
        (n > 0).then(|| format!("{:<25}{n}", category.label()))
    }));

    lines.push(format!("{:<25}COUNT", "IMPLICATION"));
    lines.extend(Implication::ALL.into_iter().map(|implication| {
        format!(
            "{:<25}{}",
            implication.label(),
            stats.implication_count(implication)
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
