mod classify;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "annwatch")]
#[command(about = "Corporate announcements tracker: fetch, classify, and report")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch recent announcements, score them, and write the spreadsheet report
    Run {
        /// Number of calendar days to fetch, counting back from today
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Directory the report is written to
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// YAML rules file overriding the built-in analysis rules
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Fetch and score, print the summary, but do not write the report
        #[arg(long)]
        dry_run: bool,
    },
    /// Score a single announcement offline and print the result
    Classify {
        /// Announcement subject line
        subject: String,

        /// Announcement body text, used for highlights
        #[arg(long, default_value = "")]
        body: String,

        /// Exchange-supplied category text, used when the subject matches no rule
        #[arg(long, default_value = "")]
        source_category: String,

        /// YAML rules file overriding the built-in analysis rules
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Print the effective analysis rules as YAML
    Rules {
        /// YAML rules file overriding the built-in analysis rules
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = annwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Run {
            days,
            output_dir,
            rules,
            dry_run,
        } => {
            let args = run::RunArgs {
                days: days.unwrap_or(config.days_back),
                output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
                rules: rules.or_else(|| config.rules_path.clone()),
                dry_run,
            };
            run::run_announcements(&config, &args).await?;
        }
        Commands::Classify {
            subject,
            body,
            source_category,
            rules,
        } => {
            let analysis = run::load_rules(rules.or_else(|| config.rules_path.clone()).as_deref())?;
            print!(
                "{}",
                classify::format_classification(&subject, &body, &source_category, &analysis)
            );
        }
        Commands::Rules { rules } => {
            let analysis = run::load_rules(rules.or_else(|| config.rules_path.clone()).as_deref())?;
            print!("{}", classify::render_rules(&analysis)?);
        }
    }

    Ok(())
}
