//! atomitter - Post new feed items to your timeline

use std::path::PathBuf;

use clap::Parser;
use libatomitter::logging::{self, LogFormat};
use libatomitter::{Config, Result, SyncReport, SyncService};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "atomitter")]
#[command(version)]
#[command(about = "Post new RSS/Atom feed items to your timeline", long_about = "\
atomitter - Post new RSS/Atom feed items to your timeline

DESCRIPTION:
    Fetches your feed and your recent posts, renders every feed item with
    the configured template and posts the items whose text is not on the
    timeline yet, in feed order. Any error stops the run.

CONFIGURATION:
    Configuration file: ~/.config/atomitter/config.toml
    (override with --config or ATOMITTER_CONFIG;
    created with placeholder values on first run)

    consumer_key, consumer_secret, token, token_secret
    feed_url = \"https://example.com/feed.atom\"
    username = \"USERNAME\"
    format   = 'Read my post \"{{ .Title }}\": {{ .Link }}'

EXIT CODES:
    0 - Success
    1 - Runtime error (feed, timeline, posting or configuration)
    2 - Authentication failed
    3 - Invalid post template
")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show what would be posted without posting
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Log output format (text, json or pretty)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logging_config = logging::from_env(cli.verbose);
    if let Some(format) = cli.log_format {
        logging_config.format = format;
    }
    logging_config.init();

    match run(&cli).await {
        Ok(report) => {
            if cli.format == "json" {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                print_report(&report);
            }
        }
        Err(e) => {
            error!(error = %e, "Run aborted");
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &Cli) -> Result<SyncReport> {
    let config = match &cli.config {
        Some(path) => Config::bootstrap(path)?,
        None => Config::load()?,
    };

    let service = SyncService::from_config(config)?;
    service.run(cli.dry_run).await
}

fn print_report(report: &SyncReport) {
    if report.dry_run {
        for text in &report.pending {
            println!("{}", text);
        }
        println!(
            "Would post {} of {} feed item(s)",
            report.pending.len(),
            report.feed_items
        );
    } else {
        println!(
            "Posted {} of {} feed item(s)",
            report.posted, report.feed_items
        );
    }
}
