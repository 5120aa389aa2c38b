use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};

use podcastr::api::is_url;
use podcastr::{
    BuildEvent, BuildOptions, BuildReporter, DEFAULT_REVALIDATE_INTERVAL, NoopReporter,
    ReqwestClient, SharedBuildReporter, SiteInfo, build_site, revalidate,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static PAGE: Emoji<'_, '_> = Emoji("📄 ", "[w] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static CLOCK: Emoji<'_, '_> = Emoji("⏰ ", "[z] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Build a static podcast site from an episode API
#[derive(Parser, Debug)]
#[command(name = "podcastr")]
#[command(about = "Build a static podcast site from an episode API")]
#[command(version)]
struct Args {
    /// Output directory for the generated site
    output_dir: PathBuf,

    /// Base URL of the episode API
    #[arg(short, long, default_value = "http://localhost:3333")]
    api_url: String,

    /// Number of episodes requested from the API
    #[arg(short, long, default_value = "12")]
    limit: usize,

    /// Number of episodes highlighted as latest releases
    #[arg(long, default_value = "2")]
    latest: usize,

    /// Site title shown in the header and the feed
    #[arg(short, long, default_value = "Podcastr")]
    title: String,

    /// Public URL of the site, used for links in the RSS feed
    #[arg(long)]
    site_url: Option<String>,

    /// Keep running and rebuild the site periodically
    #[arg(short, long)]
    watch: bool,

    /// Seconds between rebuilds in watch mode
    #[arg(long, default_value_t = DEFAULT_REVALIDATE_INTERVAL.as_secs())]
    revalidate_secs: u64,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Progress reporter using indicatif for terminal output
struct IndicatifReporter {
    main_bar: ProgressBar,
}

impl IndicatifReporter {
    fn new() -> Self {
        let main_style = ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let main_bar = ProgressBar::new_spinner();
        main_bar.set_style(main_style);
        main_bar.enable_steady_tick(Duration::from_millis(100));

        Self { main_bar }
    }
}

impl BuildReporter for IndicatifReporter {
    fn report(&self, event: BuildEvent) {
        match event {
            BuildEvent::FetchingEpisodes { url } => {
                self.main_bar
                    .set_message(format!("{SEARCH}Fetching episodes: {}", url.cyan()));
            }

            BuildEvent::EpisodesFetched {
                total,
                latest,
                archived,
            } => {
                self.main_bar.set_message(format!(
                    "{HEADPHONES}{} episodes • {} latest, {} archived",
                    total.to_string().bold().green(),
                    latest.to_string().cyan(),
                    archived.to_string().cyan()
                ));
            }

            BuildEvent::FetchFailed {
                error,
                kept_previous,
            } => {
                let fallback = if kept_previous {
                    "keeping previous build"
                } else {
                    "writing empty site"
                };
                self.main_bar.println(format!(
                    "{FAILURE}{} - {}",
                    error.red(),
                    fallback.yellow()
                ));
            }

            BuildEvent::PageWritten { path, bytes } => {
                self.main_bar.set_message(format!(
                    "{PAGE}{} ({} bytes)",
                    path.cyan(),
                    bytes
                ));
            }

            BuildEvent::PageUnchanged { path } => {
                self.main_bar
                    .set_message(format!("{PAGE}{}", path.dimmed()));
            }

            BuildEvent::PageRemoved { path } => {
                self.main_bar
                    .println(format!("  {} {}", "removed".yellow(), path.dimmed()));
            }

            BuildEvent::BuildCompleted {
                written_count,
                unchanged_count,
                removed_count,
            } => {
                self.main_bar.println(format!(
                    "{PARTY}{} {} written, {} unchanged, {} removed",
                    "Build complete:".bold().green(),
                    written_count.to_string().green().bold(),
                    unchanged_count.to_string().yellow(),
                    removed_count.to_string().yellow()
                ));
                self.main_bar.set_message("");
            }

            BuildEvent::BuildFailed { error } => {
                self.main_bar.println(format!(
                    "{FAILURE}{} {}",
                    "Build failed:".bold().red(),
                    error.red()
                ));
            }

            BuildEvent::Revalidating { interval_secs } => {
                self.main_bar.set_message(format!(
                    "{CLOCK}Next rebuild in {}",
                    format_interval(interval_secs).cyan()
                ));
            }
        }
    }
}

fn format_interval(secs: u64) -> String {
    match (secs / 3600, (secs % 3600) / 60, secs % 60) {
        (0, 0, s) => format!("{s}s"),
        (0, m, _) => format!("{m}m"),
        (h, 0, _) => format!("{h}h"),
        (h, m, _) => format!("{h}h{m:02}m"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !is_url(&args.api_url) {
        bail!("API URL must start with http:// or https://: {}", args.api_url);
    }
    if args.revalidate_secs == 0 {
        bail!("--revalidate-secs must be greater than zero");
    }

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podcastr".bold().magenta(),
            "- Podcast Site Builder".dimmed()
        );
    }

    let client = ReqwestClient::new();

    let options = BuildOptions {
        api_url: args.api_url.clone(),
        limit: args.limit,
        latest_count: args.latest,
        site: SiteInfo {
            title: args.title.clone(),
            site_url: args.site_url.clone(),
            ..Default::default()
        },
    };

    let indicatif = (!args.quiet).then(|| Arc::new(IndicatifReporter::new()));
    let reporter: SharedBuildReporter = match &indicatif {
        Some(reporter) => reporter.clone() as SharedBuildReporter,
        None => NoopReporter::shared(),
    };

    if args.watch {
        let interval = Duration::from_secs(args.revalidate_secs);
        tokio::select! {
            _ = revalidate(&client, &options, &args.output_dir, interval, &reporter) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    } else {
        let result = build_site(&client, &options, &args.output_dir, &reporter)
            .await
            .context("Failed to build site")?;

        if result.fetch_error.is_some() && !result.kept_previous {
            if let Some(reporter) = &indicatif {
                reporter.main_bar.finish_and_clear();
            }
            std::process::exit(1);
        }
    }

    if let Some(reporter) = &indicatif {
        reporter.main_bar.finish_and_clear();
    }

    if !args.quiet {
        println!(
            "\n{FOLDER}Output: {}\n",
            args.output_dir.display().to_string().cyan()
        );
    }

    Ok(())
}
