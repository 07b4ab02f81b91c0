//! newsfetch main entry point
//!
//! This is the command-line interface for the bulk news fetcher.

use anyhow::Context;
use clap::Parser;
use futures::FutureExt;
use newsfetch::config::{load_config_with_hash, validate, Config};
use newsfetch::fetch::NewsFetcher;
use newsfetch::input::UrlList;
use newsfetch::output::{finish_task, started_line, OutputWriter, TaskStatus};
use newsfetch::pool::{CancelToken, Task, TaskSource, WorkerPool};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// newsfetch: fetch news titles and briefs from Scan-Interfax and Google News
///
/// Every URL in the list is fetched by a fixed number of concurrent workers.
/// Each extracted item is written to its own file in the output directory.
#[derive(Parser, Debug)]
#[command(name = "newsfetch")]
#[command(version)]
#[command(about = "Fetch news data (title and brief) from Scan-Interfax and Google News", long_about = None)]
struct Cli {
    /// Path to file of list of urls for fetching
    #[arg(long = "url-list", value_name = "URL-LIST-PATH")]
    url_list: PathBuf,

    /// Path to result directory (will be created)
    #[arg(long, value_name = "OUT-PATH")]
    out: PathBuf,

    /// Concurrent worker count (overrides the config file)
    #[arg(long, value_name = "CONC-COUNT")]
    conc: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    let urls = UrlList::open(&cli.url_list)
        .with_context(|| format!("Failed to open URL list {}", cli.url_list.display()))?;
    let writer = Arc::new(
        OutputWriter::create(&cli.out)
            .with_context(|| format!("Failed to create output directory {}", cli.out.display()))?,
    );

    let source = TaskSource::new(urls.map(move |url| build_task(url, Arc::clone(&writer))));
    let pool = WorkerPool::new(NewsFetcher::with_builtin_sources(config.fetch.clone()));

    let cancel = CancelToken::new();
    watch_ctrl_c(cancel.clone());

    let report = pool.run(&source, config.pool.concurrency, &cancel).await;

    if report.canceled {
        emit(&format!("canceled! ({} tasks processed)", report.processed()));
    } else {
        emit("done!");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("newsfetch=info,warn"),
            1 => EnvFilter::new("newsfetch=debug,info"),
            2 => EnvFilter::new("newsfetch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(conc) = cli.conc {
        config.pool.concurrency = conc;
    }
    validate(&config).context("Invalid configuration")?;

    tracing::info!(
        "Using {} workers, {}s request timeout, {} byte read limit",
        config.pool.concurrency,
        config.fetch.request_timeout,
        config.fetch.read_limit
    );

    Ok(config)
}

/// Creates the task for one URL with status-printing hooks
fn build_task(url: String, writer: Arc<OutputWriter>) -> Task {
    Task::new(url)
        .with_on_started(|task| {
            emit(&started_line(task));
            async {}.boxed()
        })
        .with_on_done(move |task| {
            let writer = Arc::clone(&writer);
            async move {
                let status = finish_task(&writer, task).await;
                if let TaskStatus::Done { files } = status {
                    tracing::debug!("{} wrote {} files", task.input(), files);
                }
                emit(&status.line(task.input()));
            }
            .boxed()
        })
}

/// Writes one status line to stdout
///
/// A closed stdout (e.g. piped into `head`) drops the line instead of panicking.
fn emit(line: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", line) {
        tracing::debug!("Dropped status line: {}", e);
    }
}

/// Trips `cancel` on the first Ctrl-C and exits on the second
fn watch_ctrl_c(cancel: CancelToken) {
    tokio::spawn(async move {
        let mut interrupts = 0;
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
                return;
            }
            interrupts += 1;
            if interrupts == 1 {
                tracing::warn!("Interrupt received, finishing in-flight fetches (Ctrl-C again to quit)");
                cancel.trip();
            } else {
                tracing::error!("Second interrupt received, exiting");
                std::process::exit(130);
            }
        }
    });
}
