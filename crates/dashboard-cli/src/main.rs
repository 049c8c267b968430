//! Command-line front-end for the stock dashboard
//!
//! # Usage
//!
//! ```bash
//! # Show US stocks from the default feed file
//! stock-dashboard show --region US
//!
//! # Write an HTML page
//! stock-dashboard render --search tsco --out dashboard.html
//!
//! # Rebuild the feed from Yahoo Finance
//! stock-dashboard update --out data/processed/latest_stocks.json
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dashboard_core::interface::HtmlFormatter;
use dashboard_core::{
    AppState, Command, DashboardConfig, DataLoader, Effect, FeedUpdater, FilterState, Formatter,
    FormatterFactory, OutputFormat, Watchlist, api::YahooFinanceClient,
};
use dashboard_utils::LogFormat;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-dashboard")]
#[command(about = "Filter and summarise a stock feed", long_about = None)]
struct Cli {
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Print the filtered feed
    Show {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Write the filtered feed as an HTML page
    Render {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Destination file
        #[arg(long, default_value = "dashboard.html")]
        out: PathBuf,
    },
    /// Browse the feed with /region, /search and /reload commands
    Interactive {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Rebuild the feed file from Yahoo Finance
    Update {
        /// Destination feed file
        #[arg(long, default_value = dashboard_core::config::DEFAULT_SOURCE)]
        out: PathBuf,
        /// Quote requests per minute
        #[arg(long)]
        rate_limit: Option<u32>,
        /// JSON watchlist replacing the built-in one
        #[arg(long)]
        watchlist: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Feed file or http(s) URL; defaults to $STOCK_FEED_SOURCE
    #[arg(long)]
    source: Option<String>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Region to show, or "all"
    #[arg(long, default_value = "all")]
    region: String,
    /// Case-insensitive ticker or name search
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArgs {
    fn to_filter(&self) -> FilterState {
        FilterState::default()
            .with_region(&self.region)
            .with_search(&self.search)
    }
}

fn load_config(source: Option<String>, rate_limit: Option<u32>) -> anyhow::Result<DashboardConfig> {
    let mut builder = DashboardConfig::builder();
    if let Some(source) = source {
        builder = builder.source(source);
    }
    if let Some(rate_limit) = rate_limit {
        builder = builder.updater_rate_limit(rate_limit);
    }
    builder
        .with_env()
        .build()
        .context("Invalid dashboard configuration")
}

async fn initial_state(
    config: &DashboardConfig,
    filter: FilterState,
) -> anyhow::Result<(DataLoader, AppState)> {
    let loader = DataLoader::from_config(config)?;
    let outcome = loader.load_or_fallback().await;
    Ok((loader, AppState::new(outcome).with_filter(filter)))
}

async fn show(source: SourceArgs, filter: FilterArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(source.source, None)?;
    let (_, state) = initial_state(&config, filter.to_filter()).await?;

    let formatter = FormatterFactory::create(format)?;
    println!("{}", formatter.render_page(&state.page())?);
    Ok(())
}

async fn render(source: SourceArgs, filter: FilterArgs, out: PathBuf) -> anyhow::Result<()> {
    let config = load_config(source.source, None)?;
    let (_, state) = initial_state(&config, filter.to_filter()).await?;

    let html = HtmlFormatter::new()?.render_page(&state.page())?;
    tokio::fs::write(&out, html)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;

    info!(path = %out.display(), "Rendered dashboard");
    println!("Wrote {}", out.display());
    Ok(())
}

async fn update(
    out: PathBuf,
    rate_limit: Option<u32>,
    watchlist: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(None, rate_limit)?;
    let watchlist = match watchlist {
        Some(path) => Watchlist::from_json_file(path).await?,
        None => Watchlist::default(),
    };

    println!(
        "Fetching {} tickers at {} requests/minute...",
        watchlist.len(),
        config.updater_rate_limit
    );
    let updater = FeedUpdater::new(
        Arc::new(YahooFinanceClient::new()),
        watchlist,
        config.updater_rate_limit,
    );

    let feed = updater
        .update(&out)
        .await
        .with_context(|| format!("Failed to update {}", out.display()))?;

    println!("Saved {} stocks to {}", feed.len(), out.display());
    Ok(())
}

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════╗
║               Stock Dashboard                ║
║                                              ║
║  /region <R|all>   /search <text>   /clear   ║
║  /reload           /help            /exit    ║
║                                              ║
║  Plain text is treated as a search.          ║
╚══════════════════════════════════════════════╝
"
    );
}

async fn interactive(source: SourceArgs) -> anyhow::Result<()> {
    let config = load_config(source.source, None)?;
    let (loader, mut state) = initial_state(&config, FilterState::default()).await?;
    let formatter = FormatterFactory::create(OutputFormat::Table)?;

    print_banner();
    println!("Source: {}\n", loader.source());
    println!("{}", formatter.render_page(&state.page())?);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("dashboard> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            },
            Ok(_) => {},
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            },
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}\n", formatter.format_error(&e.to_string()));
                continue;
            },
        };

        let event = match command {
            Command::Exit => {
                println!("Goodbye!");
                break;
            },
            Command::Help => {
                println!("{}", Command::help_text());
                continue;
            },
            other => match other.to_event() {
                Some(event) => event,
                None => continue,
            },
        };

        if let Effect::Reload(ticket) = state.dispatch(event) {
            println!("Reloading...");
            let outcome = loader.reload_or_fallback().await;
            state.finish_load(ticket, outcome);
        }
        println!("{}", formatter.render_page(&state.page())?);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    dashboard_utils::init_tracing(LogFormat::from_json_flag(cli.log_json));

    match cli.command {
        CliCommand::Show {
            source,
            filter,
            format,
        } => show(source, filter, format).await,
        CliCommand::Render {
            source,
            filter,
            out,
        } => render(source, filter, out).await,
        CliCommand::Interactive { source } => interactive(source).await,
        CliCommand::Update {
            out,
            rate_limit,
            watchlist,
        } => update(out, rate_limit, watchlist).await,
    }
}
