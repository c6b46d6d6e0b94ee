mod commands;
mod render;
mod source;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use farmcal_core::config::CalendarConfig;
use farmcal_core::{EventFilter, Granularity};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "farmcal")]
#[command(about = "Browse farm events by day, week, month or year")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ViewArgs {
    /// Calendar view: day, week, month or year (defaults to the configured view)
    #[arg(short, long)]
    view: Option<Granularity>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Step back this many views from the reference date
    #[arg(long, default_value_t = 0, conflicts_with = "next")]
    prev: u32,

    /// Step forward this many views from the reference date
    #[arg(long, default_value_t = 0)]
    next: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a calendar view
    Show {
        #[command(flatten)]
        view: ViewArgs,

        /// Read events from this JSON file
        #[arg(long, conflicts_with = "url")]
        events: Option<PathBuf>,

        /// Fetch events from this backend endpoint
        #[arg(long)]
        url: Option<String>,

        /// Only show events of this entry type
        #[arg(long)]
        entry_type: Option<String>,

        /// Only show events in this category
        #[arg(long)]
        category: Option<String>,

        /// Print the layout as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the date range and title of a view
    Range {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show config location and effective settings
    Config {
        /// Write a commented default config if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Show {
            view,
            events,
            url,
            entry_type,
            category,
            json,
        } => {
            let config = load_config()?;
            let calendar_view = commands::resolve_view(&config, view.view, view.date, view.prev, view.next, today)?;
            let source = source::EventSource::resolve(events, url, &config)?;
            let filter = EventFilter { entry_type, category };
            commands::show::run(&config, calendar_view, &source, &filter, today, json).await
        }
        Commands::Range { view } => {
            let config = load_config()?;
            let calendar_view = commands::resolve_view(&config, view.view, view.date, view.prev, view.next, today)?;
            commands::range::run(calendar_view)
        }
        Commands::Config { init } => commands::config::run(init),
    }
}

fn load_config() -> Result<CalendarConfig> {
    CalendarConfig::load().map_err(|e| anyhow::anyhow!(e))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FARMCAL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "farmcal=debug,farmcal_core=debug,info"
        } else {
            "farmcal=info,warn"
        })
    });

    let format = env::var("FARMCAL_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
