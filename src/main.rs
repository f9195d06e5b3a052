mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::export::ExportFormat;
use commands::listing::ListingView;
use commands::manage::{EventFields, OutputArgs};
use commands::Context;

/// Log filter variable, e.g. `BOUTIQUE_EVENTS_LOG=debug`
const LOG_ENV: &str = "BOUTIQUE_EVENTS_LOG";

#[derive(Parser)]
#[command(name = "boutique-events")]
#[command(about = "Browse, export and manage the boutique's events")]
struct Cli {
    /// Config file (defaults to ~/.config/boutique-events/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Events document, a path or an http(s) URL (overrides config)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Timezone the event times are written in (overrides config)
    #[arg(long, global = true)]
    tz: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the homepage preview and the upcoming events grid
    Listing {
        /// Only the homepage preview
        #[arg(long, conflicts_with = "upcoming_only")]
        featured_only: bool,

        /// Only the upcoming events grid
        #[arg(long)]
        upcoming_only: bool,
    },
    /// Show the calendar for a month
    Calendar {
        /// Month to show (e.g., "2024-06"), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Only show events of this category ("all" shows everything)
        #[arg(short, long)]
        category: Option<String>,

        /// Only show events whose title or description contains this term
        #[arg(short, long)]
        search: Option<String>,

        /// Print the calendar feed as JSON instead of the month view
        #[arg(long)]
        json: bool,
    },
    /// Show the details of one event
    Show {
        id: String,

        /// Open the "add to calendar" link in the browser
        #[arg(long)]
        open: bool,
    },
    /// Print the "add to Google Calendar" link for an event
    Link {
        id: String,

        /// Open the link in the browser instead of printing it
        #[arg(long)]
        open: bool,
    },
    /// List events between two dates (inclusive)
    Range {
        /// First day (e.g., "2024-06-01")
        from: String,
        /// Last day (e.g., "2024-06-30")
        to: String,
    },
    /// Export every event as an .ics calendar or a JSON backup
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output file ("-" for stdout), defaults to the configured file name
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replace the events with an imported JSON backup and write the result
    Import {
        /// Backup file to import
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Add an event and write the resulting backup
    Add {
        /// Event title
        title: String,

        /// Event date (e.g., "2024-06-01")
        #[arg(short, long)]
        date: String,

        /// Event id, generated when omitted
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: EventFields,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Change fields of an event and write the resulting backup
    Update {
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New date (e.g., "2024-06-01")
        #[arg(short, long)]
        date: Option<String>,

        #[command(flatten)]
        fields: EventFields,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete an event and write the resulting backup
    Delete {
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Print the settings in effect
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init { force } => commands::config::init(cli.config.as_deref(), *force),
            ConfigAction::Show => {
                let ctx = Context::load(cli.config.as_deref(), cli.source, cli.tz)?;
                commands::config::show(&ctx)
            }
        };
    }

    let ctx = Context::load(cli.config.as_deref(), cli.source, cli.tz)?;

    match cli.command {
        Commands::Listing {
            featured_only,
            upcoming_only,
        } => {
            let view = ListingView::from_flags(featured_only, upcoming_only);
            commands::listing::run(&ctx, view).await
        }
        Commands::Calendar {
            month,
            category,
            search,
            json,
        } => commands::calendar::run(&ctx, month, category, search, json).await,
        Commands::Show { id, open } => commands::show::run(&ctx, &id, open).await,
        Commands::Link { id, open } => commands::show::link(&ctx, &id, open).await,
        Commands::Range { from, to } => commands::range::run(&ctx, &from, &to).await,
        Commands::Export { format, output } => commands::export::run(&ctx, format, output).await,
        Commands::Import { file, output } => commands::import::run(&ctx, &file, output).await,
        Commands::Add {
            title,
            date,
            id,
            fields,
            output,
        } => commands::manage::add(&ctx, title, date, id, fields, output).await,
        Commands::Update {
            id,
            title,
            date,
            fields,
            output,
        } => commands::manage::update(&ctx, &id, title, date, fields, output).await,
        Commands::Delete { id, output } => commands::manage::delete(&ctx, &id, output).await,
        Commands::Config { .. } => Ok(()),
    }
}
