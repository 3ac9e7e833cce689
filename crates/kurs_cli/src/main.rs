//! Kurs CLI
//!
//! Headless driver for the course catalog and its expandable course cards.

mod commands;
mod config;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use config::KursConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Browse courses, simulate expandable cards, price carts
#[derive(Parser, Debug)]
#[command(name = "kurs")]
#[command(about = "Course catalog with expandable cards")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./kurs.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List courses with their headline tag and price
    List,

    /// Simulate a course card expanding and print every frame
    Expand {
        /// Course id
        id: String,

        /// Frames per second
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=240))]
        fps: u32,

        /// Expand first, then print the collapse
        #[arg(long)]
        collapse: bool,

        /// Drive the card with hover instead of a click
        #[arg(long)]
        hover: bool,
    },

    /// Price a selection of courses
    Cart {
        /// Course to book, optionally with a participant count (`ID[:QTY]`)
        #[arg(long = "select", value_name = "ID[:QTY]", value_parser = commands::parse_selection)]
        select: Vec<(String, u32)>,

        /// Accommodation units
        #[arg(long, default_value = "0")]
        accommodation: u32,

        /// Simulate payment after printing the summary
        #[arg(long)]
        confirm: bool,
    },

    /// Add a special course and print the resulting catalog
    Add(SpecialArgs),

    /// Show or change the banner dismiss flag
    Banner {
        /// Dismiss the banner now
        #[arg(long, conflicts_with = "reset")]
        close: bool,

        /// Forget the dismissal
        #[arg(long)]
        reset: bool,

        /// JSON file holding the flag
        #[arg(long)]
        store: Option<PathBuf>,

        /// Days until a dismissal expires
        #[arg(long)]
        expires_days: Option<u32>,
    },
}

/// Special course form fields
#[derive(Args, Debug)]
pub struct SpecialArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "1000")]
    pub price: f64,
    #[arg(long, default_value = "1")]
    pub duration: String,
    #[arg(long, default_value = "")]
    pub level: String,
    /// Difficulty from 1 to 10
    #[arg(long, default_value = "1")]
    pub rating: u8,
    #[arg(long, default_value = "")]
    pub image_url: String,
    #[arg(long, default_value = "0")]
    pub graduates: u32,
    /// Comma separated
    #[arg(long, default_value = "")]
    pub tags: String,
    #[arg(long, default_value = "0")]
    pub reviews: u32,
    /// `icon:text` entries separated by `;`
    #[arg(long, default_value = "")]
    pub features: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; otherwise info, or debug with -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = KursConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::List => commands::list(),
        Command::Expand {
            id,
            fps,
            collapse,
            hover,
        } => commands::expand(&config, &id, fps, collapse, hover),
        Command::Cart {
            select,
            accommodation,
            confirm,
        } => commands::cart(&config, &select, accommodation, confirm).await,
        Command::Add(args) => commands::add(args),
        Command::Banner {
            close,
            reset,
            store,
            expires_days,
        } => commands::banner(&config, close, reset, store, expires_days),
    }
}
