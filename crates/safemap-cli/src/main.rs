mod actions;
mod document;
mod pages;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use safemap_core::CategoryFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "safemap")]
#[command(about = "Safe locations map, emergency contacts and safety tips")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List police stations and support centers
    Locations {
        /// Case-insensitive text matched against name, address and city
        #[arg(long, default_value = "")]
        query: String,
        /// all | station | center
        #[arg(long, default_value_t = CategoryFilter::All)]
        filter: CategoryFilter,
        /// Write the rendered map and list to an HTML file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List emergency contacts
    Contacts {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List safety tips
    Tips {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load contacts and tips together
    Panel {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Share a map link to the given position
    ShareLocation {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Show the emergency protocol
    Protocol {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a route link to the given destination
    Directions {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
    /// Print the dial link for a phone number
    Dial { number: String },
    /// Print a pre-filled error report link
    ReportError,
    /// Drop every cached dataset
    CacheClear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = safemap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Locations {
            query,
            filter,
            output,
        } => pages::run_locations(&config, &query, filter, output.as_deref()).await,
        Commands::Contacts { output } => pages::run_contacts(&config, output.as_deref()).await,
        Commands::Tips { output } => pages::run_tips(&config, output.as_deref()).await,
        Commands::Panel { output } => pages::run_panel(&config, output.as_deref()).await,
        Commands::CacheClear => pages::run_cache_clear(&config),
        Commands::ShareLocation { lat, lng } => actions::run_share_location(lat, lng).await,
        Commands::Protocol { output } => actions::run_protocol(output.as_deref()),
        Commands::Directions { lat, lng } => actions::run_directions(lat, lng),
        Commands::Dial { number } => {
            actions::run_dial(&number);
            Ok(())
        }
        Commands::ReportError => {
            actions::run_report_error();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
