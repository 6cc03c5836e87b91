mod locate;
mod summary;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quakeview")]
#[command(about = "Earthquake event page tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the summary card for a product type of an event
    Summary {
        /// Event detail JSON file
        file: PathBuf,
        /// Product type to summarize, or `all` for every card
        #[arg(long = "type", default_value = "origin")]
        product_type: String,
    },
    /// List reconciled origin candidates, preferred first
    Origins {
        /// Event detail JSON file
        file: PathBuf,
        /// Print the reconciled products as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a free-text place to coordinates
    Geocode {
        /// Place name or address
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Normalize a device fix the way a browser position would be
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Accuracy radius in meters
        #[arg(long, default_value = "50")]
        accuracy: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = quakeview_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Summary { file, product_type }) => {
            summary::run_summary(&config, &file, &product_type)?;
        }
        Some(Commands::Origins { file, json }) => summary::run_origins(&file, json)?,
        Some(Commands::Geocode { query }) => locate::run_geocode(&config, &query.join(" ")).await?,
        Some(Commands::Locate { lat, lon, accuracy }) => {
            locate::run_locate(&config, lat, lon, accuracy).await?;
        }
        None => println!("quakeview: no command given, see --help"),
    }

    Ok(())
}
