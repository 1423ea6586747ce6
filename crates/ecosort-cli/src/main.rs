mod dropoffs;

use std::num::NonZeroUsize;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ecosort-cli")]
#[command(about = "EcoSort recycling drop-off discovery")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find recycling drop-off points near a location
    Dropoffs {
        /// Latitude of the search center in decimal degrees
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the search center in decimal degrees
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Waste filter to prioritize (e.g., Hazardous, Recycle)
        #[arg(long)]
        filter: Option<String>,
        /// Search radius in meters (overrides `ECOSORT_SEARCH_RADIUS_M`)
        #[arg(long)]
        radius: Option<u32>,
        /// Print the session as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Open driving directions to the facility at this rank (1-based)
        #[arg(long, value_name = "RANK")]
        navigate: Option<NonZeroUsize>,
    },
    /// List the configured waste filters
    Filters,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ecosort_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Dropoffs {
            lat,
            lon,
            filter,
            radius,
            json,
            navigate,
        }) => {
            let request = dropoffs::DropoffsRequest {
                center: lat.zip(lon).map(|(lat, lon)| ecosort_core::Coordinate::new(lat, lon)),
                filter,
                radius_m: radius,
                json,
                navigate,
            };
            dropoffs::run_dropoffs(&config, &request).await?;
        }
        Some(Commands::Filters) => dropoffs::run_filters(&config)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
