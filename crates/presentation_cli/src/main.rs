//! Tourguide CLI
//!
//! Distance and transport estimates for tourist itineraries, with live
//! lookups against the transport-information service when it is reachable.

#![allow(clippy::print_stdout)]

mod render;
mod wiring;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::{GeoPoint, Itinerary, Stop, compute_distance_km, generate_transport_options};
use infrastructure::{AppConfig, init_logging};
use serde::Deserialize;

/// Tourguide CLI
#[derive(Parser)]
#[command(name = "tourguide-cli")]
#[command(author, version, about = "Tourist itinerary transport estimates", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "TOURGUIDE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    #[command(allow_negative_numbers = true)]
    Distance {
        /// Latitude of the first point
        lat1: f64,
        /// Longitude of the first point
        lon1: f64,
        /// Latitude of the second point
        lat2: f64,
        /// Longitude of the second point
        lon2: f64,
    },

    /// Estimated transport options for a distance or a pair of points
    ///
    /// Example: tourguide-cli options 2.5
    /// Example: tourguide-cli options --from 48.8566,2.3522 --to 48.8606,2.3376
    #[command(allow_negative_numbers = true)]
    Options {
        /// Leg length in kilometers
        #[arg(required_unless_present = "from", conflicts_with_all = ["from", "to"])]
        distance_km: Option<f64>,

        /// Departure point as "lat,lon"
        #[arg(long, requires = "to", allow_hyphen_values = true)]
        from: Option<GeoPoint>,

        /// Arrival point as "lat,lon"
        #[arg(long, requires = "from", allow_hyphen_values = true)]
        to: Option<GeoPoint>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Transport options for every leg of an itinerary file
    ///
    /// The file holds either a list of stops or `{"city": ..., "stops": [...]}`;
    /// each stop has `name`, `address` and optional `coordinates` as
    /// `[lat, lon]` or `{"latitude": .., "longitude": ..}`.
    Itinerary {
        /// Path to the itinerary JSON file
        file: PathBuf,

        /// Estimate locally without contacting any service
        #[arg(long)]
        offline: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Accepted layouts of an itinerary file
#[derive(Deserialize)]
#[serde(untagged)]
enum ItineraryFile {
    Stops(Vec<Stop>),
    Full(Itinerary),
}

impl From<ItineraryFile> for Itinerary {
    fn from(file: ItineraryFile) -> Self {
        match file {
            ItineraryFile::Stops(stops) => Self::new(stops),
            ItineraryFile::Full(itinerary) => itinerary,
        }
    }
}

/// Determine log filter from verbosity count, `None` keeps the configured one
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("tourguide=info,info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => AppConfig::load().context("failed to load configuration"),
    }
}

fn read_itinerary(path: &Path) -> anyhow::Result<Itinerary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: ItineraryFile = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid itinerary", path.display()))?;
    Ok(file.into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let logging = log_filter_from_verbosity(cli.verbose)
        .map_or_else(|| config.logging.clone(), |f| config.logging.with_filter(f));
    init_logging(&logging)?;

    match cli.command {
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let a = GeoPoint::new(lat1, lon1)?;
            let b = GeoPoint::new(lat2, lon2)?;
            println!("{:.3} km", compute_distance_km(a, b));
        },

        Commands::Options {
            distance_km,
            from,
            to,
            json,
        } => {
            let distance_km = match (distance_km, from, to) {
                (Some(d), _, _) => d,
                (None, Some(from), Some(to)) => compute_distance_km(from, to),
                _ => anyhow::bail!("give a distance or both --from and --to"),
            };
            let options = generate_transport_options(distance_km);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "distance_km": distance_km,
                        "options": options,
                    }))?
                );
            } else {
                println!("🧭 {distance_km:.2} km");
                print!("{}", render::options_block(&options));
            }
        },

        Commands::Itinerary {
            file,
            offline,
            json,
        } => {
            let itinerary = read_itinerary(&file)?;
            let planner = wiring::itinerary_service(&config, offline)?;
            let plan = planner.plan(itinerary).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{}", render::plan_text(&plan));
            }
        },

        Commands::Config => {
            print!("{}", config.to_toml()?);
        },
    }

    Ok(())
}
