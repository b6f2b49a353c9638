//! Geocluster command-line interface

mod commands;
mod plot;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "geocluster")]
#[command(about = "Earthquake clustering and k-means diagnostics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster earthquake epicenters with DBSCAN and write the map
    Quakes {
        /// Read a saved USGS GeoJSON feed instead of querying the network
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Neighborhood radius (standardized units)
        #[arg(long)]
        eps: Option<f64>,

        /// Minimum neighborhood size
        #[arg(long)]
        min_samples: Option<usize>,

        /// Directory the map is written to
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Configuration file (defaults to $GEOCLUSTER_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Fit k-means on the Iris dataset and scan cluster counts
    Iris {
        /// Cluster count of the reported fit
        #[arg(short, long, default_value = "3")]
        k: usize,

        /// Smallest K of the scan
        #[arg(long, default_value = "2")]
        k_min: usize,

        /// Largest K of the scan
        #[arg(long, default_value = "10")]
        k_max: usize,

        /// Seed for k-means++ initialization
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Directory the SVG plots are written to
        #[arg(short, long, default_value = "plots")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug {
        "geocluster=debug,geocluster_core=debug,geocluster_server=debug"
    } else {
        "geocluster=info,geocluster_core=info,geocluster_server=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Quakes {
            input,
            eps,
            min_samples,
            out,
            config,
        } => {
            commands::quakes::run(commands::quakes::QuakesArgs {
                input,
                eps,
                min_samples,
                out,
                config,
            })
            .await
        }
        Commands::Iris {
            k,
            k_min,
            k_max,
            seed,
            out,
        } => commands::iris::run(commands::iris::IrisArgs {
            k,
            k_range: k_min..=k_max,
            seed,
            out,
        }),
    }
}
