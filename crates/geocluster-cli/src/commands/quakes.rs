//! Offline earthquake clustering run

use anyhow::{Context, Result};
use console::style;
use geocluster_server::{ClusterPipeline, ClusterRun, GeoclusterConfig};
use std::path::PathBuf;

pub struct QuakesArgs {
    pub input: Option<PathBuf>,
    pub eps: Option<f64>,
    pub min_samples: Option<usize>,
    pub out: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Layer command-line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: GeoclusterConfig, args: QuakesArgs) -> Result<GeoclusterConfig> {
    if let Some(input) = args.input {
        config.source.file = Some(input);
    }
    if let Some(eps) = args.eps {
        config.clustering.eps = eps;
    }
    if let Some(min_samples) = args.min_samples {
        config.clustering.min_samples = min_samples;
    }
    if let Some(out) = args.out {
        config.render.output_dir = out;
    }
    config.validate()?;
    Ok(config)
}

pub async fn run(args: QuakesArgs) -> Result<()> {
    let config = GeoclusterConfig::resolve(args.config.as_deref())
        .context("Failed to load configuration")?;
    let config = apply_overrides(config, args)?;

    let pipeline = ClusterPipeline::from_config(&config)?;
    let run = pipeline.run().await.context("Clustering run failed")?;

    print_summary(&run, &config);
    Ok(())
}

fn print_summary(run: &ClusterRun, config: &GeoclusterConfig) {
    println!("\n{}", style("Earthquake clusters").bold().cyan());
    println!("  Events:    {}", run.summary.n_points);
    println!("  Clusters:  {}", style(run.n_clusters()).green().bold());
    println!("  Noise:     {}", style(run.n_noise()).yellow());
    if let Some((id, size)) = run.summary.largest_cluster() {
        println!("  Largest:   cluster {} ({} events)", id, size);
    }
    println!(
        "  Map:       {}",
        config.render.output_dir.join(&run.artifact.file_name).display()
    );
    println!("  Time:      {}ms", run.processing_time_ms);
}
