//! K-means diagnostics on the Iris dataset

use anyhow::{Context, Result};
use console::style;
use geocluster_core::{datasets::iris, scan_k, silhouette_score, KMeans, KScan};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::plot;

pub struct IrisArgs {
    pub k: usize,
    pub k_range: RangeInclusive<usize>,
    pub seed: u64,
    pub out: PathBuf,
}

/// What one diagnostics run produced
pub struct IrisReport {
    pub inertia: f64,
    pub silhouette: f64,
    pub scan: KScan,
    pub best_k: Option<usize>,
    pub plots: Vec<PathBuf>,
}

pub fn run(args: IrisArgs) -> Result<()> {
    let report = diagnose(&args)?;

    println!("\n{}", style("K-means on Iris").bold().cyan());
    println!("  K = {}", args.k);
    println!("  Inertia (WCSS):   {:.4}", report.inertia);
    println!("  Silhouette score: {:.4}", report.silhouette);

    println!("\n  {:>3}  {:>12}  {:>10}", "K", "inertia", "silhouette");
    for score in &report.scan.scores {
        println!("  {:>3}  {:>12.4}  {:>10.4}", score.k, score.inertia, score.silhouette);
    }

    if let Some(best) = report.best_k {
        println!("\n  Best K (by silhouette): {}", style(best).green().bold());
    }
    for path in &report.plots {
        println!("  Wrote {}", path.display());
    }
    Ok(())
}

/// Fit, scan and plot without printing
pub fn diagnose(args: &IrisArgs) -> Result<IrisReport> {
    let data = iris();
    let x = &data.features;
    tracing::info!(
        "Loaded Iris dataset: {} samples x {} features",
        data.n_samples(),
        data.feature_names.len()
    );

    let template = KMeans::new(args.k).random_state(args.seed);
    let fit = template.fit(x)?;
    let silhouette = silhouette_score(x, &fit.labels)?;

    let scan = scan_k(x, args.k_range.clone(), &template)?;
    let best_k = scan.best_by_silhouette();

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;

    let elbow = args.out.join("elbow.svg");
    plot::line_chart(
        &elbow,
        "Elbow Method",
        "Number of clusters (K)",
        "Inertia (WCSS)",
        &scan.inertia_curve(),
        plot::Curve::Elbow,
    )?;

    let silhouette_plot = args.out.join("silhouette.svg");
    plot::line_chart(
        &silhouette_plot,
        "Silhouette Analysis",
        "Number of clusters (K)",
        "Silhouette Score",
        &scan.silhouette_curve(),
        plot::Curve::Silhouette,
    )?;

    let clusters = args.out.join("clusters.svg");
    plot::cluster_scatter(
        &clusters,
        "K-Means Clustering on Iris Dataset",
        x,
        &fit.labels,
        &fit.centroids,
        (&data.feature_names[0], &data.feature_names[1]),
    )?;

    Ok(IrisReport {
        inertia: fit.inertia,
        silhouette,
        scan,
        best_k,
        plots: vec![elbow, silhouette_plot, clusters],
    })
}
