//! Clustering server binary
//!
//! Run with: cargo run -p geocluster-server --bin geocluster-server

use geocluster_server::{GeoclusterConfig, GeoclusterServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "geocluster_server=info,geocluster_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                        Geocluster                         ║
║           Earthquake Clustering with DBSCAN               ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration ($GEOCLUSTER_CONFIG or defaults)
    let config = GeoclusterConfig::resolve(None)?;

    tracing::info!("Configuration loaded");
    match &config.source.file {
        Some(path) => tracing::info!("  - Source: {}", path.display()),
        None => tracing::info!(
            "  - Source: {} ({} to {}, M{}+)",
            config.source.base_url,
            config.source.start_time,
            config.source.end_time,
            config.source.min_magnitude
        ),
    }
    tracing::info!("  - eps: {}", config.clustering.eps);
    tracing::info!("  - min_samples: {}", config.clustering.min_samples);
    tracing::info!("  - Maps: {}", config.render.output_dir.display());

    // Create and start server
    let server = GeoclusterServer::new(config)?;

    println!("\nServer starting...");
    println!("  Index: http://{}/", server.address());
    println!("  Results: http://{}/results", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
