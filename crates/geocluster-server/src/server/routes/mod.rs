//! Routes for the clustering server

pub mod index;
pub mod results;

use axum::{routing::get, Router};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/results", get(results::run_results))
        .route("/results/last", get(results::last_results))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> axum::Json<serde_json::Value> {
    let dbscan = state.pipeline().dbscan();
    axum::Json(serde_json::json!({
        "name": "geocluster",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "DBSCAN clustering of recent earthquakes on a web map",
        "source": state.pipeline().source_name(),
        "clustering": {
            "eps": dbscan.eps(),
            "min_samples": dbscan.min_samples(),
        },
        "endpoints": {
            "GET /": "Index page",
            "GET /results": "Run the pipeline and show the map",
            "GET /api/results": "Run the pipeline and return the summary",
            "GET /api/results/last": "Summary of the most recent run",
            "GET /maps/:file": "Rendered map pages",
        }
    }))
}
