//! Pipeline result endpoints

use axum::{extract::State, response::Html, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::ClusterRun;

/// GET /results - Run the pipeline and show counts with the map
pub async fn results_page(State(state): State<AppState>) -> Result<Html<String>> {
    let run = state.run_pipeline().await?;
    Ok(Html(render_results_page(&run)))
}

/// GET /api/results - Run the pipeline and return the summary
pub async fn run_results(State(state): State<AppState>) -> Result<Json<ClusterRun>> {
    Ok(Json(state.run_pipeline().await?))
}

/// GET /api/results/last - Summary of the most recent successful run
pub async fn last_results(State(state): State<AppState>) -> Result<Json<ClusterRun>> {
    state
        .last_run()
        .map(Json)
        .ok_or_else(|| Error::NotFound("No clustering run has completed yet".to_string()))
}

fn render_results_page(run: &ClusterRun) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Clustering results</title>
<style>iframe {{ width: 100%; height: 80vh; border: none; }}</style>
</head>
<body>
<h1>Clustering results</h1>
<ul>
<li>Number of clusters: <strong id="n-clusters">{clusters}</strong></li>
<li>Number of noise points: <strong id="n-noise">{noise}</strong></li>
<li>Earthquakes: {points} (eps {eps}, min_samples {min_samples})</li>
</ul>
<iframe src="/maps/{map}"></iframe>
<p><a href="/">Back</a></p>
</body>
</html>
"#,
        clusters = run.n_clusters(),
        noise = run.n_noise(),
        points = run.summary.n_points,
        eps = run.eps,
        min_samples = run.min_samples,
        map = run.artifact.file_name,
    )
}
