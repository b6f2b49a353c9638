//! Landing page

use axum::response::Html;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Earthquake clustering</title>
</head>
<body>
<h1>Earthquake clustering with DBSCAN</h1>
<p>Magnitude 4.5+ earthquakes from the USGS feed, grouped by location.</p>
<p><a href="/results">Run clustering and show the map</a></p>
</body>
</html>
"#;

/// GET / - Index page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
