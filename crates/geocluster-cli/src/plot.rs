//! SVG charts for the k-means diagnostics

use anyhow::{anyhow, Result};
use geocluster_core::Label;
use ndarray::Array2;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (800, 600);

/// Qualitative colors for cluster scatter plots
const CLUSTER_COLORS: [RGBColor; 8] = [
    RGBColor(102, 194, 165),
    RGBColor(252, 141, 98),
    RGBColor(141, 160, 203),
    RGBColor(231, 138, 195),
    RGBColor(166, 216, 84),
    RGBColor(255, 217, 47),
    RGBColor(229, 196, 148),
    RGBColor(179, 179, 179),
];

#[derive(Debug, Clone, Copy)]
pub enum Curve {
    Elbow,
    Silhouette,
}

impl Curve {
    fn color(self) -> RGBColor {
        match self {
            Curve::Elbow => BLUE,
            Curve::Silhouette => GREEN,
        }
    }
}

/// Padded `(min, max)` of a value sequence
fn bounds(values: impl Iterator<Item = f64>) -> Result<(f64, f64)> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return Err(anyhow!("nothing to plot"));
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    Ok((lo - pad, hi + pad))
}

/// Marked line over `(k, value)` pairs
pub fn line_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    points: &[(usize, f64)],
    curve: Curve,
) -> Result<()> {
    let (x_lo, x_hi) = bounds(points.iter().map(|(k, _)| *k as f64))?;
    let (y_lo, y_hi) = bounds(points.iter().map(|(_, v)| *v))?;
    let color = curve.color();

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|(k, v)| (*k as f64, *v)),
        &color,
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|(k, v)| Circle::new((*k as f64, *v), 4, color.filled())),
    )?;

    root.present()?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// First two features colored by cluster, centroids as red crosses
pub fn cluster_scatter(
    path: &Path,
    title: &str,
    x: &Array2<f64>,
    labels: &[Label],
    centroids: &Array2<f64>,
    axis_names: (&str, &str),
) -> Result<()> {
    if x.ncols() < 2 || centroids.ncols() < 2 {
        return Err(anyhow!("scatter plot needs at least two features"));
    }
    if labels.len() != x.nrows() {
        return Err(anyhow!("{} labels for {} samples", labels.len(), x.nrows()));
    }

    let (x_lo, x_hi) = bounds(x.column(0).iter().chain(centroids.column(0).iter()).copied())?;
    let (y_lo, y_hi) = bounds(x.column(1).iter().chain(centroids.column(1).iter()).copied())?;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(axis_names.0)
        .y_desc(axis_names.1)
        .draw()?;

    chart.draw_series(x.rows().into_iter().zip(labels).map(|(row, &label)| {
        let color = CLUSTER_COLORS[label.rem_euclid(CLUSTER_COLORS.len() as Label) as usize];
        Circle::new((row[0], row[1]), 4, color.filled())
    }))?;

    chart
        .draw_series(
            centroids
                .rows()
                .into_iter()
                .map(|c| Cross::new((c[0], c[1]), 8, RED.stroke_width(3))),
        )?
        .label("Centroids")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(3)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_bounds_pad_range() {
        let (lo, hi) = bounds([1.0, 3.0].into_iter()).unwrap();
        assert!(lo < 1.0 && hi > 3.0);
        assert!(bounds(std::iter::empty()).is_err());
    }

    #[test]
    fn test_line_chart_single_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.svg");
        line_chart(&path, "t", "x", "y", &[(2, 0.5)], Curve::Silhouette).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().contains("<svg"));
    }

    #[test]
    fn test_scatter_rejects_one_feature() {
        let dir = tempfile::tempdir().unwrap();
        let x = array![[1.0], [2.0]];
        let centroids = array![[1.5]];
        let path = dir.path().join("s.svg");
        let result = cluster_scatter(&path, "t", &x, &[0, 0], &centroids, ("a", "b"));
        assert!(result.is_err());
    }
}
