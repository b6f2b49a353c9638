//! Marker colors per cluster

use geocluster_core::{Label, NOISE};

/// Cluster colors; ids beyond the palette wrap around
pub const PALETTE: [&str; 19] = [
    "red",
    "blue",
    "green",
    "purple",
    "orange",
    "darkred",
    "lightred",
    "beige",
    "darkblue",
    "darkgreen",
    "cadetblue",
    "darkpurple",
    "white",
    "pink",
    "lightblue",
    "lightgreen",
    "gray",
    "black",
    "lightgray",
];

pub const NOISE_COLOR: &str = "black";

/// Color of a cluster label; noise is always black
pub fn color_for(label: Label) -> &'static str {
    if label == NOISE {
        NOISE_COLOR
    } else {
        PALETTE[label.rem_euclid(PALETTE.len() as Label) as usize]
    }
}
