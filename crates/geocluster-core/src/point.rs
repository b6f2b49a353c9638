//! Points, coordinates and cluster labels

use serde::{Deserialize, Serialize};

/// Cluster label: `>= 0` is a cluster id, [`NOISE`] marks unclustered points
pub type Label = i32;

/// Label given to points that are neither core nor border points
pub const NOISE: Label = -1;

/// Anything that exposes a 2-D coordinate pair
pub trait Spatial {
    /// Coordinate pair used for distance computation
    fn coords(&self) -> [f64; 2];

    /// Whether both coordinates are finite numbers
    fn is_finite(&self) -> bool {
        self.coords().iter().all(|c| c.is_finite())
    }
}

/// Immutable geographic record with an opaque payload
///
/// The payload (magnitude, place, ...) is never inspected by the
/// clustering code and is carried through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<P = ()> {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Caller data attached to this point
    pub payload: P,
}

impl<P> Point<P> {
    /// Create a point with a payload
    pub fn new(lat: f64, lon: f64, payload: P) -> Self {
        Self { lat, lon, payload }
    }
}

impl Point<()> {
    /// Create a point without payload
    pub fn bare(lat: f64, lon: f64) -> Self {
        Self::new(lat, lon, ())
    }
}

impl<P> Spatial for Point<P> {
    fn coords(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl Spatial for [f64; 2] {
    fn coords(&self) -> [f64; 2] {
        *self
    }
}

impl Spatial for (f64, f64) {
    fn coords(&self) -> [f64; 2] {
        [self.0, self.1]
    }
}

impl<T: Spatial + ?Sized> Spatial for &T {
    fn coords(&self) -> [f64; 2] {
        (**self).coords()
    }
}

/// Whether a label marks noise
pub fn is_noise(label: Label) -> bool {
    label == NOISE
}
