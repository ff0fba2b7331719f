use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Point in tile-pixel space. Serialized as a bare `[x, y]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for PixelPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<PixelPoint> for [f64; 2] {
    fn from(p: PixelPoint) -> Self {
        [p.x, p.y]
    }
}

/// WGS84 coordinate in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both coordinates rounded to `places` decimals.
    pub fn rounded(&self, places: i32) -> Self {
        Self {
            latitude: round_to(self.latitude, places),
            longitude: round_to(self.longitude, places),
        }
    }

    /// Rejects latitudes where `ln(tan(π/4 + φ/2))` diverges, and non-finite longitudes.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if !self.latitude.is_finite() || self.latitude.abs() >= 90.0 {
            return Err(ProjectionError::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() {
            return Err(ProjectionError::InvalidInput(format!(
                "non-finite longitude {}",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Ordered pair of endpoints. Order within the pair and within a dataset is
/// rendering order only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment<P> {
    pub start: P,
    pub end: P,
}

impl<P> PathSegment<P> {
    pub fn new(start: P, end: P) -> Self {
        Self { start, end }
    }

    /// Apply `f` to both endpoints, start first.
    pub fn try_map<Q, E>(
        &self,
        mut f: impl FnMut(&P) -> Result<Q, E>,
    ) -> Result<PathSegment<Q>, E> {
        Ok(PathSegment {
            start: f(&self.start)?,
            end: f(&self.end)?,
        })
    }
}

pub type PixelSegment = PathSegment<PixelPoint>;
pub type GeoSegment = PathSegment<GeoPoint>;

pub fn validate_zoom(zoom: i32) -> Result<(), ProjectionError> {
    if zoom < 0 {
        return Err(ProjectionError::InvalidInput(format!(
            "zoom must be >= 0, got {zoom}"
        )));
    }
    Ok(())
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}
