//! Tile-pixel ↔ geographic projection on the spherical Web Mercator.
//!
//! A pixel dataset lives in a `tile_size × tile_size` square whose center pixel
//! is pinned to a reference coordinate. With `C = (tile_size / 2π) · 2^zoom`:
//!
//!   forward: x = C·(λ + π), y = C·(π − ln(tan(π/4 + φ/2)))
//!   inverse: λ = x/C − π,   φ = 2·(atan(exp(−(y/C − π))) − π/4)
//!
//! Angles are degrees at every public boundary and radians inside.

use std::f64::consts::{FRAC_PI_4, PI};

use tracing::debug;

use crate::config::{COORD_PRECISION, TILE_SIZE};
use crate::dataset::PathDataset;
use crate::error::ProjectionError;
use crate::geo::{GeoPoint, GeoSegment, PixelPoint, validate_zoom};

fn scale_factor(tile_size: f64, zoom: i32) -> Result<f64, ProjectionError> {
    let c = tile_size / (2.0 * PI) * 2_f64.powi(zoom);
    if !c.is_finite() {
        return Err(ProjectionError::InvalidInput(format!(
            "zoom {zoom} overflows the pixel scale"
        )));
    }
    Ok(c)
}

fn validate_tile_size(tile_size: f64) -> Result<(), ProjectionError> {
    if !tile_size.is_finite() || tile_size <= 0.0 {
        return Err(ProjectionError::InvalidInput(format!(
            "tile size must be a positive finite number, got {tile_size}"
        )));
    }
    Ok(())
}

fn finite_pixel(x: f64, y: f64, zoom: i32) -> Result<PixelPoint, ProjectionError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ProjectionError::InvalidInput(format!(
            "pixel coordinate overflows at zoom {zoom}"
        )));
    }
    Ok(PixelPoint { x, y })
}

/// Absolute Mercator pixel of `point`; callers validate the latitude first.
fn mercator_pixel(
    point: &GeoPoint,
    zoom: i32,
    tile_size: f64,
) -> Result<PixelPoint, ProjectionError> {
    let c = scale_factor(tile_size, zoom)?;
    let lon_rad = point.longitude.to_radians();
    let lat_rad = point.latitude.to_radians();
    let y = c * (PI - (FRAC_PI_4 + lat_rad / 2.0).tan().ln());
    // Within float noise of a pole the tangent can flip sign.
    if y.is_nan() {
        return Err(ProjectionError::InvalidLatitude(point.latitude));
    }
    finite_pixel(c * (lon_rad + PI), y, zoom)
}

/// Absolute Web Mercator pixel coordinates of `center` at `zoom`, using the
/// shared [`TILE_SIZE`].
pub fn geo_to_pixel_center(center: &GeoPoint, zoom: i32) -> Result<PixelPoint, ProjectionError> {
    center.validate()?;
    validate_zoom(zoom)?;
    mercator_pixel(center, zoom, TILE_SIZE)
}

/// Map a tile-local pixel to a geographic coordinate, with the tile's center
/// pixel anchored on `center`.
///
/// `point` may lie outside the tile; the math is unbounded. Pixels far enough
/// north or south land on a pole and fail with `InvalidLatitude`. Longitude is
/// not wrapped: a point east of 180° comes back as e.g. 181.2 so segments
/// crossing the antimeridian stay continuous.
pub fn pixel_to_geo(
    point: &PixelPoint,
    center: &GeoPoint,
    zoom: i32,
    tile_size: f64,
) -> Result<GeoPoint, ProjectionError> {
    center.validate()?;
    validate_zoom(zoom)?;
    validate_tile_size(tile_size)?;
    if !point.is_finite() {
        return Err(ProjectionError::InvalidInput(format!(
            "non-finite pixel coordinate ({}, {})",
            point.x, point.y
        )));
    }

    let origin = mercator_pixel(center, zoom, tile_size)?;
    let half = tile_size / 2.0;
    let abs = finite_pixel(
        origin.x - (half - point.x),
        origin.y - (half - point.y),
        zoom,
    )?;

    let c = scale_factor(tile_size, zoom)?;
    let lon_rad = abs.x / c - PI;
    let lat_rad = 2.0 * ((-(abs.y / c - PI)).exp().atan() - FRAC_PI_4);

    let latitude = lat_rad.to_degrees();
    if !latitude.is_finite() || latitude.abs() >= 90.0 {
        return Err(ProjectionError::InvalidLatitude(latitude));
    }
    let longitude = lon_rad.to_degrees();
    if !longitude.is_finite() {
        return Err(ProjectionError::InvalidInput(format!(
            "longitude overflows at zoom {zoom}"
        )));
    }

    Ok(GeoPoint {
        latitude,
        longitude,
    })
}

/// [`pixel_to_geo`] with the shared [`TILE_SIZE`].
pub fn pixel_to_geo_default(
    point: &PixelPoint,
    center: &GeoPoint,
    zoom: i32,
) -> Result<GeoPoint, ProjectionError> {
    pixel_to_geo(point, center, zoom, TILE_SIZE)
}

/// Inverse of [`pixel_to_geo`]: where `point` lands in the tile anchored on `center`.
pub fn geo_to_pixel(
    point: &GeoPoint,
    center: &GeoPoint,
    zoom: i32,
    tile_size: f64,
) -> Result<PixelPoint, ProjectionError> {
    center.validate()?;
    point.validate()?;
    validate_zoom(zoom)?;
    validate_tile_size(tile_size)?;

    let origin = mercator_pixel(center, zoom, tile_size)?;
    let abs = mercator_pixel(point, zoom, tile_size)?;
    let half = tile_size / 2.0;
    finite_pixel(abs.x - origin.x + half, abs.y - origin.y + half, zoom)
}

/// Project every segment of `dataset` around `center`, preserving order.
///
/// Output coordinates are rounded to [`COORD_PRECISION`] decimals so repeated
/// calls with the same input produce identical output. The dataset is only
/// read; each call starts again from the pixel coordinates.
pub fn project_path_dataset(
    dataset: &PathDataset,
    center: &GeoPoint,
    zoom: i32,
) -> Result<Vec<GeoSegment>, ProjectionError> {
    center.validate()?;
    validate_zoom(zoom)?;

    debug!(
        segments = dataset.len(),
        lat = center.latitude,
        lon = center.longitude,
        zoom,
        "Projecting path dataset"
    );

    dataset
        .segments()
        .iter()
        .map(|seg| {
            seg.try_map(|p| {
                let g = pixel_to_geo(p, center, zoom, TILE_SIZE)?.rounded(COORD_PRECISION);
                if g.latitude.abs() >= 90.0 {
                    return Err(ProjectionError::InvalidLatitude(g.latitude));
                }
                Ok(g)
            })
        })
        .collect()
}
