//! Standard Slippy Map (XYZ Web Mercator) tile coordinate math.

use crate::geom::{Bound, LatLon};
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 512.0;

/// Converts a tile `(x, y, z)` corner into WGS84 `(lat, lon)`.
pub fn tile_to_lat_lon(x: i64, y: i64, z: u8) -> LatLon {
    let n = 2f64.powi(z as i32);
    let lon = x as f64 / n * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan();
    LatLon::new(lat_rad.to_degrees(), lon)
}

/// Returns the WGS84 bound covered by tile `(x, y, z)`.
pub fn tile_to_bounds(x: i64, y: i64, z: u8) -> Bound {
    let top_left = tile_to_lat_lon(x, y, z);
    let bottom_right = tile_to_lat_lon(x + 1, y + 1, z);
    Bound::make(
        bottom_right.lat,
        top_left.lon,
        top_left.lat,
        bottom_right.lon,
    )
}

/// Meters-per-pixel at a given zoom, at the equator.
pub fn meters_per_pixel(zoom: u8) -> f64 {
    const EQUATOR_CIRCUMFERENCE_M: f64 = 40_075_016.686;
    EQUATOR_CIRCUMFERENCE_M / TILE_SIZE / 2f64.powi(zoom as i32)
}

/// Integer zoom whose meters-per-pixel most closely approximates the
/// requested resolution.
pub fn zoom_for_resolution(m_per_px: f64) -> u8 {
    let mut best_zoom = 0u8;
    let mut best_diff = f64::MAX;
    for z in 0..=22u8 {
        let diff = (meters_per_pixel(z) - m_per_px).abs();
        if diff < best_diff {
            best_diff = diff;
            best_zoom = z;
        }
    }
    best_zoom
}

/// A closure-friendly `LatLon -> (x, y)` canvas-pixel transform, built for
/// one tile's bounds so it can be captured cheaply per polygon vertex.
pub type CoordTransform = Box<dyn Fn(LatLon) -> (f64, f64) + Send + Sync>;

/// Builds the coordinate transform for tile `(x, y, z)`: the tile's bound
/// maps onto `[0, 512] x [0, 512]` with `y` inverted so north is up.
pub fn transform_for_tile(bounds: Bound, canvas_width: f64, canvas_height: f64) -> CoordTransform {
    let min_lon = bounds.min.lon;
    let max_lat = bounds.max.lat;
    let pixel_per_lat = canvas_height / (bounds.max.lat - bounds.min.lat);
    let pixel_per_lon = canvas_width / (bounds.max.lon - bounds.min.lon);

    Box::new(move |p: LatLon| {
        let x = (p.lon - min_lon) * pixel_per_lon;
        let y = (max_lat - p.lat) * pixel_per_lat;
        (x, y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_bounds_are_well_ordered() {
        let b = tile_to_bounds(27928, 12788, 15);
        assert!(b.min.lat < b.max.lat);
        assert!(b.min.lon < b.max.lon);
    }

    #[test]
    fn zoom_zero_covers_the_whole_equator() {
        let mpp = meters_per_pixel(0);
        assert!(mpp > 78_000.0 && mpp < 79_000.0);
    }

    #[test]
    fn zoom_for_resolution_round_trips() {
        let z = 15;
        let mpp = meters_per_pixel(z);
        assert_eq!(zoom_for_resolution(mpp), z);
    }

    #[test]
    fn transform_maps_corners_to_canvas_extent() {
        let bounds = tile_to_bounds(0, 0, 1);
        let transform = transform_for_tile(bounds, 512.0, 512.0);
        let (x, y) = transform(bounds.left_top());
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
        let (x2, y2) = transform(bounds.right_bottom());
        assert!((x2 - 512.0).abs() < 1e-6);
        assert!((y2 - 512.0).abs() < 1e-6);
    }
}
