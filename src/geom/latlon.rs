use serde::{Deserialize, Serialize};

/// A WGS84 geographic coordinate, `(lat, lon)` in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }

    /// Planar (lon, lat) distance; only valid for short-range comparisons
    /// within a single tile.
    pub fn distance_euclidean(&self, other: LatLon) -> f64 {
        let dx = other.lon - self.lon;
        let dy = other.lat - self.lat;
        (dx * dx + dy * dy).sqrt()
    }

    /// Great-circle distance in meters, via the haversine formula.
    pub fn distance_haversine(&self, other: LatLon) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_M * c
    }

    /// Initial bearing in degrees (0-360) from self to other, spherical formula.
    pub fn bearing(&self, other: LatLon) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        let theta = y.atan2(x);
        (theta.to_degrees() + 360.0) % 360.0
    }
}

/// Foot of the perpendicular from `c` onto the line `a`-`b`, plus whether
/// that foot lies on the segment (as opposed to its extension).
/// Returns `(NaN, NaN)` with `inside = false` when `a == b`.
pub fn perpendicular_point(a: LatLon, b: LatLon, c: LatLon) -> (LatLon, bool) {
    let (ax, ay) = (a.lon, a.lat);
    let (bx, by) = (b.lon, b.lat);
    let (cx, cy) = (c.lon, c.lat);

    let denom = (bx - ax).powi(2) + (by - ay).powi(2);
    let t = ((cx - ax) * (bx - ax) + (cy - ay) * (by - ay)) / denom;
    let dx = ax + t * (bx - ax);
    let dy = ay + t * (by - ay);

    if dx.is_nan() || dy.is_nan() {
        return (LatLon::new(f64::NAN, f64::NAN), false);
    }

    let inside = dx >= ax.min(bx) && dy >= ay.min(by) && dx <= ax.max(bx) && dy <= ay.max(by);
    (LatLon::new(dy, dx), inside)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_distance_is_planar() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(3.0, 4.0);
        assert_eq!(a.distance_euclidean(b), 5.0);
    }

    #[test]
    fn perpendicular_point_degenerate_segment() {
        let a = LatLon::new(1.0, 1.0);
        let (p, inside) = perpendicular_point(a, a, LatLon::new(5.0, 5.0));
        assert!(p.lat.is_nan());
        assert!(!inside);
    }

    #[test]
    fn perpendicular_point_on_segment() {
        let a = LatLon::new(0.0, 0.0);
        let b = LatLon::new(0.0, 10.0);
        let c = LatLon::new(5.0, 5.0);
        let (p, inside) = perpendicular_point(a, b, c);
        assert!(inside);
        assert!((p.lat - 0.0).abs() < 1e-9);
        assert!((p.lon - 5.0).abs() < 1e-9);
    }
}
