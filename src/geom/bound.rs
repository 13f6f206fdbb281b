use super::latlon::LatLon;
use serde::{Deserialize, Serialize};

/// Axis-aligned WGS84 rectangle. `min <= max` on both axes unless the
/// bound has been negatively padded into an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: LatLon,
    pub max: LatLon,
}

impl Bound {
    pub fn new(p1: LatLon, p2: LatLon) -> Self {
        Bound {
            min: LatLon::new(p1.lat.min(p2.lat), p1.lon.min(p2.lon)),
            max: LatLon::new(p1.lat.max(p2.lat), p1.lon.max(p2.lon)),
        }
    }

    pub fn make(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Bound {
            min: LatLon::new(min_lat, min_lon),
            max: LatLon::new(max_lat, max_lon),
        }
    }

    pub fn pad(&self, d: f64) -> Self {
        Bound {
            min: LatLon::new(self.min.lat - d, self.min.lon - d),
            max: LatLon::new(self.max.lat + d, self.max.lon + d),
        }
    }

    pub fn extend(&self, point: LatLon) -> Self {
        if self.contains(point) {
            return *self;
        }
        Bound {
            min: LatLon::new(self.min.lat.min(point.lat), self.min.lon.min(point.lon)),
            max: LatLon::new(self.max.lat.max(point.lat), self.max.lon.max(point.lon)),
        }
    }

    pub fn union(&self, other: Bound) -> Self {
        if other.is_empty() {
            return *self;
        }
        self.extend(other.min)
            .extend(other.max)
            .extend(other.left_top())
            .extend(other.right_bottom())
    }

    /// Closed on all sides: touching edges count as intersecting.
    pub fn intersects(&self, other: Bound) -> bool {
        !(other.max.lat < self.min.lat
            || other.min.lat > self.max.lat
            || other.max.lon < self.min.lon
            || other.min.lon > self.max.lon)
    }

    pub fn contains(&self, p: LatLon) -> bool {
        p.lat >= self.min.lat && p.lat <= self.max.lat && p.lon >= self.min.lon && p.lon <= self.max.lon
    }

    pub fn center(&self) -> LatLon {
        LatLon::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lon + self.max.lon) / 2.0,
        )
    }

    pub fn left_top(&self) -> LatLon {
        LatLon::new(self.max.lat, self.min.lon)
    }

    pub fn right_bottom(&self) -> LatLon {
        LatLon::new(self.min.lat, self.max.lon)
    }

    /// True when the bound has zero or negative area, e.g. after padding
    /// by a large negative delta.
    pub fn is_empty(&self) -> bool {
        self.min.lon > self.max.lon || self.min.lat > self.max.lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_always_contains_the_point() {
        let b = Bound::make(0.0, 0.0, 1.0, 1.0);
        let p = LatLon::new(5.0, -3.0);
        assert!(b.extend(p).contains(p));
    }

    #[test]
    fn union_covers_both_inputs() {
        let a = Bound::make(0.0, 0.0, 1.0, 1.0);
        let b = Bound::make(2.0, 2.0, 3.0, 3.0);
        let u = a.union(b);
        assert!(u.contains(a.min) && u.contains(a.max));
        assert!(u.contains(b.min) && u.contains(b.max));
    }

    #[test]
    fn pad_then_unpad_round_trips() {
        let b = Bound::make(10.0, 10.0, 20.0, 20.0);
        let round_tripped = b.pad(0.5).pad(-0.5);
        assert!((round_tripped.min.lat - b.min.lat).abs() < 1e-9);
        assert!((round_tripped.max.lon - b.max.lon).abs() < 1e-9);
    }

    #[test]
    fn negative_pad_can_make_empty() {
        let b = Bound::make(0.0, 0.0, 0.1, 0.1);
        assert!(b.pad(-1.0).is_empty());
    }

    #[test]
    fn intersects_is_closed_on_touching_edges() {
        let a = Bound::make(0.0, 0.0, 1.0, 1.0);
        let b = Bound::make(1.0, 1.0, 2.0, 2.0);
        assert!(a.intersects(b));
        assert!(b.intersects(a));
    }
}
