use super::latlon::LatLon;

/// A line through two points, used for perpendicular-distance queries in
/// path simplification. Treats `(lon, lat)` as planar.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    pub start: LatLon,
    pub end: LatLon,
}

impl Line {
    pub fn new(start: LatLon, end: LatLon) -> Self {
        Line { start, end }
    }

    /// Coefficients `(a, b, c)` of the line equation `ax + by + c = 0`.
    fn coefficients(&self) -> (f64, f64, f64) {
        let a = self.start.lat - self.end.lat;
        let b = self.end.lon - self.start.lon;
        let c = self.start.lon * self.end.lat - self.end.lon * self.start.lat;
        (a, b, c)
    }

    pub fn distance_to(&self, coord: LatLon) -> f64 {
        let (a, b, c) = self.coefficients();
        (a * coord.lon + b * coord.lat + c).abs() / (a * a + b * b).sqrt()
    }

    /// Index and distance of the point in `points` farthest from this line.
    pub fn seek_most_distant(&self, points: &[LatLon]) -> (usize, f64) {
        let mut idx = 0;
        let mut max_dist = 0.0;
        for (i, p) in points.iter().enumerate() {
            let d = self.distance_to(*p);
            if d > max_dist {
                max_dist = d;
                idx = i;
            }
        }
        (idx, max_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_distant_point_matches_spec_example() {
        let line = Line::new(LatLon::new(0.0, 0.0), LatLon::new(0.0, 10.0));
        let points = [
            LatLon::new(13.0, 13.0),
            LatLon::new(15.0, 1.0),
            LatLon::new(1.0, 1.0),
            LatLon::new(6.0, 3.0),
        ];
        let (idx, dist) = line.seek_most_distant(&points);
        assert_eq!(idx, 1);
        assert!((dist - 15.0).abs() < 1e-9);
    }
}
