use super::latlon::LatLon;
use super::line::Line;

/// Ramer-Douglas-Peucker simplification. Fewer than three points are
/// returned unchanged; endpoints are always preserved.
pub fn simplify_path(points: &[LatLon], epsilon: f64) -> Vec<LatLon> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let line = Line::new(points[0], points[points.len() - 1]);
    let (idx, max_dist) = line.seek_most_distant(points);

    if max_dist >= epsilon {
        let left = simplify_path(&points[..=idx], epsilon);
        let right = simplify_path(&points[idx..], epsilon);
        let mut joined = left[..left.len() - 1].to_vec();
        joined.extend(right);
        joined
    } else {
        vec![points[0], points[points.len() - 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<LatLon> {
        [
            (0.0, 0.0),
            (1.0, 2.0),
            (2.0, 7.0),
            (3.0, 1.0),
            (4.0, 8.0),
            (5.0, 2.0),
            (6.0, 8.0),
            (7.0, 3.0),
            (8.0, 3.0),
            (9.0, 0.0),
        ]
        .iter()
        .map(|&(lat, lon)| LatLon::new(lat, lon))
        .collect()
    }

    #[test]
    fn epsilon_zero_keeps_all_points() {
        assert_eq!(simplify_path(&zigzag(), 0.0).len(), 10);
    }

    #[test]
    fn epsilon_two_keeps_seven_points() {
        assert_eq!(simplify_path(&zigzag(), 2.0).len(), 7);
    }

    #[test]
    fn large_epsilon_keeps_only_endpoints() {
        assert_eq!(simplify_path(&zigzag(), 100.0).len(), 2);
    }

    #[test]
    fn endpoints_are_always_preserved() {
        let pts = zigzag();
        let simplified = simplify_path(&pts, 3.0);
        assert_eq!(simplified.first(), pts.first());
        assert_eq!(simplified.last(), pts.last());
    }

    #[test]
    fn simplify_is_idempotent() {
        let pts = zigzag();
        let once = simplify_path(&pts, 2.0);
        let twice = simplify_path(&once, 2.0);
        assert_eq!(once, twice);
    }
}
