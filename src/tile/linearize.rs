//! Ring linearization: relations reference their outer/inner boundary
//! as scattered way fragments in no particular order. This assembles
//! each role group's fragments into closed (or best-effort open) rings
//! by greedily extending whichever chain already reaches a shared
//! origin point, matching `roleItemGroup.linearizeCoords` in the
//! source extract.

use crate::geom::LatLon;

fn first(points: &[LatLon]) -> LatLon {
    points[0]
}

fn last(points: &[LatLon]) -> LatLon {
    points[points.len() - 1]
}

fn is_closed(points: &[LatLon]) -> bool {
    points.len() > 2 && first(points) == last(points)
}

fn can_connect_to(a: &[LatLon], b: &[LatLon]) -> bool {
    last(a) == first(b)
}

/// Any two chains that start at the same point mark that point as the
/// ring's origin; chains starting there become leaders that other
/// fragments get appended onto.
fn find_origin(chains: &[Vec<LatLon>]) -> Option<LatLon> {
    for i in 0..chains.len() {
        for j in (i + 1)..chains.len() {
            if first(&chains[i]) == first(&chains[j]) {
                return Some(first(&chains[i]));
            }
        }
    }
    None
}

pub fn linearize_coords(chains: Vec<Vec<LatLon>>) -> Vec<Vec<LatLon>> {
    let mut rings = Vec::new();
    let mut open: Vec<Vec<LatLon>> = Vec::new();

    for chain in chains {
        if is_closed(&chain) {
            rings.push(chain);
        } else if !chain.is_empty() {
            open.push(chain);
        }
    }

    if open.is_empty() {
        return rings;
    }

    let origin = find_origin(&open);
    let (mut leaders, mut others): (Vec<Vec<LatLon>>, Vec<Vec<LatLon>>) = match origin {
        Some(o) => open.into_iter().partition(|c| first(c) == o),
        None => {
            let mut iter = open.into_iter();
            let first_chain = iter.next().unwrap();
            (vec![first_chain], iter.collect())
        }
    };

    for leader in leaders.iter_mut() {
        loop {
            let mut extended = false;
            let mut i = 0;
            while i < others.len() {
                if can_connect_to(leader, &others[i]) {
                    let mut tail = others.remove(i);
                    leader.append(&mut tail);
                    extended = true;
                } else {
                    i += 1;
                }
            }
            if !extended {
                break;
            }
        }
    }

    rings.extend(leaders);
    rings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lon: f64) -> LatLon {
        LatLon::new(lat, lon)
    }

    #[test]
    fn already_closed_chain_passes_through() {
        let ring = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(0.0, 0.0)];
        let rings = linearize_coords(vec![ring.clone()]);
        assert_eq!(rings, vec![ring]);
    }

    #[test]
    fn two_half_rings_join_into_one_closed_ring() {
        let half_a = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)];
        let half_b = vec![p(1.0, 1.0), p(1.0, 0.0), p(0.0, 0.0)];
        let rings = linearize_coords(vec![half_a, half_b]);
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(first(ring), last(ring));
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn unrelated_chains_stay_separate() {
        let a = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(0.0, 0.0)];
        let b = vec![p(5.0, 5.0), p(5.0, 6.0), p(6.0, 6.0), p(5.0, 5.0)];
        let rings = linearize_coords(vec![a, b]);
        assert_eq!(rings.len(), 2);
    }

    #[test]
    fn a_fragment_only_extends_the_leader_it_connects_to() {
        // `a` and `c` both start at the shared origin (0,0), so both become
        // leaders; only `b` connects onto `a`'s end, leaving `c` untouched.
        let a = vec![p(0.0, 0.0), p(0.0, 1.0)];
        let b = vec![p(0.0, 1.0), p(1.0, 1.0)];
        let c = vec![p(0.0, 0.0), p(-1.0, -1.0)];
        let rings = linearize_coords(vec![a, b, c]);
        assert_eq!(rings.len(), 2);
        let lengths: Vec<usize> = rings.iter().map(|r| r.len()).collect();
        assert!(lengths.contains(&3));
        assert!(lengths.contains(&2));
    }
}
