//! Geometry kernel: `LatLon`/`Bound`/`Line` algebra and RDP simplification.
//! Pure and stateless — no I/O, no OSM-specific types.

mod bound;
mod latlon;
mod line;
mod simplify;

pub use bound::Bound;
pub use latlon::{perpendicular_point, LatLon};
pub use line::Line;
pub use simplify::simplify_path;
