//! Tile compilation: object model, z-order, ring linearization, the
//! builder pipeline and the cairo raster backend.

pub mod builder;
pub mod coords;
pub mod layers;
pub mod linearize;
pub mod objects;
pub mod raster;

pub use builder::TileBuilder;
pub use coords::{tile_to_bounds, tile_to_lat_lon, CoordTransform, TILE_SIZE};
pub use layers::Layer;
pub use objects::Object;
