//! Tag-driven cartographic styling: colors, marker icons and the ordered
//! rule list that turns a feature's tags into a drawable `Style`.

pub mod colors;
pub mod engine;
pub mod icons;

pub use colors::Color;
pub use engine::{style_from_tags, Style, StyleParam};
pub use icons::Icon;
