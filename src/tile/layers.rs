//! Z-order tiers and the draw-order comparator (§4.E).
//!
//! Layers are bit-shifted tiers so a single `u32` totally orders coarse
//! categories (background below nature below roads below buildings,
//! and so on) while leaving room for a fine area-based tiebreak within
//! a tier.

pub type Layer = u32;

pub const BACKGROUND: Layer = 0x0;
pub const NATURE: Layer = 0xF0;
pub const LANDUSE: Layer = 0xF00;
pub const PLACE: Layer = 0xF000;
pub const AMENITY: Layer = 0xF0000;
pub const ROAD: Layer = 0xFF000;
pub const BUILDING: Layer = 0xF00000;
pub const ROUTE: Layer = 0xF000000;
pub const BORDER: Layer = 0xF000000;
pub const AERO: Layer = 0xF0000000;
pub const LABEL: Layer = 0xFFFFFF00;
pub const WATERMARK: Layer = 0xFFFFFFFF;

/// A drawable surface's draw-order participation: whether it is a
/// label (always drawn above polygons) or a filled/stroked polygon
/// (ordered by layer tier, then by area within `PLACE` and above).
#[derive(Debug, Clone, Copy)]
pub enum DrawKind {
    Label,
    Polygon { has_fill: bool, area: f64 },
}

/// Returns `true` if `lo` must be drawn before `ro` (i.e. `lo` sorts
/// earlier / ends up visually below `ro`). Mirrors `LayerCompareOrder`:
/// polygons always draw before labels; among polygons, a lower base
/// layer wins outright below `PLACE`, and at or above `PLACE` the
/// larger-area fill draws first so small features aren't buried.
pub fn draws_before(lo_layer: Layer, lo: DrawKind, ro_layer: Layer, ro: DrawKind) -> bool {
    match (lo, ro) {
        (DrawKind::Label, DrawKind::Label) => lo_layer < ro_layer,
        (DrawKind::Polygon { .. }, DrawKind::Label) => true,
        (DrawKind::Label, DrawKind::Polygon { .. }) => false,
        (
            DrawKind::Polygon { has_fill: lo_fill, area: lo_area },
            DrawKind::Polygon { has_fill: ro_fill, area: ro_area },
        ) => {
            if (lo_layer < PLACE || ro_layer < PLACE) && lo_layer != ro_layer {
                return lo_layer < ro_layer;
            }
            if lo_fill && ro_fill {
                lo_area > ro_area
            } else {
                lo_fill
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_always_draw_before_labels() {
        let poly = DrawKind::Polygon { has_fill: true, area: 1.0 };
        assert!(draws_before(BUILDING, poly, LABEL, DrawKind::Label));
        assert!(!draws_before(LABEL, DrawKind::Label, BUILDING, poly));
    }

    #[test]
    fn lower_tier_draws_before_higher_tier_below_place() {
        let poly = DrawKind::Polygon { has_fill: true, area: 1.0 };
        assert!(draws_before(NATURE, poly, LANDUSE, poly));
        assert!(!draws_before(LANDUSE, poly, NATURE, poly));
    }

    #[test]
    fn larger_area_draws_first_at_or_above_place() {
        let big = DrawKind::Polygon { has_fill: true, area: 100.0 };
        let small = DrawKind::Polygon { has_fill: true, area: 1.0 };
        assert!(draws_before(BUILDING, big, BUILDING, small));
        assert!(!draws_before(BUILDING, small, BUILDING, big));
    }

    #[test]
    fn below_place_tier_wins_even_against_an_at_or_above_place_tier() {
        let small_below_place = DrawKind::Polygon { has_fill: true, area: 1.0 };
        let huge_at_amenity = DrawKind::Polygon { has_fill: true, area: 1_000.0 };
        assert!(draws_before(NATURE, small_below_place, AMENITY, huge_at_amenity));
        assert!(!draws_before(AMENITY, huge_at_amenity, NATURE, small_below_place));
    }

    #[test]
    fn filled_polygon_draws_before_unfilled_at_same_tier() {
        let filled = DrawKind::Polygon { has_fill: true, area: 1.0 };
        let unfilled = DrawKind::Polygon { has_fill: false, area: 1.0 };
        assert!(draws_before(BUILDING, filled, BUILDING, unfilled));
        assert!(!draws_before(BUILDING, unfilled, BUILDING, filled));
    }
}
