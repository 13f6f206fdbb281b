//! Ordered tag-to-style dispatch (§4.D). Rules are tried in a fixed
//! order and each applies only when its governing tag key is present;
//! later rules can override earlier ones, which is why `building` comes
//! before `natural`/`landuse` even though a feature rarely carries both.

use super::colors::{self, Color};
use super::icons::{self, Icon};
use crate::osm::model::TagMap;
use crate::tile::layers::{self, Layer};

#[derive(Debug, Clone)]
pub struct Style {
    pub fill_color: Option<Color>,
    pub line_color: Option<Color>,
    pub line_width: f64,
    pub line_dash: Option<Vec<f64>>,
    pub marker_color: Color,
    pub marker: Option<Icon>,
    pub marker_zoom_limit: u8,
    pub base_layer: Layer,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            fill_color: None,
            line_color: None,
            line_width: 1.0,
            line_dash: None,
            marker_color: colors::BROWN_900,
            marker: None,
            marker_zoom_limit: 0,
            base_layer: layers::BACKGROUND + 1,
        }
    }
}

impl Style {
    pub fn marker_visible(&self, zoom: u8) -> bool {
        self.marker_zoom_limit == 0 || zoom >= self.marker_zoom_limit
    }
}

pub struct StyleParam<'a> {
    pub tags: &'a TagMap,
    pub closed: bool,
}

fn tag<'a>(p: &StyleParam<'a>, key: &str) -> Option<&'a str> {
    p.tags.get(key).map(String::as_str)
}

type Rule = fn(&StyleParam, &mut Style);

const RULES: &[(&str, Rule)] = &[
    ("type", rule_relation_type),
    ("shop", rule_shop),
    ("building", rule_building),
    ("building:part", rule_building_part),
    ("amenity", rule_amenity),
    ("place", rule_place),
    ("highway", rule_highway),
    ("landuse", rule_landuse),
    ("natural", rule_natural),
    ("leisure", rule_leisure),
    ("route", rule_route),
    ("man_made", rule_man_made),
    ("railway", rule_railway),
    ("waterway", rule_waterway),
    ("boundary", rule_boundary),
    ("barrier", rule_barrier),
    ("power", rule_power),
];

/// Applies every matching rule, in order, plus any caller-supplied
/// custom stylers run last (the hook the source extract calls
/// `customStyler` — used by render-by-id mode to force a highlight
/// style regardless of tags).
pub fn style_from_tags(p: &StyleParam, customs: &[Rule]) -> Style {
    let mut style = Style::default();
    for (key, rule) in RULES {
        if p.tags.contains_key(*key) {
            rule(p, &mut style);
        }
    }
    for rule in customs {
        rule(p, &mut style);
    }
    style
}

fn rule_shop(_p: &StyleParam, s: &mut Style) {
    s.fill_color = Some(colors::GRAY_400);
    s.line_color = Some(colors::GRAY_600);
    s.base_layer = layers::BUILDING;
}

fn rule_building(_p: &StyleParam, s: &mut Style) {
    s.base_layer = layers::BUILDING;
    s.fill_color = Some(colors::GRAY_400);
    s.line_color = Some(colors::GRAY_600);
    if tag(_p, "building").map(|v| v == "stadium").unwrap_or(false) {
        s.fill_color = Some(colors::LIME_100);
        s.line_color = Some(colors::LIME_500);
    }
}

fn rule_building_part(_p: &StyleParam, s: &mut Style) {
    s.base_layer = layers::BUILDING;
    s.fill_color = Some(colors::GRAY_400);
    s.line_color = Some(colors::GRAY_600);
}

fn rule_amenity(p: &StyleParam, s: &mut Style) {
    s.base_layer = layers::AMENITY;
    match tag(p, "amenity") {
        Some("bar") | Some("biergarten") | Some("cafe") | Some("fast_food") | Some("food_court")
        | Some("ice_cream") | Some("pub") | Some("restaurant") => {
            s.fill_color = Some(colors::ORANGE_300);
            s.line_color = Some(colors::ORANGE_700);
        }
        Some("college") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
            s.marker = Some(icons::SCHOOL);
            s.marker_zoom_limit = 15;
        }
        Some("school") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
            s.marker = Some(icons::SCHOOL);
            s.marker_zoom_limit = 16;
        }
        Some("driving_school") | Some("language_school") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
        }
        Some("kindergarten") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
            s.marker = Some(icons::CHILD);
            s.marker_zoom_limit = 16;
        }
        Some("library") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
            s.marker = Some(icons::BOOK);
            s.marker_zoom_limit = 16;
        }
        Some("university") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
            s.marker = Some(icons::UNIVERSITY);
            s.marker_zoom_limit = 15;
        }
        Some("parking") => {
            s.fill_color = Some(colors::BLUE_GRAY_50);
            s.line_color = Some(colors::BLUE_GRAY_300);
            s.marker = Some(icons::PARKING);
            s.marker_zoom_limit = 16;
        }
        Some("hospital") => {
            s.fill_color = Some(colors::RED_50);
            s.line_color = Some(colors::RED_200);
            s.marker = Some(icons::HOSPITAL);
            s.marker_zoom_limit = 15;
        }
        Some("police") => {
            s.fill_color = Some(colors::RED_50);
            s.line_color = Some(colors::RED_200);
            s.marker = Some(icons::POLICE);
        }
        Some("fire_station") => {
            s.fill_color = Some(colors::RED_50);
            s.line_color = Some(colors::RED_200);
            s.marker = Some(icons::FIRE_STATION);
        }
        _ => {}
    }
}

fn rule_place(p: &StyleParam, s: &mut Style) {
    s.base_layer = layers::PLACE;
    match tag(p, "place") {
        Some("square") => {
            s.fill_color = Some(colors::BLUE_GRAY_50);
            s.line_color = Some(colors::BLUE_GRAY_300);
        }
        Some("village") => {
            s.fill_color = Some(colors::ORANGE_50);
            s.line_color = Some(colors::ORANGE_100);
        }
        _ => {}
    }
}

fn rule_highway(p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.marker_color = colors::BLUE_GRAY_900;
    s.base_layer = layers::ROAD;
    match tag(p, "highway") {
        Some("path") | Some("steps") => {
            s.line_width = 2.0;
            s.line_dash = Some(vec![3.0]);
            s.line_color = Some(colors::DEEP_PURPLE_400);
            s.marker_zoom_limit = 17;
        }
        Some("pedestrian") | Some("footway") => {
            s.line_width = 1.0;
            s.line_dash = Some(vec![3.0]);
            s.line_color = Some(colors::BLUE_GRAY_400);
            s.marker_zoom_limit = 17;
        }
        Some("service") | Some("residential") => {
            s.line_width = 2.0;
            s.line_color = Some(colors::RED_400);
            s.marker_zoom_limit = 17;
        }
        Some("tertiary") => {
            s.line_width = 2.0;
            s.line_color = Some(colors::RED_400);
            s.marker_zoom_limit = 16;
        }
        Some("secondary") | Some("secondary_link") => {
            s.line_width = 3.0;
            s.line_color = Some(colors::RED_400);
            s.marker_zoom_limit = 15;
        }
        Some("trunk") | Some("trunk_link") | Some("primary_link") => {
            s.line_width = 3.0;
            s.line_color = Some(colors::RED_400);
        }
        Some("primary") => {
            s.line_width = 5.0;
            s.line_color = Some(colors::RED_400);
        }
        _ => {
            s.line_width = 2.0;
            s.line_color = Some(colors::RED_400);
        }
    }
}

fn rule_landuse(p: &StyleParam, s: &mut Style) {
    s.base_layer = layers::LANDUSE;
    match tag(p, "landuse") {
        Some("residential") => {
            s.fill_color = Some(colors::ORANGE_50);
            s.line_color = Some(colors::ORANGE_100);
        }
        Some("commercial") => {
            s.fill_color = Some(colors::INDIGO_50);
            s.line_color = Some(colors::INDIGO_100);
        }
        Some("military") => {
            s.fill_color = Some(colors::BROWN_50);
            s.line_color = Some(colors::BROWN_100);
        }
        Some("forest") => {
            s.fill_color = Some(colors::GREEN_700);
            s.line_color = None;
        }
        Some("grass") => {
            s.fill_color = Some(colors::LIGHT_GREEN_200);
            s.line_color = Some(colors::LIGHT_GREEN_400);
        }
        Some("farmland") => {
            s.fill_color = Some(colors::LIGHT_GREEN_100);
            s.line_color = Some(colors::LIGHT_GREEN_200);
        }
        Some("stadium") => {
            s.fill_color = Some(colors::LIME_100);
            s.line_color = Some(colors::LIME_500);
        }
        Some("education") => {
            s.fill_color = Some(colors::CYAN_50);
            s.line_color = Some(colors::CYAN_400);
            s.marker = Some(icons::SCHOOL);
        }
        Some("railway") => {
            s.fill_color = Some(colors::GRAY_200);
            s.line_color = None;
        }
        _ => {}
    }
}

fn rule_natural(p: &StyleParam, s: &mut Style) {
    s.line_color = None;
    s.base_layer = layers::NATURE;
    match tag(p, "natural") {
        Some("fell") => s.fill_color = Some(colors::LIGHT_BLUE_100),
        Some("grassland") => s.fill_color = Some(colors::LIGHT_GREEN_200),
        Some("heath") => s.fill_color = Some(colors::LIGHT_GREEN_50),
        Some("scrub") => s.fill_color = Some(colors::LIGHT_GREEN_300),
        Some("wood") => {
            s.fill_color = Some(colors::GREEN_500);
            s.line_color = Some(colors::GREEN_700);
        }
        Some("water") | Some("bay") => s.fill_color = Some(colors::LIGHT_BLUE_100),
        Some("beach") | Some("sand") => s.fill_color = Some(colors::AMBER_100),
        Some("wetland") => s.fill_color = Some(colors::GRAY_300),
        Some("coastline") => {
            s.line_width = 2.0;
            s.line_color = Some(colors::BLUE_600);
            s.fill_color = None;
        }
        _ => {}
    }
}

fn rule_leisure(p: &StyleParam, s: &mut Style) {
    match tag(p, "leisure") {
        Some("stadium") | Some("sports_centre") => {
            s.fill_color = Some(colors::LIME_100);
            s.line_color = Some(colors::LIME_500);
            s.base_layer = layers::LANDUSE;
        }
        Some("track") => {
            s.fill_color = Some(colors::LIME_300);
            s.line_color = Some(colors::LIME_700);
            s.base_layer = layers::LANDUSE;
        }
        Some("schoolyard") => {
            s.fill_color = Some(colors::LIGHT_GREEN_100);
            s.line_color = Some(colors::LIGHT_GREEN_400);
            s.base_layer = layers::LANDUSE;
        }
        Some("park") => {
            s.fill_color = Some(colors::LIGHT_GREEN_200);
            s.line_color = Some(colors::LIGHT_GREEN_500);
            s.base_layer = layers::LANDUSE;
        }
        Some("garden") => {
            s.fill_color = Some(colors::LIGHT_GREEN_400);
            s.line_color = Some(colors::LIGHT_GREEN_800);
            s.base_layer = layers::LANDUSE;
        }
        Some("pitch") => {
            s.fill_color = Some(colors::TEAL_300);
            s.line_color = Some(colors::TEAL_500);
            s.base_layer = layers::LANDUSE;
        }
        Some("commercial") => {
            s.fill_color = Some(colors::INDIGO_50);
            s.line_color = Some(colors::INDIGO_100);
        }
        _ => {}
    }
}

fn rule_route(_p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.line_color = Some(colors::BROWN_800);
    s.base_layer = layers::ROUTE;
    if tag(_p, "route").map(|v| v == "ferry").unwrap_or(false) {
        s.line_color = Some(colors::BLUE_900);
        s.line_dash = Some(vec![4.0]);
    }
}

fn rule_man_made(p: &StyleParam, s: &mut Style) {
    match tag(p, "man_made") {
        Some("bridge") => {
            s.fill_color = Some(colors::GRAY_200);
            s.line_color = Some(colors::GRAY_500);
            s.line_width = 4.0;
            s.base_layer = layers::BUILDING;
        }
        Some("wastewater_plant") => {
            s.fill_color = Some(colors::GRAY_200);
            s.line_color = Some(colors::GRAY_500);
            s.base_layer = layers::LANDUSE;
        }
        _ => {}
    }
}

fn rule_railway(p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.line_color = Some(colors::BROWN_800);
    s.base_layer = layers::ROUTE;
    if tag(p, "railway").map(|v| v == "construction").unwrap_or(false) {
        s.line_color = Some(colors::BROWN_400);
        s.line_dash = Some(vec![10.0, 10.0]);
    }
}

fn rule_waterway(_p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.line_color = Some(colors::BLUE_800);
    s.base_layer = layers::ROUTE;
}

fn rule_boundary(p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.line_color = Some(colors::DEEP_PURPLE_400);
    s.base_layer = layers::BORDER;
    match tag(p, "boundary") {
        Some("postal_code") => s.line_color = Some(colors::BLUE_GRAY_200),
        Some("administrative") => {
            s.line_width = 4.0;
            s.line_dash = Some(vec![8.0, 12.0, 2.0, 12.0]);
        }
        _ => {}
    }
}

fn rule_barrier(_p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.line_color = Some(colors::BROWN_400);
    s.line_width = 1.0;
    s.line_dash = Some(vec![4.0]);
    s.base_layer = layers::BORDER;
}

fn rule_power(_p: &StyleParam, s: &mut Style) {
    s.fill_color = None;
    s.line_color = Some(colors::BROWN_600);
    s.line_dash = Some(vec![2.0, 8.0]);
    s.base_layer = layers::ROUTE;
}

/// A relation's own `type` tag dispatches to whichever feature-kind rule
/// its nested tags best match, in the same priority order the source
/// extract uses: natural outranks landuse outranks building, and so on.
fn rule_relation_type(p: &StyleParam, s: &mut Style) {
    if p.tags.contains_key("natural") {
        rule_natural(p, s);
    } else if p.tags.contains_key("landuse") {
        rule_landuse(p, s);
    } else if p.tags.contains_key("building") {
        rule_building(p, s);
    } else if p.tags.contains_key("man_made") {
        rule_man_made(p, s);
    } else if p.tags.contains_key("amenity") {
        rule_amenity(p, s);
    } else if p.tags.contains_key("leisure") {
        rule_leisure(p, s);
    } else if p.tags.contains_key("highway") {
        rule_highway(p, s);
    } else if p.tags.contains_key("waterway") {
        rule_waterway(p, s);
    } else if tag(p, "water").is_some() {
        s.fill_color = Some(colors::BLUE_100);
        s.base_layer = layers::NATURE;
    } else if tag(p, "type").map(|v| v == "route" || v == "route_master").unwrap_or(false) {
        rule_route(p, s);
    } else if tag(p, "type").map(|v| v == "boundary").unwrap_or(false) {
        rule_boundary(p, s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> TagMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn building_fills_gray_and_sits_in_building_layer() {
        let t = tags(&[("building", "yes")]);
        let style = style_from_tags(&StyleParam { tags: &t, closed: true }, &[]);
        assert_eq!(style.fill_color, Some(colors::GRAY_400));
        assert_eq!(style.base_layer, layers::BUILDING);
    }

    #[test]
    fn primary_highway_is_wider_than_secondary() {
        let primary = tags(&[("highway", "primary")]);
        let secondary = tags(&[("highway", "secondary")]);
        let p_style = style_from_tags(&StyleParam { tags: &primary, closed: false }, &[]);
        let s_style = style_from_tags(&StyleParam { tags: &secondary, closed: false }, &[]);
        assert!(p_style.line_width > s_style.line_width);
        assert_eq!(p_style.fill_color, None);
    }

    #[test]
    fn natural_tag_overrides_earlier_building_tag_because_it_runs_later() {
        let t = tags(&[("natural", "water"), ("building", "yes")]);
        let style = style_from_tags(&StyleParam { tags: &t, closed: true }, &[]);
        assert_eq!(style.fill_color, Some(colors::LIGHT_BLUE_100));
    }

    #[test]
    fn school_amenity_gets_a_zoom_gated_marker() {
        let t = tags(&[("amenity", "school")]);
        let style = style_from_tags(&StyleParam { tags: &t, closed: true }, &[]);
        assert!(style.marker.is_some());
        assert!(!style.marker_visible(10));
        assert!(style.marker_visible(16));
    }

    #[test]
    fn untagged_feature_gets_the_default_style() {
        let t = tags(&[]);
        let style = style_from_tags(&StyleParam { tags: &t, closed: false }, &[]);
        assert_eq!(style.fill_color, None);
        assert_eq!(style.line_color, None);
    }
}
