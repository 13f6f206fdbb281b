//! Compiles a bounded selection of OSM features into a sorted, clipped
//! list of drawable objects (`tiles/builders.go`'s `DefaultBuilder`).

use crate::cache::{node_cache_key, relation_cache_key, way_cache_key, ObjectCache};
use crate::geom::{Bound, LatLon};
use crate::osm::model::{MemberType, Node, Relation, RelationMember, Way};
use crate::style::engine::{style_from_tags, StyleParam};
use crate::tile::layers::{self, DrawKind, Layer};
use crate::tile::linearize::linearize_coords;
use crate::tile::objects::{Color, LabelObject, MultiPolygonObject, Object, PolygonObject};

/// Radius padding applied to the bounds' half-diagonal when deciding
/// whether a compiled feature is close enough to draw; mirrors the
/// `* 1.1` slack in the source extract's `Build`.
const VISIBILITY_RADIUS_SLACK: f64 = 1.1;

pub struct TileBuilder {
    pub bounds: Bound,
    pub zoom: u8,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub hide_labels: bool,
    pub watermark: Option<String>,
    pub tint: bool,
    pub build_layer_start: Layer,
    pub build_layer_end: Layer,
}

impl TileBuilder {
    pub fn new(bounds: Bound, zoom: u8, canvas_width: f64, canvas_height: f64) -> Self {
        TileBuilder {
            bounds,
            zoom,
            canvas_width,
            canvas_height,
            hide_labels: false,
            watermark: None,
            tint: false,
            build_layer_start: layers::BACKGROUND,
            build_layer_end: layers::WATERMARK,
        }
    }

    pub fn set_hide_labels(&mut self, hide: bool) -> &mut Self {
        self.hide_labels = hide;
        self
    }

    pub fn set_watermark(&mut self, text: Option<String>) -> &mut Self {
        self.watermark = text;
        self
    }

    pub fn set_tint(&mut self, tint: bool) -> &mut Self {
        self.tint = tint;
        self
    }

    pub fn set_build_layer_range(&mut self, start: Layer, end: Layer) -> &mut Self {
        self.build_layer_start = start.min(end);
        self.build_layer_end = start.max(end);
        self
    }

    /// Compiles `ways`/`relations`/`nodes` into the final draw list.
    /// Compilation goes through `cache`, keyed by feature id, so a
    /// feature shared by adjacent tiles is only ever compiled once;
    /// visibility and distance filtering run after the cache lookup so
    /// the cached object stays zoom-independent.
    pub fn build(&self, ways: &[Way], relations: &[Relation], nodes: &[Node], cache: &ObjectCache) -> Vec<Object> {
        let center = self.bounds.center();
        let radius = center.distance_euclidean(self.bounds.max) * VISIBILITY_RADIUS_SLACK;

        let mut objects = Vec::new();

        for rel in relations {
            let key = relation_cache_key(rel.id);
            let compiled = cache.get_or_compile(&key, || compile_relation(rel));
            for obj in compiled {
                if self.keep(&obj, center, radius) {
                    objects.push(obj);
                }
            }
        }

        for way in ways {
            let key = way_cache_key(way.id);
            let compiled = cache.get_or_compile(&key, || compile_way(way));
            for obj in compiled {
                if self.keep(&obj, center, radius) {
                    objects.push(obj);
                }
            }
        }

        // Bare nodes never produce drawables (`compile_node` below), but we
        // still run them through the cache so a future node-icon feature
        // has a slot to compile into without touching this loop's shape.
        for node in nodes {
            let key = node_cache_key(node.id);
            let compiled = cache.get_or_compile(&key, || compile_node(node));
            for obj in compiled {
                if self.keep(&obj, center, radius) {
                    objects.push(obj);
                }
            }
        }

        objects.sort_by(cmp_objects);

        let mut objects = clip_to_layer_range(objects, self.build_layer_start, self.build_layer_end);

        objects.insert(0, Object::Background(BACKGROUND_COLOR));
        if self.watermark.is_some() || self.tint {
            objects.push(Object::Watermark {
                text: self.watermark.clone().unwrap_or_default(),
                tint: self.tint,
            });
        }

        objects
    }

    fn keep(&self, obj: &Object, center: LatLon, radius: f64) -> bool {
        match obj {
            Object::Polygon(p) => p.distance_from(center) <= radius,
            Object::MultiPolygon(m) => m.distance_from(center) <= radius,
            Object::Label(l) => l.visible(self.zoom, self.hide_labels) && l.distance_from(center) <= radius,
            Object::Background(_) | Object::Watermark { .. } => true,
        }
    }
}

/// Flat `#9E9E9E` gray, per the rendered-tile reference property.
const BACKGROUND_COLOR: Color = Color { r: 0x9e as f64 / 255.0, g: 0x9e as f64 / 255.0, b: 0x9e as f64 / 255.0 };

fn clip_to_layer_range(objects: Vec<Object>, start: Layer, end: Layer) -> Vec<Object> {
    objects
        .into_iter()
        .filter(|o| {
            let layer = match o {
                Object::Polygon(p) => p.layer,
                Object::MultiPolygon(m) => m.layer,
                Object::Label(_) => layers::LABEL,
                Object::Background(_) | Object::Watermark { .. } => return true,
            };
            layer >= start && layer < end
        })
        .collect()
}

fn object_sort_key(obj: &Object) -> (Layer, DrawKind) {
    match obj {
        Object::Polygon(p) => (p.layer, p.draw_kind()),
        Object::MultiPolygon(m) => (m.layer, m.draw_kind()),
        Object::Label(_) => (layers::LABEL, DrawKind::Label),
        Object::Background(_) => (layers::BACKGROUND, DrawKind::Label),
        Object::Watermark { .. } => (layers::WATERMARK, DrawKind::Label),
    }
}

fn cmp_objects(a: &Object, b: &Object) -> std::cmp::Ordering {
    let (la, ka) = object_sort_key(a);
    let (lb, kb) = object_sort_key(b);
    if layers::draws_before(la, ka, lb, kb) {
        std::cmp::Ordering::Less
    } else if layers::draws_before(lb, kb, la, ka) {
        std::cmp::Ordering::Greater
    } else {
        std::cmp::Ordering::Equal
    }
}

/// Pole-of-inaccessibility label anchor for a filled polygon, so a label
/// sits visually centered inside an irregular shape (an L-shaped building,
/// say) instead of at its bounding-box midpoint. Falls back to `fallback`
/// if the ring is degenerate.
fn polylabel_anchor(outer: &[LatLon], inners: &[Vec<LatLon>], fallback: LatLon) -> LatLon {
    use geo::{Coord, LineString, Polygon};

    if outer.len() < 3 {
        return fallback;
    }
    let exterior: LineString<f64> = outer.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect();
    let holes: Vec<LineString<f64>> = inners
        .iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| ring.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect())
        .collect();
    let polygon = Polygon::new(exterior, holes);

    match polylabel::polylabel(&polygon, &1e-6) {
        Ok(point) => LatLon::new(point.y(), point.x()),
        Err(_) => fallback,
    }
}

fn way_points(way: &Way) -> Vec<LatLon> {
    way.node_refs.iter().map(|r| LatLon::new(r.lat, r.lon)).collect()
}

fn member_points(member: &RelationMember) -> Vec<LatLon> {
    member.way_node_refs.iter().map(|r| LatLon::new(r.lat, r.lon)).collect()
}

/// Bare nodes currently produce no drawables — matches `compileNode` in
/// the source extract, which always returns an empty slice.
fn compile_node(_node: &Node) -> Vec<Object> {
    Vec::new()
}

fn compile_way(way: &Way) -> Vec<Object> {
    let closed = way.is_closed();
    let style = style_from_tags(&StyleParam { tags: &way.tags, closed }, &[]);
    let outer = way_points(way);

    let mut objects = vec![Object::Polygon(PolygonObject::new(outer.clone(), Vec::new(), &style))];

    if let Some(name) = way.find_tag("name") {
        let (anchor, rotation) = if style.fill_color.is_some() {
            (polylabel_anchor(&outer, &[], way.bound.center()), 0.0)
        } else if outer.len() >= 2 {
            let (a, b) = (outer[0], outer[1]);
            let midpoint = LatLon::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0);
            (midpoint, (b.lat - a.lat).atan2(b.lon - a.lon))
        } else {
            (way.bound.center(), 0.0)
        };
        objects.push(Object::Label(LabelObject {
            text: name.to_string(),
            anchor,
            rotation,
            icon: style.marker,
            color: Some(style.marker_color),
            marker_zoom_limit: style.marker_zoom_limit,
        }));
    }

    objects
}

fn compile_relation(rel: &Relation) -> Vec<Object> {
    let style = style_from_tags(&StyleParam { tags: &rel.tags, closed: true }, &[]);
    let mut objects = Vec::new();

    let mut outer_chains = Vec::new();
    let mut inner_chains = Vec::new();

    for member in &rel.members {
        if member.member_type != MemberType::Way {
            continue;
        }
        let points = member_points(member);
        match member.role.as_str() {
            "outer" => outer_chains.push(points),
            "inner" => inner_chains.push(points),
            // Any other role (or none) stands alone as its own polygon,
            // matching `buildPolygonLineString` in the source extract.
            _ => {
                if !points.is_empty() {
                    objects.push(Object::Polygon(PolygonObject::new(points, Vec::new(), &style)));
                }
            }
        }
    }

    let outers = linearize_coords(outer_chains);
    let inners = linearize_coords(inner_chains);

    if let Some(name) = rel.find_tag("name") {
        let anchor = outers
            .first()
            .map(|ring| polylabel_anchor(ring, &inners, rel.bound.center()))
            .unwrap_or_else(|| rel.bound.center());
        objects.push(Object::Label(LabelObject {
            text: name.to_string(),
            anchor,
            rotation: 0.0,
            icon: style.marker,
            color: Some(style.marker_color),
            marker_zoom_limit: style.marker_zoom_limit,
        }));
    }

    if !outers.is_empty() {
        objects.push(Object::MultiPolygon(MultiPolygonObject::new(outers, inners, &style)));
    }

    objects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osm::model::NodeRef;
    use std::collections::HashMap as Map;

    fn way(id: i64, tags: &[(&str, &str)], coords: &[(f64, f64)]) -> Way {
        let node_refs = coords
            .iter()
            .enumerate()
            .map(|(i, &(lat, lon))| NodeRef { id: i as i64, lat, lon })
            .collect::<Vec<_>>();
        let mut bound = Bound::make(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for r in &node_refs {
            bound = bound.extend(LatLon::new(r.lat, r.lon));
        }
        Way {
            id,
            tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            node_refs,
            bound,
        }
    }

    #[test]
    fn a_named_building_gets_one_polygon_and_one_centered_label() {
        let w = way(
            1,
            &[("building", "yes"), ("name", "Town Hall")],
            &[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)],
        );
        let objs = compile_way(&w);
        assert_eq!(objs.len(), 2);
        match &objs[1] {
            Object::Label(l) => assert_eq!(l.text, "Town Hall"),
            _ => panic!("expected a label"),
        }
    }

    #[test]
    fn named_road_label_anchors_at_first_segment_midpoint() {
        let w = way(1, &[("highway", "primary"), ("name", "Main St")], &[(0.0, 0.0), (0.0, 2.0), (0.0, 4.0)]);
        let objs = compile_way(&w);
        match &objs[1] {
            Object::Label(l) => {
                assert!((l.anchor.lat - 0.0).abs() < 1e-9);
                assert!((l.anchor.lon - 1.0).abs() < 1e-9);
                assert!(l.color.is_some());
            }
            _ => panic!("expected a label"),
        }
    }

    #[test]
    fn unnamed_way_produces_only_a_polygon() {
        let w = way(1, &[("landuse", "forest")], &[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        assert_eq!(compile_way(&w).len(), 1);
    }

    #[test]
    fn bare_node_compiles_to_nothing() {
        let n = Node { id: 1, tags: Map::new(), lat: 0.0, lon: 0.0 };
        assert!(compile_node(&n).is_empty());
    }

    #[test]
    fn builder_clips_objects_outside_the_requested_layer_range() {
        let bounds = Bound::make(-1.0, -1.0, 3.0, 3.0);
        let mut builder = TileBuilder::new(bounds, 15, 512.0, 512.0);
        builder.set_build_layer_range(layers::ROAD, layers::BUILDING);

        let building_way = way(1, &[("building", "yes")], &[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let road_way = way(2, &[("highway", "primary")], &[(0.0, 0.0), (1.0, 1.0)]);
        let cache = ObjectCache::new(10);

        let objects = builder.build(&[building_way, road_way], &[], &[], &cache);
        let has_polygon = objects.iter().any(|o| matches!(o, Object::Polygon(_)));
        assert!(!has_polygon, "building layer is outside [ROAD, BUILDING)");
    }

    #[test]
    fn build_always_prepends_a_background_object() {
        let bounds = Bound::make(-1.0, -1.0, 1.0, 1.0);
        let builder = TileBuilder::new(bounds, 15, 512.0, 512.0);
        let cache = ObjectCache::new(10);
        let objects = builder.build(&[], &[], &[], &cache);
        assert!(matches!(objects[0], Object::Background(_)));
    }
}
