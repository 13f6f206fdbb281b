//! The drawable object model: every compiled feature becomes one of
//! these before the builder sorts and rasterizes them (`tiles/objects.go`).

use crate::geom::{Bound, LatLon};
use crate::style::{Icon, Style};
use crate::tile::layers::{self, DrawKind, Layer};

/// A fully compiled, ready-to-draw feature. Coordinates stay in WGS84
/// lat/lon until the raster backend projects them through the tile's
/// coordinate transform at draw time.
#[derive(Debug, Clone)]
pub enum Object {
    Polygon(PolygonObject),
    MultiPolygon(MultiPolygonObject),
    Label(LabelObject),
    Background(Color),
    Watermark { text: String, tint: bool },
}

pub use crate::style::colors::Color;

#[derive(Debug, Clone)]
pub struct PolygonObject {
    pub outer: Vec<LatLon>,
    pub inner: Vec<LatLon>,
    pub layer: Layer,
    pub fill_color: Option<Color>,
    pub line_color: Option<Color>,
    pub line_width: f64,
    pub line_dash: Option<Vec<f64>>,
    area: std::cell::Cell<Option<f64>>,
}

impl PolygonObject {
    pub fn new(outer: Vec<LatLon>, inner: Vec<LatLon>, style: &Style) -> Self {
        PolygonObject {
            outer,
            inner,
            layer: if style.base_layer == 0 { layers::NATURE } else { style.base_layer },
            fill_color: style.fill_color,
            line_color: style.line_color,
            line_width: style.line_width,
            line_dash: style.line_dash.clone(),
            area: std::cell::Cell::new(None),
        }
    }

    /// Bounding-box area, not true polygon area — matches the source
    /// extract's `_calcArea`, which is itself an approximation.
    pub fn area(&self) -> f64 {
        if let Some(a) = self.area.get() {
            return a;
        }
        let a = bbox_area(&self.outer);
        self.area.set(Some(a));
        a
    }

    pub fn distance_from(&self, p: LatLon) -> f64 {
        min_distance_from(&self.outer, p)
    }

    pub fn draw_kind(&self) -> DrawKind {
        DrawKind::Polygon { has_fill: self.fill_color.is_some(), area: self.area() }
    }
}

#[derive(Debug, Clone)]
pub struct MultiPolygonObject {
    pub outers: Vec<Vec<LatLon>>,
    pub inners: Vec<Vec<LatLon>>,
    pub layer: Layer,
    pub fill_color: Option<Color>,
    pub line_color: Option<Color>,
    pub line_width: f64,
    pub line_dash: Option<Vec<f64>>,
    area: std::cell::Cell<Option<f64>>,
}

impl MultiPolygonObject {
    pub fn new(outers: Vec<Vec<LatLon>>, inners: Vec<Vec<LatLon>>, style: &Style) -> Self {
        MultiPolygonObject {
            outers,
            inners,
            layer: if style.base_layer == 0 { layers::NATURE } else { style.base_layer },
            fill_color: style.fill_color,
            line_color: style.line_color,
            line_width: style.line_width,
            line_dash: style.line_dash.clone(),
            area: std::cell::Cell::new(None),
        }
    }

    pub fn area(&self) -> f64 {
        if let Some(a) = self.area.get() {
            return a;
        }
        let a = self.outers.iter().map(|ring| bbox_area(ring)).sum();
        self.area.set(Some(a));
        a
    }

    pub fn distance_from(&self, p: LatLon) -> f64 {
        self.outers
            .iter()
            .map(|ring| min_distance_from(ring, p))
            .fold(f64::MAX, f64::min)
    }

    pub fn draw_kind(&self) -> DrawKind {
        DrawKind::Polygon { has_fill: self.fill_color.is_some(), area: self.area() }
    }
}

#[derive(Debug, Clone)]
pub struct LabelObject {
    pub text: String,
    pub anchor: LatLon,
    pub rotation: f64,
    pub icon: Option<Icon>,
    pub color: Option<Color>,
    pub marker_zoom_limit: u8,
}

impl LabelObject {
    pub fn distance_from(&self, p: LatLon) -> f64 {
        self.anchor.distance_euclidean(p)
    }

    /// Labels stay cached independent of zoom; the zoom/hide-labels gate
    /// is applied by the builder after pulling the object out of cache.
    pub fn visible(&self, zoom: u8, hide_labels: bool) -> bool {
        !hide_labels && (self.marker_zoom_limit == 0 || zoom >= self.marker_zoom_limit)
    }
}

impl Object {
    pub fn bound(&self) -> Option<Bound> {
        match self {
            Object::Polygon(p) => Some(points_bound(&p.outer)),
            Object::MultiPolygon(m) => m.outers.first().map(|r| points_bound(r)),
            Object::Label(l) => Some(Bound::new(l.anchor, l.anchor)),
            Object::Background(_) | Object::Watermark { .. } => None,
        }
    }
}

fn points_bound(points: &[LatLon]) -> Bound {
    let mut b = Bound::make(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        b = b.extend(*p);
    }
    b
}

fn bbox_area(points: &[LatLon]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let b = points_bound(points);
    (b.max.lon - b.min.lon) * (b.max.lat - b.min.lat)
}

fn min_distance_from(ring: &[LatLon], p: LatLon) -> f64 {
    if ring.len() < 2 {
        return ring.first().map(|a| a.distance_euclidean(p)).unwrap_or(f64::MAX);
    }
    let mut best = f64::MAX;
    for pair in ring.windows(2) {
        let line = crate::geom::Line::new(pair[0], pair[1]);
        let d = line.distance_to(p);
        if d < best {
            best = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    fn square() -> Vec<LatLon> {
        vec![
            LatLon::new(0.0, 0.0),
            LatLon::new(0.0, 2.0),
            LatLon::new(2.0, 2.0),
            LatLon::new(2.0, 0.0),
            LatLon::new(0.0, 0.0),
        ]
    }

    #[test]
    fn polygon_area_is_bounding_box_area() {
        let style = Style::default();
        let poly = PolygonObject::new(square(), Vec::new(), &style);
        assert_eq!(poly.area(), 4.0);
    }

    #[test]
    fn area_is_cached_across_calls() {
        let style = Style::default();
        let poly = PolygonObject::new(square(), Vec::new(), &style);
        assert_eq!(poly.area(), poly.area());
    }

    #[test]
    fn distance_from_is_zero_on_the_boundary() {
        let style = Style::default();
        let poly = PolygonObject::new(square(), Vec::new(), &style);
        assert!(poly.distance_from(LatLon::new(0.0, 1.0)) < 1e-9);
    }
}
