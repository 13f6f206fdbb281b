//! Cairo-backed rasterization: walks the sorted object list and paints
//! it onto an ARGB32 surface, then encodes PNG (`tiles/tiles.go`'s
//! `EncodePNG` plus the per-object `Draw` methods in `tiles/objects.go`).

use crate::error::OtsError;
use crate::geom::LatLon;
use crate::tile::coords::CoordTransform;
use crate::tile::objects::{Color, LabelObject, MultiPolygonObject, Object, PolygonObject};
use cairo::{Context, Format, ImageSurface};

const WATERMARK_TEXT_ALPHA: f64 = 0x30 as f64 / 255.0;
const WATERMARK_TINT_ALPHA: f64 = 0x0f as f64 / 255.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const ICON_FONT_SIZE: f64 = 14.0;

fn cairo_err(e: impl std::fmt::Display) -> OtsError {
    OtsError::Encode(e.to_string())
}

fn trace_ring(ctx: &Context, ring: &[LatLon], transform: &CoordTransform) {
    if ring.len() < 2 {
        return;
    }
    let (x0, y0) = transform(ring[0]);
    ctx.move_to(x0, y0);
    for p in &ring[1..] {
        let (x, y) = transform(*p);
        ctx.line_to(x, y);
    }
    ctx.close_path();
}

fn draw_rings(
    ctx: &Context,
    outers: &[&[LatLon]],
    inners: &[&[LatLon]],
    fill: Option<Color>,
    line: Option<Color>,
    line_width: f64,
    line_dash: Option<&[f64]>,
    transform: &CoordTransform,
) -> Result<(), OtsError> {
    if let Some(fill) = fill {
        ctx.new_path();
        for outer in outers {
            trace_ring(ctx, outer, transform);
        }
        for inner in inners {
            if inner.len() > 2 {
                trace_ring(ctx, inner, transform);
            }
        }
        ctx.set_fill_rule(cairo::FillRule::EvenOdd);
        ctx.set_source_rgb(fill.r, fill.g, fill.b);
        ctx.fill().map_err(cairo_err)?;
    }

    if let Some(line) = line {
        ctx.new_path();
        for outer in outers {
            trace_ring(ctx, outer, transform);
        }
        ctx.set_source_rgb(line.r, line.g, line.b);
        ctx.set_line_width(line_width);
        match line_dash {
            Some(d) => ctx.set_dash(d, 0.0),
            None => ctx.set_dash(&[], 0.0),
        }
        ctx.stroke().map_err(cairo_err)?;
    }

    Ok(())
}

fn draw_polygon(ctx: &Context, p: &PolygonObject, transform: &CoordTransform) -> Result<(), OtsError> {
    draw_rings(
        ctx,
        &[&p.outer],
        &[&p.inner],
        p.fill_color,
        p.line_color,
        p.line_width,
        p.line_dash.as_deref(),
        transform,
    )
}

fn draw_multi_polygon(ctx: &Context, m: &MultiPolygonObject, transform: &CoordTransform) -> Result<(), OtsError> {
    let outers: Vec<&[LatLon]> = m.outers.iter().map(|r| r.as_slice()).collect();
    let inners: Vec<&[LatLon]> = m.inners.iter().map(|r| r.as_slice()).collect();
    draw_rings(
        ctx,
        &outers,
        &inners,
        m.fill_color,
        m.line_color,
        m.line_width,
        m.line_dash.as_deref(),
        transform,
    )
}

fn draw_label(ctx: &Context, label: &LabelObject, transform: &CoordTransform) -> Result<(), OtsError> {
    let (x, y) = transform(label.anchor);
    ctx.save().map_err(cairo_err)?;
    ctx.translate(x, y);
    ctx.rotate(label.rotation);

    let color = label.color.unwrap_or(Color { r: 0.0, g: 0.0, b: 0.0 });
    ctx.set_source_rgb(color.r, color.g, color.b);
    ctx.select_font_face("sans-serif", cairo::FontSlant::Normal, cairo::FontWeight::Normal);

    let mut text_y = 0.0;
    if let Some(icon) = &label.icon {
        ctx.set_font_size(ICON_FONT_SIZE);
        ctx.move_to(-ICON_FONT_SIZE / 2.0, ICON_FONT_SIZE / 2.0);
        ctx.show_text(&icon.glyph.to_string()).map_err(cairo_err)?;
        text_y = ICON_FONT_SIZE / 2.0 + LABEL_FONT_SIZE;
    }

    ctx.set_font_size(LABEL_FONT_SIZE);
    ctx.move_to(-((label.text.len() as f64) * LABEL_FONT_SIZE * 0.25), text_y);
    ctx.show_text(&label.text).map_err(cairo_err)?;

    ctx.restore().map_err(cairo_err)
}

fn draw_background(ctx: &Context, color: Color) -> Result<(), OtsError> {
    ctx.set_source_rgb(color.r, color.g, color.b);
    ctx.paint().map_err(cairo_err)
}

fn draw_watermark(ctx: &Context, text: &str, tint: bool, width: f64, height: f64) -> Result<(), OtsError> {
    if tint {
        ctx.set_source_rgba(0.0, 0.0, 0.0, WATERMARK_TINT_ALPHA);
        ctx.rectangle(0.0, 0.0, width, height);
        ctx.fill().map_err(cairo_err)?;
    }
    if !text.is_empty() {
        ctx.set_source_rgba(0.0, 0.0, 0.0, WATERMARK_TEXT_ALPHA);
        ctx.select_font_face("sans-serif", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        ctx.set_font_size(14.0);
        ctx.move_to(10.0, height - 10.0);
        ctx.show_text(text).map_err(cairo_err)?;
    }
    Ok(())
}

/// Draws `objects` (already sorted in draw order by the builder) onto a
/// fresh `width x height` ARGB32 surface and returns the encoded PNG.
pub fn render_to_png(
    objects: &[Object],
    transform: &CoordTransform,
    width: i32,
    height: i32,
) -> Result<Vec<u8>, OtsError> {
    let surface = ImageSurface::create(Format::ARgb32, width, height).map_err(cairo_err)?;
    let ctx = Context::new(&surface).map_err(cairo_err)?;

    for obj in objects {
        match obj {
            Object::Background(color) => draw_background(&ctx, *color)?,
            Object::Polygon(p) => draw_polygon(&ctx, p, transform)?,
            Object::MultiPolygon(m) => draw_multi_polygon(&ctx, m, transform)?,
            Object::Label(l) => draw_label(&ctx, l, transform)?,
            Object::Watermark { text, tint } => {
                draw_watermark(&ctx, text, *tint, width as f64, height as f64)?
            }
        }
    }

    drop(ctx);
    let mut png = Vec::new();
    surface.write_to_png(&mut png).map_err(cairo_err)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Bound;
    use crate::tile::coords::transform_for_tile;
    use crate::tile::objects::Color;

    #[test]
    fn background_only_tile_encodes_to_a_non_empty_png() {
        let bounds = Bound::make(0.0, 0.0, 1.0, 1.0);
        let transform = transform_for_tile(bounds, 512.0, 512.0);
        let objects = vec![Object::Background(Color { r: 0.62, g: 0.62, b: 0.62 })];
        let png = render_to_png(&objects, &transform, 512, 512).unwrap();
        assert!(!png.is_empty());
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn a_filled_polygon_renders_without_error() {
        let bounds = Bound::make(0.0, 0.0, 1.0, 1.0);
        let transform = transform_for_tile(bounds, 512.0, 512.0);
        let poly = PolygonObject::new(
            vec![
                LatLon::new(0.1, 0.1),
                LatLon::new(0.1, 0.9),
                LatLon::new(0.9, 0.9),
                LatLon::new(0.9, 0.1),
                LatLon::new(0.1, 0.1),
            ],
            Vec::new(),
            &crate::style::Style {
                fill_color: Some(Color { r: 1.0, g: 0.0, b: 0.0 }),
                line_color: None,
                line_width: 1.0,
                line_dash: None,
                marker_color: Color { r: 0.0, g: 0.0, b: 0.0 },
                marker: None,
                marker_zoom_limit: 0,
                base_layer: 0,
            },
        );
        let objects = vec![Object::Polygon(poly)];
        assert!(render_to_png(&objects, &transform, 512, 512).is_ok());
    }
}
