//! The HTTP tile endpoint: `GET /tiles/{z}/{x}/{y}` plus a demo page,
//! grounded in `ots/tile_server.go`'s `handleGetTile`/`_parseZXY`. The
//! gRPC half of that file (cmux, `Find`/`Get`/`Scan`) is out of scope
//! per spec.md §6; `rpc.rs` keeps its contract shape for a future
//! transport to hang off.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use log::{debug, info};
use tower_http::cors::CorsLayer;

use crate::cache::{tile_cache_key, ObjectCache, PngCache};
use crate::osm::OsmStore;
use crate::query::intersects_bounds;
use crate::tile::coords::{tile_to_bounds, transform_for_tile, TILE_SIZE};
use crate::tile::raster::render_to_png;
use crate::tile::TileBuilder;

const MIN_ZOOM: u8 = 11;
const MAX_ZOOM: u8 = 19;
/// Padding applied to a tile's bound before querying, so features whose
/// geometry just crosses the tile edge aren't clipped mid-stroke.
const QUERY_PAD_DEGREES: f64 = 0.001;

const DEMO_HTML: &str = "<!doctype html><title>ots-tiles</title><p>tile server is running.</p>";

pub struct AppState {
    pub store: OsmStore,
    pub object_cache: ObjectCache,
    pub png_cache: PngCache,
    pub deadline: Duration,
    pub show_watermark: bool,
    pub hide_labels: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(demo_page))
        .route("/tiles/:z/:x/:y", get(handle_get_tile))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn demo_page() -> impl IntoResponse {
    Html(DEMO_HTML)
}

type ApiError = (StatusCode, String);

fn parse_y(raw: &str) -> Result<i64, ApiError> {
    let stripped = raw.strip_suffix(".png").unwrap_or(raw);
    stripped
        .parse::<i64>()
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("invalid tile Y coordinate: {raw}")))
}

async fn handle_get_tile(
    Path((z, x, y_param)): Path<(u8, i64, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&z) {
        return Err((StatusCode::BAD_REQUEST, format!("zoom {z} out of range [{MIN_ZOOM}, {MAX_ZOOM}]")));
    }
    let y = parse_y(&y_param)?;

    let cache_key = tile_cache_key(z, x, y);
    if let Some(png) = state.png_cache.get(&cache_key) {
        return Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png));
    }

    let t0 = Instant::now();
    let bounds = tile_to_bounds(x, y, z).pad(QUERY_PAD_DEGREES);
    let result = intersects_bounds(&state.store, bounds);
    let t1 = Instant::now();
    debug!("query {z}/{x}/{y}: {} nodes, {} ways, {} relations in {:?}", result.nodes.len(), result.ways.len(), result.relations.len(), t1 - t0);

    let mut builder = TileBuilder::new(bounds, z, TILE_SIZE, TILE_SIZE);
    let checkerboard_tint = x % 2 == y % 2;
    builder
        .set_tint(state.show_watermark && checkerboard_tint)
        .set_watermark(state.show_watermark.then(|| "ots-tiles".to_string()))
        .set_hide_labels(state.hide_labels);

    let build = async { builder.build(&result.ways, &result.relations, &result.nodes, &state.object_cache) };
    let objects = tokio::time::timeout(state.deadline, build)
        .await
        .map_err(|_| (StatusCode::GATEWAY_TIMEOUT, "tile build deadline expired".to_string()))?;
    let t2 = Instant::now();

    let transform = transform_for_tile(bounds, TILE_SIZE, TILE_SIZE);
    let png = render_to_png(&objects, &transform, TILE_SIZE as i32, TILE_SIZE as i32)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let t3 = Instant::now();

    info!("tile {z}/{x}/{y}: query={:?} build={:?} render={:?}", t1 - t0, t2 - t1, t3 - t2);

    state.png_cache.put(cache_key, png.clone());
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_param_strips_png_suffix() {
        assert_eq!(parse_y("12345.png").unwrap(), 12345);
        assert_eq!(parse_y("12345").unwrap(), 12345);
    }

    #[test]
    fn non_numeric_y_is_rejected() {
        assert!(parse_y("abc.png").is_err());
    }
}
