use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use ots_tiles::cache::{ObjectCache, PngCache};
use ots_tiles::config::{ConfigOverrides, ServerConfig};
use ots_tiles::ingest;
use ots_tiles::osm::model::MemberType;
use ots_tiles::osm::OsmStore;
use ots_tiles::query::intersects_bounds;
use ots_tiles::server::{self, AppState};
use ots_tiles::tile::coords::{tile_to_bounds, transform_for_tile, TILE_SIZE};
use ots_tiles::tile::raster::render_to_png;
use ots_tiles::tile::TileBuilder;
use ots_tiles::OtsError;

#[derive(Parser)]
#[command(name = "ots-tiles", about = "OpenStreetMap tile rendering server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve tiles over HTTP.
    Server(ServerArgs),
    /// Render a single tile or feature to a PNG file.
    Render(RenderArgs),
    /// Substring-search one feature kind's tag values.
    Search(SearchArgs),
    /// Report node/way/relation counts and tag-key frequencies.
    Count(CountArgs),
}

#[derive(clap::Args)]
struct ServerArgs {
    /// Path to an OSM XML extract (.xml) or a binary snapshot.
    #[arg(long)]
    dataset: String,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    bind: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    watermark: bool,
    #[arg(long)]
    hide_labels: bool,
}

#[derive(clap::Args)]
struct RenderArgs {
    #[arg(long)]
    dataset: String,
    #[arg(long)]
    output: PathBuf,
    #[arg(long)]
    z: Option<u8>,
    #[arg(long)]
    x: Option<i64>,
    #[arg(long)]
    y: Option<i64>,
    #[arg(long = "way-id")]
    way_id: Option<i64>,
    #[arg(long = "relation-id")]
    relation_id: Option<i64>,
    #[arg(long, default_value_t = 1024)]
    width: u32,
    #[arg(long, default_value_t = 1024)]
    height: u32,
    #[arg(long)]
    watermark: bool,
    #[arg(long)]
    tint: bool,
    #[arg(long = "hide-labels")]
    hide_labels: bool,
}

#[derive(clap::Args)]
struct SearchArgs {
    dataset: String,
    #[arg(value_enum)]
    scope: ScanScopeArg,
    /// Tag key to match against, e.g. `name`.
    #[arg(short = 't', long = "tag")]
    tag: String,
    substring: String,
}

#[derive(Copy, Clone, ValueEnum)]
enum ScanScopeArg {
    Nodes,
    Ways,
    Relations,
}

#[derive(clap::Args)]
struct CountArgs {
    dataset: String,
}

fn load_store(dataset: &str) -> Result<OsmStore, OtsError> {
    let path = PathBuf::from(dataset);
    if path.extension().and_then(|e| e.to_str()) == Some("xml") {
        ingest::load_xml_file(&path)
    } else {
        ingest::load_snapshot(&path)
    }
}

#[tokio::main]
async fn main() -> Result<(), OtsError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Server(args) => run_server(args).await,
        Command::Render(args) => run_render(args),
        Command::Search(args) => run_search(args),
        Command::Count(args) => run_count(args),
    }
}

async fn run_server(args: ServerArgs) -> Result<(), OtsError> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    config.apply_overrides(ConfigOverrides {
        bind: args.bind.clone(),
        port: args.port,
        dataset_path: Some(args.dataset.clone()),
        deadline_seconds: None,
        show_watermark: args.watermark,
        hide_labels: args.hide_labels,
    });

    let store = load_store(&config.dataset_path)?;
    info!(
        "loaded {} nodes, {} ways, {} relations from {}",
        store.node_count(),
        store.way_count(),
        store.relation_count(),
        config.dataset_path
    );

    let state = Arc::new(AppState {
        store,
        object_cache: ObjectCache::new(config.object_cache_size),
        png_cache: PngCache::new(config.png_cache_size),
        deadline: Duration::from_secs(config.deadline_seconds),
        show_watermark: config.show_watermark,
        hide_labels: config.hide_labels,
    });

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .map_err(|e| OtsError::DatasetLoad(format!("invalid bind address: {e}")))?;

    info!("listening on {addr}");
    axum::Server::bind(&addr)
        .serve(server::router(state).into_make_service())
        .await
        .map_err(|e| OtsError::DatasetLoad(format!("server error: {e}")))
}

/// The 10-second deadline named in spec.md for the render-CLI path,
/// twice the serving path's since there's no caller waiting on a socket.
const RENDER_DEADLINE: Duration = Duration::from_secs(10);

fn run_render(args: RenderArgs) -> Result<(), OtsError> {
    let store = load_store(&args.dataset)?;
    let start = Instant::now();

    let (bounds, canvas_width, canvas_height, ways, relations, nodes) =
        if let (Some(z), Some(x), Some(y)) = (args.z, args.x, args.y) {
            let bounds = tile_to_bounds(x, y, z).pad(0.001);
            let result = intersects_bounds(&store, bounds);
            (bounds, TILE_SIZE, TILE_SIZE, result.ways, result.relations, result.nodes)
        } else if let Some(way_id) = args.way_id {
            let way = store
                .get_way(way_id)
                .ok_or(OtsError::NotFound { kind: "way", id: way_id })?;
            (way.bound.pad(0.0005), args.width as f64, args.height as f64, vec![way.clone()], Vec::new(), Vec::new())
        } else if let Some(relation_id) = args.relation_id {
            let rel = store
                .get_relation(relation_id)
                .ok_or(OtsError::NotFound { kind: "relation", id: relation_id })?;
            let mut bounds = rel.bound;
            let mut member_ways = Vec::new();
            for member in &rel.members {
                if member.member_type == MemberType::Way {
                    if let Some(w) = store.get_way(member.ref_id) {
                        bounds = bounds.union(w.bound);
                        member_ways.push(w.clone());
                    }
                }
            }
            (bounds.pad(0.0005), args.width as f64, args.height as f64, member_ways, vec![rel.clone()], Vec::new())
        } else {
            return Err(OtsError::InvalidTileCoord(
                "render requires --z/--x/--y, or --way-id, or --relation-id".to_string(),
            ));
        };

    let zoom = args.z.unwrap_or(17);
    let mut builder = TileBuilder::new(bounds, zoom, canvas_width, canvas_height);
    builder
        .set_watermark(args.watermark.then(|| "ots-tiles".to_string()))
        .set_tint(args.tint)
        .set_hide_labels(args.hide_labels);

    let cache = ObjectCache::default();
    let objects = builder.build(&ways, &relations, &nodes, &cache);
    if start.elapsed() > RENDER_DEADLINE {
        return Err(OtsError::DeadlineExpired);
    }

    let transform = transform_for_tile(bounds, canvas_width, canvas_height);
    let png = render_to_png(&objects, &transform, canvas_width as i32, canvas_height as i32)?;
    std::fs::write(&args.output, png).map_err(|e| OtsError::Encode(e.to_string()))?;

    info!("rendered {} in {:?}", args.output.display(), start.elapsed());
    Ok(())
}

fn run_search(args: SearchArgs) -> Result<(), OtsError> {
    let store = load_store(&args.dataset)?;
    match args.scope {
        ScanScopeArg::Nodes => {
            for n in store.search_nodes(&args.tag, &args.substring) {
                println!("node {} {:?}", n.id, n.tags);
            }
        }
        ScanScopeArg::Ways => {
            for w in store.search_ways(&args.tag, &args.substring) {
                println!("way {} {:?}", w.id, w.tags);
            }
        }
        ScanScopeArg::Relations => {
            for r in store.search_relations(&args.tag, &args.substring) {
                println!("relation {} {:?}", r.id, r.tags);
            }
        }
    }
    Ok(())
}

fn run_count(args: CountArgs) -> Result<(), OtsError> {
    let store = load_store(&args.dataset)?;
    println!("nodes: {}", store.node_count());
    println!("ways: {}", store.way_count());
    println!("relations: {}", store.relation_count());

    let mut tag_key_frequency: HashMap<&str, usize> = HashMap::new();
    for n in store.all_nodes() {
        for k in n.tags.keys() {
            *tag_key_frequency.entry(k.as_str()).or_insert(0) += 1;
        }
    }
    for w in store.all_ways() {
        for k in w.tags.keys() {
            *tag_key_frequency.entry(k.as_str()).or_insert(0) += 1;
        }
    }
    for r in store.all_relations() {
        for k in r.tags.keys() {
            *tag_key_frequency.entry(k.as_str()).or_insert(0) += 1;
        }
    }

    let mut frequencies: Vec<(&str, usize)> = tag_key_frequency.into_iter().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));
    println!("top tag keys:");
    for (key, count) in frequencies.into_iter().take(20) {
        println!("  {key}: {count}");
    }

    Ok(())
}
