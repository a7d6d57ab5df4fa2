use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use clap::{Parser, Subcommand};
use tilekit::{
    coords::{LatLon, TileCoords, ViewPosition, ZoomLevel},
    element::{GeometryType, MapElement, Tag},
    error::Error,
    io::{
        oscimap2::Oscimap2Encoder,
        source::{FileTileSource, MemoryTileSource, TileSource},
    },
    settings::LoaderSettings,
    theme::Theme,
    tile::TileManager,
};

const TILE_EXTENSION: &str = "vtm";

const DEMO_THEME: &str = r##"{
    "map-background": "#f8f4f0",
    "styles": {
        "road-casing": { "type": "line", "color": "#c0b8b0", "width": 1.0, "outline": true },
        "road": { "type": "line", "color": "#ffffff", "width": 2.0 }
    },
    "rules": [
        { "e": "way", "k": "natural", "v": "water", "closed": "yes",
          "styles": [{ "type": "area", "color": "#a0c8f0" }] },
        { "e": "way", "k": "landuse", "v": "forest", "closed": "yes",
          "styles": [{ "type": "area", "color": "#add19e",
                       "outline": { "color": "#8cb87c", "width": 0.5 } }] },
        { "e": "way", "k": "waterway", "v": "river", "closed": "no",
          "styles": [{ "type": "line", "color": "#a0c8f0", "width": 3.0 }] },
        { "e": "way", "k": "highway", "v": "primary|residential", "closed": "no",
          "styles": [{ "use": "road" }, { "use": "road-casing" },
                     { "type": "text", "k": "name", "font-size": 12.0, "min-points": 2 }] },
        { "e": "way", "k": "building", "v": "*", "closed": "yes", "zoom-min": 16,
          "styles": [{ "type": "extrusion" }] },
        { "e": "node", "k": "amenity", "v": "restaurant",
          "styles": [{ "type": "symbol", "src": "restaurant" },
                     { "type": "text", "k": "name", "caption": true, "dy": -12.0 }] }
    ]
}"##;

#[derive(Parser)]
#[command(about = "Loads vector tiles around a position and prints their buckets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Writes synthetic oscimap2 tiles around the position into a directory.
    Generate {
        dir: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Loads the tiles around the position and prints a summary per tile.
    Load {
        /// Directory laid out as `{z}/{x}/{y}.vtm`. Synthetic tiles are used if missing.
        #[arg(long)]
        tiles: Option<PathBuf>,
        /// JSON theme. A built-in demo theme is used if missing.
        #[arg(long)]
        theme: Option<PathBuf>,
        /// JSON loader settings.
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Seconds to wait for the tiles.
        #[arg(long, default_value_t = 10)]
        timeout: u64,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(clap::Args)]
struct ViewArgs {
    #[arg(long, default_value_t = 48.1351)]
    lat: f64,
    #[arg(long, default_value_t = 11.582)]
    lon: f64,
    #[arg(long, default_value_t = 16)]
    zoom: u8,
    /// Number of tiles loaded on each side of the center tile.
    #[arg(long, default_value_t = 1)]
    radius: u32,
}

impl ViewArgs {
    fn view(&self) -> ViewPosition {
        ViewPosition::from_lat_lon(LatLon::new(self.lat, self.lon), ZoomLevel::new(self.zoom))
    }

    fn visible_tiles(&self) -> Vec<TileCoords> {
        let center = self.view().center_tile();
        let max = (1u64 << self.zoom).saturating_sub(1) as u32;
        let mut tiles = Vec::new();
        for y in center.y.saturating_sub(self.radius)..=(center.y + self.radius).min(max) {
            for x in center.x.saturating_sub(self.radius)..=(center.x + self.radius).min(max) {
                tiles.push(TileCoords::new(x, y, center.z));
            }
        }
        tiles
    }
}

fn element(geometry_type: GeometryType, points: &[(f32, f32)], tags: Vec<Tag>) -> MapElement {
    let mut element = MapElement::new();
    element.start(geometry_type);
    for &(x, y) in points {
        element.add_point(x, y);
    }
    for tag in tags {
        // Fresh elements are never sealed.
        let _ = element.tags.push(tag);
    }
    element
}

/// Builds a tile with one feature of every kind the demo theme styles.
fn synthetic_tile(coords: &TileCoords) -> Result<Vec<u8>, Error> {
    let offset = ((coords.x + coords.y) % 4) as f32 * 10.0;
    let name = format!("Street {}-{}", coords.x, coords.y);

    let mut building = element(
        GeometryType::Polygon,
        &[(150.0, 150.0), (200.0, 150.0), (200.0, 190.0), (150.0, 190.0)],
        vec![Tag::fixed("building", "yes")],
    );
    building.height = 20;

    let elements = [
        element(
            GeometryType::Polygon,
            &[
                (10.0 + offset, 10.0),
                (110.0, 10.0),
                (110.0, 90.0),
                (10.0 + offset, 90.0),
            ],
            vec![Tag::fixed("natural", "water")],
        ),
        element(
            GeometryType::Polygon,
            &[(130.0, 10.0), (240.0, 10.0), (240.0, 120.0), (130.0, 120.0)],
            vec![Tag::fixed("landuse", "forest")],
        ),
        element(
            GeometryType::Line,
            &[(0.0, 130.0), (90.0, 140.0 + offset), (256.0, 135.0)],
            vec![Tag::fixed("waterway", "river")],
        ),
        element(
            GeometryType::Line,
            &[(0.0, 220.0), (128.0, 200.0), (256.0, 230.0)],
            vec![
                Tag::fixed("highway", "residential"),
                Tag::new("name", name, true),
            ],
        ),
        building,
        element(
            GeometryType::Point,
            &[(60.0, 180.0)],
            vec![
                Tag::fixed("amenity", "restaurant"),
                Tag::new("name", "Zur Post", true),
            ],
        ),
    ];

    let mut encoder = Oscimap2Encoder::new(256);
    for element in &elements {
        encoder.add_element(element)?;
    }
    Ok(encoder.finish())
}

fn generate(dir: &Path, view: &ViewArgs) -> Result<(), Error> {
    let source = FileTileSource::new(dir, TILE_EXTENSION);
    for coords in view.visible_tiles() {
        let path = source.tile_path(&coords);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, synthetic_tile(&coords)?)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn load(
    tiles: Option<PathBuf>,
    theme: Option<PathBuf>,
    settings: Option<PathBuf>,
    timeout: Duration,
    view: &ViewArgs,
) -> Result<(), Error> {
    let theme = match theme {
        Some(path) => Theme::from_json_str(&fs::read_to_string(path)?)?,
        None => Theme::from_json_str(DEMO_THEME)?,
    };
    let settings = match settings {
        Some(path) => LoaderSettings::from_json_str(&fs::read_to_string(path)?)?,
        None => LoaderSettings::default(),
    };

    let visible = view.visible_tiles();
    let source: Arc<dyn TileSource> = match tiles {
        Some(dir) => Arc::new(FileTileSource::new(dir, TILE_EXTENSION)),
        None => {
            let source = MemoryTileSource::new();
            for coords in &visible {
                source.insert(*coords, synthetic_tile(coords)?);
                if let Some(parent) = coords.get_parent() {
                    source.insert(parent, synthetic_tile(&parent)?);
                }
            }
            Arc::new(source)
        }
    };

    let mut manager = TileManager::new(Arc::new(theme), source, settings)?;
    let queued = manager.update(view.view(), &visible);
    log::info!("requested {queued} tiles");

    let deadline = Instant::now() + timeout;
    let mut loaded = 0;
    while loaded < queued && Instant::now() < deadline {
        for coords in manager.drain_ready() {
            loaded += 1;
            let Some(buckets) = manager.tile(&coords).and_then(|tile| tile.buckets) else {
                continue;
            };
            println!("{coords}: {:?}", buckets.summary());
            if let Some(texts) = buckets.texts() {
                for label in texts.labels() {
                    println!("    {label:?}");
                }
            }
        }

        let failed = visible
            .iter()
            .filter(|coords| manager.tile(coords).map_or(false, |tile| tile.failed))
            .count();
        if loaded + failed >= queued {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }

    log::info!("{loaded} of {queued} tiles loaded");
    manager.shutdown()
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Generate { dir, view } => generate(&dir, &view),
        Command::Load {
            tiles,
            theme,
            settings,
            timeout,
            view,
        } => load(tiles, theme, settings, Duration::from_secs(timeout), &view),
    };

    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}
