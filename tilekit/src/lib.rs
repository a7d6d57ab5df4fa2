//! # tilekit
//!
//! Loads vector map tiles on a pool of worker threads and turns them into render buckets.
//!
//! A tile travels through three stages. A [`TileSource`](io::source::TileSource) fetches the raw
//! bytes, a [`TileDecoder`](io::TileDecoder) such as the
//! [`Oscimap2Decoder`](io::oscimap2::Oscimap2Decoder) streams [`MapElement`](element::MapElement)s
//! out of them, and the [`BucketBuilder`](tile::BucketBuilder) matches every element against a
//! [`Theme`](theme::Theme) and writes its geometry into the buckets of the tile. The
//! [`TileManager`](tile::TileManager) schedules these jobs by distance to the view and hands
//! finished tiles to the render thread.
//!
//! ### Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tilekit::{
//!     coords::{TileCoords, ViewPosition, ZoomLevel},
//!     io::source::FileTileSource,
//!     settings::LoaderSettings,
//!     theme::Theme,
//!     tile::TileManager,
//! };
//!
//! # fn main() -> Result<(), tilekit::error::Error> {
//! let theme = Arc::new(Theme::from_json_str(r#"{ "rules": [] }"#)?);
//! let source = Arc::new(FileTileSource::new("tiles", "vtm"));
//! let mut manager = TileManager::new(theme, source, LoaderSettings::default())?;
//!
//! let view = ViewPosition::new(0.5, 0.5, ZoomLevel::new(1));
//! manager.update(view, &[TileCoords::from((0, 0, 1))]);
//! for coords in manager.drain_ready() {
//!     println!("{coords} is ready");
//! }
//! manager.shutdown()
//! # }
//! ```

pub mod coords;
pub mod element;
pub mod error;
pub mod io;
pub mod render;
pub mod settings;
pub mod tessellation;
pub mod theme;
pub mod tile;
