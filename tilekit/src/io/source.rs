//! Sources of raw tile data.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use thiserror::Error;

use crate::coords::TileCoords;

/// Fetch failures. The tile manager marks the tile as failed for all of them, the variants
/// only differ in how they are logged.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error while fetching tile")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("tile {0} not found")]
    NotFound(TileCoords),
    #[error("fetching tile {0} timed out")]
    Timeout(TileCoords),
}

/// Provides the raw bytes of a tile. Implementations block the calling worker thread.
pub trait TileSource: Send + Sync + 'static {
    fn fetch(&self, coords: &TileCoords) -> Result<Vec<u8>, FetchError>;
}

/// Loads tiles from a directory laid out as `{z}/{x}/{y}.{extension}`.
#[derive(Clone, Debug)]
pub struct FileTileSource {
    root: PathBuf,
    extension: String,
}

impl FileTileSource {
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tile_path(&self, coords: &TileCoords) -> PathBuf {
        self.root
            .join(coords.z.to_string())
            .join(coords.x.to_string())
            .join(format!("{}.{}", coords.y, self.extension))
    }
}

impl TileSource for FileTileSource {
    fn fetch(&self, coords: &TileCoords) -> Result<Vec<u8>, FetchError> {
        std::fs::read(self.tile_path(coords)).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(*coords),
            io::ErrorKind::TimedOut => FetchError::Timeout(*coords),
            _ => FetchError::Network(Box::new(err)),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InjectedFailure {
    Network,
    Timeout,
}

/// Keeps tiles in memory. Failures can be injected per tile.
#[derive(Default)]
pub struct MemoryTileSource {
    tiles: Mutex<HashMap<TileCoords, Vec<u8>>>,
    failures: Mutex<HashMap<TileCoords, InjectedFailure>>,
}

impl MemoryTileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, coords: TileCoords, data: Vec<u8>) {
        self.tiles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(coords, data);
    }

    pub fn fail_with(&self, coords: TileCoords, failure: InjectedFailure) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(coords, failure);
    }
}

impl TileSource for MemoryTileSource {
    fn fetch(&self, coords: &TileCoords) -> Result<Vec<u8>, FetchError> {
        let failure = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(coords)
            .copied();

        match failure {
            Some(InjectedFailure::Network) => Err(FetchError::Network(Box::new(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "injected network failure",
            )))),
            Some(InjectedFailure::Timeout) => Err(FetchError::Timeout(*coords)),
            None => self
                .tiles
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(coords)
                .cloned()
                .ok_or(FetchError::NotFound(*coords)),
        }
    }
}
