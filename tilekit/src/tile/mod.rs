//! Tile state, scheduling and the worker pool turning raw tiles into buckets.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    coords::TileCoords,
    io::{source::FetchError, DecodeError},
    render::TileBuckets,
};

mod builder;
mod cancellation;
mod job_queue;
mod manager;
mod repository;
mod worker;

pub use builder::BucketBuilder;
pub use cancellation::CancellationToken;
pub use job_queue::{Job, JobQueue};
pub use manager::TileManager;
pub use repository::TileRepository;

/// Lifecycle of a tile.
///
/// `None → Loading` when a worker starts the job, `Loading → Ready` once the render thread
/// picked up the buckets, `Loading → Cancel` when the tile was cancelled or evicted while a
/// worker still owned it. `Ready → Expired` marks stale data which stays displayable until its
/// replacement is ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileState {
    #[default]
    None,
    Loading,
    Ready,
    Cancel,
    Expired,
}

/// Reasons a tile could not be loaded. The worker logs them, the render thread only sees the
/// tile missing.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("fetching the tile failed")]
    Fetch(#[from] FetchError),
    #[error("decoding the tile failed")]
    Decode(DecodeError),
    #[error("loading was cancelled")]
    Cancelled,
    #[error("the worker panicked while loading the tile")]
    Panicked,
}

impl From<DecodeError> for LoadError {
    fn from(error: DecodeError) -> Self {
        match error {
            DecodeError::Cancelled => LoadError::Cancelled,
            error => LoadError::Decode(error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapTile {
    pub coords: TileCoords,
    pub state: TileState,
    /// Buckets of the last successful load. Kept while an expired tile reloads.
    pub buckets: Option<Arc<TileBuckets>>,
    /// Quad tree distance to the view of the last update.
    pub distance: i64,
    /// Part of the visible set of the last update. Visible tiles are not evicted.
    pub visible: bool,
    /// The last load failed. Failed tiles are not requested again until retried.
    pub failed: bool,
    token: CancellationToken,
}

impl MapTile {
    pub fn new(coords: TileCoords) -> Self {
        Self {
            coords,
            state: TileState::None,
            buckets: None,
            distance: 0,
            visible: false,
            failed: false,
            token: CancellationToken::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == TileState::Ready
    }

    /// Whether the tile has data which can be drawn.
    pub fn is_displayable(&self) -> bool {
        self.buckets.is_some()
    }

    /// Whether the tile should be put into the job queue.
    pub fn needs_loading(&self) -> bool {
        !self.failed && matches!(self.state, TileState::None | TileState::Expired)
    }

    /// Marks a loading tile as cancelled and signals its worker.
    pub(crate) fn cancel(&mut self) -> bool {
        if self.state != TileState::Loading {
            return false;
        }
        self.state = TileState::Cancel;
        self.token.cancel();
        true
    }

    /// Returns to the state before loading started: `Expired` if old buckets remain, `None`
    /// otherwise.
    pub(crate) fn reset(&mut self) {
        self.state = if self.buckets.is_some() {
            TileState::Expired
        } else {
            TileState::None
        };
    }
}
