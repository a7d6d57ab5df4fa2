//! Worker threads running the fetch, decode and publish steps of a tile.

use std::{
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
    sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    coords::TileCoords,
    io::{
        pipeline::{EndStep, PipelineContext, PipelineProcessor, PipelineStep, Processable},
        source::{FetchError, TileSource},
        TileDecoder,
    },
    render::TileBuckets,
    tile::{BucketBuilder, CancellationToken, JobQueue, LoadError, TileRepository},
};

/// State shared between the tile manager and its workers.
#[derive(Default)]
pub(crate) struct Shared {
    pub(crate) queue: JobQueue,
    pub(crate) tiles: Mutex<TileRepository>,
}

impl Shared {
    pub(crate) fn tiles(&self) -> MutexGuard<'_, TileRepository> {
        self.tiles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outcome of one job as seen by the render thread.
#[derive(Debug)]
pub(crate) enum TileResult {
    Loaded(TileBuckets),
    Failed,
    Cancelled,
}

#[derive(Debug)]
pub(crate) struct LoadedTile {
    pub(crate) coords: TileCoords,
    pub(crate) result: TileResult,
}

pub(crate) struct TileRequest {
    pub(crate) coords: TileCoords,
    pub(crate) token: CancellationToken,
}

/// Forwards pipeline results to the ready queue of the render thread.
pub(crate) struct ReadyQueueProcessor {
    sender: mpsc::Sender<LoadedTile>,
}

impl ReadyQueueProcessor {
    pub(crate) fn new(sender: mpsc::Sender<LoadedTile>) -> Self {
        Self { sender }
    }

    fn send(&self, coords: &TileCoords, result: TileResult) {
        if self
            .sender
            .send(LoadedTile {
                coords: *coords,
                result,
            })
            .is_err()
        {
            log::debug!("ready queue of {coords} closed");
        }
    }
}

impl PipelineProcessor for ReadyQueueProcessor {
    fn tile_finished(&mut self, coords: &TileCoords, buckets: TileBuckets) {
        log::debug!("{coords} finished with {} buckets", buckets.len());
        self.send(coords, TileResult::Loaded(buckets));
    }

    fn tile_failed(&mut self, coords: &TileCoords, reason: &LoadError) {
        let result = match reason {
            LoadError::Cancelled => {
                log::debug!("loading {coords} cancelled");
                TileResult::Cancelled
            }
            LoadError::Fetch(FetchError::NotFound(_)) => {
                log::warn!("{coords} not found");
                TileResult::Failed
            }
            LoadError::Fetch(FetchError::Timeout(_)) => {
                log::warn!("fetching {coords} timed out");
                TileResult::Failed
            }
            LoadError::Fetch(FetchError::Network(err)) => {
                log::warn!("network error while fetching {coords}: {err}");
                TileResult::Failed
            }
            LoadError::Decode(err) => {
                log::warn!("failed to decode {coords}: {err}");
                TileResult::Failed
            }
            LoadError::Panicked => {
                log::error!("worker panicked while loading {coords}");
                TileResult::Failed
            }
        };
        self.send(coords, result);
    }
}

pub(crate) struct FetchTile {
    source: Arc<dyn TileSource>,
}

impl Processable for FetchTile {
    type Input = TileRequest;
    type Output = (TileRequest, Result<Vec<u8>, LoadError>);

    #[tracing::instrument(skip_all)]
    fn process(&self, request: Self::Input, _context: &mut PipelineContext) -> Self::Output {
        let data = if request.token.is_cancelled() {
            Err(LoadError::Cancelled)
        } else {
            self.source.fetch(&request.coords).map_err(LoadError::from)
        };
        (request, data)
    }
}

/// Decodes the tile and builds its buckets. The builder and decoder are owned by the worker
/// thread and reused for every tile.
pub(crate) struct BuildTile {
    builder: RefCell<BucketBuilder>,
    decoder: RefCell<Box<dyn TileDecoder>>,
}

impl Processable for BuildTile {
    type Input = (TileRequest, Result<Vec<u8>, LoadError>);
    type Output = (TileRequest, Result<TileBuckets, LoadError>);

    #[tracing::instrument(skip_all)]
    fn process(
        &self,
        (request, data): Self::Input,
        _context: &mut PipelineContext,
    ) -> Self::Output {
        let buckets = data.and_then(|data| {
            self.builder.borrow_mut().build(
                self.decoder.borrow_mut().as_mut(),
                &request.coords,
                &data,
                request.token.clone(),
            )
        });
        (request, buckets)
    }
}

pub(crate) struct PublishTile;

impl Processable for PublishTile {
    type Input = (TileRequest, Result<TileBuckets, LoadError>);
    type Output = ();

    #[tracing::instrument(skip_all)]
    fn process(
        &self,
        (request, buckets): Self::Input,
        context: &mut PipelineContext,
    ) -> Self::Output {
        match buckets {
            // Partially built or finished buckets of a cancelled tile are never published.
            Ok(_) if request.token.is_cancelled() => context
                .processor
                .tile_failed(&request.coords, &LoadError::Cancelled),
            Ok(buckets) => context.processor.tile_finished(&request.coords, buckets),
            Err(reason) => context.processor.tile_failed(&request.coords, &reason),
        }
    }
}

pub(crate) type TilePipeline =
    PipelineStep<FetchTile, PipelineStep<BuildTile, PipelineStep<PublishTile, EndStep<()>>>>;

pub(crate) fn build_pipeline(
    source: Arc<dyn TileSource>,
    builder: BucketBuilder,
    decoder: Box<dyn TileDecoder>,
) -> TilePipeline {
    PipelineStep::new(
        FetchTile { source },
        PipelineStep::new(
            BuildTile {
                builder: RefCell::new(builder),
                decoder: RefCell::new(decoder),
            },
            PipelineStep::new(PublishTile, EndStep::default()),
        ),
    )
}

/// Pulls jobs until the queue is closed. A job that panics fails its tile and the worker moves
/// on to the next one.
pub(crate) fn run(
    id: usize,
    shared: Arc<Shared>,
    pipeline: TilePipeline,
    mut context: PipelineContext,
) {
    log::debug!("tile worker {id} started");
    while let Some(job) = shared.queue.wait_poll() {
        let Some(token) = shared.tiles().try_begin_loading(&job.coords) else {
            continue;
        };
        tracing::debug!("worker {id} loading {}", job.coords);
        let request = TileRequest {
            coords: job.coords,
            token,
        };
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| pipeline.process(request, &mut context)));
        if outcome.is_err() {
            context
                .processor
                .tile_failed(&job.coords, &LoadError::Panicked);
        }
    }
    log::debug!("tile worker {id} stopped");
}
