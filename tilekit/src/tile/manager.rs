//! Owns the tiles and the worker pool. Lives on the render thread.

use std::{
    sync::{mpsc, Arc},
    thread::{self, JoinHandle},
};

use crate::{
    coords::{TileCoords, ViewPosition},
    error::Error,
    io::{oscimap2::Oscimap2Decoder, pipeline::PipelineContext, source::TileSource, TileDecoder},
    settings::LoaderSettings,
    theme::Theme,
    tile::{
        worker::{self, LoadedTile, ReadyQueueProcessor, Shared, TileResult},
        BucketBuilder, MapTile, TileState,
    },
};

/// Schedules tile jobs on a pool of worker threads and collects their results.
///
/// The render thread calls [`TileManager::update`] whenever the view changes and
/// [`TileManager::drain_ready`] once per frame. Results of workers only become visible through
/// `drain_ready`, so the render thread never observes a tile in the middle of a transition.
pub struct TileManager {
    shared: Arc<Shared>,
    settings: LoaderSettings,
    ready: mpsc::Receiver<LoadedTile>,
    workers: Vec<JoinHandle<()>>,
}

impl TileManager {
    /// Starts the workers, decoding tiles as oscimap2.
    pub fn new(
        theme: Arc<Theme>,
        source: Arc<dyn TileSource>,
        settings: LoaderSettings,
    ) -> Result<Self, Error> {
        let decoder_settings = settings.clone();
        Self::with_decoder(theme, source, settings, move || {
            Box::new(Oscimap2Decoder::from_settings(&decoder_settings)) as Box<dyn TileDecoder>
        })
    }

    /// Starts the workers. Every worker gets its own decoder from `make_decoder`.
    pub fn with_decoder<F>(
        theme: Arc<Theme>,
        source: Arc<dyn TileSource>,
        settings: LoaderSettings,
        make_decoder: F,
    ) -> Result<Self, Error>
    where
        F: Fn() -> Box<dyn TileDecoder> + Send + Sync + 'static,
    {
        let settings = settings.normalized();
        let shared = Arc::new(Shared::default());
        let make_decoder = Arc::new(make_decoder);
        let (sender, ready) = mpsc::channel();

        let mut manager = Self {
            shared,
            settings,
            ready,
            workers: Vec::new(),
        };

        for id in 0..manager.settings.workers {
            let shared = manager.shared.clone();
            let source = source.clone();
            let sender = sender.clone();
            let make_decoder = make_decoder.clone();
            let builder = BucketBuilder::new(theme.clone(), &manager.settings);

            let spawned = thread::Builder::new()
                .name(format!("tile-worker-{id}"))
                .spawn(move || {
                    let pipeline = worker::build_pipeline(source, builder, make_decoder());
                    let context = PipelineContext::new(ReadyQueueProcessor::new(sender));
                    worker::run(id, shared, pipeline, context);
                });

            match spawned {
                Ok(handle) => manager.workers.push(handle),
                Err(err) => {
                    // Dropping the manager stops the workers started so far.
                    return Err(err.into());
                }
            }
        }

        log::info!("started {} tile workers", manager.workers.len());
        Ok(manager)
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Makes `visible` the set of wanted tiles and queues those without data, closest to `view`
    /// first. Jobs of the previous update which were not started yet are dropped. Returns the
    /// number of queued jobs.
    pub fn update(&mut self, view: ViewPosition, visible: &[TileCoords]) -> usize {
        self.shared.queue.clear();
        self.shared.queue.request_reschedule(view);

        let mut jobs: Vec<TileCoords> = Vec::new();
        {
            let mut tiles = self.shared.tiles();
            for tile in tiles.iter_mut() {
                tile.visible = false;
            }

            for coords in visible {
                let Some(tile) = tiles.get_or_create(*coords) else {
                    log::debug!("ignoring invalid tile {coords}");
                    continue;
                };
                tile.visible = true;
                if tile.needs_loading() && !jobs.contains(coords) {
                    jobs.push(*coords);
                }

                if !self.settings.prefetch_parents {
                    continue;
                }
                let Some(parent) = coords.get_parent() else {
                    continue;
                };
                if let Some(tile) = tiles.get_or_create(parent) {
                    if tile.needs_loading() && !jobs.contains(&parent) {
                        jobs.push(parent);
                    }
                }
            }

            tiles.update_distances(&view);
            let evicted = tiles.limit_cache(self.settings.tile_cache_limit);
            if !evicted.is_empty() {
                log::debug!("evicted {} tiles", evicted.len());
            }
        }

        jobs.into_iter()
            .filter(|coords| self.shared.queue.add(*coords))
            .count()
    }

    /// The view moved without changing the wanted tiles. Pending jobs are reordered before the
    /// next one is started.
    pub fn request_reschedule(&self, view: ViewPosition) {
        self.shared.tiles().update_distances(&view);
        self.shared.queue.request_reschedule(view);
    }

    /// Drops the pending job of the tile and signals its worker if it is loading. The worker
    /// finishes its current element, its result is discarded.
    pub fn cancel(&self, coords: &TileCoords) -> bool {
        let removed = self.shared.queue.remove(coords);
        let cancelled = self
            .shared
            .tiles()
            .get_mut(coords)
            .map_or(false, |tile| tile.cancel());
        removed || cancelled
    }

    /// Marks a ready tile as stale. It stays displayable and is reloaded by the next update
    /// which wants it.
    pub fn expire(&self, coords: &TileCoords) -> bool {
        match self.shared.tiles().get_mut(coords) {
            Some(tile) if tile.state == TileState::Ready => {
                tile.state = TileState::Expired;
                true
            }
            _ => false,
        }
    }

    /// Allows a failed tile to be requested again.
    pub fn retry(&self, coords: &TileCoords) -> bool {
        match self.shared.tiles().get_mut(coords) {
            Some(tile) if tile.failed => {
                tile.failed = false;
                true
            }
            _ => false,
        }
    }

    /// Applies the results the workers finished since the last call and returns the tiles
    /// which became ready. Never blocks.
    pub fn drain_ready(&mut self) -> Vec<TileCoords> {
        let mut ready = Vec::new();
        let mut tiles = self.shared.tiles();

        while let Ok(LoadedTile { coords, result }) = self.ready.try_recv() {
            let Some(tile) = tiles.get_mut(&coords) else {
                log::debug!("dropping result of evicted {coords}");
                continue;
            };

            match (tile.state, result) {
                (TileState::Loading, TileResult::Loaded(buckets)) => {
                    tile.state = TileState::Ready;
                    tile.buckets = Some(Arc::new(buckets));
                    ready.push(coords);
                }
                (TileState::Loading, TileResult::Failed) => {
                    tile.failed = true;
                    tile.reset();
                }
                (TileState::Loading | TileState::Cancel, _) => {
                    log::debug!("discarding cancelled {coords}");
                    tile.reset();
                }
                (state, _) => log::debug!("ignoring result of {coords} in state {state:?}"),
            }
        }

        ready
    }

    pub fn tile(&self, coords: &TileCoords) -> Option<MapTile> {
        self.shared.tiles().get(coords).cloned()
    }

    /// Visible tiles which have buckets to draw, ordered by quad key.
    pub fn displayable_tiles(&self) -> Vec<MapTile> {
        self.shared
            .tiles()
            .iter()
            .filter(|tile| tile.visible && tile.is_displayable())
            .cloned()
            .collect()
    }

    pub fn pending_jobs(&self) -> usize {
        self.shared.queue.len()
    }

    /// Stops the workers and waits for them. Loading tiles are cancelled first.
    pub fn shutdown(mut self) -> Result<(), Error> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.shared.queue.close();
        for tile in self.shared.tiles().iter_mut() {
            tile.cancel();
        }

        let mut result = Ok(());
        for (id, handle) in self.workers.drain(..).enumerate() {
            if handle.join().is_err() {
                log::error!("tile worker {id} panicked");
                result = Err(Error::WorkerPanicked(id));
            }
        }
        result
    }
}

impl Drop for TileManager {
    fn drop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        if let Err(err) = self.stop() {
            log::error!("stopping tile workers failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Condvar, Mutex},
        thread,
        time::{Duration, Instant},
    };

    use crate::{
        coords::{TileCoords, ViewPosition, ZoomLevel},
        element::{GeometryType, MapElement, Tag},
        io::{
            oscimap2::Oscimap2Encoder,
            source::{FetchError, InjectedFailure, MemoryTileSource, TileSource},
        },
        render::Bucket,
        settings::LoaderSettings,
        theme::Theme,
        tile::{MapTile, TileManager, TileState},
    };

    const THEME: &str = r##"{
        "rules": [
            { "e": "way", "k": "natural", "v": "water", "closed": "yes",
              "styles": [{ "type": "area", "color": "#a0c8f0" }] }
        ]
    }"##;

    fn theme() -> Arc<Theme> {
        Arc::new(Theme::from_json_str(THEME).unwrap())
    }

    fn settings(workers: usize) -> LoaderSettings {
        LoaderSettings {
            workers,
            prefetch_parents: false,
            ..LoaderSettings::default()
        }
    }

    fn view() -> ViewPosition {
        ViewPosition::new(0.5, 0.5, ZoomLevel::new(4))
    }

    fn water_tile() -> Vec<u8> {
        let mut element = MapElement::new();
        element.start(GeometryType::Polygon);
        for (x, y) in [(10.0, 10.0), (100.0, 10.0), (100.0, 100.0), (10.0, 100.0)] {
            element.add_point(x, y);
        }
        element.tags.push(Tag::fixed("natural", "water")).unwrap();

        let mut encoder = Oscimap2Encoder::new(256);
        encoder.add_element(&element).unwrap();
        encoder.finish()
    }

    /// Drains results until `done` holds for the tile or a few seconds passed. Returns the tiles
    /// reported as ready on the way.
    fn wait_for(
        manager: &mut TileManager,
        coords: &TileCoords,
        done: impl Fn(&MapTile) -> bool,
    ) -> Vec<TileCoords> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut ready = Vec::new();
        while Instant::now() < deadline {
            ready.extend(manager.drain_ready());
            if manager.tile(coords).map_or(false, |tile| done(&tile)) {
                return ready;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("timed out waiting for {coords}");
    }

    #[test]
    fn test_load_visible_tiles() {
        let source = Arc::new(MemoryTileSource::new());
        let tiles = [TileCoords::from((8, 8, 4)), TileCoords::from((7, 8, 4))];
        for coords in tiles {
            source.insert(coords, water_tile());
        }

        let mut manager = TileManager::new(theme(), source, settings(2)).unwrap();
        assert_eq!(manager.update(view(), &tiles), 2);

        let mut ready = wait_for(&mut manager, &tiles[0], MapTile::is_ready);
        ready.extend(wait_for(&mut manager, &tiles[1], MapTile::is_ready));
        assert_eq!(ready.len(), 2);
        assert!(tiles.iter().all(|coords| ready.contains(coords)));

        let tile = manager.tile(&tiles[0]).unwrap();
        let buckets = tile.buckets.unwrap();
        assert_eq!(buckets.len(), 1);
        assert!(matches!(buckets.iter().next(), Some((_, Bucket::Polygon(_)))));

        // Ready tiles are not requested again.
        assert_eq!(manager.update(view(), &tiles), 0);
        assert_eq!(manager.displayable_tiles().len(), 2);

        assert!(manager.expire(&tiles[0]));
        assert_eq!(manager.update(view(), &tiles), 1);
        wait_for(&mut manager, &tiles[0], MapTile::is_ready);

        manager.shutdown().unwrap();
    }

    #[test]
    fn test_fetch_failures() {
        let source = Arc::new(MemoryTileSource::new());
        let broken = TileCoords::from((3, 3, 3));
        let missing = TileCoords::from((4, 3, 3));
        source.fail_with(broken, InjectedFailure::Network);

        let mut manager = TileManager::new(theme(), source, settings(1)).unwrap();
        manager.update(view(), &[broken, missing]);

        for coords in [broken, missing] {
            let ready = wait_for(&mut manager, &coords, |tile| tile.failed);
            assert!(ready.is_empty());
            let tile = manager.tile(&coords).unwrap();
            assert_eq!(tile.state, TileState::None);
            assert!(tile.buckets.is_none());
        }

        // No automatic retry.
        assert_eq!(manager.update(view(), &[broken, missing]), 0);
        assert!(manager.retry(&broken));
        assert_eq!(manager.update(view(), &[broken, missing]), 1);
    }

    /// Blocks every fetch until the gate is opened.
    #[derive(Default)]
    struct GateSource {
        state: Mutex<(bool, bool)>,
        changed: Condvar,
    }

    impl GateSource {
        fn wait_started(&self) {
            let mut state = self.state.lock().unwrap();
            while !state.0 {
                state = self.changed.wait(state).unwrap();
            }
        }

        fn open(&self) {
            self.state.lock().unwrap().1 = true;
            self.changed.notify_all();
        }
    }

    impl TileSource for GateSource {
        fn fetch(&self, _coords: &TileCoords) -> Result<Vec<u8>, FetchError> {
            let mut state = self.state.lock().unwrap();
            state.0 = true;
            self.changed.notify_all();
            while !state.1 {
                state = self.changed.wait(state).unwrap();
            }
            Ok(water_tile())
        }
    }

    #[test]
    fn test_cancelled_tile_is_discarded() {
        let source = Arc::new(GateSource::default());
        let coords = TileCoords::from((8, 8, 4));

        let mut manager = TileManager::new(theme(), source.clone(), settings(1)).unwrap();
        manager.update(view(), &[coords]);
        source.wait_started();

        assert!(manager.cancel(&coords));
        assert_eq!(manager.tile(&coords).unwrap().state, TileState::Cancel);
        // Cancelled tiles are not queued again while their worker still owns them.
        assert_eq!(manager.update(view(), &[coords]), 0);

        source.open();
        let ready = wait_for(&mut manager, &coords, |tile| tile.state == TileState::None);
        assert!(ready.is_empty());
        assert!(manager.tile(&coords).unwrap().buckets.is_none());
        assert!(!manager.tile(&coords).unwrap().failed);
    }

    /// Panics for one tile and serves water for every other.
    struct PanickingSource {
        poisoned: TileCoords,
    }

    impl TileSource for PanickingSource {
        fn fetch(&self, coords: &TileCoords) -> Result<Vec<u8>, FetchError> {
            if *coords == self.poisoned {
                panic!("corrupt cache entry for {coords}");
            }
            Ok(water_tile())
        }
    }

    #[test]
    fn test_panicking_job_fails_tile() {
        let poisoned = TileCoords::from((8, 8, 4));
        let healthy = TileCoords::from((7, 8, 4));
        let source = Arc::new(PanickingSource { poisoned });

        let mut manager = TileManager::new(theme(), source, settings(1)).unwrap();
        manager.update(view(), &[poisoned]);
        let ready = wait_for(&mut manager, &poisoned, |tile| tile.failed);
        assert!(ready.is_empty());
        assert_eq!(manager.tile(&poisoned).unwrap().state, TileState::None);

        // The only worker survived the panic.
        assert_eq!(manager.update(view(), &[poisoned, healthy]), 1);
        wait_for(&mut manager, &healthy, MapTile::is_ready);
        manager.shutdown().unwrap();
    }
}
