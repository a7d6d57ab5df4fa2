//! Tile cache.

use std::collections::{btree_map, BTreeMap};

use crate::{
    coords::{Quadkey, TileCoords, ViewPosition},
    tile::{CancellationToken, MapTile, TileState},
};

/// Stores the tiles known to the manager in a quad tree ordered by [`Quadkey`].
#[derive(Default)]
pub struct TileRepository {
    tree: BTreeMap<Quadkey, MapTile>,
}

impl TileRepository {
    pub fn new() -> Self {
        Self {
            tree: BTreeMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn get(&self, coords: &TileCoords) -> Option<&MapTile> {
        coords.build_quad_key().and_then(|key| self.tree.get(&key))
    }

    pub fn get_mut(&mut self, coords: &TileCoords) -> Option<&mut MapTile> {
        coords
            .build_quad_key()
            .and_then(move |key| self.tree.get_mut(&key))
    }

    /// Returns the tile at `coords`, creating it in state [`TileState::None`] if it is missing.
    /// `None` for coordinates outside of the world.
    pub fn get_or_create(&mut self, coords: TileCoords) -> Option<&mut MapTile> {
        let key = coords.build_quad_key()?;
        Some(match self.tree.entry(key) {
            btree_map::Entry::Vacant(entry) => entry.insert(MapTile::new(coords)),
            btree_map::Entry::Occupied(entry) => entry.into_mut(),
        })
    }

    pub fn remove(&mut self, coords: &TileCoords) -> Option<MapTile> {
        coords
            .build_quad_key()
            .and_then(|key| self.tree.remove(&key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapTile> + '_ {
        self.tree.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MapTile> + '_ {
        self.tree.values_mut()
    }

    /// Moves the tile into [`TileState::Loading`] if it is waiting to be loaded. Only one
    /// caller succeeds per load and receives a fresh cancellation token.
    pub fn try_begin_loading(&mut self, coords: &TileCoords) -> Option<CancellationToken> {
        let tile = self.get_mut(coords)?;
        if !tile.needs_loading() {
            return None;
        }
        tile.state = TileState::Loading;
        tile.token = CancellationToken::new();
        Some(tile.token.clone())
    }

    pub fn update_distances(&mut self, view: &ViewPosition) {
        for tile in self.tree.values_mut() {
            tile.distance = tile.coords.distance_to(view);
        }
    }

    /// Evicts the farthest tiles until at most `limit` remain. Visible tiles are kept. Loading
    /// tiles are cancelled instead of removed, their worker result clears them later. Returns the
    /// evicted coordinates.
    pub fn limit_cache(&mut self, limit: usize) -> Vec<TileCoords> {
        let mut evicted = Vec::new();
        if self.tree.len() <= limit {
            return evicted;
        }

        let mut candidates: Vec<(i64, Quadkey)> = self
            .tree
            .iter()
            .filter(|(_, tile)| !tile.visible)
            .map(|(key, tile)| (tile.distance, *key))
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        let mut remove = self.tree.len() - limit;
        for (_, key) in candidates {
            if remove == 0 {
                break;
            }
            let Some(tile) = self.tree.get_mut(&key) else {
                continue;
            };

            let state = tile.state;
            match state {
                TileState::Loading => {
                    log::debug!("{} cancelled (d={})", tile.coords, tile.distance);
                    tile.cancel();
                }
                TileState::Cancel => {}
                _ => {
                    if let Some(tile) = self.tree.remove(&key) {
                        evicted.push(tile.coords);
                    }
                }
            }
            remove -= 1;
        }

        evicted
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Barrier, Mutex},
        thread,
    };

    use crate::{
        coords::{TileCoords, ViewPosition, ZoomLevel},
        tile::{TileRepository, TileState},
    };

    #[test]
    fn test_single_loader() {
        let coords = TileCoords::from((5, 7, 4));
        let mut repository = TileRepository::new();
        repository.get_or_create(coords);
        let repository = Arc::new(Mutex::new(repository));
        let barrier = Arc::new(Barrier::new(2));

        let attempts: Vec<_> = (0..2)
            .map(|_| {
                let repository = repository.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    repository
                        .lock()
                        .unwrap()
                        .try_begin_loading(&coords)
                        .is_some()
                })
            })
            .collect();

        let started = attempts
            .into_iter()
            .map(|attempt| attempt.join().unwrap())
            .filter(|started| *started)
            .count();
        assert_eq!(started, 1);
        assert_eq!(
            repository.lock().unwrap().get(&coords).unwrap().state,
            TileState::Loading
        );
    }

    #[test]
    fn test_failed_tiles_are_not_loaded() {
        let coords = TileCoords::from((0, 0, 1));
        let mut repository = TileRepository::new();
        repository.get_or_create(coords).unwrap().failed = true;

        assert!(repository.try_begin_loading(&coords).is_none());
        assert!(repository
            .try_begin_loading(&TileCoords::from((1, 1, 1)))
            .is_none());
    }

    #[test]
    fn test_limit_cache() {
        let mut repository = TileRepository::new();
        for x in 0..4 {
            repository.get_or_create(TileCoords::from((x, 0, 2)));
        }
        repository.get_or_create(TileCoords::from((0, 0, 2))).unwrap().visible = true;
        let loading = TileCoords::from((3, 0, 2));
        let token = repository.try_begin_loading(&loading).unwrap();

        repository.update_distances(&ViewPosition::new(0.0, 0.0, ZoomLevel::new(2)));
        let evicted = repository.limit_cache(2);

        // The farthest tile is loading and only gets cancelled.
        assert!(token.is_cancelled());
        assert_eq!(repository.get(&loading).unwrap().state, TileState::Cancel);
        assert_eq!(evicted, vec![TileCoords::from((2, 0, 2))]);
        assert_eq!(repository.len(), 3);
        assert!(repository.get(&TileCoords::from((0, 0, 2))).is_some());
    }
}
