//! Settings for tile loading.

use serde::{Deserialize, Serialize};

use crate::{
    coords::{DEFAULT_TILE_SIZE, REFERENCE_TILE_SIZE},
    error::Error,
    theme::DEFAULT_MATCH_CACHE_CAPACITY,
};

pub const MAX_WORKERS: usize = 16;

/// Configuration consumed by the decoder, the bucket builder and the tile manager.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoaderSettings {
    /// Size of a rendered tile in pixels.
    pub tile_size: u32,
    /// Resolution tile coordinates are encoded with.
    pub reference_tile_size: u32,
    pub workers: usize,
    /// Also request the parent of every requested tile.
    pub prefetch_parents: bool,
    /// Triangulate areas into mesh buckets instead of storing their rings.
    pub mesh_polygons: bool,
    /// Distance in pixels within which two labels with the same text collide.
    pub label_slack: f32,
    /// Distance before the first symbol along a way.
    pub symbol_start: f32,
    /// Distance between repeated symbols along a way.
    pub symbol_spacing: f32,
    /// Distance between repeated way names.
    pub label_spacing: f32,
    pub match_cache_capacity: usize,
    /// Number of tiles kept before the farthest are evicted.
    pub tile_cache_limit: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            reference_tile_size: REFERENCE_TILE_SIZE,
            workers: 2,
            prefetch_parents: true,
            mesh_polygons: false,
            label_slack: 10.0,
            symbol_start: 30.0,
            symbol_spacing: 200.0,
            label_spacing: 500.0,
            match_cache_capacity: DEFAULT_MATCH_CACHE_CAPACITY,
            tile_cache_limit: 64,
        }
    }
}

impl LoaderSettings {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let settings: LoaderSettings = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    /// Clamps values into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.workers = self.workers.clamp(1, MAX_WORKERS);
        self.tile_size = self.tile_size.max(1);
        self.reference_tile_size = self.reference_tile_size.max(1);
        self.match_cache_capacity = self.match_cache_capacity.max(1);
        self
    }

    /// Factor from encoded coordinates to tile pixels.
    pub fn coordinate_scale(&self) -> f32 {
        self.reference_tile_size as f32 / self.tile_size as f32
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::LoaderSettings;

    #[test]
    fn test_partial_json() {
        let settings =
            LoaderSettings::from_json_str(r#"{ "tile-size": 512, "workers": 64 }"#).unwrap();

        assert_eq!(settings.tile_size, 512);
        assert_eq!(settings.workers, 16);
        assert_eq!(settings.label_slack, 10.0);
        assert_eq!(settings.coordinate_scale(), 8.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(LoaderSettings::from_json_str("[]").is_err());
    }
}
