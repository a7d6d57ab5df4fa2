//! Provides utilities related to coordinates.

use std::{
    f64::consts::PI,
    fmt,
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// Resolution in which oscimap2 tiles encode their coordinates.
pub const REFERENCE_TILE_SIZE: u32 = 4096;
pub const DEFAULT_TILE_SIZE: u32 = 256;
pub const MAX_ZOOM: usize = 32;
/// Equatorial circumference in meters.
pub const EARTH_CIRCUMFERENCE: f64 = 40_075_016.686;
/// Zoom level at which job distances are compared.
const DISTANCE_ZOOM: u8 = 20;

/// Represents the position of a node within a quad tree. The first entry holds the `ZoomLevel`
/// of the node, the following entries the quadrant (0..4) chosen at each subdivision, starting
/// with the coarsest. A parent therefore always sorts before its children.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy)]
pub struct Quadkey([u8; MAX_ZOOM]);

impl Quadkey {
    pub fn new(quad_encoded: &[u8]) -> Self {
        let mut key = [0u8; MAX_ZOOM];
        key[0] = quad_encoded.len().min(MAX_ZOOM - 1) as u8;
        for (i, part) in quad_encoded.iter().take(MAX_ZOOM - 1).enumerate() {
            key[i + 1] = *part;
        }
        Self(key)
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        ZoomLevel(self.0[0])
    }
}

impl fmt::Debug for Quadkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let len = (self.0[0] as usize).min(MAX_ZOOM - 1);
        for part in &self.0[1..=len] {
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

#[derive(
    Ord, PartialOrd, Eq, PartialEq, Hash, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub const fn new(z: u8) -> Self {
        ZoomLevel(z)
    }

    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl Display for ZoomLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ZoomLevel {
    fn from(zoom_level: u8) -> Self {
        ZoomLevel(zoom_level)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(val: ZoomLevel) -> Self {
        val.0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLon {
            latitude,
            longitude,
        }
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Converts a relative mercator y coordinate (0 at the north edge of the world, 1 at the
/// south edge) to a latitude in degrees.
pub fn relative_y_to_latitude(y: f64) -> f64 {
    90.0 - 360.0 * (((y - 0.5) * 2.0 * PI).exp().atan()) / PI
}

pub fn latitude_to_relative_y(latitude: f64) -> f64 {
    let sin = (latitude * (PI / 180.0)).sin();
    0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)
}

pub fn longitude_to_relative_x(longitude: f64) -> f64 {
    (longitude + 180.0) / 360.0
}

/// Every tile has tile coordinates. These tile coordinates are also called
/// [Slippy map tile names](https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames).
///
/// The origin is the north west corner of the world.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TileCoords {
    pub x: u32,
    pub y: u32,
    pub z: ZoomLevel,
}

impl TileCoords {
    pub fn new(x: u32, y: u32, z: ZoomLevel) -> Self {
        Self { x, y, z }
    }

    /// Number of tiles along one axis at this zoom level.
    pub fn tiles_per_axis(&self) -> u64 {
        1u64 << self.z.0.min(MAX_ZOOM as u8 - 1)
    }

    pub fn is_valid(&self) -> bool {
        (self.z.0 as usize) < MAX_ZOOM
            && (self.x as u64) < self.tiles_per_axis()
            && (self.y as u64) < self.tiles_per_axis()
    }

    pub fn build_quad_key(&self) -> Option<Quadkey> {
        if !self.is_valid() {
            return None;
        }

        let mut key = [0u8; MAX_ZOOM];
        key[0] = self.z.0;

        for level in 1..=self.z.0 {
            let shift = self.z.0 - level;
            let mut quadrant = 0u8;
            if (self.x >> shift) & 1 != 0 {
                quadrant += 1;
            }
            if (self.y >> shift) & 1 != 0 {
                quadrant += 2;
            }
            key[level as usize] = quadrant;
        }

        Some(Quadkey(key))
    }

    /// Returns the four tiles covering this tile at the next zoom level, in the order
    /// north west, north east, south west, south east. Tiles at the deepest zoom level have
    /// no children.
    pub fn get_children(&self) -> Option<[TileCoords; 4]> {
        let z = self
            .z
            .0
            .checked_add(1)
            .filter(|z| (*z as usize) < MAX_ZOOM)?;
        let z = ZoomLevel(z);
        let (x, y) = (self.x.checked_mul(2)?, self.y.checked_mul(2)?);
        Some([
            TileCoords::new(x, y, z),
            TileCoords::new(x + 1, y, z),
            TileCoords::new(x, y + 1, z),
            TileCoords::new(x + 1, y + 1, z),
        ])
    }

    pub fn get_parent(&self) -> Option<TileCoords> {
        if self.z.is_root() {
            return None;
        }

        Some(TileCoords::new(
            self.x >> 1,
            self.y >> 1,
            ZoomLevel(self.z.0 - 1),
        ))
    }

    /// Relative mercator position of the north west corner.
    pub fn relative_position(&self) -> (f64, f64) {
        let scale = self.tiles_per_axis() as f64;
        (self.x as f64 / scale, self.y as f64 / scale)
    }

    /// Latitude of the north edge of this tile.
    pub fn latitude(&self) -> f64 {
        relative_y_to_latitude(self.relative_position().1)
    }

    /// Meters covered by one tile pixel at the north edge of the tile.
    pub fn ground_scale(&self, tile_size: u32) -> f64 {
        let latitude = self.latitude().to_radians();
        latitude.cos() * EARTH_CIRCUMFERENCE / ((tile_size as u64) << self.z.0) as f64
    }

    /// Quad tree distance to the view. Smaller values are closer and load first.
    pub fn distance_to(&self, view: &ViewPosition) -> i64 {
        let scale = (1u64 << DISTANCE_ZOOM) as f64;
        let x = (view.x * scale) as i64;
        let y = (view.y * scale) as i64;

        let (dx, dy) = if self.z.0 >= DISTANCE_ZOOM {
            (self.x as i64 - x, self.y as i64 - y)
        } else {
            let diff = DISTANCE_ZOOM - self.z.0;
            (self.x as i64 - (x >> diff), self.y as i64 - (y >> diff))
        };

        let mut dz = view.zoom_level.0 as i64 - self.z.0 as i64;
        if dz == 0 {
            dz = 1;
        } else if dz < -1 {
            dz = (dz as f64 * 0.75) as i64;
        }

        (dx * dx + dy * dy) * (dz * dz)
    }
}

impl From<(u32, u32, ZoomLevel)> for TileCoords {
    fn from(tuple: (u32, u32, ZoomLevel)) -> Self {
        TileCoords {
            x: tuple.0,
            y: tuple.1,
            z: tuple.2,
        }
    }
}

impl From<(u32, u32, u8)> for TileCoords {
    fn from(tuple: (u32, u32, u8)) -> Self {
        TileCoords {
            x: tuple.0,
            y: tuple.1,
            z: ZoomLevel::from(tuple.2),
        }
    }
}

impl Display for TileCoords {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "T(x={x},y={y},z={z})", x = self.x, y = self.y, z = self.z)
    }
}

/// Center of the current view in relative mercator coordinates together with the zoom level
/// tiles are loaded for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewPosition {
    pub x: f64,
    pub y: f64,
    pub zoom_level: ZoomLevel,
}

impl ViewPosition {
    pub fn new(x: f64, y: f64, zoom_level: ZoomLevel) -> Self {
        Self { x, y, zoom_level }
    }

    pub fn from_lat_lon(position: LatLon, zoom_level: ZoomLevel) -> Self {
        Self {
            x: longitude_to_relative_x(position.longitude),
            y: latitude_to_relative_y(position.latitude),
            zoom_level,
        }
    }

    /// Tile containing the view center at the view zoom level.
    pub fn center_tile(&self) -> TileCoords {
        let scale = (1u64 << self.zoom_level.0) as f64;
        let max = (scale as u64).saturating_sub(1) as f64;
        TileCoords::new(
            (self.x * scale).clamp(0.0, max) as u32,
            (self.y * scale).clamp(0.0, max) as u32,
            self.zoom_level,
        )
    }
}
