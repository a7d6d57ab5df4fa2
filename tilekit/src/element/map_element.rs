//! The decoded unit of map geometry.

use crate::element::TagSet;

/// Layer elements are assigned when the tile does not specify one.
pub const DEFAULT_LAYER: i32 = 5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryType {
    #[default]
    None,
    Point,
    Line,
    Polygon,
}

impl GeometryType {
    pub fn is_point(self) -> bool {
        self == GeometryType::Point
    }

    pub fn is_line(self) -> bool {
        self == GeometryType::Line
    }

    pub fn is_polygon(self) -> bool {
        self == GeometryType::Polygon
    }
}

/// A map feature with its geometry in tile pixel coordinates.
///
/// Decoders reuse one instance for every feature of a tile: consumers which need the element
/// after their callback returned must clone it.
#[derive(Clone, Debug, PartialEq)]
pub struct MapElement {
    pub geometry_type: GeometryType,
    /// Interleaved x/y pairs.
    pub points: Vec<f32>,
    /// Number of coordinates (two per point) of each line or ring. The first entry of a
    /// polygon is its outer ring, the following ones are holes. A value `<= 0` ends the list.
    pub index: Vec<i32>,
    pub layer: i32,
    pub height: i32,
    pub min_height: i32,
    pub priority: i32,
    pub tags: TagSet,
}

impl Default for MapElement {
    fn default() -> Self {
        Self {
            geometry_type: GeometryType::None,
            points: Vec::new(),
            index: Vec::new(),
            layer: DEFAULT_LAYER,
            height: 0,
            min_height: 0,
            priority: 0,
            tags: TagSet::new(),
        }
    }
}

impl MapElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the element for the next feature while keeping its allocations.
    pub fn clear(&mut self) {
        self.geometry_type = GeometryType::None;
        self.points.clear();
        self.index.clear();
        self.layer = DEFAULT_LAYER;
        self.height = 0;
        self.min_height = 0;
        self.priority = 0;
        self.tags.clear();
    }

    /// Clears the geometry and starts the first line, ring or point list of `geometry_type`.
    pub fn start(&mut self, geometry_type: GeometryType) {
        self.geometry_type = geometry_type;
        self.points.clear();
        self.index.clear();
        self.index.push(0);
    }

    /// Starts another line, or a hole when the element is a polygon.
    pub fn start_ring(&mut self) {
        self.index.push(0);
    }

    pub fn add_point(&mut self, x: f32, y: f32) {
        if self.index.is_empty() {
            self.index.push(0);
        }
        self.points.push(x);
        self.points.push(y);
        if let Some(last) = self.index.last_mut() {
            *last += 2;
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len() / 2
    }

    pub fn point(&self, i: usize) -> Option<(f32, f32)> {
        Some((*self.points.get(i * 2)?, *self.points.get(i * 2 + 1)?))
    }

    pub fn is_closed(&self) -> bool {
        self.geometry_type.is_polygon()
    }

    /// Coordinate counts up to the sentinel.
    pub fn ring_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.index
            .iter()
            .take_while(|length| **length > 0)
            .map(|length| *length as usize)
    }

    /// Iterates the interleaved coordinates of each line or ring. Stops at the sentinel or
    /// when the index refers past the end of `points`.
    pub fn rings(&self) -> impl Iterator<Item = &[f32]> + '_ {
        let points = &self.points;
        self.ring_lengths()
            .scan(0usize, move |offset, length| {
                let start = *offset;
                let end = start + length;
                if end > points.len() {
                    return None;
                }
                *offset = end;
                Some(&points[start..end])
            })
    }

    /// Copies the element into `self`, reusing allocations.
    pub fn copy_from(&mut self, other: &MapElement) {
        self.clone_from(other);
    }
}
