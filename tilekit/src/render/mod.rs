//! Buckets collect the renderable geometry of one tile.
//!
//! Every bucket lives in a slot. Slots of layered geometry are `layer * levels + level` so that
//! iterating the slots in order draws lower layers first and, within a layer, follows the
//! style levels of the theme. Extrusions, symbols and labels occupy the slots above.

use std::collections::{btree_map, BTreeMap};

pub mod clipper;
pub mod extrusion;
pub mod labels;
pub mod line;
pub mod polygon;
pub mod text_measure;
pub mod way_decorator;

pub use extrusion::{ExtrusionBucket, ExtrusionColors};
pub use labels::{SymbolBucket, TextBucket};
pub use line::{LineBucket, LineTexBucket};
pub use polygon::{MeshBucket, PolygonBucket};

/// Number of element layers. Layers outside `0..LAYERS` are clamped.
pub const LAYERS: u32 = 11;

#[derive(Debug, Clone)]
pub enum Bucket {
    Line(LineBucket),
    LineTex(LineTexBucket),
    Polygon(PolygonBucket),
    Mesh(MeshBucket),
    Extrusion(ExtrusionBucket),
    Text(TextBucket),
    Symbol(SymbolBucket),
}

impl Bucket {
    pub fn kind(&self) -> &'static str {
        match self {
            Bucket::Line(_) => "line",
            Bucket::LineTex(_) => "line-tex",
            Bucket::Polygon(_) => "polygon",
            Bucket::Mesh(_) => "mesh",
            Bucket::Extrusion(_) => "extrusion",
            Bucket::Text(_) => "text",
            Bucket::Symbol(_) => "symbol",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Bucket::Line(bucket) => bucket.is_empty(),
            Bucket::LineTex(bucket) => bucket.is_empty(),
            Bucket::Polygon(bucket) => bucket.is_empty(),
            Bucket::Mesh(bucket) => bucket.is_empty(),
            Bucket::Extrusion(bucket) => bucket.is_empty(),
            Bucket::Text(bucket) => bucket.is_empty(),
            Bucket::Symbol(bucket) => bucket.is_empty(),
        }
    }
}

/// Reserved slots above all layer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedSlot {
    Extrusion = 0,
    Symbol = 1,
    Text = 2,
}

/// The buckets of one tile ordered by slot.
#[derive(Debug, Clone)]
pub struct TileBuckets {
    levels: u32,
    buckets: BTreeMap<u32, Bucket>,
}

impl Default for TileBuckets {
    fn default() -> Self {
        Self::new(1)
    }
}

impl TileBuckets {
    /// `levels` is the number of style levels of the theme the tile is built with.
    pub fn new(levels: u32) -> Self {
        Self {
            levels: levels.max(1),
            buckets: BTreeMap::new(),
        }
    }

    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn slot(&self, layer: i32, level: u32) -> u32 {
        let layer = layer.clamp(0, LAYERS as i32 - 1) as u32;
        layer * self.levels + level.min(self.levels - 1)
    }

    pub fn reserved_slot(&self, slot: ReservedSlot) -> u32 {
        LAYERS * self.levels + slot as u32
    }

    pub fn get(&self, slot: u32) -> Option<&Bucket> {
        self.buckets.get(&slot)
    }

    pub fn get_mut(&mut self, slot: u32) -> Option<&mut Bucket> {
        self.buckets.get_mut(&slot)
    }

    pub(crate) fn entry(&mut self, slot: u32) -> btree_map::Entry<'_, u32, Bucket> {
        self.buckets.entry(slot)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Bucket)> + '_ {
        self.buckets.iter().map(|(slot, bucket)| (*slot, bucket))
    }

    pub fn extrusion(&self) -> Option<&ExtrusionBucket> {
        match self.get(self.reserved_slot(ReservedSlot::Extrusion)) {
            Some(Bucket::Extrusion(bucket)) => Some(bucket),
            _ => None,
        }
    }

    pub fn symbols(&self) -> Option<&SymbolBucket> {
        match self.get(self.reserved_slot(ReservedSlot::Symbol)) {
            Some(Bucket::Symbol(bucket)) => Some(bucket),
            _ => None,
        }
    }

    pub fn texts(&self) -> Option<&TextBucket> {
        match self.get(self.reserved_slot(ReservedSlot::Text)) {
            Some(Bucket::Text(bucket)) => Some(bucket),
            _ => None,
        }
    }

    /// Drops buckets which did not receive any geometry.
    pub fn compact(&mut self) {
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }

    /// Number of buckets per kind, sorted by kind.
    pub fn summary(&self) -> BTreeMap<&'static str, usize> {
        let mut summary = BTreeMap::new();
        for bucket in self.buckets.values() {
            *summary.entry(bucket.kind()).or_insert(0) += 1;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use crate::render::{ReservedSlot, TileBuckets, LAYERS};

    #[test]
    fn test_slots() {
        let buckets = TileBuckets::new(4);

        assert_eq!(buckets.slot(5, 2), 22);
        assert_eq!(buckets.slot(-3, 1), 1);
        assert_eq!(buckets.slot(42, 0), (LAYERS - 1) * 4);
        assert!(buckets.slot(10, 3) < buckets.reserved_slot(ReservedSlot::Extrusion));
        assert_eq!(
            buckets.reserved_slot(ReservedSlot::Text),
            buckets.reserved_slot(ReservedSlot::Extrusion) + 2
        );
    }
}
