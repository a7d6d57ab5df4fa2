//! Placed labels and symbols.

use rstar::{RTree, RTreeObject, AABB};

use crate::theme::style::StyleId;

/// A placed label. Way labels carry the segment they are drawn along, point labels a
/// degenerate segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub style: StyleId,
    /// Drawn with the stroke paint of the style.
    pub outline: bool,
    pub x: f32,
    pub y: f32,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
}

impl TextItem {
    pub fn at_point(text: &str, style: StyleId, x: f32, y: f32, width: f32) -> Self {
        Self {
            text: text.to_string(),
            style,
            outline: false,
            x,
            y,
            x1: x,
            y1: y,
            x2: x,
            y2: y,
            width,
        }
    }

    pub fn is_way_label(&self) -> bool {
        self.x1 != self.x2 || self.y1 != self.y2
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextBucket {
    pub items: Vec<TextItem>,
}

impl TextBucket {
    /// Fill items in placement order.
    pub fn labels(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter(|item| !item.outline)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolSource {
    Bitmap(String),
    Circle { radius: f32, style: StyleId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolItem {
    pub source: SymbolSource,
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees for symbols along ways.
    pub angle: f32,
    pub align_center: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolBucket {
    pub items: Vec<SymbolItem>,
}

impl SymbolBucket {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Segment of a placed way label.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl RTreeObject for PlacedLabel {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.x1, self.y1], [self.x2, self.y2])
    }
}

/// Way labels placed on a tile so far.
#[derive(Debug, Default)]
pub struct LabelIndex {
    tree: RTree<PlacedLabel>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: PlacedLabel) {
        self.tree.insert(label);
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Whether `candidate` crosses a placed label, or overlaps a placed label with the same
    /// text once both boxes are grown by `slack`.
    pub fn collides(&self, candidate: &PlacedLabel, slack: f32) -> bool {
        let envelope = candidate.envelope();
        let lower = envelope.lower();
        let upper = envelope.upper();
        let search = AABB::from_corners(
            [lower[0] - slack, lower[1] - slack],
            [upper[0] + slack, upper[1] + slack],
        );

        self.tree
            .locate_in_envelope_intersecting(&search)
            .any(|placed| {
                segments_intersect(
                    (candidate.x1, candidate.y1, candidate.x2, candidate.y2),
                    (placed.x1, placed.y1, placed.x2, placed.y2),
                ) || placed.text == candidate.text
            })
    }
}

fn orientation(ax: f32, ay: f32, bx: f32, by: f32, cx: f32, cy: f32) -> f32 {
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

/// Proper or touching intersection of two segments.
pub fn segments_intersect(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    let d1 = orientation(b.0, b.1, b.2, b.3, a.0, a.1);
    let d2 = orientation(b.0, b.1, b.2, b.3, a.2, a.3);
    let d3 = orientation(a.0, a.1, a.2, a.3, b.0, b.1);
    let d4 = orientation(a.0, a.1, a.2, a.3, b.2, b.3);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    let on_segment = |px: f32, py: f32, qx: f32, qy: f32, rx: f32, ry: f32| {
        rx >= px.min(qx) && rx <= px.max(qx) && ry >= py.min(qy) && ry <= py.max(qy)
    };
    (d1 == 0.0 && on_segment(b.0, b.1, b.2, b.3, a.0, a.1))
        || (d2 == 0.0 && on_segment(b.0, b.1, b.2, b.3, a.2, a.3))
        || (d3 == 0.0 && on_segment(a.0, a.1, a.2, a.3, b.0, b.1))
        || (d4 == 0.0 && on_segment(a.0, a.1, a.2, a.3, b.2, b.3))
}
