//! Building extrusions.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::{
    tessellation::{open_ring, IndexDataType, TriangulationError, Triangulator},
    theme::style::{ExtrusionStyle, StyleId},
};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ExtrusionVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl ExtrusionVertex {
    fn new(x: f32, y: f32, z: f32, normal: [f32; 3], color: [f32; 4]) -> Self {
        Self {
            position: [x, y, z],
            normal,
            color,
        }
    }
}

/// Paints of one extruded element as RGBA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionColors {
    pub side: [f32; 4],
    pub top: [f32; 4],
    pub line: [f32; 4],
}

fn rgba(color: &csscolorparser::Color) -> [f32; 4] {
    [
        color.r as f32,
        color.g as f32,
        color.b as f32,
        color.a as f32,
    ]
}

impl From<&ExtrusionStyle> for ExtrusionColors {
    fn from(style: &ExtrusionStyle) -> Self {
        Self {
            side: rgba(&style.side_color),
            top: rgba(&style.top_color),
            line: rgba(&style.line_color),
        }
    }
}

/// Indices and outline paint of one extruded element.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionElement {
    pub style: StyleId,
    pub indices: Range<usize>,
    pub line_color: [f32; 4],
}

/// Walls and roofs of all extruded elements of a tile. Wall vertices carry the side color and
/// roof vertices the top color of their element.
#[derive(Debug, Clone)]
pub struct ExtrusionBucket {
    /// Meters per tile pixel.
    pub ground_scale: f32,
    pub vertices: Vec<ExtrusionVertex>,
    pub indices: Vec<IndexDataType>,
    pub elements: Vec<ExtrusionElement>,
    pub wall_quads: usize,
    pub roof_triangles: usize,
}

impl ExtrusionBucket {
    pub fn new(ground_scale: f64) -> Self {
        Self {
            ground_scale: ground_scale as f32,
            vertices: Vec::new(),
            indices: Vec::new(),
            elements: Vec::new(),
            wall_quads: 0,
            roof_triangles: 0,
        }
    }

    /// Extrudes the footprint described by `points` and `ring_lengths` from `min_height` to
    /// `height`, both in meters. The roof is skipped if it cannot be triangulated.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &mut self,
        style: StyleId,
        colors: &ExtrusionColors,
        points: &[f32],
        ring_lengths: &[usize],
        height: f32,
        min_height: f32,
        triangulator: &mut dyn Triangulator,
    ) {
        let top = height / self.ground_scale;
        let bottom = min_height / self.ground_scale;
        if top <= bottom {
            return;
        }
        let start = self.indices.len();

        let mut offset = 0;
        for &length in ring_lengths {
            let Some(ring) = points.get(offset..offset + length) else {
                break;
            };
            offset += length;
            self.add_walls(open_ring(ring), top, bottom, colors.side);
        }

        match triangulator.triangulate(points, ring_lengths) {
            Ok(triangles) => {
                let base = self.vertices.len() as IndexDataType;
                self.vertices.extend(triangles.vertices.iter().map(|[x, y]| {
                    ExtrusionVertex::new(*x, *y, top, [0.0, 0.0, 1.0], colors.top)
                }));
                self.indices
                    .extend(triangles.indices.iter().map(|index| base + index));
                self.roof_triangles += triangles.triangle_count();
            }
            Err(TriangulationError::Degenerate) => {}
            Err(err) => log::debug!("skipping extrusion roof: {err}"),
        }

        if self.indices.len() > start {
            self.elements.push(ExtrusionElement {
                style,
                indices: start..self.indices.len(),
                line_color: colors.line,
            });
        }
    }

    fn add_walls(&mut self, ring: &[f32], top: f32, bottom: f32, color: [f32; 4]) {
        let n = ring.len() / 2;
        if n < 3 {
            return;
        }

        for i in 0..n {
            let j = (i + 1) % n;
            let (x1, y1) = (ring[i * 2], ring[i * 2 + 1]);
            let (x2, y2) = (ring[j * 2], ring[j * 2 + 1]);
            let (dx, dy) = (x2 - x1, y2 - y1);
            let length = (dx * dx + dy * dy).sqrt();
            if length == 0.0 {
                continue;
            }
            let normal = [dy / length, -dx / length, 0.0];

            let base = self.vertices.len() as IndexDataType;
            self.vertices.extend_from_slice(&[
                ExtrusionVertex::new(x1, y1, bottom, normal, color),
                ExtrusionVertex::new(x2, y2, bottom, normal, color),
                ExtrusionVertex::new(x1, y1, top, normal, color),
                ExtrusionVertex::new(x2, y2, top, normal, color),
            ]);
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
            self.wall_quads += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        render::extrusion::{ExtrusionBucket, ExtrusionColors},
        tessellation::FanTriangulator,
        theme::style::{ExtrusionStyle, StyleId},
    };

    const SQUARE: [f32; 8] = [0.0, 0.0, 20.0, 0.0, 20.0, 20.0, 0.0, 20.0];

    fn colors() -> ExtrusionColors {
        ExtrusionColors::from(&ExtrusionStyle::default())
    }

    #[test]
    fn test_walls_and_roof() {
        let mut bucket = ExtrusionBucket::new(2.0);
        let colors = colors();
        bucket.add(StyleId(0), &colors, &SQUARE, &[8], 30.0, 0.0, &mut FanTriangulator);

        assert_eq!(bucket.wall_quads, 4);
        assert_eq!(bucket.roof_triangles, 2);
        assert_eq!(bucket.indices.len(), 4 * 6 + 2 * 3);
        assert!(bucket
            .vertices
            .iter()
            .all(|vertex| vertex.position[2] == 0.0 || vertex.position[2] == 15.0));
        assert_eq!(bucket.elements.len(), 1);
        assert_eq!(bucket.elements[0].indices, 0..bucket.indices.len());
        assert_eq!(bucket.elements[0].line_color, colors.line);
    }

    #[test]
    fn test_element_colors() {
        let mut red = ExtrusionStyle::default();
        red.side_color = csscolorparser::Color::new(1.0, 0.0, 0.0, 1.0);
        red.top_color = csscolorparser::Color::new(0.5, 0.0, 0.0, 1.0);
        let red = ExtrusionColors::from(&red);
        let plain = colors();

        let mut bucket = ExtrusionBucket::new(1.0);
        bucket.add(StyleId(3), &red, &SQUARE, &[8], 10.0, 0.0, &mut FanTriangulator);
        let first = bucket.vertices.len();
        bucket.add(StyleId(4), &plain, &SQUARE, &[8], 10.0, 0.0, &mut FanTriangulator);

        let (walls, roof) = bucket.vertices[..first].split_at(16);
        assert!(walls.iter().all(|vertex| vertex.color == [1.0, 0.0, 0.0, 1.0]));
        assert!(roof.iter().all(|vertex| vertex.color == [0.5, 0.0, 0.0, 1.0]));
        assert!(bucket.vertices[first..]
            .iter()
            .all(|vertex| vertex.color == plain.side || vertex.color == plain.top));

        let styles: Vec<_> = bucket.elements.iter().map(|element| element.style).collect();
        assert_eq!(styles, vec![StyleId(3), StyleId(4)]);
        assert_eq!(bucket.elements[0].indices.end, bucket.elements[1].indices.start);
    }

    #[test]
    fn test_empty_height() {
        let mut bucket = ExtrusionBucket::new(2.0);
        bucket.add(StyleId(0), &colors(), &SQUARE, &[8], 10.0, 10.0, &mut FanTriangulator);
        assert!(bucket.is_empty());
        assert!(bucket.elements.is_empty());
    }
}
