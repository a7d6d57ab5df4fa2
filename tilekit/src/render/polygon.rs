//! Area buckets.

use crate::{
    tessellation::{IndexDataType, ShaderVertex, Triangles},
    theme::style::StyleId,
};

/// Areas kept as rings. The renderer fills them with the even-odd rule.
#[derive(Debug, Clone)]
pub struct PolygonBucket {
    pub style: StyleId,
    pub points: Vec<f32>,
    /// Number of floats per ring.
    pub rings: Vec<u32>,
    /// Number of rings per polygon.
    pub polygons: Vec<u32>,
}

impl PolygonBucket {
    pub fn new(style: StyleId) -> Self {
        Self {
            style,
            points: Vec::new(),
            rings: Vec::new(),
            polygons: Vec::new(),
        }
    }

    /// Adds one polygon. Rings with fewer than three points are dropped, a polygon whose outer
    /// ring is dropped is skipped as a whole.
    pub fn add<'a>(&mut self, rings: impl IntoIterator<Item = &'a [f32]>) {
        let mut count = 0;
        for (i, ring) in rings.into_iter().enumerate() {
            if ring.len() < 6 {
                if i == 0 {
                    return;
                }
                continue;
            }
            self.points.extend_from_slice(ring);
            self.rings.push(ring.len() as u32);
            count += 1;
        }

        if count > 0 {
            self.polygons.push(count);
        }
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Triangulated areas.
#[derive(Debug, Clone)]
pub struct MeshBucket {
    pub style: StyleId,
    pub vertices: Vec<ShaderVertex>,
    pub indices: Vec<IndexDataType>,
}

impl MeshBucket {
    pub fn new(style: StyleId) -> Self {
        Self {
            style,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn add(&mut self, triangles: &Triangles) {
        let base = self.vertices.len() as IndexDataType;
        self.vertices.extend(
            triangles
                .vertices
                .iter()
                .map(|position| ShaderVertex::new(*position, [0.0, 0.0])),
        );
        self.indices
            .extend(triangles.indices.iter().map(|index| base + index));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        render::polygon::{MeshBucket, PolygonBucket},
        tessellation::{FanTriangulator, Triangulator},
        theme::style::StyleId,
    };

    const SQUARE: [f32; 8] = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];

    #[test]
    fn test_polygon_rings() {
        let mut bucket = PolygonBucket::new(StyleId(0));
        bucket.add([&SQUARE[..], &[1.0, 1.0, 2.0, 2.0]]);
        bucket.add([&SQUARE[..4]]);

        assert_eq!(bucket.num_polygons(), 1);
        assert_eq!(bucket.rings, vec![8]);
        assert_eq!(bucket.points.len(), 8);
    }

    #[test]
    fn test_mesh_offsets() {
        let triangles = FanTriangulator.triangulate(&SQUARE, &[8]).unwrap();
        let mut bucket = MeshBucket::new(StyleId(0));
        bucket.add(&triangles);
        bucket.add(&triangles);

        assert_eq!(bucket.vertices.len(), 8);
        assert_eq!(&bucket.indices[6..9], &[4, 5, 6]);
    }
}
