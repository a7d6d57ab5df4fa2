//! Triangulators used for area meshes and extrusion roofs.

use lyon::{
    lyon_tessellation::VertexBuffers,
    math::point,
    path::Path,
    tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex},
};

use crate::tessellation::{
    open_ring, IndexDataType, TriangulationError, Triangles, Triangulator, DEFAULT_TOLERANCE,
};

/// Triangulates with lyon's fill tessellator using the even-odd rule, so holes are cut out of
/// the outer ring.
pub struct LyonTriangulator {
    tessellator: FillTessellator,
}

impl Default for LyonTriangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LyonTriangulator {
    pub fn new() -> Self {
        Self {
            tessellator: FillTessellator::new(),
        }
    }
}

impl Triangulator for LyonTriangulator {
    fn triangulate(
        &mut self,
        points: &[f32],
        ring_lengths: &[usize],
    ) -> Result<Triangles, TriangulationError> {
        let mut builder = Path::builder();
        let mut offset = 0;
        for (i, &length) in ring_lengths.iter().enumerate() {
            let Some(ring) = points.get(offset..offset + length) else {
                break;
            };
            offset += length;

            let ring = open_ring(ring);
            if ring.len() < 6 {
                if i == 0 {
                    return Err(TriangulationError::Degenerate);
                }
                continue;
            }

            builder.begin(point(ring[0], ring[1]));
            for xy in ring[2..].chunks_exact(2) {
                builder.line_to(point(xy[0], xy[1]));
            }
            builder.end(true);
        }
        if offset == 0 {
            return Err(TriangulationError::Degenerate);
        }

        let mut buffer: VertexBuffers<[f32; 2], IndexDataType> = VertexBuffers::new();
        self.tessellator
            .tessellate_path(
                &builder.build(),
                &FillOptions::tolerance(DEFAULT_TOLERANCE).with_fill_rule(FillRule::EvenOdd),
                &mut BuffersBuilder::new(&mut buffer, |vertex: FillVertex| {
                    vertex.position().to_array()
                }),
            )
            .map_err(TriangulationError::Tessellation)?;

        if buffer.indices.is_empty() {
            return Err(TriangulationError::Degenerate);
        }
        Ok(Triangles {
            vertices: buffer.vertices,
            indices: buffer.indices,
        })
    }
}

/// Fans out from the first point of the outer ring. Holes are ignored. A ring with `n` distinct
/// points yields `n - 2` triangles.
#[derive(Default)]
pub struct FanTriangulator;

impl Triangulator for FanTriangulator {
    fn triangulate(
        &mut self,
        points: &[f32],
        ring_lengths: &[usize],
    ) -> Result<Triangles, TriangulationError> {
        let length = ring_lengths.first().copied().unwrap_or(points.len());
        let ring = open_ring(points.get(..length).ok_or(TriangulationError::Degenerate)?);
        let n = ring.len() / 2;
        if n < 3 {
            return Err(TriangulationError::Degenerate);
        }

        let vertices = ring.chunks_exact(2).map(|xy| [xy[0], xy[1]]).collect();
        let indices = (1..n as IndexDataType - 1)
            .flat_map(|i| [0, i, i + 1])
            .collect();
        Ok(Triangles { vertices, indices })
    }
}

#[cfg(test)]
mod tests {
    use crate::tessellation::{
        FanTriangulator, LyonTriangulator, TriangulationError, Triangulator,
    };

    const SQUARE: [f32; 8] = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];

    #[test]
    fn test_fan() {
        let triangles = FanTriangulator.triangulate(&SQUARE, &[8]).unwrap();
        assert_eq!(triangles.triangle_count(), 2);
        assert_eq!(triangles.indices, vec![0, 1, 2, 0, 2, 3]);

        let mut closed = SQUARE.to_vec();
        closed.extend_from_slice(&[0.0, 0.0]);
        assert_eq!(
            FanTriangulator
                .triangulate(&closed, &[10])
                .unwrap()
                .triangle_count(),
            2
        );
    }

    #[test]
    fn test_lyon_with_hole() {
        let mut points = vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
        points.extend_from_slice(&[25.0, 25.0, 75.0, 25.0, 75.0, 75.0, 25.0, 75.0]);

        let mut triangulator = LyonTriangulator::new();
        let solid = triangulator.triangulate(&points[..8], &[8]).unwrap();
        let holed = triangulator.triangulate(&points, &[8, 8]).unwrap();
        assert_eq!(solid.triangle_count(), 2);
        assert!(holed.triangle_count() > solid.triangle_count());
    }

    #[test]
    fn test_degenerate() {
        assert!(matches!(
            FanTriangulator.triangulate(&[0.0, 0.0, 1.0, 1.0], &[4]),
            Err(TriangulationError::Degenerate)
        ));
        assert!(matches!(
            LyonTriangulator::new().triangulate(&[0.0, 0.0, 1.0, 1.0], &[4]),
            Err(TriangulationError::Degenerate)
        ));
    }
}
