//! Tessellation for lines and polygons is implemented here.

use bytemuck::{Pod, Zeroable};
use lyon::tessellation::{FillVertex, FillVertexConstructor, StrokeVertex, StrokeVertexConstructor};
use thiserror::Error;

mod triangulator;

pub use triangulator::{FanTriangulator, LyonTriangulator};

pub const DEFAULT_TOLERANCE: f32 = 0.02;

/// Vertex buffers index data type.
pub type IndexDataType = u32;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ShaderVertex {
    pub position: [f32; 2],
    pub normal: [f32; 2],
}

impl ShaderVertex {
    pub fn new(position: [f32; 2], normal: [f32; 2]) -> Self {
        Self { position, normal }
    }
}

/// Constructor for Fill and Stroke vertices.
pub struct VertexConstructor {}

impl FillVertexConstructor<ShaderVertex> for VertexConstructor {
    fn new_vertex(&mut self, vertex: FillVertex) -> ShaderVertex {
        ShaderVertex::new(vertex.position().to_array(), [0.0, 0.0])
    }
}

impl StrokeVertexConstructor<ShaderVertex> for VertexConstructor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> ShaderVertex {
        ShaderVertex::new(
            vertex.position_on_path().to_array(),
            vertex.normal().to_array(),
        )
    }
}

#[derive(Error, Debug)]
pub enum TriangulationError {
    #[error("polygon has fewer than three points")]
    Degenerate,
    #[error("tessellation failed: {0:?}")]
    Tessellation(lyon::tessellation::TessellationError),
}

/// Result of a triangulation. Indices refer to `vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangles {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<IndexDataType>,
}

impl Triangles {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Splits a polygon into triangles.
///
/// `points` holds interleaved x/y pairs, `ring_lengths` the number of floats of the outer ring
/// followed by those of the holes. Failures only skip the affected polygon.
pub trait Triangulator: Send {
    fn triangulate(
        &mut self,
        points: &[f32],
        ring_lengths: &[usize],
    ) -> Result<Triangles, TriangulationError>;
}

/// Drops the last point of a ring if it repeats the first one.
pub(crate) fn open_ring(ring: &[f32]) -> &[f32] {
    let n = ring.len();
    if n >= 4 && ring[0] == ring[n - 2] && ring[1] == ring[n - 1] {
        &ring[..n - 2]
    } else {
        ring
    }
}
