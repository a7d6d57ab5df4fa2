//! Solid and stippled line buckets.

use bytemuck::{Pod, Zeroable};
use lyon::{
    lyon_tessellation::VertexBuffers,
    math::point,
    path::Path,
    tessellation::{BuffersBuilder, LineCap as LyonCap, StrokeOptions, StrokeTessellator},
};

use crate::{
    tessellation::{IndexDataType, ShaderVertex, VertexConstructor, DEFAULT_TOLERANCE},
    theme::style::{LineCap, LineStyle, StyleId},
};

/// Zoom level from which line widths grow.
const SCALE_BASE_ZOOM: i32 = 12;
/// Factor by which line widths grow per zoom level above [`SCALE_BASE_ZOOM`].
const STROKE_INCREASE: f64 = 1.581_138_830_084_189_8;

/// Width factor for lines of a tile at `zoom` whose north edge is at `latitude` degrees.
pub fn line_scale(zoom: u8, latitude: f64) -> f32 {
    let growth = STROKE_INCREASE.powi(i32::from(zoom) - SCALE_BASE_ZOOM).max(1.0);
    let latitude = latitude.to_radians().abs().sin();
    (growth * (0.4 + 0.6 * latitude)) as f32
}

impl From<LineCap> for LyonCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => LyonCap::Butt,
            LineCap::Round => LyonCap::Round,
            LineCap::Square => LyonCap::Square,
        }
    }
}

/// Stroked lines of one style. The first line added fixes the paint of the bucket.
#[derive(Debug, Clone)]
pub struct LineBucket {
    pub style: StyleId,
    pub width: f32,
    pub cap: LineCap,
    /// Slots of the line buckets this bucket outlines.
    pub outlines: Vec<u32>,
    pub buffer: VertexBuffers<ShaderVertex, IndexDataType>,
    /// Number of indices per added line.
    pub feature_indices: Vec<u32>,
}

impl LineBucket {
    pub fn new(style: StyleId, line: &LineStyle, scale: f32) -> Self {
        let scale = if line.fixed { 1.0 } else { scale };
        Self {
            style,
            width: (line.width * scale).max(line.min),
            cap: line.cap,
            outlines: Vec::new(),
            buffer: VertexBuffers::new(),
            feature_indices: Vec::new(),
        }
    }

    pub fn add_outline(&mut self, slot: u32) {
        if !self.outlines.contains(&slot) {
            self.outlines.push(slot);
        }
    }

    /// Strokes a polyline. Lines with fewer than two points are ignored.
    pub fn add_line(
        &mut self,
        points: &[f32],
        closed: bool,
    ) -> Result<(), lyon::tessellation::TessellationError> {
        if points.len() < 4 {
            return Ok(());
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0], points[1]));
        for xy in points[2..].chunks_exact(2) {
            builder.line_to(point(xy[0], xy[1]));
        }
        builder.end(closed);

        let before = self.buffer.indices.len();
        StrokeTessellator::new().tessellate_path(
            &builder.build(),
            &StrokeOptions::tolerance(DEFAULT_TOLERANCE)
                .with_line_width(self.width)
                .with_line_cap(self.cap.into()),
            &mut BuffersBuilder::new(&mut self.buffer, VertexConstructor {}),
        )?;
        self.feature_indices
            .push((self.buffer.indices.len() - before) as u32);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.indices.is_empty() && self.outlines.is_empty()
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineTexVertex {
    pub position: [f32; 2],
    pub normal: [f32; 2],
    /// Distance along the line, used to look up the stipple texture.
    pub distance: f32,
}

/// Stippled lines, one quad per segment.
#[derive(Debug, Clone)]
pub struct LineTexBucket {
    pub style: StyleId,
    pub width: f32,
    pub stipple: u32,
    pub vertices: Vec<LineTexVertex>,
    pub indices: Vec<IndexDataType>,
}

impl LineTexBucket {
    pub fn new(style: StyleId, line: &LineStyle, scale: f32) -> Self {
        let scale = if line.fixed { 1.0 } else { scale };
        Self {
            style,
            width: (line.width * scale).max(line.min),
            stipple: line.stipple,
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn add_line(&mut self, points: &[f32]) {
        let mut distance = 0.0;
        for segment in points.windows(4).step_by(2) {
            let (x1, y1, x2, y2) = (segment[0], segment[1], segment[2], segment[3]);
            let (dx, dy) = (x2 - x1, y2 - y1);
            let length = (dx * dx + dy * dy).sqrt();
            if length == 0.0 {
                continue;
            }
            let normal = [-dy / length, dx / length];
            let flipped = [-normal[0], -normal[1]];

            let base = self.vertices.len() as IndexDataType;
            for (position, normal, distance) in [
                ([x1, y1], normal, distance),
                ([x1, y1], flipped, distance),
                ([x2, y2], normal, distance + length),
                ([x2, y2], flipped, distance + length),
            ] {
                self.vertices.push(LineTexVertex {
                    position,
                    normal,
                    distance,
                });
            }
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
            distance += length;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        render::line::{line_scale, LineBucket, LineTexBucket},
        theme::style::{LineStyle, StyleId},
    };

    fn style(width: f32) -> LineStyle {
        LineStyle::new(csscolorparser::Color::new(0.0, 0.0, 0.0, 1.0), width)
    }

    #[test]
    fn test_line_scale() {
        assert_relative_eq!(line_scale(10, 90.0), 1.0);
        assert_relative_eq!(line_scale(12, 0.0), 0.4);
        assert_relative_eq!(line_scale(14, 90.0), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_add_line() {
        let mut bucket = LineBucket::new(StyleId(0), &style(2.0), 1.5);
        assert_eq!(bucket.width, 3.0);

        bucket.add_line(&[0.0, 0.0], false).unwrap();
        assert!(bucket.is_empty());

        bucket.add_line(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0], false).unwrap();
        assert!(!bucket.is_empty());
        assert_eq!(bucket.feature_indices.len(), 1);
        assert_eq!(bucket.buffer.indices.len() % 3, 0);

        let mut fixed = style(2.0);
        fixed.fixed = true;
        assert_eq!(LineBucket::new(StyleId(0), &fixed, 1.5).width, 2.0);
    }

    #[test]
    fn test_stipple_distance() {
        let mut bucket = LineTexBucket::new(StyleId(1), &style(1.0), 1.0);
        bucket.add_line(&[0.0, 0.0, 3.0, 4.0, 3.0, 14.0]);

        assert_eq!(bucket.vertices.len(), 8);
        assert_eq!(bucket.indices.len(), 12);
        assert_eq!(bucket.vertices[3].distance, 5.0);
        assert_eq!(bucket.vertices[7].distance, 15.0);
    }
}
