//! Cohen-Sutherland line clipping against a rectangle.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Outcode: u8 {
        const LEFT = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const TOP = 0b1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clip {
    /// Both end points are inside.
    Inside,
    /// The segment lies completely outside.
    Outside,
    /// The segment crosses the border; the visible part.
    Clipped([f32; 4]),
}

#[derive(Debug, Clone)]
pub struct LineClipper {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
    prev: (f32, f32),
    prev_outcode: Outcode,
}

impl LineClipper {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            prev: (0.0, 0.0),
            prev_outcode: Outcode::empty(),
        }
    }

    fn outcode(&self, x: f32, y: f32) -> Outcode {
        let mut outcode = Outcode::empty();
        if x < self.min_x {
            outcode |= Outcode::LEFT;
        } else if x > self.max_x {
            outcode |= Outcode::RIGHT;
        }
        if y < self.min_y {
            outcode |= Outcode::BOTTOM;
        } else if y > self.max_y {
            outcode |= Outcode::TOP;
        }
        outcode
    }

    pub fn clip_start(&mut self, x: f32, y: f32) {
        self.prev = (x, y);
        self.prev_outcode = self.outcode(x, y);
    }

    /// Clips the segment from the previous point to `(x, y)`, which becomes the previous point.
    pub fn clip_next(&mut self, x: f32, y: f32) -> Clip {
        let outcode = self.outcode(x, y);
        let (x0, y0) = self.prev;
        let prev_outcode = self.prev_outcode;
        self.prev = (x, y);
        self.prev_outcode = outcode;

        if (prev_outcode | outcode).is_empty() {
            Clip::Inside
        } else if prev_outcode.intersects(outcode) {
            Clip::Outside
        } else {
            self.clip(x0, y0, prev_outcode, x, y, outcode)
        }
    }

    /// Clips a single segment.
    pub fn clip_segment(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> Clip {
        self.clip_start(x0, y0);
        self.clip_next(x1, y1)
    }

    fn clip(
        &self,
        mut x0: f32,
        mut y0: f32,
        mut outcode0: Outcode,
        mut x1: f32,
        mut y1: f32,
        mut outcode1: Outcode,
    ) -> Clip {
        loop {
            if (outcode0 | outcode1).is_empty() {
                return Clip::Clipped([x0, y0, x1, y1]);
            }
            if outcode0.intersects(outcode1) {
                return Clip::Outside;
            }

            let outside = if outcode0.is_empty() {
                outcode1
            } else {
                outcode0
            };

            let (x, y) = if outside.contains(Outcode::TOP) {
                (x0 + (x1 - x0) * (self.max_y - y0) / (y1 - y0), self.max_y)
            } else if outside.contains(Outcode::BOTTOM) {
                (x0 + (x1 - x0) * (self.min_y - y0) / (y1 - y0), self.min_y)
            } else if outside.contains(Outcode::RIGHT) {
                (self.max_x, y0 + (y1 - y0) * (self.max_x - x0) / (x1 - x0))
            } else {
                (self.min_x, y0 + (y1 - y0) * (self.min_x - x0) / (x1 - x0))
            };

            if outside == outcode0 {
                (x0, y0) = (x, y);
                outcode0 = self.outcode(x, y);
            } else {
                (x1, y1) = (x, y);
                outcode1 = self.outcode(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::render::clipper::{Clip, LineClipper};

    #[test]
    fn test_clip() {
        let mut clipper = LineClipper::new(0.0, 0.0, 256.0, 256.0);

        assert_eq!(clipper.clip_segment(10.0, 10.0, 20.0, 20.0), Clip::Inside);
        assert_eq!(
            clipper.clip_segment(-10.0, -10.0, -20.0, 300.0),
            Clip::Outside
        );

        let Clip::Clipped([x0, y0, x1, y1]) = clipper.clip_segment(-100.0, 128.0, 100.0, 128.0)
        else {
            panic!("expected a clipped segment");
        };
        assert_relative_eq!(x0, 0.0);
        assert_relative_eq!(y0, 128.0);
        assert_relative_eq!(x1, 100.0);
        assert_relative_eq!(y1, 128.0);
    }

    #[test]
    fn test_clip_next_keeps_previous_point() {
        let mut clipper = LineClipper::new(0.0, 0.0, 10.0, 10.0);
        clipper.clip_start(-5.0, 5.0);

        assert!(matches!(clipper.clip_next(5.0, 5.0), Clip::Clipped(_)));
        assert_eq!(clipper.clip_next(8.0, 8.0), Clip::Inside);
        assert!(matches!(clipper.clip_next(20.0, 20.0), Clip::Clipped(_)));
    }
}
