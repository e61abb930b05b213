use glam::Vec2;

/// A single 2D line segment in framebuffer coordinates, origin lower-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Segment whose endpoints are fixed fractions of a `width × height` area
    pub fn from_fractions(width: u32, height: u32, start: Vec2, end: Vec2) -> Self {
        let size = Vec2::new(width as f32, height as f32);
        Self {
            start: start * size,
            end: end * size,
        }
    }

    pub fn ends(&self) -> [Vec2; 2] {
        [self.start, self.end]
    }

    /// Tessellate the segment into two triangles of the given stroke width.
    ///
    /// GPU line primitives are one pixel wide, so thick strokes are drawn as
    /// a quad offset by half the width along the segment normal. Returns no
    /// vertices for a degenerate segment.
    pub fn stroke(&self, width: f32) -> Vec<Vec2> {
        let direction = (self.end - self.start).normalize_or_zero();
        if direction == Vec2::ZERO || width <= 0.0 {
            return Vec::new();
        }

        let offset = direction.perp() * (width * 0.5);
        let a = self.start + offset;
        let b = self.start - offset;
        let c = self.end + offset;
        let d = self.end - offset;

        vec![a, b, c, c, b, d]
    }
}
