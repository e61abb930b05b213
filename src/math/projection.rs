use glam::{Mat4, Vec2, Vec4};

/// Orthographic parallel projection over an axis-aligned view volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoProjection {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoProjection {
    pub const NEAR: f32 = -1.0;
    pub const FAR: f32 = 1.0;

    /// View volume covering the first quadrant `[0,w] × [0,h] × [-1,1]`
    pub fn first_quadrant(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            right: width as f32,
            bottom: 0.0,
            top: height as f32,
            near: Self::NEAR,
            far: Self::FAR,
        }
    }

    /// Lower-left and upper-right corners of the visible region
    pub fn region(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(self.left, self.bottom),
            Vec2::new(self.right, self.top),
        )
    }

    /// Column-major matrix mapping the view volume to WebGPU clip space.
    /// Depth lands in `[0, 1]`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }

    pub fn project(&self, point: Vec2) -> Vec2 {
        let clip = self.matrix() * Vec4::new(point.x, point.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y)
    }
}

/// Drawable region of the framebuffer in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_first_quadrant_region() {
        let projection = OrthoProjection::first_quadrant(1280, 800);
        let (min, max) = projection.region();
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(1280.0, 800.0));
        assert_eq!(projection.near, -1.0);
        assert_eq!(projection.far, 1.0);
    }

    #[test]
    fn test_corners_map_to_clip_extremes() {
        let projection = OrthoProjection::first_quadrant(640, 480);
        assert_close(projection.project(Vec2::ZERO), Vec2::new(-1.0, -1.0));
        assert_close(projection.project(Vec2::new(640.0, 480.0)), Vec2::new(1.0, 1.0));
        assert_close(projection.project(Vec2::new(320.0, 240.0)), Vec2::ZERO);
    }

    #[test]
    fn test_origin_is_lower_left() {
        let projection = OrthoProjection::first_quadrant(100, 100);
        let top_left = projection.project(Vec2::new(0.0, 100.0));
        assert_close(top_left, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_depth_in_webgpu_range() {
        let clip = OrthoProjection::first_quadrant(10, 10).matrix() * Vec4::new(5.0, 5.0, 0.0, 1.0);
        assert!((0.0..=1.0).contains(&clip.z));
    }

    #[test]
    fn test_viewport_full() {
        let viewport = Viewport::full(800, 600);
        assert_eq!((viewport.x, viewport.y), (0, 0));
        assert_eq!((viewport.width, viewport.height), (800, 600));
        assert!(!viewport.is_empty());
        assert!(Viewport::full(0, 600).is_empty());
    }
}
