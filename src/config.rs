// config.rs - Fixed window and drawing parameters
use glam::Vec2;

use crate::math::Rgba;

pub const WINDOW_TITLE: &str = "Experiment with line drawing";
pub const DEFAULT_WINDOW_WIDTH: u32 = 640;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 480;

pub const CLEAR_COLOR: Rgba = Rgba::WHITE;
pub const LINE_COLOR: Rgba = Rgba::BLACK;
pub const LINE_WIDTH: f32 = 3.0;

/// Line endpoints as fractions of the framebuffer size
pub const LINE_START_FRACTION: Vec2 = Vec2::new(0.25, 0.75);
pub const LINE_END_FRACTION: Vec2 = Vec2::new(0.75, 0.25);

/// Stroke appearance shared by every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: LINE_COLOR,
            width: LINE_WIDTH,
        }
    }
}
