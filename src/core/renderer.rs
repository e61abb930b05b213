use glam::{Mat4, Vec2};

use super::error::HostError;
use crate::math::{Rgba, Viewport};

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct LineFrame {
    pub clear_color: Rgba,
    pub projection: Mat4,
    pub viewport: Viewport,
    /// Triangle-list vertices of the stroked segment
    pub stroke: Vec<Vec2>,
    pub line_color: Rgba,
}

/// Drawing context bound to a window surface
pub trait FrameRenderer {
    /// Resize the drawable surface to a new framebuffer
    fn configure(&mut self, viewport: Viewport);

    /// Clear, draw the frame and present it
    fn draw(&mut self, frame: &LineFrame) -> Result<(), HostError>;
}
