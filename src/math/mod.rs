mod color;
mod line;
mod projection;

pub use color::Rgba;
pub use line::LineSegment;
pub use projection::{OrthoProjection, Viewport};
