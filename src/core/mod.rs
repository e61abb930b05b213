pub mod controller;
pub mod error;
pub mod gpu_context;
pub mod input_adapter;
pub mod lifecycle;
pub mod line_renderer;
pub mod renderer;
pub mod window;

pub use controller::{HostHandler, ViewportController};
pub use error::{HostError, HostErrorCode, HostErrorQueue, HostErrorSender, InitError};
pub use gpu_context::GpuContext;
pub use input_adapter::{HostEvent, InputAdapter, Key, KeyAction};
pub use lifecycle::{ExitStatus, Lifecycle, Session};
pub use line_renderer::LineRenderer;
pub use renderer::{FrameRenderer, LineFrame};
pub use window::{WindowContext, WindowDimensions, WindowState};
