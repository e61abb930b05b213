use log::{debug, info};

use super::error::{HostError, HostErrorCode};
use super::input_adapter::{HostEvent, Key, KeyAction};
use super::lifecycle::Lifecycle;
use super::renderer::{FrameRenderer, LineFrame};
use super::window::{WindowContext, WindowDimensions, WindowState};
use crate::config::{self, LineStyle};
use crate::math::{LineSegment, OrthoProjection, Viewport};

/// Callbacks the windowing layer invokes on its single event thread
pub trait HostHandler {
    /// Host-reported error. Never changes state.
    fn on_error(&mut self, error: &HostError);

    /// Drawable surface changed size. Delivered before `on_window_resize`.
    fn on_framebuffer_resize(&mut self, width: u32, height: u32);

    /// Logical window size changed
    fn on_window_resize(&mut self, width: u32, height: u32);

    fn on_redraw(&mut self);

    fn on_key(&mut self, key: Key, action: KeyAction);

    fn on_char(&mut self, ch: char);

    /// Close button or equivalent OS request
    fn on_close(&mut self);

    /// Route a translated host event to its callback
    fn dispatch(&mut self, event: HostEvent) {
        match event {
            HostEvent::FramebufferResized { width, height } => {
                self.on_framebuffer_resize(width, height)
            }
            HostEvent::WindowResized { width, height } => self.on_window_resize(width, height),
            HostEvent::Key { key, action } => self.on_key(key, action),
            HostEvent::Character(ch) => self.on_char(ch),
            HostEvent::CloseRequested => self.on_close(),
            HostEvent::RedrawRequested => self.on_redraw(),
        }
    }
}

/// Owns the window and drawing context and keeps the projection in step
/// with the framebuffer.
pub struct ViewportController<W: WindowContext, R: FrameRenderer> {
    window: Option<W>,
    renderer: Option<R>,
    lifecycle: Lifecycle,
    state: WindowState,
    projection: OrthoProjection,
    viewport: Viewport,
    line: LineSegment,
    style: LineStyle,
}

impl<W: WindowContext, R: FrameRenderer> ViewportController<W, R> {
    /// Take ownership of a freshly created window and context.
    ///
    /// Hosts do not report the initial framebuffer size, so it is queried
    /// here and fed through the framebuffer resize path once.
    pub fn new(window: W, renderer: R) -> Self {
        let framebuffer = window.framebuffer_size();
        let screen = window.logical_size();

        let mut controller = Self {
            window: Some(window),
            renderer: Some(renderer),
            lifecycle: Lifecycle::Running,
            state: WindowState::new(screen, framebuffer),
            projection: OrthoProjection::first_quadrant(framebuffer.width, framebuffer.height),
            viewport: Viewport::full(framebuffer.width, framebuffer.height),
            line: Self::line_for(framebuffer),
            style: LineStyle::default(),
        };
        controller.on_framebuffer_resize(framebuffer.width, framebuffer.height);

        info!(
            "viewport ready: window {}x{}, framebuffer {}x{}",
            screen.width, screen.height, framebuffer.width, framebuffer.height
        );
        controller
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn window_state(&self) -> &WindowState {
        &self.state
    }

    pub fn projection(&self) -> &OrthoProjection {
        &self.projection
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn line(&self) -> &LineSegment {
        &self.line
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// None once shut down
    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    /// None once shut down
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Frame description for the current state
    pub fn frame(&self) -> LineFrame {
        LineFrame {
            clear_color: config::CLEAR_COLOR,
            projection: self.projection.matrix(),
            viewport: self.viewport,
            stroke: self.line.stroke(self.style.width),
            line_color: self.style.color,
        }
    }

    /// Release the context and window and stop handling events
    pub fn shutdown(&mut self) {
        if self.lifecycle == Lifecycle::Terminated {
            return;
        }
        info!("shutting down");
        self.lifecycle = Lifecycle::Terminated;
        // Surface before the window it draws into
        self.renderer = None;
        self.window = None;
    }

    fn line_for(framebuffer: WindowDimensions) -> LineSegment {
        LineSegment::from_fractions(
            framebuffer.width,
            framebuffer.height,
            config::LINE_START_FRACTION,
            config::LINE_END_FRACTION,
        )
    }
}

impl<W: WindowContext, R: FrameRenderer> HostHandler for ViewportController<W, R> {
    fn on_error(&mut self, error: &HostError) {
        eprintln!("{}", error);
    }

    fn on_framebuffer_resize(&mut self, width: u32, height: u32) {
        if !self.is_running() {
            return;
        }
        debug!("framebuffer resized to {}x{}", width, height);

        let framebuffer = WindowDimensions::new(width, height);
        self.state.set_framebuffer(framebuffer);
        self.projection = OrthoProjection::first_quadrant(width, height);
        self.viewport = Viewport::full(width, height);
        self.line = Self::line_for(framebuffer);

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.configure(self.viewport);
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn on_window_resize(&mut self, width: u32, height: u32) {
        if !self.is_running() {
            return;
        }
        debug!("window resized to {}x{}", width, height);
        self.state.set_screen(WindowDimensions::new(width, height));
    }

    fn on_redraw(&mut self) {
        if !self.is_running() {
            return;
        }
        let frame = self.frame();
        let result = match self.renderer.as_mut() {
            Some(renderer) => renderer.draw(&frame),
            None => return,
        };
        if let Err(error) = result {
            // Lost or outdated surfaces are rebuilt on the next frame
            if matches!(
                error.code,
                HostErrorCode::SurfaceLost | HostErrorCode::SurfaceOutdated
            ) {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            self.on_error(&error);
        }
    }

    fn on_key(&mut self, key: Key, action: KeyAction) {
        if !action.is_pressed() {
            return;
        }
        if key == Key::Escape {
            self.shutdown();
        }
    }

    fn on_char(&mut self, ch: char) {
        if ch == 'q' {
            self.shutdown();
        }
    }

    fn on_close(&mut self) {
        self.shutdown();
    }
}
