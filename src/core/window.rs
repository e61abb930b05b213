use std::sync::Arc;

/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Logical and framebuffer sizes, tracked independently.
///
/// On high-density displays the framebuffer holds more pixels than the
/// window has logical units. Each pair only changes through its own resize
/// path, so the two are never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowState {
    screen: WindowDimensions,
    framebuffer: WindowDimensions,
}

impl WindowState {
    pub fn new(screen: WindowDimensions, framebuffer: WindowDimensions) -> Self {
        Self { screen, framebuffer }
    }

    /// Logical window size
    pub fn screen(&self) -> WindowDimensions {
        self.screen
    }

    /// Drawable size in physical pixels
    pub fn framebuffer(&self) -> WindowDimensions {
        self.framebuffer
    }

    pub(crate) fn set_screen(&mut self, dimensions: WindowDimensions) {
        self.screen = dimensions;
    }

    pub(crate) fn set_framebuffer(&mut self, dimensions: WindowDimensions) {
        self.framebuffer = dimensions;
    }
}

/// Native window as seen by the controller
pub trait WindowContext {
    /// Drawable size in physical pixels
    fn framebuffer_size(&self) -> WindowDimensions;

    /// Size in OS window units
    fn logical_size(&self) -> WindowDimensions;

    /// Ask the host to deliver a redraw event
    fn request_redraw(&self);
}

impl WindowContext for winit::window::Window {
    fn framebuffer_size(&self) -> WindowDimensions {
        let size = self.inner_size();
        WindowDimensions::new(size.width, size.height)
    }

    fn logical_size(&self) -> WindowDimensions {
        let size = self.inner_size().to_logical::<u32>(self.scale_factor());
        WindowDimensions::new(size.width, size.height)
    }

    fn request_redraw(&self) {
        winit::window::Window::request_redraw(self);
    }
}

impl<T: WindowContext + ?Sized> WindowContext for Arc<T> {
    fn framebuffer_size(&self) -> WindowDimensions {
        (**self).framebuffer_size()
    }

    fn logical_size(&self) -> WindowDimensions {
        (**self).logical_size()
    }

    fn request_redraw(&self) {
        (**self).request_redraw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_window_dimensions_new() {
        let dims = WindowDimensions::new(1920, 1080);
        assert_eq!(dims.width, 1920);
        assert_eq!(dims.height, 1080);
    }

    #[test]
    fn test_window_dimensions_various_sizes() {
        let test_cases = [(1, 1), (640, 480), (1280, 800), (3840, 2160)];

        for (width, height) in test_cases {
            let dims = WindowDimensions::new(width, height);
            assert_eq!(dims.width, width);
            assert_eq!(dims.height, height);
        }
    }

    #[test]
    fn test_window_state_pairs_are_independent() {
        let mut state = WindowState::new(
            WindowDimensions::new(640, 480),
            WindowDimensions::new(1280, 960),
        );

        state.set_screen(WindowDimensions::new(800, 600));
        assert_eq!(state.screen(), WindowDimensions::new(800, 600));
        assert_eq!(state.framebuffer(), WindowDimensions::new(1280, 960));

        state.set_framebuffer(WindowDimensions::new(100, 50));
        assert_eq!(state.screen(), WindowDimensions::new(800, 600));
        assert_eq!(state.framebuffer(), WindowDimensions::new(100, 50));
    }

    struct MockWindow {
        dims: WindowDimensions,
        redraw_called: Cell<usize>,
    }

    impl WindowContext for MockWindow {
        fn framebuffer_size(&self) -> WindowDimensions {
            self.dims
        }

        fn logical_size(&self) -> WindowDimensions {
            self.dims
        }

        fn request_redraw(&self) {
            self.redraw_called.set(self.redraw_called.get() + 1);
        }
    }

    #[test]
    fn test_arc_forwards_to_inner() {
        let window = Arc::new(MockWindow {
            dims: WindowDimensions::new(320, 200),
            redraw_called: Cell::new(0),
        });

        assert_eq!(window.framebuffer_size(), WindowDimensions::new(320, 200));
        WindowContext::request_redraw(&window);
        WindowContext::request_redraw(&window);
        assert_eq!(window.redraw_called.get(), 2);
    }
}
