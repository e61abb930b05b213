use log::error;

use super::controller::{HostHandler, ViewportController};
use super::error::{HostError, InitError};
use super::input_adapter::HostEvent;
use super::renderer::FrameRenderer;
use super::window::WindowContext;

/// Controller state. There is no transition back to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Running,
    Terminated,
}

/// How the process ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    InitFailure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::InitFailure => 1,
        }
    }
}

/// Startup outcome and the running controller, independent of the event loop.
///
/// Holds either nothing (not started), a running controller, a fatal
/// startup error, or nothing again once the controller has shut down.
pub struct Session<W: WindowContext, R: FrameRenderer> {
    controller: Option<ViewportController<W, R>>,
    failure: Option<InitError>,
    finished: bool,
}

impl<W: WindowContext, R: FrameRenderer> Session<W, R> {
    pub fn new() -> Self {
        Self {
            controller: None,
            failure: None,
            finished: false,
        }
    }

    /// True once a controller was started or startup failed
    pub fn is_started(&self) -> bool {
        self.controller.is_some() || self.failure.is_some() || self.finished
    }

    /// True when the event loop should stop
    pub fn is_finished(&self) -> bool {
        self.finished || self.failure.is_some()
    }

    /// Hand a freshly created window and context to a new controller.
    /// Ignored after a start, a failure or a shutdown.
    pub fn start(&mut self, window: W, renderer: R) {
        if self.is_started() {
            return;
        }
        self.controller = Some(ViewportController::new(window, renderer));
    }

    /// Record a fatal startup error. No further events are dispatched.
    pub fn fail(&mut self, e: InitError) {
        error!("{}", e);
        self.controller = None;
        if self.failure.is_none() {
            self.failure = Some(e);
        }
    }

    /// Dispatch host events, then pending host errors.
    /// Returns true when the event loop should exit.
    pub fn handle<E, H>(&mut self, events: E, errors: H) -> bool
    where
        E: IntoIterator<Item = HostEvent>,
        H: IntoIterator<Item = HostError>,
    {
        let Some(controller) = self.controller.as_mut() else {
            return self.is_finished();
        };

        for event in events {
            controller.dispatch(event);
        }
        for host_error in errors {
            controller.on_error(&host_error);
        }

        if !controller.is_running() {
            self.controller = None;
            self.finished = true;
        }
        self.is_finished()
    }

    pub fn controller(&self) -> Option<&ViewportController<W, R>> {
        self.controller.as_ref()
    }

    pub fn failure(&self) -> Option<&InitError> {
        self.failure.as_ref()
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.failure.is_some() {
            ExitStatus::InitFailure
        } else {
            ExitStatus::Success
        }
    }
}

impl<W: WindowContext, R: FrameRenderer> Default for Session<W, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::InitFailure.code(), 1);
    }

    #[test]
    fn test_default_is_running() {
        assert_eq!(Lifecycle::default(), Lifecycle::Running);
    }
}
