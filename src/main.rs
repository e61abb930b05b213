use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use line_experiment::cli::Cli;
use line_experiment::config::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, WINDOW_TITLE};
use line_experiment::core::{
    ExitStatus, HostErrorQueue, InitError, InputAdapter, LineRenderer, Session,
};

// === Application ===

struct App {
    session: Session<Arc<Window>, LineRenderer>,
    input: InputAdapter,
    errors: HostErrorQueue,
}

impl App {
    fn new() -> Self {
        Self {
            session: Session::new(),
            input: InputAdapter::new(1.0),
            errors: HostErrorQueue::new(),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(WINDOW_TITLE)
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        DEFAULT_WINDOW_WIDTH,
                        DEFAULT_WINDOW_HEIGHT,
                    )),
            )?,
        );

        let renderer = LineRenderer::new(window.clone(), self.errors.sender())?;

        self.input = InputAdapter::new(window.scale_factor());
        self.session.start(window, renderer);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_started() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.session.fail(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let events = self.input.translate(&event);
        if self.session.handle(events, self.errors.drain()) {
            event_loop.exit();
        }
    }
}

/// Any event loop failure is fatal and exits with status 1, whether it
/// happens at startup or while running.
fn run() -> ExitStatus {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("{}", InitError::from(e));
            return ExitStatus::InitFailure;
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("event loop stopped unexpectedly: {}", e);
        return ExitStatus::InitFailure;
    }

    app.session.exit_status()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    info!("{} - press Escape or q to quit", WINDOW_TITLE);
    ExitCode::from(run().code())
}
