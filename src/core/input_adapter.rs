use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Ime, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Other,
}

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

impl KeyAction {
    pub fn is_pressed(self) -> bool {
        !matches!(self, KeyAction::Release)
    }
}

/// Host event in the shape the controller consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    FramebufferResized { width: u32, height: u32 },
    WindowResized { width: u32, height: u32 },
    Key { key: Key, action: KeyAction },
    Character(char),
    CloseRequested,
    RedrawRequested,
}

/// Adapter that bridges Winit events to host events
#[derive(Debug, Clone)]
pub struct InputAdapter {
    scale_factor: f64,
}

impl InputAdapter {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    /// Translate one Winit event into zero or more host events
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<HostEvent> {
        match event {
            WindowEvent::Resized(size) => Self::resize_events(*size, self.scale_factor).to_vec(),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // Winit follows up with a Resized event carrying the new size
                self.scale_factor = *scale_factor;
                Vec::new()
            }
            WindowEvent::KeyboardInput { event, .. } => Self::key_events(
                event.physical_key,
                event.state,
                event.repeat,
                event.text.as_deref(),
            ),
            WindowEvent::Ime(Ime::Commit(text)) => {
                text.chars().map(HostEvent::Character).collect()
            }
            WindowEvent::CloseRequested => vec![HostEvent::CloseRequested],
            WindowEvent::RedrawRequested => vec![HostEvent::RedrawRequested],
            _ => Vec::new(),
        }
    }

    /// Split a physical resize into framebuffer then logical resize
    pub fn resize_events(size: PhysicalSize<u32>, scale_factor: f64) -> [HostEvent; 2] {
        let logical = size.to_logical::<u32>(scale_factor);
        [
            HostEvent::FramebufferResized {
                width: size.width,
                height: size.height,
            },
            HostEvent::WindowResized {
                width: logical.width,
                height: logical.height,
            },
        ]
    }

    /// Key event first, then any characters the press produced
    pub fn key_events(
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
        text: Option<&str>,
    ) -> Vec<HostEvent> {
        let action = match (state, repeat) {
            (ElementState::Released, _) => KeyAction::Release,
            (ElementState::Pressed, true) => KeyAction::Repeat,
            (ElementState::Pressed, false) => KeyAction::Press,
        };

        let mut events = vec![HostEvent::Key {
            key: Self::keycode_to_key(physical_key),
            action,
        }];

        if action.is_pressed() {
            if let Some(text) = text {
                events.extend(text.chars().map(HostEvent::Character));
            }
        }

        events
    }

    /// Map Winit PhysicalKey to Key
    fn keycode_to_key(physical_key: PhysicalKey) -> Key {
        match physical_key {
            PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
            _ => Key::Other,
        }
    }
}
