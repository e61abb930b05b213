use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

/// Fatal startup failure. The process exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to initialize windowing: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create drawing context: {0:#}")]
    Context(#[from] anyhow::Error),
}

/// Numeric category of a host-reported runtime error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum HostErrorCode {
    OutOfMemory = 1,
    Validation = 2,
    Internal = 3,
    SurfaceLost = 4,
    SurfaceOutdated = 5,
    SurfaceTimeout = 6,
    Other = 7,
}

impl HostErrorCode {
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for HostErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Non-fatal error reported by the windowing or GPU layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {description}")]
pub struct HostError {
    pub code: HostErrorCode,
    pub description: String,
}

impl HostError {
    pub fn new(code: HostErrorCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }
}

impl From<wgpu::Error> for HostError {
    fn from(error: wgpu::Error) -> Self {
        let code = match &error {
            wgpu::Error::OutOfMemory { .. } => HostErrorCode::OutOfMemory,
            wgpu::Error::Validation { .. } => HostErrorCode::Validation,
            wgpu::Error::Internal { .. } => HostErrorCode::Internal,
            #[allow(unreachable_patterns)]
            _ => HostErrorCode::Other,
        };
        Self::new(code, error.to_string())
    }
}

impl From<wgpu::SurfaceError> for HostError {
    fn from(error: wgpu::SurfaceError) -> Self {
        let code = match error {
            wgpu::SurfaceError::Lost => HostErrorCode::SurfaceLost,
            wgpu::SurfaceError::Outdated => HostErrorCode::SurfaceOutdated,
            wgpu::SurfaceError::Timeout => HostErrorCode::SurfaceTimeout,
            wgpu::SurfaceError::OutOfMemory => HostErrorCode::OutOfMemory,
            _ => HostErrorCode::Other,
        };
        Self::new(code, error.to_string())
    }
}

pub type HostErrorSender = Sender<HostError>;

/// Collects errors raised from GPU callbacks so the event thread can
/// hand them to the controller between events.
#[derive(Debug)]
pub struct HostErrorQueue {
    sender: Sender<HostError>,
    receiver: Receiver<HostError>,
}

impl HostErrorQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> HostErrorSender {
        self.sender.clone()
    }

    /// Pending errors in arrival order, without blocking
    pub fn drain(&self) -> impl Iterator<Item = HostError> + '_ {
        self.receiver.try_iter()
    }
}

impl Default for HostErrorQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let error = HostError::new(HostErrorCode::Validation, "invalid enum");
        assert_eq!(error.to_string(), "2: invalid enum");
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            HostErrorCode::OutOfMemory,
            HostErrorCode::Validation,
            HostErrorCode::Internal,
            HostErrorCode::SurfaceLost,
            HostErrorCode::SurfaceOutdated,
            HostErrorCode::SurfaceTimeout,
            HostErrorCode::Other,
        ];
        let set: std::collections::HashSet<_> = codes.iter().map(|c| c.value()).collect();
        assert_eq!(set.len(), codes.len());
    }

    #[test]
    fn test_surface_error_mapping() {
        assert_eq!(
            HostError::from(wgpu::SurfaceError::Lost).code,
            HostErrorCode::SurfaceLost
        );
        assert_eq!(
            HostError::from(wgpu::SurfaceError::Outdated).code,
            HostErrorCode::SurfaceOutdated
        );
        assert_eq!(
            HostError::from(wgpu::SurfaceError::Timeout).code,
            HostErrorCode::SurfaceTimeout
        );
    }

    #[test]
    fn test_queue_drains_in_order() {
        let queue = HostErrorQueue::new();
        let sender = queue.sender();
        sender.send(HostError::new(HostErrorCode::Internal, "first")).unwrap();
        sender.send(HostError::new(HostErrorCode::Other, "second")).unwrap();

        let drained: Vec<_> = queue.drain().map(|e| e.description).collect();
        assert_eq!(drained, vec!["first", "second"]);
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_queue_accepts_errors_from_other_threads() {
        let queue = HostErrorQueue::new();
        let sender = queue.sender();
        std::thread::spawn(move || {
            sender.send(HostError::new(HostErrorCode::OutOfMemory, "oom")).unwrap();
        })
        .join()
        .unwrap();

        let errors: Vec<_> = queue.drain().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "1: oom");
    }

    #[test]
    fn test_init_error_from_anyhow() {
        let error = InitError::from(anyhow::anyhow!("no adapter"));
        assert!(error.to_string().contains("no adapter"));
    }
}
