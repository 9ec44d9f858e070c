//! Video capture backends
//!
//! Camera, screen, and file capture behind one polymorphic interface.
//! Each backend pushes raw frames into the [`VideoSource`] sink it was
//! bound to at construction; frame production mechanics are internal to
//! the backend.

pub mod capability;
pub mod camera;
pub mod config;
pub mod file;
mod reader;
pub mod screen;

pub use capability::{CapabilityProbe, SystemCapabilities};
pub use camera::CameraCapturer;
pub use config::CaptureConfig;
pub use file::FileCapturer;
pub use screen::ScreenCapturer;

use serde::{Deserialize, Serialize};

use crate::engine::VideoSource;
use crate::track::MediaResult;

/// Requested video capture kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VideoCaptureKind {
    /// Device camera
    Camera,
    /// Screensharing (display capture)
    Screen,
    /// Looping video file
    File,
}

impl std::fmt::Display for VideoCaptureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoCaptureKind::Camera => write!(f, "camera"),
            VideoCaptureKind::Screen => write!(f, "screen"),
            VideoCaptureKind::File => write!(f, "file"),
        }
    }
}

/// Trait for capture backends
///
/// `start_capture` begins pushing frames into the bound sink,
/// `stop_capture` halts pushing. Start and stop may block briefly on
/// OS-level device acquisition; neither touches the track's enabled flag.
pub trait CaptureBackend: Send {
    /// Which backend variant this is
    fn kind(&self) -> VideoCaptureKind;

    /// Whether frames are currently being produced
    fn is_capturing(&self) -> bool;

    /// Begin pushing frames into the bound sink
    fn start_capture(&mut self) -> MediaResult<()>;

    /// Halt frame production
    fn stop_capture(&mut self) -> MediaResult<()>;
}

/// Select the backend for a requested capture kind
///
/// Camera and screen requests degrade to the file backend when the runtime
/// environment cannot support them. The decision is made exactly once,
/// here, and is permanent for the owning track's lifetime; `start()` never
/// re-evaluates it.
pub(crate) fn select_backend(
    kind: VideoCaptureKind,
    probe: &dyn CapabilityProbe,
    config: &CaptureConfig,
    source: VideoSource,
) -> Box<dyn CaptureBackend> {
    match kind {
        VideoCaptureKind::Camera if probe.camera_available() => {
            Box::new(CameraCapturer::new(source, config.clone()))
        }
        VideoCaptureKind::Screen if probe.screen_capture_available() => {
            Box::new(ScreenCapturer::new(source, config.clone()))
        }
        VideoCaptureKind::File => Box::new(FileCapturer::new(source, config.clone())),
        unavailable => {
            tracing::warn!(
                "{} capture not available in this environment, falling back to file capture",
                unavailable
            );
            Box::new(FileCapturer::new(source, config.clone()))
        }
    }
}
