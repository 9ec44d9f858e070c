//! Local track capability
//!
//! Defines the interface shared by the outbound track variants (audio,
//! video) and the error taxonomy for the whole media layer.

use async_trait::async_trait;
use thiserror::Error;

pub mod audio;
pub mod video;

pub use audio::LocalAudioTrack;
pub use video::LocalVideoTrack;

use crate::engine::MediaStreamTrack;

/// Errors that can occur in the local media layer
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Audio session configuration failed: {0}")]
    SessionConfiguration(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Already capturing")]
    AlreadyCapturing,

    #[error("Not capturing")]
    NotCapturing,

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Kind of media a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Trait for outbound local tracks
///
/// Both variants are driven from a single control thread. `start` and
/// `stop` are idempotent and never fail to the caller: configuration
/// failures are logged and swallowed so media flow is never blocked on
/// them, at worst the output stays absent or frozen.
#[async_trait]
pub trait LocalTrack: Send {
    /// Kind of media this track produces
    fn kind(&self) -> MediaKind;

    /// Begin producing media. For audio this also activates the shared
    /// device audio session under this track's profile.
    async fn start(&mut self);

    /// Halt production. For audio this also deactivates the shared device
    /// audio session.
    async fn stop(&mut self);

    /// Flip whether produced media is delivered downstream. Callable in
    /// any state; never starts or stops capture.
    fn toggle(&self);

    /// Whether produced media is currently delivered downstream
    fn is_enabled(&self) -> bool;

    /// Borrow the native track handle for the transport layer to attach.
    /// Callers never take ownership.
    fn native_track(&self) -> &MediaStreamTrack;
}
