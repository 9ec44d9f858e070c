//! Local video track
//!
//! Owns the video sink, the capture backend selected at construction, and
//! the publishable track derived from the sink. The backend choice is
//! permanent; start and stop only forward to it.

use async_trait::async_trait;

use crate::capture::{select_backend, CapabilityProbe, CaptureBackend, CaptureConfig, VideoCaptureKind};
use crate::engine::{MediaEngine, MediaStreamTrack, VideoSource};
use crate::track::{LocalTrack, MediaKind, MediaResult};

pub struct LocalVideoTrack {
    source: VideoSource,
    backend: Box<dyn CaptureBackend>,
    track: MediaStreamTrack,
}

impl LocalVideoTrack {
    /// Create a video track for the requested capture kind
    ///
    /// The backend is selected here, once, from the capability probe;
    /// camera and screen requests degrade deterministically to the file
    /// backend when unsupported.
    pub(crate) fn new(
        engine: &dyn MediaEngine,
        kind: VideoCaptureKind,
        probe: &dyn CapabilityProbe,
        config: &CaptureConfig,
    ) -> MediaResult<Self> {
        let source = engine.create_video_source()?;
        let backend = select_backend(kind, probe, config, source.clone());
        let track = engine.create_video_track(&source)?;

        Ok(Self {
            source,
            backend,
            track,
        })
    }

    /// Which backend variant ended up selected
    pub fn backend_kind(&self) -> VideoCaptureKind {
        self.backend.kind()
    }

    /// The sink the backend writes frames into
    pub fn source(&self) -> &VideoSource {
        &self.source
    }
}

#[async_trait]
impl LocalTrack for LocalVideoTrack {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    async fn start(&mut self) {
        if self.backend.is_capturing() {
            return;
        }
        if let Err(e) = self.backend.start_capture() {
            tracing::error!("Failed to start {} capture: {}", self.backend.kind(), e);
        }
    }

    async fn stop(&mut self) {
        if !self.backend.is_capturing() {
            return;
        }
        if let Err(e) = self.backend.stop_capture() {
            tracing::error!("Failed to stop {} capture: {}", self.backend.kind(), e);
        }
    }

    fn toggle(&self) {
        self.track.set_enabled(!self.track.is_enabled());
    }

    fn is_enabled(&self) -> bool {
        self.track.is_enabled()
    }

    fn native_track(&self) -> &MediaStreamTrack {
        &self.track
    }
}

impl Drop for LocalVideoTrack {
    fn drop(&mut self) {
        if self.backend.is_capturing() {
            if let Err(e) = self.backend.stop_capture() {
                tracing::debug!("Capture teardown on drop failed: {}", e);
            }
        }
    }
}
