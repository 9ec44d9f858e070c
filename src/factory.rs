//! Local media construction surface
//!
//! The publishing/session layer builds its outbound tracks through
//! [`LocalMedia`], which holds the injected collaborators: the transport
//! engine, the shared audio session, the capability probe, and the capture
//! settings.

use std::sync::Arc;

use crate::capture::{CapabilityProbe, CaptureConfig, SystemCapabilities, VideoCaptureKind};
use crate::engine::MediaEngine;
use crate::session::AudioSession;
use crate::track::{LocalAudioTrack, LocalTrack, LocalVideoTrack, MediaResult};

pub struct LocalMedia {
    engine: Arc<dyn MediaEngine>,
    session: Arc<AudioSession>,
    capabilities: Arc<dyn CapabilityProbe>,
    capture: CaptureConfig,
}

impl LocalMedia {
    /// Build with system defaults: real capability probe, fresh audio
    /// session, default capture settings.
    pub fn new(engine: Arc<dyn MediaEngine>) -> Self {
        Self {
            engine,
            session: Arc::new(AudioSession::new()),
            capabilities: Arc::new(SystemCapabilities),
            capture: CaptureConfig::default(),
        }
    }

    /// Share an existing audio session (there is one per process)
    pub fn with_audio_session(mut self, session: Arc<AudioSession>) -> Self {
        self.session = session;
        self
    }

    pub fn with_capabilities(mut self, probe: Arc<dyn CapabilityProbe>) -> Self {
        self.capabilities = probe;
        self
    }

    pub fn with_capture_config(mut self, config: CaptureConfig) -> Self {
        self.capture = config;
        self
    }

    pub fn audio_session(&self) -> &Arc<AudioSession> {
        &self.session
    }

    /// Create an outbound audio track bound to the shared audio session
    pub fn new_local_audio_track(&self) -> MediaResult<LocalAudioTrack> {
        let track = LocalAudioTrack::new(self.engine.as_ref(), self.session.clone())?;
        tracing::info!("Created local audio track {}", track.native_track().id());
        Ok(track)
    }

    /// Create an outbound video track for the requested capture kind
    pub fn new_local_video_track(&self, kind: VideoCaptureKind) -> MediaResult<LocalVideoTrack> {
        let track = LocalVideoTrack::new(
            self.engine.as_ref(),
            kind,
            self.capabilities.as_ref(),
            &self.capture,
        )?;
        tracing::info!(
            "Created local video track {} ({} requested, {} selected)",
            track.native_track().id(),
            kind,
            track.backend_kind()
        );
        Ok(track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        AudioSource, DefaultEngine, MediaStreamTrack, VideoSource,
    };
    use crate::session::AudioProcessingConstraints;
    use crate::track::{MediaError, MediaKind};

    struct NoDeviceProbe;

    impl CapabilityProbe for NoDeviceProbe {
        fn camera_available(&self) -> bool {
            false
        }

        fn screen_capture_available(&self) -> bool {
            false
        }
    }

    struct AllDeviceProbe;

    impl CapabilityProbe for AllDeviceProbe {
        fn camera_available(&self) -> bool {
            true
        }

        fn screen_capture_available(&self) -> bool {
            true
        }
    }

    struct FailingEngine;

    impl MediaEngine for FailingEngine {
        fn create_audio_source(
            &self,
            _constraints: AudioProcessingConstraints,
        ) -> MediaResult<AudioSource> {
            Err(MediaError::Engine("transport not connected".to_string()))
        }

        fn create_audio_track(&self, _source: &AudioSource) -> MediaResult<MediaStreamTrack> {
            Err(MediaError::Engine("transport not connected".to_string()))
        }

        fn create_video_source(&self) -> MediaResult<VideoSource> {
            Err(MediaError::Engine("transport not connected".to_string()))
        }

        fn create_video_track(&self, _source: &VideoSource) -> MediaResult<MediaStreamTrack> {
            Err(MediaError::Engine("transport not connected".to_string()))
        }
    }

    #[test]
    fn test_audio_track_construction() {
        let media = LocalMedia::new(Arc::new(DefaultEngine));
        let track = media.new_local_audio_track().unwrap();
        assert!(track.is_enabled());
        assert_eq!(track.kind(), MediaKind::Audio);
        assert!(!media.audio_session().is_active());
    }

    #[test]
    fn test_camera_request_degrades_to_file_without_camera() {
        let media =
            LocalMedia::new(Arc::new(DefaultEngine)).with_capabilities(Arc::new(NoDeviceProbe));

        let track = media.new_local_video_track(VideoCaptureKind::Camera).unwrap();
        assert_eq!(track.backend_kind(), VideoCaptureKind::File);

        let track = media.new_local_video_track(VideoCaptureKind::Screen).unwrap();
        assert_eq!(track.backend_kind(), VideoCaptureKind::File);
    }

    #[test]
    fn test_supported_camera_request_keeps_camera_backend() {
        let media =
            LocalMedia::new(Arc::new(DefaultEngine)).with_capabilities(Arc::new(AllDeviceProbe));

        let track = media.new_local_video_track(VideoCaptureKind::Camera).unwrap();
        assert_eq!(track.backend_kind(), VideoCaptureKind::Camera);
        assert_eq!(track.kind(), MediaKind::Video);
    }

    #[test]
    fn test_engine_failure_surfaces_at_construction() {
        let media = LocalMedia::new(Arc::new(FailingEngine));
        assert!(matches!(
            media.new_local_audio_track(),
            Err(MediaError::Engine(_))
        ));
        assert!(matches!(
            media.new_local_video_track(VideoCaptureKind::File),
            Err(MediaError::Engine(_))
        ));
    }

    #[test]
    fn test_tracks_share_the_injected_session() {
        let session = Arc::new(AudioSession::new());
        let media =
            LocalMedia::new(Arc::new(DefaultEngine)).with_audio_session(session.clone());

        let _a = media.new_local_audio_track().unwrap();
        let _b = media.new_local_audio_track().unwrap();
        assert!(Arc::ptr_eq(media.audio_session(), &session));
    }
}
