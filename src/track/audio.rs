//! Local audio track
//!
//! Owns one outbound audio track handle and the immutable session profile
//! it activates the shared device audio session with. Starting and
//! stopping funnel through a single `configure` path so the lock/apply/
//! unlock sequence and its error handling exist exactly once.

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::{MediaEngine, MediaStreamTrack};
use crate::session::{AudioProcessingConstraints, AudioSession, AudioSessionProfile};
use crate::track::{LocalTrack, MediaKind, MediaResult};

pub struct LocalAudioTrack {
    track: MediaStreamTrack,
    profile: AudioSessionProfile,
    session: Arc<AudioSession>,
    /// Whether this track last configured the session active
    active: bool,
}

impl LocalAudioTrack {
    /// Create an audio track from the engine with every processing flag
    /// enabled. The track starts enabled and the session untouched.
    pub(crate) fn new(
        engine: &dyn MediaEngine,
        session: Arc<AudioSession>,
    ) -> MediaResult<Self> {
        let constraints = AudioProcessingConstraints::default();
        let source = engine.create_audio_source(constraints)?;
        let track = engine.create_audio_track(&source)?;
        track.set_enabled(true);

        Ok(Self {
            track,
            profile: AudioSessionProfile::video_chat(),
            session,
            active: false,
        })
    }

    /// Apply the stored profile with the requested active flag
    ///
    /// Acquires the session configuration guard, applies, and releases on
    /// every exit path via drop. A failed apply is logged and swallowed;
    /// media flow is never blocked on session configuration errors.
    fn configure(&mut self, set_active: bool) {
        let mut guard = self.session.lock_for_configuration();
        match guard.set_configuration(&self.profile, set_active) {
            Ok(()) => {
                self.active = set_active;
                tracing::info!(
                    "Audio session configured (active={}) for track {}",
                    set_active,
                    self.track.id()
                );
            }
            Err(e) => {
                tracing::error!("Failed to set configuration for audio session: {}", e);
            }
        }
    }
}

#[async_trait]
impl LocalTrack for LocalAudioTrack {
    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    async fn start(&mut self) {
        self.configure(true);
    }

    async fn stop(&mut self) {
        self.configure(false);
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

impl Drop for LocalAudioTrack {
    fn drop(&mut self) {
        // No dangling active session once the publishing context ends
        if self.active {
            self.configure(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::time::Duration;

    use crate::engine::DefaultEngine;
    use crate::session::SessionRoute;
    use crate::track::MediaError;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    fn new_track(session: Arc<AudioSession>) -> LocalAudioTrack {
        LocalAudioTrack::new(&DefaultEngine, session).unwrap()
    }

    /// Fails every apply while `broken` is set
    struct FlakyRoute {
        broken: AtomicBool,
    }

    impl FlakyRoute {
        fn new() -> Self {
            Self {
                broken: AtomicBool::new(false),
            }
        }
    }

    impl SessionRoute for FlakyRoute {
        fn apply(&self, _profile: &AudioSessionProfile, _active: bool) -> MediaResult<()> {
            if self.broken.load(Ordering::SeqCst) {
                Err(MediaError::SessionConfiguration(
                    "hardware busy".to_string(),
                ))
            } else {
                Ok(())
            }
        }
    }

    /// Counts applies whose critical sections overlap
    struct OverlapRoute {
        in_section: AtomicBool,
        overlaps: AtomicU64,
    }

    impl OverlapRoute {
        fn new() -> Self {
            Self {
                in_section: AtomicBool::new(false),
                overlaps: AtomicU64::new(0),
            }
        }
    }

    impl SessionRoute for OverlapRoute {
        fn apply(&self, _profile: &AudioSessionProfile, _active: bool) -> MediaResult<()> {
            if self.in_section.swap(true, Ordering::SeqCst) {
                self.overlaps.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_micros(100));
            self.in_section.store(false, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_enabled_immediately_after_construction() {
        let track = new_track(Arc::new(AudioSession::new()));
        assert!(track.is_enabled());
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let track = new_track(Arc::new(AudioSession::new()));
        let before = track.is_enabled();
        track.toggle();
        assert_eq!(track.is_enabled(), !before);
        track.toggle();
        assert_eq!(track.is_enabled(), before);
    }

    #[tokio::test]
    async fn test_start_toggle_stop_scenario() {
        init_tracing();
        let session = Arc::new(AudioSession::new());
        let mut track = new_track(session.clone());

        track.start().await;
        track.toggle();
        assert!(!track.is_enabled());
        assert!(session.is_active());

        track.stop().await;
        assert!(!session.is_active());
        assert!(!track.is_enabled(), "stop must not touch the enabled flag");
    }

    #[tokio::test]
    async fn test_lock_free_after_any_start_stop_sequence() {
        let session = Arc::new(AudioSession::new());
        let mut track = new_track(session.clone());

        track.start().await;
        track.start().await;
        track.stop().await;
        track.start().await;
        track.stop().await;
        track.stop().await;

        assert!(
            session.try_lock_for_configuration().is_some(),
            "configuration lock must be free after every operation"
        );
    }

    #[tokio::test]
    async fn test_stop_failure_still_releases_lock() {
        let route = Arc::new(FlakyRoute::new());
        struct Shared(Arc<FlakyRoute>);
        impl SessionRoute for Shared {
            fn apply(&self, profile: &AudioSessionProfile, active: bool) -> MediaResult<()> {
                self.0.apply(profile, active)
            }
        }

        let session = Arc::new(AudioSession::with_route(Box::new(Shared(route.clone()))));
        let mut track = new_track(session.clone());

        track.start().await;
        assert!(session.is_active());

        route.broken.store(true, Ordering::SeqCst);
        track.stop().await;
        // Failed deactivation is swallowed; the session still reports active
        assert!(session.is_active());

        // The lock was released on the failure path: a later start can
        // acquire it and apply again.
        route.broken.store(false, Ordering::SeqCst);
        track.start().await;
        assert!(session.is_active());
        track.stop().await;
        assert!(!session.is_active());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_configures_never_interleave() {
        init_tracing();
        let route = Arc::new(OverlapRoute::new());
        struct Shared(Arc<OverlapRoute>);
        impl SessionRoute for Shared {
            fn apply(&self, profile: &AudioSessionProfile, active: bool) -> MediaResult<()> {
                self.0.apply(profile, active)
            }
        }

        let session = Arc::new(AudioSession::with_route(Box::new(Shared(route.clone()))));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let mut track = new_track(session.clone());
            handles.push(tokio::spawn(async move {
                for _ in 0..25 {
                    track.start().await;
                    track.stop().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(
            route.overlaps.load(Ordering::SeqCst),
            0,
            "lock-held sections must never interleave"
        );
    }

    #[test]
    fn test_drop_deactivates_started_session() {
        let session = Arc::new(AudioSession::new());
        {
            let mut track = new_track(session.clone());
            track.configure(true);
            assert!(session.is_active());
        }
        assert!(
            !session.is_active(),
            "dropping a started track must deactivate the session"
        );
    }
}
