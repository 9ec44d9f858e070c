//! Native media handles and the transport engine contract
//!
//! The transport/connection layer that actually transmits media is an
//! external collaborator. This module defines the narrow factory contract
//! (`MediaEngine`) the track layer uses to allocate native sources and
//! tracks, plus the handle types that cross that boundary.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex as ParkingMutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::AudioProcessingConstraints;
use crate::track::{MediaKind, MediaResult};

/// Unique identifier for a media source or track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(Uuid);

impl TrackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Publishable media track handle
///
/// Owned by exactly one local track; the transport layer holds a clone of
/// the handle for transmission but never controls its lifecycle. The
/// `enabled` flag is shared between all clones and decides whether produced
/// media is delivered downstream.
#[derive(Debug, Clone)]
pub struct MediaStreamTrack {
    id: TrackId,
    kind: MediaKind,
    enabled: Arc<AtomicBool>,
}

impl MediaStreamTrack {
    /// Create a new track handle. Tracks start out enabled.
    pub fn new(kind: MediaKind) -> Self {
        Self {
            id: TrackId::new(),
            kind,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Whether produced media is delivered downstream
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

/// Native audio source handle
///
/// Sample production happens inside the transport engine (its audio device
/// module); this layer only carries the processing constraints the source
/// was created with.
#[derive(Debug, Clone)]
pub struct AudioSource {
    id: TrackId,
    constraints: AudioProcessingConstraints,
}

impl AudioSource {
    pub fn new(constraints: AudioProcessingConstraints) -> Self {
        Self {
            id: TrackId::new(),
            constraints,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn constraints(&self) -> &AudioProcessingConstraints {
        &self.constraints
    }
}

/// Frame data from a capture backend
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Raw pixel data (BGRA format)
    pub data: Vec<u8>,

    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Timestamp in milliseconds (process time)
    pub timestamp_ms: f64,

    /// Bytes per row (may include padding)
    pub bytes_per_row: u32,
}

#[derive(Debug, Default)]
struct VideoSourceInner {
    frames: AtomicU64,
    latest: ParkingMutex<Option<VideoFrame>>,
}

/// Native video source: the sink capture backends write frames into
///
/// Clonable handle; exactly one backend writes to it at a time, the
/// transport engine reads from it for encoding and transmission.
#[derive(Debug, Clone, Default)]
pub struct VideoSource {
    inner: Arc<VideoSourceInner>,
}

impl VideoSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one captured frame into the sink
    pub fn push_frame(&self, frame: VideoFrame) {
        self.inner.frames.fetch_add(1, Ordering::Relaxed);
        *self.inner.latest.lock() = Some(frame);
    }

    /// Total number of frames delivered so far
    pub fn frame_count(&self) -> u64 {
        self.inner.frames.load(Ordering::Relaxed)
    }

    /// The most recently delivered frame, if any
    pub fn latest_frame(&self) -> Option<VideoFrame> {
        self.inner.latest.lock().clone()
    }
}

/// Factory contract toward the transport engine
///
/// Mirrors the four allocation calls the track layer needs; everything else
/// about the transport (negotiation, encoding, transmission) stays behind
/// this seam.
pub trait MediaEngine: Send + Sync {
    fn create_audio_source(
        &self,
        constraints: AudioProcessingConstraints,
    ) -> MediaResult<AudioSource>;

    fn create_audio_track(&self, source: &AudioSource) -> MediaResult<MediaStreamTrack>;

    fn create_video_source(&self) -> MediaResult<VideoSource>;

    fn create_video_track(&self, source: &VideoSource) -> MediaResult<MediaStreamTrack>;
}

/// In-process engine allocating plain handles
///
/// Used standalone and in tests; a real deployment wraps its transport
/// library behind [`MediaEngine`] instead.
#[derive(Debug, Default)]
pub struct DefaultEngine;

impl MediaEngine for DefaultEngine {
    fn create_audio_source(
        &self,
        constraints: AudioProcessingConstraints,
    ) -> MediaResult<AudioSource> {
        Ok(AudioSource::new(constraints))
    }

    fn create_audio_track(&self, _source: &AudioSource) -> MediaResult<MediaStreamTrack> {
        Ok(MediaStreamTrack::new(MediaKind::Audio))
    }

    fn create_video_source(&self) -> MediaResult<VideoSource> {
        Ok(VideoSource::new())
    }

    fn create_video_track(&self, _source: &VideoSource) -> MediaResult<MediaStreamTrack> {
        Ok(MediaStreamTrack::new(MediaKind::Video))
    }
}
