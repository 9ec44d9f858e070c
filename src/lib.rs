//! Local media track layer for real-time videoroom clients.
//!
//! Creates, configures, starts, stops, and tears down outbound audio and
//! video capture for a session, unifying heterogeneous capture backends
//! (camera, screen, file) behind one [`LocalTrack`] interface.
//!
//! The transport/connection engine and the OS audio routing stay outside
//! this crate: the engine is reached through the [`engine::MediaEngine`]
//! factory contract, routing through [`session::SessionRoute`]. Tracks are
//! built via [`LocalMedia`], driven from a single control thread, and
//! never fail `start`/`stop` to the caller; configuration failures are
//! logged and swallowed so media flow degrades instead of crashing.

pub mod capture;
pub mod engine;
pub mod factory;
pub mod session;
pub mod track;

pub use capture::{CapabilityProbe, CaptureBackend, CaptureConfig, VideoCaptureKind};
pub use engine::{DefaultEngine, MediaEngine, MediaStreamTrack};
pub use factory::LocalMedia;
pub use session::{AudioSession, AudioSessionProfile};
pub use track::{
    LocalAudioTrack, LocalTrack, LocalVideoTrack, MediaError, MediaKind, MediaResult,
};
