//! Runtime capture capability detection
//!
//! Queried exactly once, at track construction, to decide whether a
//! requested camera or screen backend can work in this environment. Never
//! consulted again afterwards; a capability that disappears later shows up
//! as a logged capture failure, not a backend swap.

use std::process::Command;

/// Capability query consumed by backend selection
pub trait CapabilityProbe: Send + Sync {
    /// Whether a physical camera can be captured here
    fn camera_available(&self) -> bool;

    /// Whether the screen can be captured here
    fn screen_capture_available(&self) -> bool;
}

/// Probe backed by the actual runtime environment
#[derive(Debug, Default)]
pub struct SystemCapabilities;

impl SystemCapabilities {
    /// All frame production runs through ffmpeg; without it nothing
    /// device-backed can work.
    fn ffmpeg_available() -> bool {
        Command::new("ffmpeg").arg("-version").output().is_ok()
    }
}

impl CapabilityProbe for SystemCapabilities {
    fn camera_available(&self) -> bool {
        if !Self::ffmpeg_available() {
            return false;
        }
        if cfg!(target_os = "linux") {
            return std::path::Path::new("/dev/video0").exists();
        }
        cfg!(any(target_os = "macos", target_os = "windows"))
    }

    fn screen_capture_available(&self) -> bool {
        if !Self::ffmpeg_available() {
            return false;
        }
        if cfg!(target_os = "linux") {
            return std::env::var_os("DISPLAY").is_some()
                || std::env::var_os("WAYLAND_DISPLAY").is_some();
        }
        cfg!(any(target_os = "macos", target_os = "windows"))
    }
}
