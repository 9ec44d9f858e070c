//! Capture settings shared by all backends

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for video capture
///
/// One value is chosen by the embedder and handed to the factory; backends
/// read the fields they care about at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureConfig {
    /// Output frame width in pixels
    pub width: u32,

    /// Output frame height in pixels
    pub height: u32,

    /// Output frame rate
    pub fps: u32,

    /// Camera device to capture; platform default when unset
    pub camera_device: Option<String>,

    /// Display index to capture; primary display when unset
    pub display: Option<u32>,

    /// Clip the file backend loops
    pub fallback_file: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 30,
            camera_device: None,
            display: None,
            fallback_file: PathBuf::from("assets/fallback.mp4"),
        }
    }
}
