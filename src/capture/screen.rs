//! Screensharing capture backend
//!
//! Captures a display through ffmpeg's platform grabber: x11grab on Linux,
//! the AVFoundation screen input on macOS, gdigrab on Windows.

use crate::capture::config::CaptureConfig;
use crate::capture::reader::{rawvideo_output_args, FrameReader};
use crate::capture::{CaptureBackend, VideoCaptureKind};
use crate::engine::VideoSource;
use crate::track::{MediaError, MediaResult};

pub struct ScreenCapturer {
    source: VideoSource,
    config: CaptureConfig,
    reader: Option<FrameReader>,
}

impl ScreenCapturer {
    pub fn new(source: VideoSource, config: CaptureConfig) -> Self {
        Self {
            source,
            config,
            reader: None,
        }
    }

    /// ffmpeg arguments for the platform display grabber
    fn input_args(config: &CaptureConfig) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();

        if cfg!(target_os = "macos") {
            // Screen devices come after cameras in the avfoundation index
            args.extend([
                "-f".to_string(),
                "avfoundation".to_string(),
                "-capture_cursor".to_string(),
                "1".to_string(),
                "-framerate".to_string(),
                config.fps.to_string(),
                "-i".to_string(),
                format!("{}:none", config.display.unwrap_or(1)),
            ]);
        } else if cfg!(target_os = "windows") {
            args.extend([
                "-f".to_string(),
                "gdigrab".to_string(),
                "-framerate".to_string(),
                config.fps.to_string(),
                "-i".to_string(),
                "desktop".to_string(),
            ]);
        } else {
            let display = std::env::var("DISPLAY").unwrap_or_else(|_| ":0".to_string());
            args.extend([
                "-f".to_string(),
                "x11grab".to_string(),
                "-framerate".to_string(),
                config.fps.to_string(),
                "-i".to_string(),
                format!("{}.{}", display, config.display.unwrap_or(0)),
            ]);
        }

        args.extend(rawvideo_output_args(config.width, config.height, config.fps));
        args
    }
}

impl CaptureBackend for ScreenCapturer {
    fn kind(&self) -> VideoCaptureKind {
        VideoCaptureKind::Screen
    }

    fn is_capturing(&self) -> bool {
        self.reader.is_some()
    }

    fn start_capture(&mut self) -> MediaResult<()> {
        if self.reader.is_some() {
            return Err(MediaError::AlreadyCapturing);
        }

        let args = Self::input_args(&self.config);
        let reader = FrameReader::spawn(
            &args,
            self.config.width,
            self.config.height,
            self.source.clone(),
        )?;
        self.reader = Some(reader);

        tracing::info!(
            "Screen capture started ({}x{} @ {}fps)",
            self.config.width,
            self.config.height,
            self.config.fps
        );
        Ok(())
    }

    fn stop_capture(&mut self) -> MediaResult<()> {
        match self.reader.take() {
            Some(reader) => {
                reader.stop();
                tracing::info!("Screen capture stopped");
                Ok(())
            }
            None => Err(MediaError::NotCapturing),
        }
    }
}
