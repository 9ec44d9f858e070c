//! Camera capture backend
//!
//! Captures the configured (or default) camera device through ffmpeg's
//! platform camera input: v4l2 on Linux, AVFoundation on macOS, DirectShow
//! on Windows.

use crate::capture::config::CaptureConfig;
use crate::capture::reader::{rawvideo_output_args, FrameReader};
use crate::capture::{CaptureBackend, VideoCaptureKind};
use crate::engine::VideoSource;
use crate::track::{MediaError, MediaResult};

pub struct CameraCapturer {
    source: VideoSource,
    config: CaptureConfig,
    reader: Option<FrameReader>,
}

impl CameraCapturer {
    pub fn new(source: VideoSource, config: CaptureConfig) -> Self {
        Self {
            source,
            config,
            reader: None,
        }
    }

    /// ffmpeg arguments for the platform camera input
    fn input_args(config: &CaptureConfig) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();

        if cfg!(target_os = "macos") {
            args.extend([
                "-f".to_string(),
                "avfoundation".to_string(),
                "-framerate".to_string(),
                config.fps.to_string(),
                "-i".to_string(),
                format!(
                    "{}:none",
                    config.camera_device.as_deref().unwrap_or("default")
                ),
            ]);
        } else if cfg!(target_os = "windows") {
            args.extend([
                "-f".to_string(),
                "dshow".to_string(),
                "-i".to_string(),
                format!(
                    "video={}",
                    config.camera_device.as_deref().unwrap_or("0")
                ),
            ]);
        } else {
            args.extend([
                "-f".to_string(),
                "v4l2".to_string(),
                "-i".to_string(),
                config
                    .camera_device
                    .clone()
                    .unwrap_or_else(|| "/dev/video0".to_string()),
            ]);
        }

        args.extend(rawvideo_output_args(config.width, config.height, config.fps));
        args
    }
}

impl CaptureBackend for CameraCapturer {
    fn kind(&self) -> VideoCaptureKind {
        VideoCaptureKind::Camera
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
            "Camera capture started ({}x{} @ {}fps)",
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
                tracing::info!("Camera capture stopped");
                Ok(())
            }
            None => Err(MediaError::NotCapturing),
        }
    }
}
