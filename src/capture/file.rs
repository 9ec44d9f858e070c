//! File capture backend
//!
//! Loops a video clip into the sink at source pacing. This is the
//! unconditional fallback for camera and screen requests the environment
//! cannot satisfy, and a backend in its own right for demos and tests.

use crate::capture::config::CaptureConfig;
use crate::capture::reader::{rawvideo_output_args, FrameReader};
use crate::capture::{CaptureBackend, VideoCaptureKind};
use crate::engine::VideoSource;
use crate::track::{MediaError, MediaResult};

pub struct FileCapturer {
    source: VideoSource,
    config: CaptureConfig,
    reader: Option<FrameReader>,
}

impl FileCapturer {
    pub fn new(source: VideoSource, config: CaptureConfig) -> Self {
        Self {
            source,
            config,
            reader: None,
        }
    }

    /// ffmpeg arguments decoding the clip in an endless loop at real-time
    /// pacing
    fn input_args(config: &CaptureConfig) -> Vec<String> {
        let mut args = vec![
            "-stream_loop".to_string(),
            "-1".to_string(),
            "-re".to_string(),
            "-i".to_string(),
            config.fallback_file.to_string_lossy().to_string(),
        ];
        args.extend(rawvideo_output_args(config.width, config.height, config.fps));
        args
    }
}

impl CaptureBackend for FileCapturer {
    fn kind(&self) -> VideoCaptureKind {
        VideoCaptureKind::File
    }

    fn is_capturing(&self) -> bool {
        self.reader.is_some()
    }

    fn start_capture(&mut self) -> MediaResult<()> {
        if self.reader.is_some() {
            return Err(MediaError::AlreadyCapturing);
        }

        if !self.config.fallback_file.exists() {
            return Err(MediaError::Configuration(format!(
                "Capture file not found: {}",
                self.config.fallback_file.display()
            )));
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
            "File capture started, looping {}",
            self.config.fallback_file.display()
        );
        Ok(())
    }

    fn stop_capture(&mut self) -> MediaResult<()> {
        match self.reader.take() {
            Some(reader) => {
                reader.stop();
                tracing::info!("File capture stopped");
                Ok(())
            }
            None => Err(MediaError::NotCapturing),
        }
    }
}
