//! ffmpeg frame pump shared by all backends
//!
//! Spawns an ffmpeg child emitting raw BGRA frames on stdout and reads
//! fixed-size frames into the bound sink on a background thread. The
//! thread is joined on stop; the child is killed rather than drained since
//! live capture has no meaningful tail.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex as ParkingMutex;

use crate::engine::{VideoFrame, VideoSource};
use crate::track::{MediaError, MediaResult};

/// Common ffmpeg output arguments: scale to the configured size and emit
/// raw BGRA frames on stdout.
pub(crate) fn rawvideo_output_args(width: u32, height: u32, fps: u32) -> Vec<String> {
    vec![
        "-vf".to_string(),
        format!("scale={}:{},fps={}", width, height, fps),
        "-f".to_string(),
        "rawvideo".to_string(),
        "-pix_fmt".to_string(),
        "bgra".to_string(),
        "pipe:1".to_string(),
    ]
}

/// Running ffmpeg capture process plus its pump thread
pub(crate) struct FrameReader {
    process: ParkingMutex<Option<Child>>,
    running: Arc<AtomicBool>,
    pump: ParkingMutex<Option<std::thread::JoinHandle<()>>>,
}

impl FrameReader {
    /// Spawn ffmpeg with the given arguments and start pumping frames of
    /// `width * height * 4` bytes into `source`.
    pub(crate) fn spawn(
        args: &[String],
        width: u32,
        height: u32,
        source: VideoSource,
    ) -> MediaResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MediaError::Capture(format!("Failed to spawn ffmpeg: {}", e)))?;

        let mut stdout = child.stdout.take().ok_or_else(|| {
            MediaError::Capture("ffmpeg stdout pipe unavailable".to_string())
        })?;

        let running = Arc::new(AtomicBool::new(true));
        let pump_running = running.clone();
        let frame_size = width as usize * height as usize * 4;
        let bytes_per_row = width * 4;
        let started = Instant::now();

        let handle = std::thread::spawn(move || {
            let mut buf = vec![0u8; frame_size];
            while pump_running.load(Ordering::SeqCst) {
                if let Err(e) = stdout.read_exact(&mut buf) {
                    // EOF after kill is the normal stop path
                    if pump_running.load(Ordering::SeqCst) {
                        tracing::warn!("Frame pump ended early: {}", e);
                    }
                    break;
                }

                source.push_frame(VideoFrame {
                    data: buf.clone(),
                    width,
                    height,
                    timestamp_ms: started.elapsed().as_secs_f64() * 1000.0,
                    bytes_per_row,
                });

                let count = source.frame_count();
                if count % 300 == 0 {
                    tracing::debug!("Pumped {} frames at {}x{}", count, width, height);
                }
            }
        });

        Ok(Self {
            process: ParkingMutex::new(Some(child)),
            running,
            pump: ParkingMutex::new(Some(handle)),
        })
    }

    /// Halt the pump: kill the child, join the thread. Safe to call more
    /// than once.
    pub(crate) fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);

        if let Some(mut child) = self.process.lock().take() {
            let _ = child.kill();
            let _ = child.wait();
        }

        if let Some(handle) = self.pump.lock().take() {
            let _ = handle.join();
        }
    }
}

impl Drop for FrameReader {
    fn drop(&mut self) {
        self.stop();
    }
}
