//! Synthetic collaborators for running the controller without hardware.
//!
//! The demo binary wires these into a real `GazeController`: a camera that
//! is always ready once acquired, a detector that scripts a viewer
//! alternating between watching and looking away (with per-frame noise to
//! exercise the debounce gate), and a sink that logs transport commands
//! instead of driving a player.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::camera::{CameraError, CameraSource};
use crate::config::DemoConfig;
use crate::playback::{MediaSink, SinkError};
use crate::vision::detector::{Detection, DetectorError, FaceDetector};
use crate::vision::geometry::{EyeLandmarks, Point};

/// 合成帧只携带画面尺寸
#[derive(Debug, Clone, Copy)]
pub struct SyntheticFrame {
    pub width: f64,
    pub height: f64,
}

/// Camera that grants access after a short simulated prompt and serves
/// frames indefinitely after a brief warmup.
pub struct SyntheticCamera {
    width: f64,
    height: f64,
    warmup_frames: u64,
    served: u64,
    acquired: bool,
}

impl SyntheticCamera {
    pub fn new(width: f64, height: f64, warmup_frames: u64) -> Self {
        Self {
            width,
            height,
            warmup_frames,
            served: 0,
            acquired: false,
        }
    }
}

impl CameraSource for SyntheticCamera {
    type Frame = SyntheticFrame;

    async fn acquire(&mut self) -> Result<(), CameraError> {
        // 模拟授权弹窗的短暂延迟
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.acquired = true;
        Ok(())
    }

    fn poll_frame(&mut self) -> Option<SyntheticFrame> {
        if !self.acquired {
            return None;
        }
        self.served += 1;
        if self.served <= self.warmup_frames {
            // 缓冲尚未可解码
            return None;
        }
        Some(SyntheticFrame {
            width: self.width,
            height: self.height,
        })
    }

    fn stop(&mut self) {
        self.acquired = false;
        tracing::info!("Synthetic camera stopped");
    }
}

/// Detector scripting a viewer who watches for `look_secs`, looks away for
/// `away_secs`, repeating; each frame flips to the opposite phase with
/// probability `jitter`.
pub struct SyntheticDetector {
    look: Duration,
    away: Duration,
    jitter: f64,
    latency: Duration,
    started: Instant,
}

impl SyntheticDetector {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            look: Duration::from_secs(config.look_secs),
            away: Duration::from_secs(config.away_secs),
            jitter: config.jitter.clamp(0.0, 1.0),
            latency: Duration::from_millis(config.detect_latency_ms),
            started: Instant::now(),
        }
    }

    fn watching_now(&self) -> bool {
        let cycle = self.look + self.away;
        if cycle.is_zero() {
            return true;
        }
        let elapsed = self.started.elapsed().as_millis() % cycle.as_millis().max(1);
        elapsed < self.look.as_millis()
    }
}

impl FaceDetector<SyntheticFrame> for SyntheticDetector {
    async fn load_models(&mut self) -> Result<(), DetectorError> {
        // 模拟模型权重加载
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(())
    }

    async fn detect(&mut self, frame: &SyntheticFrame) -> Result<Option<Detection>, DetectorError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut watching = self.watching_now();
        if rand::thread_rng().gen_bool(self.jitter) {
            watching = !watching;
        }

        if !watching {
            // 观众离开画面
            return Ok(None);
        }

        let mid_y = frame.height / 2.0;
        Ok(Some(Detection {
            left_eye: open_eye(frame.width / 2.0 - 40.0, mid_y),
            right_eye: open_eye(frame.width / 2.0 + 40.0, mid_y),
            frame_width: frame.width,
            frame_height: frame.height,
        }))
    }
}

/// 睁眼轮廓，EAR = 0.35，位于给定中心
pub fn open_eye(cx: f64, cy: f64) -> EyeLandmarks {
    [
        Point::new(cx - 2.0, cy),
        Point::new(cx - 1.0, cy - 0.7),
        Point::new(cx + 1.0, cy - 0.7),
        Point::new(cx + 2.0, cy),
        Point::new(cx + 1.0, cy + 0.7),
        Point::new(cx - 1.0, cy + 0.7),
    ]
}

/// 闭眼轮廓，EAR ≈ 0.01
pub fn closed_eye(cx: f64, cy: f64) -> EyeLandmarks {
    [
        Point::new(cx - 2.0, cy),
        Point::new(cx - 1.0, cy - 0.02),
        Point::new(cx + 1.0, cy - 0.02),
        Point::new(cx + 2.0, cy),
        Point::new(cx + 1.0, cy + 0.02),
        Point::new(cx - 1.0, cy + 0.02),
    ]
}

/// Sink that records the transport state and logs every command.
pub struct LoggingSink {
    playing: bool,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self { playing: false }
    }
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSink for LoggingSink {
    async fn play(&mut self) -> Result<(), SinkError> {
        self.playing = true;
        tracing::info!("Sink command: play");
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        tracing::info!("Sink command: pause");
    }

    fn paused(&self) -> bool {
        !self.playing
    }
}
