#![allow(dead_code)]

//! Deterministic mock collaborators shared by the integration tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gaze_playback::synthetic::{closed_eye, open_eye};
use gaze_playback::{
    CameraError, CameraSource, Detection, DetectorError, FaceDetector, MediaSink, SinkError,
    Thresholds,
};

pub const FRAME_WIDTH: f64 = 640.0;
pub const FRAME_HEIGHT: f64 = 360.0;

/// 画面中部、双眼睁开的检测结果
pub fn detection_open() -> Detection {
    detection_open_at(FRAME_HEIGHT / 2.0)
}

pub fn detection_open_at(cy: f64) -> Detection {
    Detection {
        left_eye: open_eye(FRAME_WIDTH / 2.0 - 40.0, cy),
        right_eye: open_eye(FRAME_WIDTH / 2.0 + 40.0, cy),
        frame_width: FRAME_WIDTH,
        frame_height: FRAME_HEIGHT,
    }
}

/// 画面中部、双眼闭合的检测结果
pub fn detection_closed() -> Detection {
    Detection {
        left_eye: closed_eye(FRAME_WIDTH / 2.0 - 40.0, FRAME_HEIGHT / 2.0),
        right_eye: closed_eye(FRAME_WIDTH / 2.0 + 40.0, FRAME_HEIGHT / 2.0),
        frame_width: FRAME_WIDTH,
        frame_height: FRAME_HEIGHT,
    }
}

/// 测试用阈值：极短轮询间隔，EAR 单信号
pub fn fast_thresholds(streak: u32) -> Thresholds {
    Thresholds {
        debounce_streak: streak,
        poll_interval_ms: 5,
        ..Thresholds::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCommand {
    Play,
    Pause,
}

/// Sink that records every issued command; clones share the same state so a
/// test can keep a handle while the controller owns another.
#[derive(Clone)]
pub struct RecordingSink {
    commands: Arc<Mutex<Vec<SinkCommand>>>,
    playing: Arc<AtomicBool>,
    reject_play: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            commands: Arc::new(Mutex::new(Vec::new())),
            playing: Arc::new(AtomicBool::new(false)),
            reject_play: false,
        }
    }

    /// play() 一律被拒绝（模拟自动播放策略）
    pub fn rejecting() -> Self {
        Self {
            reject_play: true,
            ..Self::new()
        }
    }

    pub fn commands(&self) -> Vec<SinkCommand> {
        self.commands.lock().expect("commands lock").clone()
    }

    /// 模拟用户通过原生控件带外操作播放器
    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::SeqCst);
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSink for RecordingSink {
    async fn play(&mut self) -> Result<(), SinkError> {
        self.commands
            .lock()
            .expect("commands lock")
            .push(SinkCommand::Play);
        if self.reject_play {
            return Err(SinkError::PlayRejected("autoplay blocked".to_string()));
        }
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn pause(&mut self) {
        self.commands
            .lock()
            .expect("commands lock")
            .push(SinkCommand::Pause);
        self.playing.store(false, Ordering::SeqCst);
    }

    fn paused(&self) -> bool {
        !self.playing.load(Ordering::SeqCst)
    }
}

/// 脚本化检测器的单步结果
#[derive(Clone)]
pub enum ScriptStep {
    Face(Detection),
    NoFace,
    Fault,
}

/// Detector that replays a fixed script, repeating the final step once the
/// script is exhausted, and counts every invocation.
pub struct ScriptedDetector {
    script: Vec<ScriptStep>,
    index: usize,
    calls: Arc<AtomicUsize>,
    fail_models: bool,
    detect_delay: Duration,
}

impl ScriptedDetector {
    pub fn new(script: Vec<ScriptStep>) -> Self {
        Self {
            script,
            index: 0,
            calls: Arc::new(AtomicUsize::new(0)),
            fail_models: false,
            detect_delay: Duration::ZERO,
        }
    }

    /// 模型加载必定失败的检测器
    pub fn failing_models() -> Self {
        Self {
            fail_models: true,
            ..Self::new(Vec::new())
        }
    }

    /// 每次推理附加固定延迟，用于取消安全性测试
    pub fn with_detect_delay(mut self, delay: Duration) -> Self {
        self.detect_delay = delay;
        self
    }

    pub fn calls_handle(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl FaceDetector<TestFrame> for ScriptedDetector {
    async fn load_models(&mut self) -> Result<(), DetectorError> {
        if self.fail_models {
            return Err(DetectorError::ModelLoad("weights missing".to_string()));
        }
        Ok(())
    }

    async fn detect(&mut self, _frame: &TestFrame) -> Result<Option<Detection>, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.detect_delay.is_zero() {
            tokio::time::sleep(self.detect_delay).await;
        }

        let step = if self.index < self.script.len() {
            let step = self.script[self.index].clone();
            self.index += 1;
            step
        } else {
            self.script.last().cloned().unwrap_or(ScriptStep::NoFace)
        };

        match step {
            ScriptStep::Face(detection) => Ok(Some(detection)),
            ScriptStep::NoFace => Ok(None),
            ScriptStep::Fault => Err(DetectorError::Inference("transient fault".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TestFrame;

/// Camera whose acquisition outcome and frame readiness are scriptable.
pub struct MockCamera {
    deny: bool,
    warmup_frames: u64,
    served: u64,
    stopped: Arc<AtomicBool>,
}

impl MockCamera {
    pub fn new() -> Self {
        Self {
            deny: false,
            warmup_frames: 0,
            served: 0,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 授权必定被拒绝的摄像头
    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::new()
        }
    }

    /// 前 n 次采样返回"尚未可解码"
    pub fn with_warmup(mut self, frames: u64) -> Self {
        self.warmup_frames = frames;
        self
    }

    pub fn stopped_handle(&self) -> Arc<AtomicBool> {
        self.stopped.clone()
    }
}

impl Default for MockCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for MockCamera {
    type Frame = TestFrame;

    async fn acquire(&mut self) -> Result<(), CameraError> {
        if self.deny {
            return Err(CameraError::AccessDenied("permission denied".to_string()));
        }
        Ok(())
    }

    fn poll_frame(&mut self) -> Option<TestFrame> {
        if self.served < self.warmup_frames {
            self.served += 1;
            return None;
        }
        Some(TestFrame)
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
