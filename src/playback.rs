//! Media sink contract and the playback actuator.
//!
//! The actuator is edge-triggered: a sink command is issued only when the
//! stable signal changes from the last applied value, never on steady-state
//! repetition. Before issuing, it consults the sink's own `paused` flag so
//! that out-of-band transport control (the user pressing native controls)
//! does not cause duplicate commands.

use std::future::Future;

use thiserror::Error;

use crate::vision::debounce::StableSignal;

#[derive(Debug, Error)]
pub enum SinkError {
    /// play() 被宿主拒绝（常见于自动播放策略），记录后不同步重试
    #[error("play rejected by sink: {0}")]
    PlayRejected(String),
}

/// Media sink with promise-style `play`, fire-and-forget `pause`, and a
/// readable `paused` flag. Redundant calls to either method are tolerated
/// by the sink itself.
pub trait MediaSink {
    fn play(&mut self) -> impl Future<Output = Result<(), SinkError>> + Send;
    fn pause(&mut self);
    fn paused(&self) -> bool;
}

/// Idempotent play/pause adapter in front of a media sink.
pub struct PlaybackActuator<S: MediaSink> {
    sink: S,
    /// 上一次作用过的信号；初始为 None（尚未下发任何指令）
    last_applied: Option<StableSignal>,
}

impl<S: MediaSink> PlaybackActuator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            last_applied: None,
        }
    }

    /// Apply a stable signal to the sink.
    ///
    /// `last_applied` is updated regardless of whether the sink call
    /// succeeds: a rejected `play()` is logged and left for the next
    /// genuine signal edge (or an external trigger) to retry.
    pub async fn apply(&mut self, signal: StableSignal) {
        if self.last_applied == Some(signal) {
            return;
        }
        self.last_applied = Some(signal);

        match signal {
            StableSignal::Looking => {
                if !self.sink.paused() {
                    tracing::debug!("Sink already playing, skipping play command");
                    return;
                }
                if let Err(err) = self.sink.play().await {
                    tracing::warn!(error = %err, "Sink rejected play command");
                }
            }
            StableSignal::NotLooking => {
                if self.sink.paused() {
                    tracing::debug!("Sink already paused, skipping pause command");
                    return;
                }
                self.sink.pause();
            }
        }
    }

    pub fn last_applied(&self) -> Option<StableSignal> {
        self.last_applied
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
