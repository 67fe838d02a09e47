//! Controller task body: readiness stages followed by the poll loop.
//!
//! One task owns every piece of mutable state (camera, detector, gate,
//! actuator, readiness machine), so ticks are strictly sequential: tick n+1
//! cannot begin before tick n's classify→debounce→actuate chain completed.
//! Cancellation is cooperative: every await races the shutdown channel in
//! `tokio::select!`, and a shutdown during an in-flight detection drops the
//! detection future so its result is discarded, not applied.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;

use crate::camera::CameraSource;
use crate::config::Thresholds;
use crate::controller::readiness::{ReadinessEvent, ReadinessMachine};
use crate::controller::ControllerSnapshot;
use crate::playback::{MediaSink, PlaybackActuator};
use crate::vision::classifier::AttentionClassifier;
use crate::vision::debounce::DebounceGate;
use crate::vision::detector::FaceDetector;

pub(crate) struct ControllerTask<C, D, S>
where
    C: CameraSource,
    D: FaceDetector<C::Frame>,
    S: MediaSink,
{
    camera: C,
    detector: D,
    classifier: AttentionClassifier,
    gate: DebounceGate,
    actuator: PlaybackActuator<S>,
    machine: ReadinessMachine,
    poll_interval: Duration,
    state_tx: watch::Sender<ControllerSnapshot>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<C, D, S> ControllerTask<C, D, S>
where
    C: CameraSource,
    D: FaceDetector<C::Frame>,
    S: MediaSink,
{
    pub(crate) fn new(
        camera: C,
        detector: D,
        sink: S,
        thresholds: &Thresholds,
        state_tx: watch::Sender<ControllerSnapshot>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            camera,
            detector,
            classifier: AttentionClassifier::new(thresholds.clone()),
            gate: DebounceGate::new(thresholds.debounce_streak),
            actuator: PlaybackActuator::new(sink),
            machine: ReadinessMachine::new(),
            poll_interval: thresholds.poll_interval(),
            state_tx,
            shutdown_rx,
        }
    }

    pub(crate) async fn run(mut self) {
        self.lifecycle().await;
        // 单一出口：无论在哪个阶段退出都释放摄像头资源
        self.camera.stop();
        tracing::info!("Controller task finished, camera released");
    }

    async fn lifecycle(&mut self) {
        // 阶段一：模型加载
        tracing::debug!("Loading face detection models");
        let loaded = tokio::select! {
            biased;
            _ = self.shutdown_rx.recv() => {
                tracing::debug!("Shutdown before model load completed");
                return;
            }
            res = self.detector.load_models() => res,
        };
        match loaded {
            Ok(()) => self.transition(ReadinessEvent::ModelsLoaded),
            Err(err) => {
                tracing::error!(error = %err, "Face model loading failed");
                self.transition(ReadinessEvent::ModelLoadFailed);
                return;
            }
        }

        // 阶段二：摄像头授权
        self.transition(ReadinessEvent::CameraRequested);
        let acquired = tokio::select! {
            biased;
            _ = self.shutdown_rx.recv() => {
                tracing::debug!("Shutdown before camera acquisition completed");
                return;
            }
            res = self.camera.acquire() => res,
        };
        match acquired {
            Ok(()) => self.transition(ReadinessEvent::CameraAcquired),
            Err(err) => {
                tracing::error!(error = %err, "Camera acquisition failed");
                self.transition(ReadinessEvent::CameraDenied);
                return;
            }
        }

        // 阶段三：轮询
        self.transition(ReadinessEvent::PollingStarted);
        self.poll().await;
    }

    async fn poll(&mut self) {
        let mut interval = tokio::time::interval(self.poll_interval);
        // 检测耗时超过间隔时顺延下一拍，不补发积压的 tick
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // biased + shutdown 在前：一旦收到停止信号，绝不再进入下一拍
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                _ = interval.tick() => {}
            }

            let Some(frame) = self.camera.poll_frame() else {
                tracing::trace!("Camera frame not yet decodable, skipping tick");
                continue;
            };

            // 已完成但在取消后才到达的检测结果会随 future 一起被丢弃
            let detection = tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                res = self.detector.detect(&frame) => match res {
                    Ok(detection) => detection,
                    Err(err) => {
                        // 单帧失败不致命：当帧按无人脸处理，继续轮询
                        tracing::warn!(error = %err, "Detection failed for this tick, treating as no face");
                        None
                    }
                },
            };

            let verdict = self.classifier.classify(detection.as_ref());
            let signal = self.gate.update(verdict);
            tracing::trace!(
                verdict = verdict.as_str(),
                signal = signal.as_str(),
                "Tick evaluated"
            );

            self.actuator.apply(signal).await;
            self.publish();
        }
    }

    fn transition(&mut self, event: ReadinessEvent) {
        let state = self.machine.apply(event);
        tracing::info!(state = state.as_str(), "Readiness transition");
        self.publish();
    }

    /// Publish the current snapshot, but only when readiness or signal
    /// actually changed. Observers see edges, not steady-state repeats.
    fn publish(&self) {
        let readiness = self.machine.state();
        let signal = self.gate.signal();
        self.state_tx.send_if_modified(|snapshot| {
            if snapshot.readiness == readiness && snapshot.signal == signal {
                return false;
            }
            *snapshot = ControllerSnapshot {
                readiness,
                signal,
                changed_at: Utc::now(),
            };
            true
        });
    }
}
