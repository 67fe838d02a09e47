//! Gaze-contingent playback controller.
//!
//! A `GazeController` owns one spawned task that drives the whole lifecycle:
//! model loading → camera acquisition → per-frame polling, feeding each
//! detection through classifier → debounce gate → playback actuator.
//! Presentation subscribes to the watch-backed snapshot stream; nothing in
//! here renders anything.

mod poll;
pub mod readiness;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::Instrument;
use uuid::Uuid;

use crate::camera::CameraSource;
use crate::config::Thresholds;
use crate::controller::poll::ControllerTask;
use crate::controller::readiness::ReadinessState;
use crate::playback::MediaSink;
use crate::vision::debounce::StableSignal;
use crate::vision::detector::FaceDetector;

/// Observable controller state, published only on readiness/signal edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerSnapshot {
    pub readiness: ReadinessState,
    pub signal: StableSignal,
    pub changed_at: DateTime<Utc>,
}

impl ControllerSnapshot {
    fn initial() -> Self {
        Self {
            readiness: ReadinessState::LoadingModels,
            signal: StableSignal::NotLooking,
            changed_at: Utc::now(),
        }
    }
}

/// Collaborators held between `new` and `start`.
struct Pending<C, D, S> {
    camera: C,
    detector: D,
    sink: S,
    state_tx: watch::Sender<ControllerSnapshot>,
}

/// One independently constructible, independently disposable controller
/// instance. All mutable state lives in the spawned task; the handle only
/// holds the channels needed to observe and to shut down.
pub struct GazeController<C, D, S>
where
    C: CameraSource + Send + 'static,
    C::Frame: Send,
    D: FaceDetector<C::Frame> + Send + 'static,
    S: MediaSink + Send + 'static,
{
    session_id: Uuid,
    thresholds: Thresholds,
    pending: Option<Pending<C, D, S>>,
    shutdown_tx: broadcast::Sender<()>,
    state_rx: watch::Receiver<ControllerSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl<C, D, S> GazeController<C, D, S>
where
    C: CameraSource + Send + 'static,
    C::Frame: Send,
    D: FaceDetector<C::Frame> + Send + 'static,
    S: MediaSink + Send + 'static,
{
    /// Construct a controller; readiness starts at `LoadingModels` but no
    /// work happens until `start` is called.
    pub fn new(camera: C, detector: D, sink: S, thresholds: Thresholds) -> Self {
        let (state_tx, state_rx) = watch::channel(ControllerSnapshot::initial());
        let (shutdown_tx, _) = broadcast::channel(4);

        Self {
            session_id: Uuid::new_v4(),
            thresholds,
            pending: Some(Pending {
                camera,
                detector,
                sink,
                state_tx,
            }),
            shutdown_tx,
            state_rx,
            handle: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Begin model loading (and, on success, camera acquisition and
    /// polling). Calling `start` again is a warned no-op.
    pub fn start(&mut self) {
        let Some(pending) = self.pending.take() else {
            tracing::warn!(session = %self.session_id, "Controller already started");
            return;
        };

        let task = ControllerTask::new(
            pending.camera,
            pending.detector,
            pending.sink,
            &self.thresholds,
            pending.state_tx,
            self.shutdown_tx.subscribe(),
        );

        let span = tracing::info_span!("gaze_controller", session = %self.session_id);
        self.handle = Some(tokio::spawn(task.run().instrument(span)));
    }

    /// Latest observed state.
    pub fn snapshot(&self) -> ControllerSnapshot {
        *self.state_rx.borrow()
    }

    /// Stream of snapshots for presentation: yields the current value
    /// immediately, then one item per readiness/signal edge. Ends when the
    /// controller is disposed.
    pub fn updates(&self) -> WatchStream<ControllerSnapshot> {
        WatchStream::new(self.state_rx.clone())
    }

    /// Tear down: cancel the task (any in-flight detection is discarded),
    /// wait for it to release the camera, and leave the last published
    /// readiness/signal values standing (no forced pause).
    pub async fn dispose(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                tracing::error!(
                    error = %err,
                    session = %self.session_id,
                    "Controller task terminated abnormally"
                );
            }
        }
        tracing::info!(session = %self.session_id, "Controller disposed");
    }
}
