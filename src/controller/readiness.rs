//! Readiness lifecycle state machine.
//!
//! State transitions:
//! - LoadingModels → ModelsReady (models loaded) | ModelLoadFailed (terminal)
//! - ModelsReady → AcquiringCamera (acquisition requested)
//! - AcquiringCamera → CameraReady (granted) | CameraDenied (terminal)
//! - CameraReady → Polling (loop started)
//!
//! Transitions are monotonic forward; failure states are terminal and absorb
//! every event. There is no automatic retry; a fresh attempt requires a new
//! controller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadinessState {
    LoadingModels,
    ModelsReady,
    AcquiringCamera,
    CameraReady,
    Polling,
    ModelLoadFailed,
    CameraDenied,
}

impl ReadinessState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadingModels => "loading_models",
            Self::ModelsReady => "models_ready",
            Self::AcquiringCamera => "acquiring_camera",
            Self::CameraReady => "camera_ready",
            Self::Polling => "polling",
            Self::ModelLoadFailed => "model_load_failed",
            Self::CameraDenied => "camera_denied",
        }
    }

    /// 终态失败：不可自动恢复
    pub fn is_terminal_failure(self) -> bool {
        matches!(self, Self::ModelLoadFailed | Self::CameraDenied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessEvent {
    ModelsLoaded,
    ModelLoadFailed,
    CameraRequested,
    CameraAcquired,
    CameraDenied,
    PollingStarted,
}

/// Owns the current readiness state; the only place it is mutated.
#[derive(Debug)]
pub struct ReadinessMachine {
    state: ReadinessState,
}

impl Default for ReadinessMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessMachine {
    /// 构造即进入 LoadingModels
    pub fn new() -> Self {
        Self {
            state: ReadinessState::LoadingModels,
        }
    }

    pub fn state(&self) -> ReadinessState {
        self.state
    }

    /// Apply a lifecycle event and return the (possibly unchanged) state.
    /// Events illegal in the current state are ignored with a warning.
    pub fn apply(&mut self, event: ReadinessEvent) -> ReadinessState {
        use ReadinessEvent as E;
        use ReadinessState as S;

        if self.state.is_terminal_failure() {
            return self.state;
        }

        let next = match (self.state, event) {
            (S::LoadingModels, E::ModelsLoaded) => S::ModelsReady,
            (S::LoadingModels, E::ModelLoadFailed) => S::ModelLoadFailed,
            (S::ModelsReady, E::CameraRequested) => S::AcquiringCamera,
            (S::AcquiringCamera, E::CameraAcquired) => S::CameraReady,
            (S::AcquiringCamera, E::CameraDenied) => S::CameraDenied,
            (S::CameraReady, E::PollingStarted) => S::Polling,
            (state, event) => {
                tracing::warn!(
                    state = state.as_str(),
                    ?event,
                    "Ignoring readiness event not legal in current state"
                );
                state
            }
        };

        self.state = next;
        next
    }
}
