//! gaze-playback：视线驱动的媒体播放控制器
//!
//! 通过外部人脸关键点检测器观察摄像头画面，只在观众专注注视屏幕时
//! 让媒体播放，视线离开或闭眼时暂停。核心是纯决策管线加一个拥有
//! 全部状态的控制器任务，渲染层只需订阅快照流。
//!
//! ## 模块
//! - `vision`: 几何计算、瞬时判定、防抖与检测器契约
//! - `camera`: 摄像头源契约
//! - `playback`: 媒体 sink 契约与幂等执行器
//! - `controller`: 就绪状态机、轮询任务与控制器外观
//! - `config` / `constants` / `logging`: 环境配置、默认参数、日志初始化
//! - `synthetic`: 无硬件环境下可运行的合成协作方

pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod logging;
pub mod playback;
pub mod synthetic;
pub mod vision;

// 重新导出核心类型，方便外部使用
pub use camera::{CameraError, CameraSource};
pub use config::{Config, ConfigError, DemoConfig, Thresholds};
pub use controller::readiness::{ReadinessEvent, ReadinessMachine, ReadinessState};
pub use controller::{ControllerSnapshot, GazeController};
pub use playback::{MediaSink, PlaybackActuator, SinkError};
pub use vision::classifier::{AttentionClassifier, Verdict};
pub use vision::debounce::{DebounceGate, StableSignal};
pub use vision::detector::{Detection, DetectorError, FaceDetector};
pub use vision::geometry::{eye_aspect_ratio, vertical_gaze_offset, EyeLandmarks, Point};
