//! 视觉判定管线
//!
//! 从单帧检测结果到稳定注意力信号的纯决策层，不依赖渲染环境：
//! - `geometry`: EAR 与纵向视线偏移的纯函数计算
//! - `classifier`: 单帧瞬时判定（专注 / 不专注 / 无人脸）
//! - `debounce`: 滞回防抖，输出稳定的 Looking / NotLooking 信号
//! - `detector`: 外部人脸检测器契约与检测结果类型

pub mod classifier;
pub mod debounce;
pub mod detector;
pub mod geometry;

pub use classifier::{AttentionClassifier, Verdict};
pub use debounce::{DebounceGate, StableSignal};
pub use detector::{Detection, DetectorError, FaceDetector};
pub use geometry::{eye_aspect_ratio, vertical_gaze_offset, EyeLandmarks, Point};
