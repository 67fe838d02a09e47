//! 注意力瞬时判定模块
//!
//! 将单帧检测结果映射为无记忆的瞬时判定：
//! `Attentive`（专注）| `Inattentive`（不专注）| `NoFace`（无人脸）。
//!
//! 判定条件由 `Thresholds` 配置：可要求双眼睁开（平均 EAR）、
//! 视线落在画面中线附近的纵向带内，或两者同时满足；
//! 两个条件都不要求时退化为"检测到人脸即专注"。
//! 阈值比较一律使用严格不等式，边界值落在不专注一侧。

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::vision::detector::Detection;
use crate::vision::geometry::{eye_aspect_ratio, vertical_gaze_offset};

/// 单帧瞬时判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Attentive,
    Inattentive,
    NoFace,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attentive => "attentive",
            Self::Inattentive => "inattentive",
            Self::NoFace => "no_face",
        }
    }
}

/// 注意力判定器，持有会话期不变的阈值配置。
/// 对整个输入域全函数：退化几何不会导致 panic。
#[derive(Debug, Clone)]
pub struct AttentionClassifier {
    thresholds: Thresholds,
}

impl AttentionClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, detection: Option<&Detection>) -> Verdict {
        let Some(detection) = detection else {
            return Verdict::NoFace;
        };

        if self.thresholds.require_eyes_open && !self.eyes_open(detection) {
            return Verdict::Inattentive;
        }
        if self.thresholds.require_gaze_centered && !self.gaze_centered(detection) {
            return Verdict::Inattentive;
        }

        Verdict::Attentive
    }

    /// 双眼 EAR 取平均后与睁眼阈值严格比较
    fn eyes_open(&self, detection: &Detection) -> bool {
        let left = eye_aspect_ratio(&detection.left_eye);
        let right = eye_aspect_ratio(&detection.right_eye);
        (left + right) / 2.0 > self.thresholds.ear_open_threshold
    }

    /// 视线偏移严格落在 (-upper, +lower) 带内
    fn gaze_centered(&self, detection: &Detection) -> bool {
        let offset = vertical_gaze_offset(
            &detection.left_eye,
            &detection.right_eye,
            detection.frame_height,
        );
        offset > -self.thresholds.gaze_upper_margin && offset < self.thresholds.gaze_lower_margin
    }
}
