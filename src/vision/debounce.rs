//! 判定防抖模块
//!
//! 将逐帧的噪声判定流转换为稳定的 `Looking | NotLooking` 信号：
//! 只有连续 N 帧一致的判定才允许信号翻转，单帧抖动（逐帧推理常见）
//! 不会引起播放状态来回切换。初始信号为 `NotLooking`（失败安全：
//! 确认到注意力之前播放保持暂停）。

use serde::{Deserialize, Serialize};

use crate::vision::classifier::Verdict;

/// 防抖后的稳定注意力信号，实际驱动播放
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StableSignal {
    Looking,
    NotLooking,
}

impl StableSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Looking => "looking",
            Self::NotLooking => "not_looking",
        }
    }
}

/// 滞回门：累计连续一致的判定，达到配置的帧数后才翻转信号
#[derive(Debug)]
pub struct DebounceGate {
    /// 翻转所需的连续一致帧数
    streak_len: u32,
    /// 当前稳定信号
    signal: StableSignal,
    /// 当前连续一致帧计数
    run: u32,
    /// 上一帧的二值目标
    last_target: Option<StableSignal>,
}

impl DebounceGate {
    /// 创建防抖门；streak_len 为 0 时按 1 处理
    pub fn new(streak_len: u32) -> Self {
        Self {
            streak_len: if streak_len == 0 { 1 } else { streak_len },
            signal: StableSignal::NotLooking,
            run: 0,
            last_target: None,
        }
    }

    /// 输入一帧判定，返回（可能翻转后的）稳定信号
    pub fn update(&mut self, verdict: Verdict) -> StableSignal {
        let target = match verdict {
            Verdict::Attentive => StableSignal::Looking,
            Verdict::Inattentive | Verdict::NoFace => StableSignal::NotLooking,
        };

        if self.last_target == Some(target) {
            self.run = self.run.saturating_add(1);
        } else {
            self.last_target = Some(target);
            self.run = 1;
        }

        if self.run >= self.streak_len && target != self.signal {
            self.signal = target;
            self.run = 0;
        }

        self.signal
    }

    pub fn signal(&self) -> StableSignal {
        self.signal
    }

    /// 回到初始状态（信号 NotLooking，计数清零）
    pub fn reset(&mut self) {
        self.signal = StableSignal::NotLooking;
        self.run = 0;
        self.last_target = None;
    }
}
