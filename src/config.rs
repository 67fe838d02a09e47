use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_DEBOUNCE_STREAK, DEFAULT_EAR_OPEN_THRESHOLD, DEFAULT_GAZE_LOWER_MARGIN,
    DEFAULT_GAZE_UPPER_MARGIN, DEFAULT_POLL_INTERVAL_MS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub thresholds: Thresholds,
    pub demo: DemoConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            thresholds: Thresholds::from_env(),
            demo: DemoConfig::from_env(),
        }
    }
}

/// 注意力判定与轮询参数，会话期间不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// 是否要求双眼睁开（EAR 信号）
    pub require_eyes_open: bool,
    /// 是否要求视线落在画面中线附近的纵向带内
    pub require_gaze_centered: bool,
    /// EAR 睁眼阈值，平均 EAR 严格大于此值才算睁眼
    pub ear_open_threshold: f64,
    /// 视线带上边界（画面中线上方像素数）
    pub gaze_upper_margin: f64,
    /// 视线带下边界（画面中线下方像素数）
    pub gaze_lower_margin: f64,
    /// 信号翻转前需要的连续一致判定数
    pub debounce_streak: u32,
    /// 轮询间隔（毫秒）
    pub poll_interval_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            require_eyes_open: true,
            require_gaze_centered: false,
            ear_open_threshold: DEFAULT_EAR_OPEN_THRESHOLD,
            gaze_upper_margin: DEFAULT_GAZE_UPPER_MARGIN,
            gaze_lower_margin: DEFAULT_GAZE_LOWER_MARGIN,
            debounce_streak: DEFAULT_DEBOUNCE_STREAK,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Thresholds {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            require_eyes_open: env_or_bool("REQUIRE_EYES_OPEN", defaults.require_eyes_open),
            require_gaze_centered: env_or_bool(
                "REQUIRE_GAZE_CENTERED",
                defaults.require_gaze_centered,
            ),
            ear_open_threshold: env_or_parse("EAR_OPEN_THRESHOLD", defaults.ear_open_threshold),
            gaze_upper_margin: env_or_parse("GAZE_UPPER_MARGIN", defaults.gaze_upper_margin),
            gaze_lower_margin: env_or_parse("GAZE_LOWER_MARGIN", defaults.gaze_lower_margin),
            debounce_streak: env_or_parse("DEBOUNCE_STREAK", defaults.debounce_streak),
            poll_interval_ms: env_or_parse("POLL_INTERVAL_MS", defaults.poll_interval_ms),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject parameter combinations the pipeline cannot run with.
    /// NaN 会被 `!(x > 0.0)` 这类比较捕获。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ear_open_threshold > 0.0) {
            return Err(ConfigError::Validation(format!(
                "earOpenThreshold must be positive, got {}",
                self.ear_open_threshold
            )));
        }
        if !(self.gaze_upper_margin >= 0.0) || !(self.gaze_lower_margin >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "gaze margins must be non-negative, got upper={} lower={}",
                self.gaze_upper_margin, self.gaze_lower_margin
            )));
        }
        if self.debounce_streak == 0 {
            return Err(ConfigError::Validation(
                "debounceStreak must be at least 1".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "pollIntervalMs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation error: {0}")]
    Validation(String),
}

/// 演示二进制使用的合成场景参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    /// 合成观众注视屏幕的时长（秒）
    pub look_secs: u64,
    /// 合成观众移开视线的时长（秒）
    pub away_secs: u64,
    /// 单帧检测结果被噪声翻转的概率 (0.0-1.0)
    pub jitter: f64,
    /// 合成检测器单次推理延迟（毫秒）
    pub detect_latency_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            look_secs: 8,
            away_secs: 4,
            jitter: 0.08,
            detect_latency_ms: 40,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            look_secs: env_or_parse("DEMO_LOOK_SECS", defaults.look_secs),
            away_secs: env_or_parse("DEMO_AWAY_SECS", defaults.away_secs),
            jitter: env_or_parse("DEMO_JITTER", defaults.jitter),
            detect_latency_ms: env_or_parse("DEMO_DETECT_LATENCY_MS", defaults.detect_latency_ms),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
