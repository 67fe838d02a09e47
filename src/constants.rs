/// 每只眼睛的关键点数量（6点 EAR 模型）
pub const EYE_LANDMARK_COUNT: usize = 6;

/// 眼角水平距离低于此值视为退化输入，EAR 按闭眼处理
pub const DEGENERATE_EXTENT_EPSILON: f64 = 1e-6;

/// 默认 EAR 睁眼阈值，严格大于此值才算睁眼
pub const DEFAULT_EAR_OPEN_THRESHOLD: f64 = 0.22;

/// 默认视线带上边界（画面中线上方像素数）
pub const DEFAULT_GAZE_UPPER_MARGIN: f64 = 80.0;

/// 默认视线带下边界（画面中线下方像素数）
pub const DEFAULT_GAZE_LOWER_MARGIN: f64 = 120.0;

/// 默认防抖连续帧数，信号翻转前需要的连续一致判定数
pub const DEFAULT_DEBOUNCE_STREAK: u32 = 3;

/// 默认轮询间隔（毫秒）
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 700;
