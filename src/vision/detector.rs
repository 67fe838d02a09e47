//! 人脸关键点检测器契约
//!
//! 检测器是外部协作方：控制器只消费其输出，不关心模型内部。
//! 模型加载失败是终态（进入 `ModelLoadFailed`），单帧推理失败是瞬态
//! （该帧按无人脸处理，轮询继续）。

use std::future::Future;

use thiserror::Error;

use crate::vision::geometry::EyeLandmarks;

/// 单帧检测结果：零或一张人脸的眼部关键点与画面尺寸。
/// 每个轮询周期产生一份，不跨周期保留。
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub left_eye: EyeLandmarks,
    pub right_eye: EyeLandmarks,
    pub frame_width: f64,
    pub frame_height: f64,
}

#[derive(Debug, Error)]
pub enum DetectorError {
    /// 模型加载失败，终态，不重试
    #[error("model load failed: {0}")]
    ModelLoad(String),
    /// 单帧推理失败，瞬态，当帧按无人脸处理
    #[error("inference failed: {0}")]
    Inference(String),
}

/// 人脸检测器，针对摄像头帧类型 `F` 泛型。
///
/// 方法返回 `impl Future + Send`，使控制器任务可以在多线程运行时上派生；
/// 实现方可直接用 `async fn` 编写。
pub trait FaceDetector<F> {
    /// 一次性异步加载模型，成功后才允许调用 `detect`
    fn load_models(&mut self) -> impl Future<Output = Result<(), DetectorError>> + Send;

    /// 对单帧做检测，无人脸时返回 `Ok(None)`
    fn detect(
        &mut self,
        frame: &F,
    ) -> impl Future<Output = Result<Option<Detection>, DetectorError>> + Send;
}
