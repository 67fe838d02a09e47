//! Camera source contract.
//!
//! The camera is an external collaborator: acquisition (permission prompt,
//! device open) is a one-shot asynchronous operation, and failure is a
//! terminal condition surfaced to the readiness state machine; the
//! controller never retries it. `poll_frame` doubles as the readiness
//! predicate: `None` means not enough data is buffered to sample a frame
//! yet, which the poll loop treats as a silent no-op tick.

use std::future::Future;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    /// 用户拒绝授权，终态
    #[error("camera access denied: {0}")]
    AccessDenied(String),
    /// 设备不存在或被占用，终态
    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

pub trait CameraSource {
    type Frame;

    /// One-shot acquisition of the underlying device/stream.
    fn acquire(&mut self) -> impl Future<Output = Result<(), CameraError>> + Send;

    /// Sample the current frame, or `None` when the stream is not yet
    /// decodable. Never blocks.
    fn poll_frame(&mut self) -> Option<Self::Frame>;

    /// Release the underlying tracks. Must be safe to call at any point:
    /// before acquisition it is a no-op, and repeated calls are tolerated.
    fn stop(&mut self);
}
