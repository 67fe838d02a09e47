use gaze_playback::config::Config;
use gaze_playback::logging::init_tracing;
use gaze_playback::synthetic::{LoggingSink, SyntheticCamera, SyntheticDetector};
use gaze_playback::GazeController;
use tokio_stream::StreamExt;

/// 演示画面尺寸
const FRAME_WIDTH: f64 = 640.0;
const FRAME_HEIGHT: f64 = 360.0;

/// 合成摄像头预热帧数
const CAMERA_WARMUP_FRAMES: u64 = 3;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&config);
    tracing::info!("Starting gaze-playback demo");

    if let Err(err) = config.thresholds.validate() {
        tracing::error!(error = %err, "Invalid thresholds configuration");
        std::process::exit(1);
    }
    tracing::info!(
        ear_open_threshold = config.thresholds.ear_open_threshold,
        debounce_streak = config.thresholds.debounce_streak,
        poll_interval_ms = config.thresholds.poll_interval_ms,
        "Thresholds loaded"
    );

    let camera = SyntheticCamera::new(FRAME_WIDTH, FRAME_HEIGHT, CAMERA_WARMUP_FRAMES);
    let detector = SyntheticDetector::new(&config.demo);
    let sink = LoggingSink::new();

    let mut controller =
        GazeController::new(camera, detector, sink, config.thresholds.clone());
    tracing::info!(session = %controller.session_id(), "Controller created");
    controller.start();

    // 快照流只在就绪状态或稳定信号变化时产出
    let mut updates = controller.updates();
    let watcher = tokio::spawn(async move {
        while let Some(snapshot) = updates.next().await {
            tracing::info!(
                readiness = snapshot.readiness.as_str(),
                signal = snapshot.signal.as_str(),
                "Controller state"
            );
            if let Ok(json) = serde_json::to_string(&snapshot) {
                tracing::debug!(snapshot = %json, "Snapshot");
            }
            if snapshot.readiness.is_terminal_failure() {
                tracing::error!("Controller reached a terminal failure state");
            }
        }
    });

    shutdown_signal().await;

    controller.dispose().await;
    let _ = watcher.await;
    tracing::info!("Shutdown complete");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
