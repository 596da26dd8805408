//! CAN Frame Monitor - Main Entry Point

use anyhow::Context;
use can_adapter::AdapterConfig;
use can_monitor::{demo_traffic, init_logging, run_monitor, MonitorSettings};
use frame_buffer::{FrameRingBuffer, InterruptFree};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    info!("=== CAN Frame Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AdapterConfig::load(config_path.as_deref())
        .context("failed to load adapter configuration")?;
    let settings = MonitorSettings::from_env().context("failed to load monitor settings")?;

    // The receive buffer lives for the rest of the process.
    let buffer = Box::leak(Box::new(FrameRingBuffer::new(InterruptFree)));

    let traffic = demo_traffic(config.node_id, settings.demo_frames);
    let report = run_monitor(buffer, config, &settings, traffic).await?;

    info!(
        "Buffered {} frames, dropped {}",
        report.buffered, report.dropped
    );
    Ok(())
}
