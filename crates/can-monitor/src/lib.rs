//! CAN Frame Monitor
//!
//! Wires a simulated receive interrupt into the frame buffer and drains it
//! from a polling main loop.

use anyhow::{anyhow, Result};
use can_adapter::codec::{decode_bool, decode_u16, encode_bool};
use can_adapter::{AdapterConfig, CanAdapter, MockTransceiver};
use frame_buffer::{CriticalSection, Frame, FrameRingBuffer};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod settings;

pub use settings::MonitorSettings;

/// Outcome of one monitor run
#[derive(Debug, Default)]
pub struct MonitorReport {
    /// Frames drained by the consumer, in arrival order
    pub received: Vec<Frame>,
    /// Frames the interrupt handler buffered
    pub buffered: usize,
    /// Frames rejected because the buffer was full
    pub dropped: usize,
    /// Acknowledgement frame sent after draining, if any
    pub acknowledged: Option<Frame>,
}

/// Initialize logging
pub fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Demo bus traffic: every third frame targets another node
pub fn demo_traffic(node_id: u32, frames: usize) -> Vec<Frame> {
    (0..frames)
        .map(|i| {
            let id = if i % 3 == 2 { node_id.wrapping_add(1) } else { node_id };
            let seq = (i as u16).to_be_bytes();
            Frame::new(id, &[encode_bool(i % 2 == 0), seq[0], seq[1], 0, 0, 0, 0, 0])
        })
        .collect()
}

/// Run the producer thread and polling consumer over scripted traffic
///
/// `buffer` is the process-lifetime receive buffer; the interrupt thread
/// borrows its producer side. Returns once the mock bus is drained and
/// every buffered frame consumed.
pub async fn run_monitor<C>(
    buffer: &'static mut FrameRingBuffer<C>,
    config: AdapterConfig,
    settings: &MonitorSettings,
    traffic: Vec<Frame>,
) -> Result<MonitorReport>
where
    C: CriticalSection + Send + Sync + 'static,
{
    let mut adapter = CanAdapter::setup(MockTransceiver::with_traffic(traffic), config)?;
    let (mut producer, mut consumer) = buffer.split();

    let interrupt_interval = settings.interrupt_interval();
    let interrupts = std::thread::spawn(move || {
        let mut buffered = 0;
        while adapter.transceiver().pending() > 0 {
            if adapter.on_interrupt(&mut producer) {
                buffered += 1;
            }
            std::thread::sleep(interrupt_interval);
        }
        (adapter, buffered, producer.total_dropped())
    });

    info!("Polling frame buffer every {:?}", settings.poll_interval());
    let mut report = MonitorReport::default();
    let mut ticker = tokio::time::interval(settings.poll_interval());

    while !interrupts.is_finished() {
        ticker.tick().await;
        drain(&mut consumer, &mut report.received);
    }

    let (mut adapter, buffered, dropped) = interrupts
        .join()
        .map_err(|_| anyhow!("interrupt thread panicked"))?;
    drain(&mut consumer, &mut report.received);

    report.buffered = buffered;
    report.dropped = dropped;
    if dropped > 0 {
        warn!("{} frames dropped on overflow", dropped);
    }

    let ack = [encode_bool(dropped == 0)];
    adapter.send(settings.ack_id, &ack)?;
    report.acknowledged = adapter.transceiver().sent().last().copied();

    info!(
        "Monitor finished: {} received, {} dropped",
        report.received.len(),
        report.dropped
    );
    Ok(report)
}

fn drain<C: CriticalSection>(consumer: &mut frame_buffer::Consumer<'_, C>, out: &mut Vec<Frame>) {
    while !consumer.is_empty() {
        let Some(frame) = consumer.pop() else {
            break;
        };

        let flag = decode_bool(frame.payload[0]);
        let seq = decode_u16(frame.payload[1], frame.payload[2]);
        debug!("Frame {} flag={:?} seq={}", frame, flag, seq);
        out.push(frame);
    }
}
