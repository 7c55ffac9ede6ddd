//! Telemetry egress task.
//!
//! Drains the shared outbound queue and publishes through a
//! [`PublishPort`]. This is an independent failure domain: a dead link
//! or a failed publish costs at most the message in hand, never control
//! correctness. While offline, messages are drained and dropped so the
//! queue cannot silt up with stale status.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

use crate::ports::PublishPort;
use crate::sync::TelemetryQueue;
use crate::telemetry::{OutboundMessage, TELEMETRY_QUEUE_DEPTH};

pub struct EgressTask<P: PublishPort> {
    queue: Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>,
    port: P,
    /// Advisory link state maintained by the connectivity monitor.
    online: Arc<AtomicBool>,
    poll: Duration,
}

impl<P: PublishPort> EgressTask<P> {
    pub fn new(
        queue: Arc<TelemetryQueue<OutboundMessage, TELEMETRY_QUEUE_DEPTH>>,
        port: P,
        online: Arc<AtomicBool>,
        poll: Duration,
    ) -> Self {
        Self {
            queue,
            port,
            online,
            poll,
        }
    }

    pub fn run(mut self) -> ! {
        loop {
            self.pump_once();
        }
    }

    /// Wait up to the poll interval for one message and forward it.
    /// Returns `true` when a message was taken off the queue.
    pub fn pump_once(&mut self) -> bool {
        let Some(msg) = self.queue.dequeue_timeout(self.poll) else {
            return false;
        };
        if !self.online.load(Ordering::Relaxed) {
            debug!("egress: offline, dropped {}", msg.kind());
            return true;
        }
        let payload = msg.render();
        if let Err(err) = self.port.publish(msg.topic(), payload.as_bytes()) {
            warn!("egress: publish of {} failed: {err}", msg.kind());
        }
        true
    }
}
