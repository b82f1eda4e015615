//! Broadcast dispatcher — the single consumer of the event queue.

use std::sync::Arc;

use serde::Serialize;

use hearth_domain::change_log::LogEntry;
use hearth_domain::device::Device;
use hearth_domain::error::HearthError;
use hearth_domain::event::{ChangeAction, ChangeEvent};

use crate::ports::{ChangeLogRepository, DeviceRepository};

use super::queue::EventReceiver;
use super::registry::SubscriberRegistry;

/// Wire shape of a device-feed frame.
#[derive(Debug, Serialize)]
struct DevicesPayload<'a> {
    action: ChangeAction,
    devices: &'a [Device],
}

/// Serialize a device-feed frame.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if serialization fails.
pub fn devices_frame(
    action: ChangeAction,
    devices: &[Device],
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&DevicesPayload { action, devices })
}

/// Serialize a change-log frame: a bare array of entries, newest first.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if serialization fails.
pub fn change_log_frame(entries: &[LogEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

#[derive(Debug, thiserror::Error)]
enum BroadcastError {
    #[error(transparent)]
    Store(#[from] HearthError),
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Single consumer draining the event queue, one event at a time, in enqueue
/// order.
///
/// The payload is recomputed from the store at dispatch time rather than at
/// enqueue time, so every subscriber sees a state at least as fresh as the
/// triggering write even when several events queue up. Two closely spaced
/// mutations may therefore collapse into one observed transition; the
/// invariant preserved is "every subscriber eventually observes a state at
/// least as new as every completed write", not "every intermediate state is
/// observed".
pub struct Dispatcher<DR, LR> {
    receiver: EventReceiver,
    devices: DR,
    change_log: LR,
    device_feed: Arc<SubscriberRegistry>,
    change_log_feed: Arc<SubscriberRegistry>,
}

impl<DR, LR> Dispatcher<DR, LR>
where
    DR: DeviceRepository + Send + Sync + 'static,
    LR: ChangeLogRepository + Send + Sync + 'static,
{
    /// Wire a dispatcher to its queue, stores, and subscriber registries.
    #[must_use]
    pub fn new(
        receiver: EventReceiver,
        devices: DR,
        change_log: LR,
        device_feed: Arc<SubscriberRegistry>,
        change_log_feed: Arc<SubscriberRegistry>,
    ) -> Self {
        Self {
            receiver,
            devices,
            change_log,
            device_feed,
            change_log_feed,
        }
    }

    /// Drain the queue until every producer handle is dropped.
    ///
    /// Runs as the process's one dedicated broadcast task.
    pub async fn run(mut self) {
        while let Some(event) = self.receiver.recv().await {
            self.dispatch(event).await;
        }
        tracing::debug!("event queue closed, broadcast dispatcher stopping");
    }

    async fn dispatch(&self, event: ChangeEvent) {
        match self.render(event).await {
            Ok((feed, frame)) => fan_out(feed, &frame),
            Err(err) => {
                // No partial broadcast of stale data: skip this cycle and
                // move on to the next queued event.
                tracing::error!(%err, ?event, "failed to recompute state, skipping broadcast");
            }
        }
    }

    /// Resolve an event to the registry it targets and the frame to send,
    /// recomputing the full snapshot from the store.
    async fn render(
        &self,
        event: ChangeEvent,
    ) -> Result<(&SubscriberRegistry, String), BroadcastError> {
        match event {
            ChangeEvent::Devices { action } => {
                let devices = self.devices.list_all().await?;
                Ok((self.device_feed.as_ref(), devices_frame(action, &devices)?))
            }
            ChangeEvent::ChangeLog => {
                let entries = self.change_log.list_all().await?;
                Ok((self.change_log_feed.as_ref(), change_log_frame(&entries)?))
            }
        }
    }
}

/// Push one frame to every subscriber in the registry's current snapshot.
///
/// A send that fails — channel closed, or full because the subscriber cannot
/// drain its buffer — is proof of a dead or wedged connection: the subscriber
/// is deregistered immediately and never retried, and dropping its sender
/// closes the connection's writer.
fn fan_out(feed: &SubscriberRegistry, frame: &str) {
    for (id, sender) in feed.snapshot() {
        if let Err(err) = sender.try_send(frame.to_owned()) {
            tracing::debug!(subscriber = %id, %err, "dropping unreachable subscriber");
            feed.deregister(id);
        }
    }
}
