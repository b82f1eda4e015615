//! Bounded FIFO queue feeding the broadcast dispatcher.

use std::future::Future;

use tokio::sync::mpsc;

use hearth_domain::event::ChangeEvent;

use crate::ports::ChangePublisher;

/// Receiving half of the event queue, consumed by the [`Dispatcher`].
///
/// [`Dispatcher`]: super::Dispatcher
pub type EventReceiver = mpsc::Receiver<ChangeEvent>;

/// Multi-producer handle for enqueueing change events.
///
/// Events are dispatched in enqueue order. Publishing never blocks: when the
/// queue is full the notification is dropped and logged — the database write
/// it describes has already happened and is never rolled back, and the next
/// successful broadcast recomputes the full state anyway.
#[derive(Clone)]
pub struct EventQueue {
    sender: mpsc::Sender<ChangeEvent>,
}

impl EventQueue {
    /// Create a queue with room for `capacity` undispatched events.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, EventReceiver) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl ChangePublisher for EventQueue {
    fn publish(&self, event: ChangeEvent) -> impl Future<Output = ()> + Send {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(?event, "event queue full, dropping change notification");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::warn!(?event, "dispatcher gone, dropping change notification");
            }
        }
        async {}
    }
}
