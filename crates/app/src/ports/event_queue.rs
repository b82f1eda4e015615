//! Event-queue port — hand change events to the broadcast subsystem.

use std::future::Future;
use std::sync::Arc;

use hearth_domain::event::ChangeEvent;

/// Accepts change events for asynchronous broadcast.
///
/// Publishing must never block the caller: delivery problems are contained
/// inside the broadcast subsystem and never surface to a request/response
/// cycle. Losing a notification is acceptable; losing the write it describes
/// is not.
pub trait ChangePublisher {
    /// Hand an event to the broadcast subsystem.
    fn publish(&self, event: ChangeEvent) -> impl Future<Output = ()> + Send;
}

impl<T: ChangePublisher + Send + Sync> ChangePublisher for Arc<T> {
    fn publish(&self, event: ChangeEvent) -> impl Future<Output = ()> + Send {
        (**self).publish(event)
    }
}
