//! In-process real-time broadcast subsystem.
//!
//! Three pieces cooperate to push state changes to every live observer:
//!
//! - [`SubscriberRegistry`] — the concurrency-safe set of live outbound
//!   channels, one per connected observer.
//! - [`EventQueue`] — a bounded FIFO of [`ChangeEvent`]s with
//!   multi-producer/single-consumer semantics. Producers never block.
//! - [`Dispatcher`] — the single consumer draining the queue. For every
//!   event it recomputes the authoritative snapshot from the store and fans
//!   the serialized payload out to the matching registry, pruning any
//!   subscriber whose send fails.
//!
//! Delivery is best-effort: an observer that is offline during a broadcast
//! simply misses it and resynchronizes through the initial snapshot on
//! reconnect.
//!
//! [`ChangeEvent`]: hearth_domain::event::ChangeEvent

pub mod dispatcher;
pub mod queue;
pub mod registry;

pub use dispatcher::{Dispatcher, change_log_frame, devices_frame};
pub use queue::{EventQueue, EventReceiver};
pub use registry::{SubscriberId, SubscriberRegistry};
