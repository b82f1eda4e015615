//! Change events — transient notifications that the shared state mutated.
//!
//! An event is constructed immediately after a successful write, consumed
//! exactly once by the broadcast dispatcher, and then discarded. It carries
//! no snapshot: the dispatcher recomputes the authoritative state from the
//! store at dispatch time, so subscribers always observe a state at least as
//! fresh as the triggering write.

use serde::{Deserialize, Serialize};

/// The kind of mutation a broadcast payload reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    /// Initial snapshot sent when a subscriber connects.
    Init,
    Add,
    Update,
    Delete,
}

impl ChangeAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A transient notification handed to the dispatcher queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The device collection changed.
    Devices { action: ChangeAction },
    /// The audit trail grew.
    ChangeLog,
}
