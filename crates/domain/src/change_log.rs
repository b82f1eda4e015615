//! Change log — the append-only audit trail of accepted mutations.

use serde::{Deserialize, Serialize};

use crate::id::LogEntryId;
use crate::time::Timestamp;

/// One audit-trail entry.
///
/// Entries are never mutated or deleted after creation. Creation order is
/// recoverable through the monotonic store-assigned id; the timestamp is
/// kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: LogEntryId,
    pub change: String,
    pub action: Option<String>,
    pub timestamp: Timestamp,
}
