//! Change-log service — read side of the audit trail.
//!
//! Appending happens inside the device service as a side effect of
//! mutations; this service only serves listings.

use hearth_domain::change_log::LogEntry;
use hearth_domain::error::HearthError;

use crate::pagination::Page;
use crate::ports::ChangeLogRepository;

/// Application service for reading the audit trail.
pub struct ChangeLogService<LR> {
    entries: LR,
}

impl<LR: ChangeLogRepository> ChangeLogService<LR> {
    /// Create a new service backed by the given repository.
    pub fn new(entries: LR) -> Self {
        Self { entries }
    }

    /// The complete trail, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_entries(&self) -> Result<Vec<LogEntry>, HearthError> {
        self.entries.list_all().await
    }

    /// One page of the trail (newest first) plus the total entry count.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_entries_page(
        &self,
        page: Page,
    ) -> Result<(Vec<LogEntry>, u64), HearthError> {
        self.entries.list_page(page.offset(), page.per_page()).await
    }
}
