//! # hearth-app
//!
//! Application layer — use-cases, **port definitions** (traits), and the
//! in-process real-time broadcast subsystem.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceRepository` — CRUD for device records
//!   - `ChangeLogRepository` — append & list audit entries
//!   - `ChangePublisher` — hand change events to the broadcast subsystem
//! - Define **driving/inbound ports** as use-case structs:
//!   - `DeviceService` — validate, persist, audit, and announce mutations
//!   - `ChangeLogService` — paginated audit-trail reads
//! - Provide the **broadcast subsystem** that doesn't need IO of its own:
//!   subscriber registry, bounded event queue, and the dispatcher loop
//!
//! ## Dependency rule
//! Depends on `hearth-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod broadcast;
pub mod pagination;
pub mod ports;
pub mod services;
