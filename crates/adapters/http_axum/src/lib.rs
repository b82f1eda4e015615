//! # hearth-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** (`/devices`, `/change-log`) using the
//!   `{ success, message, data?, error? }` response envelope
//! - Upgrade `/devices/ws` and `/change-log/ws` to the live-update
//!   WebSocket feeds and run each connection's lifecycle
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `hearth-app` (for port traits, services, and the broadcast
//! subsystem) and `hearth-domain` (for domain types used in request/response
//! mapping). Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod response;
pub mod router;
pub mod state;
