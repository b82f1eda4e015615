//! # hearth-domain
//!
//! Pure domain model for the hearth home backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (switchable things in the home: lights, locks, speakers, …)
//! - Define **Log entries** (the append-only audit trail of mutations)
//! - Define **Change events** (transient notifications consumed by the
//!   broadcast dispatcher)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod change_log;
pub mod device;
pub mod event;
