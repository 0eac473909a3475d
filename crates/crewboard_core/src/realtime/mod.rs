//! Live fan-out of confirmed mutations to watching sessions.
//!
//! # Responsibility
//! - Track which live sessions watch which project.
//! - Deliver pipeline-confirmed change events to every watcher.
//!
//! # Invariants
//! - The registry is an owned instance created with the gateway, never
//!   process-global state.
//! - Delivery is best-effort: no acknowledgment, no retry, no replay for
//!   sessions that join late. Missed events are recovered by refetching.
//! - Events published in sequence for one project reach every joined
//!   session in that sequence.
//!
//! # See also
//! - docs/architecture/realtime.md

use uuid::Uuid;

pub mod event;
pub mod gateway;
pub mod registry;

/// Stable identifier for one live client connection.
pub type SessionId = Uuid;
