//! Client-side state kept in line with server truth.
//!
//! # Responsibility
//! - Cache the projects and tasks a client currently sees.
//! - Reconcile pushed change events against that cache.
//!
//! # Invariants
//! - A pushed event is an invalidation signal, never a patch source; the
//!   cache refetches through the read path and replaces wholesale.
//! - Reapplying any event (duplicate, reordered, echoed) is harmless.
//!
//! # See also
//! - docs/architecture/realtime.md

pub mod cache;
