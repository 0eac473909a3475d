//! Session gateway between the mutation pipeline and live clients.
//!
//! # Responsibility
//! - Own the room registry and hand out per-connection session handles.
//! - Relay client-declared interest (join/leave) into the registry.
//! - Publish pipeline-confirmed events into the right project room.
//!
//! # Invariants
//! - The gateway is a cheap cloneable handle; all clones share one registry.
//! - `publish` is fire-and-forget for the caller: a slow or vanished
//!   receiver never delays or fails the mutation that triggered the event.

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use uuid::Uuid;

use crate::model::ProjectId;
use crate::realtime::event::{room_name, ChangeEvent};
use crate::realtime::registry::RoomRegistry;
use crate::realtime::SessionId;

/// Receiving half of one live connection.
///
/// Events arrive in publish order per project room. The handle is the only
/// owner of the receiver; dropping it disconnects delivery (the registry
/// prunes the session on its next publish).
#[derive(Debug)]
pub struct SessionHandle {
    session_id: SessionId,
    events: UnboundedReceiver<ChangeEvent>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the next already-delivered event, if any.
    pub fn try_next(&mut self) -> Option<ChangeEvent> {
        self.events.try_recv().ok()
    }

    /// Blocks until an event arrives or the gateway side is gone.
    pub fn recv_blocking(&mut self) -> Option<ChangeEvent> {
        self.events.blocking_recv()
    }

    /// Drains every event delivered so far, in order.
    pub fn drain(&mut self) -> Vec<ChangeEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

/// Cloneable facade over one room registry instance.
#[derive(Debug, Clone, Default)]
pub struct SessionGateway {
    registry: Arc<RoomRegistry>,
}

impl SessionGateway {
    /// Creates a gateway with a fresh, empty registry. Created once at
    /// service start and cloned into every component that publishes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new live session and returns its receiving handle.
    pub fn connect(&self) -> SessionHandle {
        let session_id = Uuid::new_v4();
        let (sender, events) = mpsc::unbounded_channel();
        self.registry.register(session_id, sender);
        debug!("event=session_connect module=realtime session={session_id}");
        SessionHandle { session_id, events }
    }

    /// Declares interest in a project's room. Idempotent.
    pub fn join(&self, session: SessionId, project: ProjectId) {
        self.registry.join(session, &room_name(project));
        debug!("event=room_join module=realtime session={session} project={project}");
    }

    /// Withdraws interest in a project's room. Idempotent.
    pub fn leave(&self, session: SessionId, project: ProjectId) {
        self.registry.leave(session, &room_name(project));
        debug!("event=room_leave module=realtime session={session} project={project}");
    }

    /// Removes the session from every room. Called on client disconnect;
    /// in-flight pipeline work started by this session is unaffected.
    pub fn disconnect(&self, session: SessionId) {
        self.registry.unregister(session);
        debug!("event=session_disconnect module=realtime session={session}");
    }

    /// Fans `event` out to every session watching its project. Returns the
    /// delivery count; failures of individual sessions are invisible here.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let delivered = self.registry.publish(&event.room(), &event);
        debug!(
            "event=fanout_publish module=realtime kind={} resource={} project={} delivered={}",
            event.kind.as_str(),
            event.resource.as_str(),
            event.project_id,
            delivered
        );
        delivered
    }

    /// Number of sessions currently watching `project`.
    pub fn watchers(&self, project: ProjectId) -> usize {
        self.registry.room_size(&room_name(project))
    }
}
