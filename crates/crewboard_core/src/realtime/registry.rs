//! Room membership registry.
//!
//! # Responsibility
//! - Map room names to the sessions currently joined.
//! - Hold each session's outbound channel and fan events into it.
//!
//! # Invariants
//! - `join`/`leave` are idempotent per `(session, room)` pair.
//! - A session whose receiver is gone is pruned on the next publish that
//!   touches it; the publisher never observes that failure.
//! - Membership mutation is safe under concurrent calls from any number of
//!   connections.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use tokio::sync::mpsc::UnboundedSender;

use crate::realtime::event::ChangeEvent;
use crate::realtime::SessionId;

#[derive(Debug, Default)]
struct RegistryTables {
    rooms: HashMap<String, HashSet<SessionId>>,
    senders: HashMap<SessionId, UnboundedSender<ChangeEvent>>,
}

/// Live session/room bookkeeping behind one lock.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    tables: RwLock<RegistryTables>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connected session and its outbound channel.
    pub fn register(&self, session: SessionId, sender: UnboundedSender<ChangeEvent>) {
        self.tables.write().senders.insert(session, sender);
    }

    /// Drops a session from every room and forgets its channel.
    ///
    /// Safe to call for unknown sessions; disconnect paths may race.
    pub fn unregister(&self, session: SessionId) {
        let mut tables = self.tables.write();
        tables.senders.remove(&session);
        tables.rooms.retain(|_, members| {
            members.remove(&session);
            !members.is_empty()
        });
    }

    /// Declares the session's interest in `room`. Unknown (never registered
    /// or already disconnected) sessions are ignored.
    pub fn join(&self, session: SessionId, room: &str) {
        let mut tables = self.tables.write();
        if !tables.senders.contains_key(&session) {
            return;
        }
        tables
            .rooms
            .entry(room.to_string())
            .or_default()
            .insert(session);
    }

    /// Withdraws the session's interest in `room`.
    pub fn leave(&self, session: SessionId, room: &str) {
        let mut tables = self.tables.write();
        if let Some(members) = tables.rooms.get_mut(room) {
            members.remove(&session);
            if members.is_empty() {
                tables.rooms.remove(room);
            }
        }
    }

    /// Delivers `event` to every session joined to `room`, the origin
    /// session included. Returns how many sessions received it.
    ///
    /// Sessions whose receiver has been dropped are pruned afterwards;
    /// their failure is not reported to the caller.
    pub fn publish(&self, room: &str, event: &ChangeEvent) -> usize {
        let mut delivered = 0usize;
        let mut dead: Vec<SessionId> = Vec::new();

        {
            let tables = self.tables.read();
            let Some(members) = tables.rooms.get(room) else {
                return 0;
            };
            for session in members {
                match tables.senders.get(session) {
                    Some(sender) if sender.send(*event).is_ok() => delivered += 1,
                    _ => dead.push(*session),
                }
            }
        }

        for session in dead {
            self.unregister(session);
        }

        delivered
    }

    /// Number of sessions currently joined to `room`.
    pub fn room_size(&self, room: &str) -> usize {
        self.tables
            .read()
            .rooms
            .get(room)
            .map_or(0, HashSet::len)
    }

    /// Number of connected sessions across all rooms.
    pub fn session_count(&self) -> usize {
        self.tables.read().senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::RoomRegistry;
    use crate::realtime::event::{ChangeEvent, EventKind};
    use tokio::sync::mpsc;
    use uuid::Uuid;

    #[test]
    fn join_is_idempotent_and_requires_registration() {
        let registry = RoomRegistry::new();
        let session = Uuid::new_v4();

        registry.join(session, "project-x");
        assert_eq!(registry.room_size("project-x"), 0);

        let (sender, _receiver) = mpsc::unbounded_channel();
        registry.register(session, sender);
        registry.join(session, "project-x");
        registry.join(session, "project-x");
        assert_eq!(registry.room_size("project-x"), 1);
    }

    #[test]
    fn publish_to_empty_room_delivers_nothing() {
        let registry = RoomRegistry::new();
        let event = ChangeEvent::project(EventKind::Created, Uuid::new_v4());
        assert_eq!(registry.publish("project-x", &event), 0);
    }

    #[test]
    fn dropped_receiver_is_pruned_on_publish() {
        let registry = RoomRegistry::new();
        let session = Uuid::new_v4();
        let (sender, receiver) = mpsc::unbounded_channel();
        registry.register(session, sender);
        registry.join(session, "room");
        drop(receiver);

        let event = ChangeEvent::project(EventKind::Updated, Uuid::new_v4());
        assert_eq!(registry.publish("room", &event), 0);
        assert_eq!(registry.session_count(), 0);
        assert_eq!(registry.room_size("room"), 0);
    }

    #[test]
    fn unregister_clears_all_room_memberships() {
        let registry = RoomRegistry::new();
        let session = Uuid::new_v4();
        let (sender, _receiver) = mpsc::unbounded_channel();
        registry.register(session, sender);
        registry.join(session, "a");
        registry.join(session, "b");

        registry.unregister(session);
        assert_eq!(registry.room_size("a"), 0);
        assert_eq!(registry.room_size("b"), 0);
        assert_eq!(registry.session_count(), 0);
    }
}
