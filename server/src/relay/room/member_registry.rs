use protocol::event::PlayerEvent;
use tokio::sync::mpsc::UnboundedSender;

/// [MemberRegistry] is a smart container for keeping track of the live
/// participants of a single room, in join order, keyed by session id.
///
/// Join order is what makes fan-out iteration deterministic; delivery order
/// across distinct members carries no guarantee for clients.
#[derive(Debug, Default)]
pub struct MemberRegistry {
    members: Vec<(String, UnboundedSender<PlayerEvent>)>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a member under the given session id. A re-join with the same
    /// id replaces the previous sender instead of duplicating the entry.
    pub fn insert(&mut self, session_id: &str, sender: UnboundedSender<PlayerEvent>) {
        if let Some(member) = self.members.iter_mut().find(|(id, _)| id == session_id) {
            member.1 = sender;
        } else {
            self.members.push((session_id.to_string(), sender));
        }
    }

    /// Removes the member with the given session id, returns false if the id
    /// was not present. Removing an absent member is a no-op, not an error.
    pub fn remove(&mut self, session_id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|(id, _)| id != session_id);

        before != self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Session ids of the current members, in join order.
    pub fn session_ids(&self) -> Vec<String> {
        self.members.iter().map(|(id, _)| id.clone()).collect()
    }

    /// Snapshot of the senders to deliver to, minus the excluded session.
    /// Taken under the room lock so a concurrent join or leave cannot corrupt
    /// the iteration; the actual sends run on the snapshot afterwards.
    pub fn recipients(&self, exclude: Option<&str>) -> Vec<(String, UnboundedSender<PlayerEvent>)> {
        self.members
            .iter()
            .filter(|(id, _)| exclude != Some(id.as_str()))
            .cloned()
            .collect()
    }
}
