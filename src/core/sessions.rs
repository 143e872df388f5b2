//! Arena of live sessions, keyed by player.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{PlayerId, SequenceSession};

/// All players currently in scope, with their in-memory session.
///
/// A session exists exactly between a player's scope entry and exit.
#[derive(Resource, Debug, Default)]
pub struct SequenceSessions {
    sessions: HashMap<PlayerId, SequenceSession>,
}

impl SequenceSessions {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session, replacing any existing one.
    ///
    /// Returns `true` if the player was not in scope before.
    pub fn enter(&mut self, player: PlayerId) -> bool {
        self.sessions.insert(player, SequenceSession::new()).is_none()
    }

    /// End a session. Returns the discarded session, if any.
    pub fn exit(&mut self, player: PlayerId) -> Option<SequenceSession> {
        self.sessions.remove(&player)
    }

    /// Get a session.
    pub fn get(&self, player: PlayerId) -> Option<&SequenceSession> {
        self.sessions.get(&player)
    }

    /// Get a session mutably.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut SequenceSession> {
        self.sessions.get_mut(&player)
    }

    /// Check if a player is in scope.
    pub fn contains(&self, player: PlayerId) -> bool {
        self.sessions.contains_key(&player)
    }

    /// Number of players in scope.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no player is in scope.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterate over players in scope.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.sessions.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputSymbol;

    const ALICE: PlayerId = PlayerId::from_u128(7);

    #[test]
    fn test_enter_exit() {
        let mut sessions = SequenceSessions::new();
        assert!(sessions.enter(ALICE));
        assert!(sessions.contains(ALICE));
        assert_eq!(sessions.len(), 1);

        assert!(sessions.exit(ALICE).is_some());
        assert!(sessions.is_empty());
        assert!(sessions.exit(ALICE).is_none());
    }

    #[test]
    fn test_reenter_replaces_session() {
        let mut sessions = SequenceSessions::new();
        sessions.enter(ALICE);
        if let Some(session) = sessions.get_mut(ALICE) {
            session.press(InputSymbol::Sneak);
        }
        assert!(!sessions.enter(ALICE));
        assert!(sessions.get(ALICE).is_some_and(|s| s.sequence().is_empty()));
    }
}
