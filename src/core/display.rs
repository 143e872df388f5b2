//! Read-only query surface for placeholder/templating consumers.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{
    ComboSequence, DisplayStyle, PlayerData, PlayerDataStore, PlayerId, SequencePersistence,
    SequenceSessions, decode_sequence, format_sequence,
};

/// Render a player's current sequence.
///
/// The persisted value is preferred; when nothing is stored the live
/// session's sequence is used. `Raw` returns the stored text verbatim.
pub fn display_sequence(
    store: &dyn PlayerDataStore,
    sessions: &SequenceSessions,
    player: PlayerId,
    style: DisplayStyle,
) -> String {
    let raw = SequencePersistence::load_raw(store, player).or_else(|| {
        sessions
            .get(player)
            .map(|session| session.sequence().canonical())
            .filter(|canonical| !canonical.is_empty())
    });

    let Some(raw) = raw else {
        return String::new();
    };

    match style {
        DisplayStyle::Raw => raw,
        _ => format_sequence(&decode_sequence(&raw), style),
    }
}

/// System parameter exposing the current sequence of any player.
///
/// # Examples
///
/// ```ignore
/// fn show_combo(display: SequenceDisplay, players: Query<&PlayerHud>) {
///     for hud in &players {
///         let text = display.current(hud.player, DisplayStyle::Short);
///         // ...
///     }
/// }
/// ```
#[derive(SystemParam)]
pub struct SequenceDisplay<'w> {
    data: Res<'w, PlayerData>,
    sessions: Res<'w, SequenceSessions>,
}

impl SequenceDisplay<'_> {
    /// Current sequence rendered in `style`; empty when there is none.
    pub fn current(&self, player: PlayerId, style: DisplayStyle) -> String {
        display_sequence(self.data.store(), &self.sessions, player, style)
    }

    /// Current sequence as symbols.
    pub fn sequence(&self, player: PlayerId) -> ComboSequence {
        let stored = SequencePersistence::load(self.data.store(), player);
        if !stored.is_empty() {
            return stored;
        }
        self.sessions
            .get(player)
            .map(|session| session.sequence().clone())
            .unwrap_or_default()
    }

    /// Check if a player is in scope.
    pub fn in_scope(&self, player: PlayerId) -> bool {
        self.sessions.contains(player)
    }
}
