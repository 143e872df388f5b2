//! Messages exchanged between the host and the tracker.
//!
//! Host -> tracker:
//! - [`AudienceEnter`] / [`AudienceExit`]: scope changes
//! - [`PlayerInputSample`]: per-tick input state
//! - [`PlayerInputEvent`]: discrete input events (for input event entries)
//!
//! Tracker -> host:
//! - [`TriggerAction`]: fire a scripted action for a player
//! - [`SequenceUpdated`] / [`SequenceCompleted`]: sequence progress

use bevy::prelude::*;

use super::{ActionRef, ComboSequence, InputKind, InputSnapshot, PlayerId};

/// A player entered the tracker's audience.
#[derive(Message, Debug, Clone, Copy)]
pub struct AudienceEnter {
    pub player: PlayerId,
}

/// A player left the tracker's audience (logout, or no longer matching).
#[derive(Message, Debug, Clone, Copy)]
pub struct AudienceExit {
    pub player: PlayerId,
}

/// Input held by a player on the current tick.
///
/// The host writes one per in-scope player per tick.
///
/// # Examples
///
/// ```ignore
/// fn sample_inputs(players: Query<(&Player, &KeyState)>, mut samples: MessageWriter<PlayerInputSample>) {
///     for (player, keys) in &players {
///         samples.write(PlayerInputSample::new(player.id, keys.snapshot()));
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerInputSample {
    pub player: PlayerId,
    pub input: InputSnapshot,
}

impl PlayerInputSample {
    /// Create a sample.
    pub fn new(player: PlayerId, input: InputSnapshot) -> Self {
        Self { player, input }
    }
}

/// A raw input as reported by the engine's event system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// The movement/action key state changed.
    Movement(InputSnapshot),
    /// The player dropped an item.
    Drop,
    /// The player swapped hands.
    SwapHands,
}

/// Discrete input event for input event entries.
#[derive(Message, Debug, Clone, Copy)]
pub struct PlayerInputEvent {
    pub player: PlayerId,
    pub input: RawInput,
    /// Both hands were empty. Set only for swaps; such swaps are ignored.
    pub hands_empty: bool,
}

impl PlayerInputEvent {
    /// Create an event.
    pub fn new(player: PlayerId, input: RawInput) -> Self {
        Self {
            player,
            input,
            hands_empty: false,
        }
    }

    /// A hand swap, flagged when there was nothing to swap.
    pub fn swap_hands(player: PlayerId, hands_empty: bool) -> Self {
        Self {
            player,
            input: RawInput::SwapHands,
            hands_empty,
        }
    }

    /// Check if this is a swap with nothing in either hand.
    pub fn is_ghost_swap(&self) -> bool {
        self.hands_empty && self.input == RawInput::SwapHands
    }
}

/// Why an action was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerCause {
    /// A press was accepted into the sequence.
    SequenceUpdated { canonical: String },
    /// The sequence reached four inputs.
    SequenceCompleted { canonical: String },
    /// A completed sequence matched a combo route.
    ComboRoute { canonical: String },
    /// An input event entry matched.
    InputEvent(InputEventContext),
}

/// Context recorded by input event entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEventContext {
    /// The primary input of the event.
    pub kind: InputKind,
    /// Held movement flags at the time of the event.
    pub input: InputSnapshot,
    pub is_drop: bool,
    pub is_swap_hands: bool,
}

/// Request to run a scripted action for a player.
///
/// Fire-and-forget: the tracker never waits for or observes the outcome.
/// Within one tick, triggers are written in the order they were caused.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct TriggerAction {
    pub action: ActionRef,
    pub player: PlayerId,
    /// Tracker tick the trigger was raised on.
    pub tick: u64,
    pub cause: TriggerCause,
}

/// A press was accepted into a player's sequence.
#[derive(Message, Debug, Clone)]
pub struct SequenceUpdated {
    pub player: PlayerId,
    pub sequence: ComboSequence,
}

/// A player's sequence reached four inputs.
#[derive(Message, Debug, Clone)]
pub struct SequenceCompleted {
    pub player: PlayerId,
    pub sequence: ComboSequence,
    /// The route action that matched, if any.
    pub routed: Option<ActionRef>,
}

/// Plugin that registers all tracker messages.
pub struct SequenceEventsPlugin;

impl Plugin for SequenceEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AudienceEnter>()
            .add_message::<AudienceExit>()
            .add_message::<PlayerInputSample>()
            .add_message::<PlayerInputEvent>()
            .add_message::<TriggerAction>()
            .add_message::<SequenceUpdated>()
            .add_message::<SequenceCompleted>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_sample() {
        let player = PlayerId::from_u128(3);
        let sample = PlayerInputSample::new(player, InputSnapshot::RELEASED);
        assert_eq!(sample.player, player);
        assert!(!sample.input.any());
    }
}
