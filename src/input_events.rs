//! Input event entries.
//!
//! Forwards discrete engine input events ([`PlayerInputEvent`]) to every
//! registered [`InputEventEntry`] whose filter matches, as [`TriggerAction`]s
//! carrying an [`InputEventContext`].

use bevy::prelude::*;

use crate::core::{
    ActionRef, InputEventContext, InputKind, InputSnapshot, InputSymbol, PlayerInputEvent,
    RawInput, TriggerAction, TriggerCause,
};
use crate::TrackerTick;

/// Triggers actions when a player performs a chosen input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEventEntry {
    /// Actions to trigger.
    #[cfg_attr(feature = "persist", serde(default))]
    pub triggers: Vec<ActionRef>,
    /// Only trigger for this input. `None` triggers for every input event.
    #[cfg_attr(feature = "persist", serde(default))]
    pub input_kind: Option<InputKind>,
}

impl InputEventEntry {
    /// Entry that fires for every input event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the entry to one input.
    pub fn kind(mut self, kind: impl Into<InputKind>) -> Self {
        self.input_kind = Some(kind.into());
        self
    }

    /// Add an action to trigger.
    pub fn trigger(mut self, action: impl Into<ActionRef>) -> Self {
        self.triggers.push(action.into());
        self
    }

    /// Check whether `input` satisfies this entry's filter.
    pub fn matches(&self, input: &RawInput) -> bool {
        let Some(kind) = self.input_kind else {
            return true;
        };
        match (kind, input) {
            (InputKind::Symbol(symbol), RawInput::Movement(snapshot)) => snapshot.is_active(symbol),
            (InputKind::Drop, RawInput::Drop) => true,
            (InputKind::SwapHands, RawInput::SwapHands) => true,
            _ => false,
        }
    }
}

/// Registered input event entries.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputEventEntries {
    entries: Vec<InputEventEntry>,
}

impl InputEventEntries {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry.
    pub fn add(&mut self, entry: InputEventEntry) {
        self.entries.push(entry);
    }

    /// Replace every entry.
    pub fn replace(&mut self, entries: Vec<InputEventEntry>) {
        self.entries = entries;
    }

    /// Entries matching an input, in registration order.
    pub fn matching<'a>(&'a self, input: &'a RawInput) -> impl Iterator<Item = &'a InputEventEntry> {
        self.entries.iter().filter(move |entry| entry.matches(input))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Primary kind of a raw input.
///
/// For movement events this is the first held symbol in priority order,
/// or `Forward` when nothing is held.
pub fn primary_kind(input: &RawInput) -> InputKind {
    match input {
        RawInput::Movement(snapshot) => snapshot
            .active()
            .next()
            .unwrap_or(InputSymbol::Forward)
            .into(),
        RawInput::Drop => InputKind::Drop,
        RawInput::SwapHands => InputKind::SwapHands,
    }
}

/// Build the context recorded with triggers of an input event.
pub fn event_context(input: &RawInput) -> InputEventContext {
    let snapshot = match input {
        RawInput::Movement(snapshot) => *snapshot,
        _ => InputSnapshot::RELEASED,
    };
    InputEventContext {
        kind: primary_kind(input),
        input: snapshot,
        is_drop: matches!(input, RawInput::Drop),
        is_swap_hands: matches!(input, RawInput::SwapHands),
    }
}

/// System that dispatches input events to matching entries.
pub(crate) fn dispatch_input_events(
    mut events: MessageReader<PlayerInputEvent>,
    entries: Res<InputEventEntries>,
    tick: Res<TrackerTick>,
    mut triggers: MessageWriter<TriggerAction>,
) {
    for event in events.read() {
        if event.is_ghost_swap() {
            trace!("Ignoring empty-handed swap from {}", event.player);
            continue;
        }

        let context = event_context(&event.input);
        let mut fired = 0;

        for entry in entries.matching(&event.input) {
            for action in &entry.triggers {
                triggers.write(TriggerAction {
                    action: action.clone(),
                    player: event.player,
                    tick: tick.0,
                    cause: TriggerCause::InputEvent(context),
                });
                fired += 1;
            }
        }

        if fired > 0 {
            debug!("Input {} from {} fired {} triggers", context.kind, event.player, fired);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputSymbol::*;

    #[test]
    fn test_unfiltered_entry_matches_everything() {
        let entry = InputEventEntry::new().trigger("any");
        assert!(entry.matches(&RawInput::Drop));
        assert!(entry.matches(&RawInput::SwapHands));
        assert!(entry.matches(&RawInput::Movement(InputSnapshot::RELEASED)));
    }

    #[test]
    fn test_symbol_filter_checks_held_flag() {
        let entry = InputEventEntry::new().kind(Jump);
        assert!(entry.matches(&RawInput::Movement(InputSnapshot::held([Jump, Left]))));
        assert!(!entry.matches(&RawInput::Movement(InputSnapshot::held([Left]))));
        assert!(!entry.matches(&RawInput::Drop));
    }

    #[test]
    fn test_drop_and_swap_only_match_themselves() {
        let drop = InputEventEntry::new().kind(InputKind::Drop);
        assert!(drop.matches(&RawInput::Drop));
        assert!(!drop.matches(&RawInput::SwapHands));
        assert!(!drop.matches(&RawInput::Movement(InputSnapshot::held([Sneak]))));

        let swap = InputEventEntry::new().kind(InputKind::SwapHands);
        assert!(swap.matches(&RawInput::SwapHands));
        assert!(!swap.matches(&RawInput::Drop));
    }

    #[test]
    fn test_primary_kind() {
        assert_eq!(
            primary_kind(&RawInput::Movement(InputSnapshot::held([Left, Sprint]))),
            InputKind::Symbol(Sprint)
        );
        assert_eq!(
            primary_kind(&RawInput::Movement(InputSnapshot::RELEASED)),
            InputKind::Symbol(Forward)
        );
        assert_eq!(primary_kind(&RawInput::Drop), InputKind::Drop);
    }

    #[test]
    fn test_event_context_flags() {
        let context = event_context(&RawInput::SwapHands);
        assert!(context.is_swap_hands);
        assert!(!context.is_drop);
        assert_eq!(context.input, InputSnapshot::RELEASED);

        let context = event_context(&RawInput::Movement(InputSnapshot::held([Backward])));
        assert_eq!(context.kind, InputKind::Symbol(Backward));
        assert!(context.input.backward);
    }

    #[test]
    fn test_ghost_swap() {
        let player = crate::core::PlayerId::from_u128(7);
        assert!(PlayerInputEvent::swap_hands(player, true).is_ghost_swap());
        assert!(!PlayerInputEvent::swap_hands(player, false).is_ghost_swap());
        assert!(!PlayerInputEvent::new(player, RawInput::Drop).is_ghost_swap());
    }

    #[test]
    fn test_matching_order() {
        let mut entries = InputEventEntries::new();
        entries.add(InputEventEntry::new().kind(InputKind::Drop).trigger("a"));
        entries.add(InputEventEntry::new().trigger("b"));
        entries.add(InputEventEntry::new().kind(Jump).trigger("c"));

        let input = RawInput::Drop;
        let fired: Vec<_> = entries
            .matching(&input)
            .flat_map(|e| e.triggers.iter().map(ActionRef::id))
            .collect();
        assert_eq!(fired, vec!["a", "b"]);
    }
}
