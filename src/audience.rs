//! Movement audience filters.
//!
//! Simple predicates selecting which players currently count as sprinting,
//! sneaking, jumping, moving or walking backward.

use crate::core::{InputSnapshot, PlayerId};

/// Movement state of one player, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerMovement {
    pub player: Option<PlayerId>,
    /// Raw key state.
    pub input: InputSnapshot,
    /// Engine sprint state (may lag behind the key).
    pub is_sprinting: bool,
    /// Engine sneak state.
    pub is_sneaking: bool,
}

impl PlayerMovement {
    /// Movement of `player` with the given key state.
    pub fn new(player: PlayerId, input: InputSnapshot) -> Self {
        Self {
            player: Some(player),
            input,
            is_sprinting: input.sprint,
            is_sneaking: input.sneak,
        }
    }
}

/// A predicate over a player's movement.
pub trait AudienceFilter {
    /// Whether the player belongs to the audience.
    fn filter(&self, movement: &PlayerMovement) -> bool;

    /// Players of `candidates` that pass the filter.
    fn members<'a, I>(&self, candidates: I) -> Vec<PlayerId>
    where
        I: IntoIterator<Item = &'a PlayerMovement>,
    {
        candidates
            .into_iter()
            .filter(|movement| self.filter(movement))
            .filter_map(|movement| movement.player)
            .collect()
    }
}

/// Built-in movement audiences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementAudience {
    /// Engine sprint state.
    Sprinting,
    /// Engine sneak state.
    Sneaking,
    /// Jump key held.
    Jumping,
    /// Backward key held.
    Backward,
    /// Any movement or action input.
    Moving,
}

impl AudienceFilter for MovementAudience {
    fn filter(&self, movement: &PlayerMovement) -> bool {
        let input = &movement.input;
        match self {
            MovementAudience::Sprinting => movement.is_sprinting,
            MovementAudience::Sneaking => movement.is_sneaking,
            MovementAudience::Jumping => input.jump,
            MovementAudience::Backward => input.backward,
            MovementAudience::Moving => {
                movement.is_sprinting
                    || movement.is_sneaking
                    || input.jump
                    || input.forward
                    || input.backward
                    || input.left
                    || input.right
            }
        }
    }
}

/// Negates another filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inverted<F>(pub F);

impl<F: AudienceFilter> AudienceFilter for Inverted<F> {
    fn filter(&self, movement: &PlayerMovement) -> bool {
        !self.0.filter(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputSymbol::*;

    fn movement(id: u128, input: InputSnapshot) -> PlayerMovement {
        PlayerMovement::new(PlayerId::from_u128(id), input)
    }

    #[test]
    fn test_single_flag_audiences() {
        let jumping = movement(1, InputSnapshot::held([Jump]));
        assert!(MovementAudience::Jumping.filter(&jumping));
        assert!(!MovementAudience::Backward.filter(&jumping));

        let backward = movement(2, InputSnapshot::held([Backward]));
        assert!(MovementAudience::Backward.filter(&backward));
    }

    #[test]
    fn test_engine_state_audiences() {
        let mut state = movement(1, InputSnapshot::RELEASED);
        state.is_sprinting = true;
        assert!(MovementAudience::Sprinting.filter(&state));
        assert!(!MovementAudience::Sneaking.filter(&state));
        assert!(MovementAudience::Moving.filter(&state));
    }

    #[test]
    fn test_moving() {
        assert!(!MovementAudience::Moving.filter(&movement(1, InputSnapshot::RELEASED)));
        for symbol in [Jump, Sprint, Sneak, Forward, Backward, Left, Right] {
            assert!(MovementAudience::Moving.filter(&movement(1, InputSnapshot::held([symbol]))));
        }
    }

    #[test]
    fn test_inverted() {
        let idle = movement(1, InputSnapshot::RELEASED);
        assert!(Inverted(MovementAudience::Moving).filter(&idle));
        assert!(!Inverted(Inverted(MovementAudience::Moving)).filter(&idle));
    }

    #[test]
    fn test_members() {
        let players = [
            movement(1, InputSnapshot::held([Sneak])),
            movement(2, InputSnapshot::RELEASED),
            movement(3, InputSnapshot::held([Sneak, Forward])),
        ];
        assert_eq!(
            MovementAudience::Sneaking.members(&players),
            vec![PlayerId::from_u128(1), PlayerId::from_u128(3)]
        );
        assert_eq!(
            Inverted(MovementAudience::Sneaking).members(&players),
            vec![PlayerId::from_u128(2)]
        );
    }
}
