//! The per-player sequence accumulator.
//!
//! A [`SequenceSession`] owns one player's in-progress combo and the edge
//! detector feeding it. It never touches storage or dispatches anything itself;
//! every transition is reported as a [`SequenceStep`] and the caller applies
//! the effects in order.

use super::{EdgeDetector, InputSnapshot, InputSymbol, join_tokens};

/// Maximum number of symbols in a combo.
pub const MAX_SEQUENCE_LEN: usize = 4;

/// A bounded, SNEAK-prefixed run of symbols.
///
/// Invariants: `len() <= MAX_SEQUENCE_LEN`, and a non-empty sequence always
/// starts with [`InputSymbol::PREFIX`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboSequence {
    symbols: Vec<InputSymbol>,
}

impl ComboSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a sequence from decoded symbols, keeping only a valid prefix.
    ///
    /// Returns an empty sequence if the first symbol is not the prefix.
    pub fn from_symbols(symbols: &[InputSymbol]) -> Self {
        let mut sequence = Self::new();
        if symbols.first() == Some(&InputSymbol::PREFIX) {
            sequence
                .symbols
                .extend(symbols.iter().take(MAX_SEQUENCE_LEN).copied());
        }
        sequence
    }

    /// The accepted symbols.
    #[inline]
    pub fn symbols(&self) -> &[InputSymbol] {
        &self.symbols
    }

    /// Number of accepted symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if nothing has been accepted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check if the sequence holds [`MAX_SEQUENCE_LEN`] symbols.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.symbols.len() == MAX_SEQUENCE_LEN
    }

    /// Canonical pipe-joined text, empty when the sequence is empty.
    pub fn canonical(&self) -> String {
        join_tokens(&self.symbols)
    }

    /// Drop every symbol.
    pub fn clear(&mut self) {
        self.symbols.clear();
    }
}

impl std::fmt::Display for ComboSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// One observable transition of a [`SequenceSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceStep {
    /// A full sequence was cleared to make room for a new press.
    Reset,
    /// A press was appended. Carries the sequence after the append.
    Accepted(ComboSequence),
    /// The sequence reached [`MAX_SEQUENCE_LEN`]. Always preceded by `Accepted`.
    Completed(ComboSequence),
}

/// In-memory state of one player while they are in scope.
#[derive(Debug, Clone, Default)]
pub struct SequenceSession {
    sequence: ComboSequence,
    detector: EdgeDetector,
}

impl SequenceSession {
    /// Fresh session: empty sequence, previous input all released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current sequence.
    pub fn sequence(&self) -> &ComboSequence {
        &self.sequence
    }

    /// Input seen on the previous tick.
    pub fn last_input(&self) -> &InputSnapshot {
        self.detector.last()
    }

    /// Process one tick of input.
    ///
    /// Rising edges are applied one at a time in priority order, so a single
    /// tick can complete a sequence and start the next one.
    pub fn tick(&mut self, input: InputSnapshot) -> Vec<SequenceStep> {
        let mut steps = Vec::new();
        for symbol in self.detector.sample(input) {
            self.press_into(symbol, &mut steps);
        }
        steps
    }

    /// Apply a single newly pressed symbol.
    ///
    /// An empty result means the press was discarded by the prefix gate.
    pub fn press(&mut self, symbol: InputSymbol) -> Vec<SequenceStep> {
        let mut steps = Vec::new();
        self.press_into(symbol, &mut steps);
        steps
    }

    fn press_into(&mut self, symbol: InputSymbol, steps: &mut Vec<SequenceStep>) {
        if self.sequence.is_complete() {
            self.sequence.clear();
            steps.push(SequenceStep::Reset);
        }

        if self.sequence.is_empty() && symbol != InputSymbol::PREFIX {
            return;
        }

        self.sequence.symbols.push(symbol);
        steps.push(SequenceStep::Accepted(self.sequence.clone()));

        if self.sequence.is_complete() {
            steps.push(SequenceStep::Completed(self.sequence.clone()));
        }
    }

    /// Back to the scope-entry state.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.detector.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputSymbol::*;

    fn accepted(steps: &[SequenceStep]) -> usize {
        steps
            .iter()
            .filter(|s| matches!(s, SequenceStep::Accepted(_)))
            .count()
    }

    #[test]
    fn test_must_start_with_sneak() {
        let mut session = SequenceSession::new();
        for symbol in [Jump, Sprint, Forward, Backward, Left, Right] {
            assert!(session.press(symbol).is_empty());
            assert!(session.sequence().is_empty());
        }
        assert_eq!(accepted(&session.press(Sneak)), 1);
        assert_eq!(session.sequence().symbols(), &[Sneak]);
    }

    #[test]
    fn test_full_combo() {
        let mut session = SequenceSession::new();
        session.press(Sneak);
        session.press(Forward);
        session.press(Forward);
        let steps = session.press(Backward);

        let expected = ComboSequence::from_symbols(&[Sneak, Forward, Forward, Backward]);
        assert_eq!(
            steps,
            vec![
                SequenceStep::Accepted(expected.clone()),
                SequenceStep::Completed(expected),
            ]
        );
        assert_eq!(session.sequence().canonical(), "SNEAK|FORWARD|FORWARD|BACKWARD");
        assert_eq!(session.sequence().to_string(), session.sequence().canonical());
    }

    #[test]
    fn test_overflow_resets_then_gates() {
        let mut session = SequenceSession::new();
        for symbol in [Sneak, Left, Left, Left] {
            session.press(symbol);
        }
        assert!(session.sequence().is_complete());

        // Non-prefix press after completion: reset, then discarded
        assert_eq!(session.press(Forward), vec![SequenceStep::Reset]);
        assert!(session.sequence().is_empty());
    }

    #[test]
    fn test_overflow_with_sneak_restarts() {
        let mut session = SequenceSession::new();
        for symbol in [Sneak, Right, Right, Right] {
            session.press(symbol);
        }
        let steps = session.press(Sneak);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], SequenceStep::Reset);
        assert_eq!(session.sequence().symbols(), &[Sneak]);
    }

    #[test]
    fn test_tick_uses_rising_edges() {
        let mut session = SequenceSession::new();
        assert_eq!(accepted(&session.tick(InputSnapshot::held([Sneak]))), 1);
        // Still held: nothing new
        assert!(session.tick(InputSnapshot::held([Sneak])).is_empty());
        // Forward newly pressed while sneak still held
        assert_eq!(accepted(&session.tick(InputSnapshot::held([Sneak, Forward]))), 1);
        assert_eq!(session.sequence().symbols(), &[Sneak, Forward]);
    }

    #[test]
    fn test_simultaneous_presses_follow_priority() {
        let mut session = SequenceSession::new();
        // JUMP comes before SNEAK in priority, so it is gated away
        let steps = session.tick(InputSnapshot::held([Jump, Sneak, Forward]));
        assert_eq!(accepted(&steps), 2);
        assert_eq!(session.sequence().symbols(), &[Sneak, Forward]);
    }

    #[test]
    fn test_overflow_and_restart_in_one_tick() {
        let mut session = SequenceSession::new();
        session.tick(InputSnapshot::held([Sneak, Forward, Backward]));
        session.tick(InputSnapshot::RELEASED);

        session.tick(InputSnapshot::held([Left]));
        assert!(session.sequence().is_complete());

        // Left is still held, so only the Sneak edge fires: reset, then restart
        let steps = session.tick(InputSnapshot::held([Sneak, Left]));
        assert_eq!(steps[0], SequenceStep::Reset);
        assert_eq!(session.sequence().symbols(), &[Sneak]);
    }

    #[test]
    fn test_length_and_prefix_invariants() {
        let mut session = SequenceSession::new();
        let script = [
            InputSnapshot::held([Forward]),
            InputSnapshot::held([Sneak]),
            InputSnapshot::RELEASED,
            InputSnapshot::held([Jump, Sprint, Sneak, Forward, Backward, Left, Right]),
            InputSnapshot::RELEASED,
            InputSnapshot::held([Sneak, Left]),
            InputSnapshot::held([Left]),
            InputSnapshot::held([Right, Jump]),
            InputSnapshot::RELEASED,
            InputSnapshot::held([Backward]),
        ];
        for input in script {
            session.tick(input);
            let seq = session.sequence();
            assert!(seq.len() <= MAX_SEQUENCE_LEN);
            if !seq.is_empty() {
                assert_eq!(seq.symbols()[0], Sneak);
            }
        }
    }

    #[test]
    fn test_from_symbols_validates_prefix() {
        assert!(ComboSequence::from_symbols(&[Forward, Sneak]).is_empty());
        let seq = ComboSequence::from_symbols(&[Sneak, Left, Left, Left, Left, Left]);
        assert_eq!(seq.len(), MAX_SEQUENCE_LEN);
    }

    #[test]
    fn test_reset() {
        let mut session = SequenceSession::new();
        session.tick(InputSnapshot::held([Sneak]));
        session.reset();
        assert!(session.sequence().is_empty());
        assert_eq!(*session.last_input(), InputSnapshot::RELEASED);
    }
}
