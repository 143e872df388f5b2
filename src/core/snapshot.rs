//! Per-tick input snapshots and rising-edge detection.

use super::InputSymbol;

/// Held state of every [`InputSymbol`] for one player at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct InputSnapshot {
    pub jump: bool,
    pub sprint: bool,
    pub sneak: bool,
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputSnapshot {
    /// Snapshot with nothing held.
    pub const RELEASED: Self = Self {
        jump: false,
        sprint: false,
        sneak: false,
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    /// Snapshot with exactly the given symbols held.
    pub fn held(symbols: impl IntoIterator<Item = InputSymbol>) -> Self {
        let mut snapshot = Self::RELEASED;
        for symbol in symbols {
            snapshot.set(symbol, true);
        }
        snapshot
    }

    /// Whether `symbol` is held.
    #[inline]
    pub fn is_active(&self, symbol: InputSymbol) -> bool {
        match symbol {
            InputSymbol::Jump => self.jump,
            InputSymbol::Sprint => self.sprint,
            InputSymbol::Sneak => self.sneak,
            InputSymbol::Forward => self.forward,
            InputSymbol::Backward => self.backward,
            InputSymbol::Left => self.left,
            InputSymbol::Right => self.right,
        }
    }

    /// Set the held state of `symbol`.
    pub fn set(&mut self, symbol: InputSymbol, held: bool) {
        let flag = match symbol {
            InputSymbol::Jump => &mut self.jump,
            InputSymbol::Sprint => &mut self.sprint,
            InputSymbol::Sneak => &mut self.sneak,
            InputSymbol::Forward => &mut self.forward,
            InputSymbol::Backward => &mut self.backward,
            InputSymbol::Left => &mut self.left,
            InputSymbol::Right => &mut self.right,
        };
        *flag = held;
    }

    /// Whether anything is held.
    pub fn any(&self) -> bool {
        InputSymbol::PRIORITY.iter().any(|s| self.is_active(*s))
    }

    /// Held symbols in priority order.
    pub fn active(&self) -> impl Iterator<Item = InputSymbol> + '_ {
        InputSymbol::PRIORITY
            .into_iter()
            .filter(move |s| self.is_active(*s))
    }

    /// Symbols held now that were not held in `last`, in priority order.
    pub fn rising_edges(&self, last: &InputSnapshot) -> Vec<InputSymbol> {
        InputSymbol::PRIORITY
            .into_iter()
            .filter(|s| self.is_active(*s) && !last.is_active(*s))
            .collect()
    }
}

/// Remembers the previous snapshot of one player.
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    last: InputSnapshot,
}

impl EdgeDetector {
    /// Create a detector that treats the previous tick as all released.
    pub fn new() -> Self {
        Self::default()
    }

    /// The snapshot seen on the previous sample.
    pub fn last(&self) -> &InputSnapshot {
        &self.last
    }

    /// Feed the current snapshot and get the newly pressed symbols.
    ///
    /// The stored snapshot is replaced even when nothing changed.
    pub fn sample(&mut self, current: InputSnapshot) -> Vec<InputSymbol> {
        let edges = current.rising_edges(&self.last);
        self.last = current;
        edges
    }

    /// Forget the previous snapshot.
    pub fn reset(&mut self) {
        self.last = InputSnapshot::RELEASED;
    }
}
