//! Input symbols tracked by the sequence automaton.
//!
//! [`InputSymbol`] is the closed set of tokens a combo can be built from.
//! [`InputKind`] extends it with the one-shot actions (drop, swap hands) that
//! only the input event entries care about.

/// A single symbolic input.
///
/// Ordering of [`InputSymbol::PRIORITY`] decides the processing order of
/// simultaneous presses within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum InputSymbol {
    /// Space bar.
    Jump,
    /// Sprint key.
    Sprint,
    /// Sneak (shift). The only symbol allowed to open a sequence.
    Sneak,
    /// W.
    Forward,
    /// S.
    Backward,
    /// A.
    Left,
    /// D.
    Right,
}

impl InputSymbol {
    /// All symbols in canonical priority order.
    pub const PRIORITY: [InputSymbol; 7] = [
        InputSymbol::Jump,
        InputSymbol::Sprint,
        InputSymbol::Sneak,
        InputSymbol::Forward,
        InputSymbol::Backward,
        InputSymbol::Left,
        InputSymbol::Right,
    ];

    /// The symbol every sequence has to start with.
    pub const PREFIX: InputSymbol = InputSymbol::Sneak;

    /// Canonical uppercase token, as stored and matched.
    pub fn token(&self) -> &'static str {
        match self {
            InputSymbol::Jump => "JUMP",
            InputSymbol::Sprint => "SPRINT",
            InputSymbol::Sneak => "SNEAK",
            InputSymbol::Forward => "FORWARD",
            InputSymbol::Backward => "BACKWARD",
            InputSymbol::Left => "LEFT",
            InputSymbol::Right => "RIGHT",
        }
    }

    /// Parse a canonical token, ignoring ASCII case.
    ///
    /// Only canonical names are accepted here; synonyms such as `W` or
    /// `SHIFT` go through [`normalize_combo`](super::normalize_combo).
    pub fn from_token(token: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|symbol| symbol.token().eq_ignore_ascii_case(token))
    }

    /// Key-cap label used by the full display style.
    pub fn pretty(&self) -> &'static str {
        match self {
            InputSymbol::Jump => "SPACE",
            InputSymbol::Sprint => "SPRINT",
            InputSymbol::Sneak => "SNEAK",
            InputSymbol::Forward => "W",
            InputSymbol::Backward => "S",
            InputSymbol::Left => "A",
            InputSymbol::Right => "D",
        }
    }

    /// Compact label used by the short display style.
    pub fn short(&self) -> &'static str {
        match self {
            InputSymbol::Jump => "␣",
            InputSymbol::Sprint => "SPR",
            InputSymbol::Sneak => "SNK",
            InputSymbol::Forward => "W",
            InputSymbol::Backward => "S",
            InputSymbol::Left => "A",
            InputSymbol::Right => "D",
        }
    }
}

impl std::fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Every input an event entry can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum InputKind {
    /// A held movement/action input.
    Symbol(InputSymbol),
    /// Dropping an item, from the hotbar or the inventory.
    Drop,
    /// Swapping main and off hand.
    SwapHands,
}

impl InputKind {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Symbol(symbol) => symbol.token(),
            InputKind::Drop => "DROP",
            InputKind::SwapHands => "SWAP_HANDS",
        }
    }
}

impl From<InputSymbol> for InputKind {
    fn from(symbol: InputSymbol) -> Self {
        InputKind::Symbol(symbol)
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
