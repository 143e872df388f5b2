//! Exact-match routing of completed combos to actions.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{InputSymbol, MAX_SEQUENCE_LEN, join_tokens, parse_combo};

/// Reference to an externally defined scripted action.
///
/// The tracker never interprets it; it is handed back verbatim in
/// [`TriggerAction`](super::TriggerAction).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(transparent))]
pub struct ActionRef(pub Box<str>);

impl ActionRef {
    /// Create a reference from an action id.
    pub fn new(id: impl Into<Box<str>>) -> Self {
        Self(id.into())
    }

    /// The action id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActionRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ActionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A free-form combo description paired with the action it fires.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboRoute {
    /// Combo text like `"SNEAK|W|A|JUMP"` or `"shift + w + a + space"`.
    #[cfg_attr(feature = "persist", serde(default))]
    pub combo: String,
    /// Action to trigger when exactly this combo completes.
    #[cfg_attr(feature = "persist", serde(default))]
    pub action: Option<ActionRef>,
}

impl ComboRoute {
    /// Create a route.
    pub fn new(combo: impl Into<String>, action: impl Into<ActionRef>) -> Self {
        Self {
            combo: combo.into(),
            action: Some(action.into()),
        }
    }
}

/// Check whether a parsed combo can ever be completed by a player.
pub fn is_reachable_combo(symbols: &[InputSymbol]) -> bool {
    symbols.len() == MAX_SEQUENCE_LEN && symbols.first() == Some(&InputSymbol::PREFIX)
}

/// Canonical combo key -> action lookup.
///
/// Rebuilt as a whole whenever the configuration changes; never mutated
/// while ticking.
#[derive(Resource, Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, ActionRef>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from routes. Later routes with the same canonical key win.
    ///
    /// Routes with no action, or whose combo normalizes to nothing, are skipped.
    pub fn from_routes<'a>(routes: impl IntoIterator<Item = &'a ComboRoute>) -> Self {
        let mut table = Self::new();
        for route in routes {
            let Some(action) = &route.action else {
                debug!("Skipping combo route '{}': no action", route.combo);
                continue;
            };

            let symbols = parse_combo(&route.combo);
            if symbols.is_empty() {
                warn!("Skipping combo route '{}': no recognizable inputs", route.combo);
                continue;
            }

            let key = join_tokens(&symbols);
            if !is_reachable_combo(&symbols) {
                warn!(
                    "Combo route '{}' ({}) can never match: combos are {} inputs starting with {}",
                    route.combo, key, MAX_SEQUENCE_LEN, InputSymbol::PREFIX
                );
            }

            if let Some(previous) = table.routes.insert(key.clone(), action.clone()) {
                debug!("Combo route {} replaced action '{}' with '{}'", key, previous, action);
            }
        }
        table
    }

    /// Look up the action for a canonical combo. Exact match only.
    pub fn lookup(&self, canonical: &str) -> Option<&ActionRef> {
        self.routes.get(canonical)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over `(canonical key, action)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionRef)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v))
    }
}
