//! Runtime configuration of the sequence tracker.

use bevy::prelude::*;

use super::{ActionRef, ComboRoute};

/// What the tracker triggers, and for which combos.
///
/// Every action is optional; an unset action simply never fires. Changing
/// this resource rebuilds the [`RouteTable`](super::RouteTable) before the
/// next tick.
///
/// # Examples
///
/// ```ignore
/// app.insert_resource(
///     SequenceConfig::new()
///         .on_update("combo_hud")
///         .on_complete("combo_done")
///         .route("shift + w + w + s", "dash_back"),
/// );
/// ```
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceConfig {
    /// Fires on every accepted press, including the first.
    #[cfg_attr(feature = "persist", serde(default))]
    pub on_update: Option<ActionRef>,
    /// Fires when the fourth press is accepted.
    #[cfg_attr(feature = "persist", serde(default))]
    pub on_complete: Option<ActionRef>,
    /// Exact combos with their own actions.
    #[cfg_attr(feature = "persist", serde(default))]
    pub routes: Vec<ComboRoute>,
}

impl SequenceConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the action fired on every accepted press.
    pub fn on_update(mut self, action: impl Into<ActionRef>) -> Self {
        self.on_update = Some(action.into());
        self
    }

    /// Set the action fired on completion.
    pub fn on_complete(mut self, action: impl Into<ActionRef>) -> Self {
        self.on_complete = Some(action.into());
        self
    }

    /// Add a combo route.
    pub fn route(mut self, combo: impl Into<String>, action: impl Into<ActionRef>) -> Self {
        self.routes.push(ComboRoute::new(combo, action));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SequenceConfig::new()
            .on_update("hud")
            .route("shift+w+w+s", "dash");

        assert_eq!(config.on_update, Some(ActionRef::from("hud")));
        assert_eq!(config.on_complete, None);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].combo, "shift+w+w+s");
    }
}
