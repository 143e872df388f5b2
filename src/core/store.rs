//! Per-player durable key-value storage.
//!
//! The host owns the real storage (player data files, a database, ...). The
//! tracker only needs to store, read and remove one short string per player,
//! which is what [`PlayerDataStore`] describes.

use std::collections::HashMap;

use bevy::prelude::*;
use uuid::Uuid;

use super::{ComboSequence, decode_sequence};

/// Stable identity of a player across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(transparent))]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Wrap a UUID.
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Build an id from a raw 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A namespaced storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataKey {
    pub namespace: &'static str,
    pub name: &'static str,
}

impl DataKey {
    /// Create a key.
    pub const fn new(namespace: &'static str, name: &'static str) -> Self {
        Self { namespace, name }
    }
}

impl std::fmt::Display for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Key holding the in-progress sequence of a player.
pub const SEQUENCE_KEY: DataKey = DataKey::new("input_sequence", "current");

/// Durable string storage scoped to a player.
///
/// Implementations must not fail loudly: a value that cannot be read is
/// reported as absent.
pub trait PlayerDataStore: Send + Sync + 'static {
    /// Read a value.
    fn get(&self, player: PlayerId, key: DataKey) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, player: PlayerId, key: DataKey, value: &str);

    /// Remove a value. Removing a missing value is a no-op.
    fn remove(&mut self, player: PlayerId, key: DataKey);

    /// Persist pending writes. Stores without buffering do nothing.
    fn flush(&mut self) {}
}

/// Store that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryDataStore {
    values: HashMap<PlayerId, HashMap<String, String>>,
}

impl MemoryDataStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players with at least one value.
    pub fn player_count(&self) -> usize {
        self.values.len()
    }
}

impl PlayerDataStore for MemoryDataStore {
    fn get(&self, player: PlayerId, key: DataKey) -> Option<String> {
        self.values
            .get(&player)
            .and_then(|values| values.get(&key.to_string()))
            .cloned()
    }

    fn set(&mut self, player: PlayerId, key: DataKey, value: &str) {
        self.values
            .entry(player)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, player: PlayerId, key: DataKey) {
        if let Some(values) = self.values.get_mut(&player) {
            values.remove(&key.to_string());
            if values.is_empty() {
                self.values.remove(&player);
            }
        }
    }
}

/// Resource wrapping the active [`PlayerDataStore`].
///
/// Defaults to a [`MemoryDataStore`]. Hosts replace it with their own backend:
///
/// ```ignore
/// app.insert_resource(PlayerData::new(MyDatabaseStore::connect()?));
/// ```
#[derive(Resource)]
pub struct PlayerData(Box<dyn PlayerDataStore>);

impl PlayerData {
    /// Wrap a store.
    pub fn new(store: impl PlayerDataStore) -> Self {
        Self(Box::new(store))
    }

    /// Access the store.
    pub fn store(&self) -> &dyn PlayerDataStore {
        self.0.as_ref()
    }

    /// Access the store mutably.
    pub fn store_mut(&mut self) -> &mut dyn PlayerDataStore {
        self.0.as_mut()
    }
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new(MemoryDataStore::new())
    }
}

impl std::fmt::Debug for PlayerData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerData").finish_non_exhaustive()
    }
}

/// Reads and writes a player's sequence under [`SEQUENCE_KEY`].
pub struct SequencePersistence;

impl SequencePersistence {
    /// Store canonical text. Empty text removes the value instead.
    pub fn store(store: &mut dyn PlayerDataStore, player: PlayerId, canonical: &str) {
        if canonical.is_empty() {
            store.remove(player, SEQUENCE_KEY);
        } else {
            store.set(player, SEQUENCE_KEY, canonical);
        }
    }

    /// Raw stored text, `None` when absent or empty.
    pub fn load_raw(store: &dyn PlayerDataStore, player: PlayerId) -> Option<String> {
        store
            .get(player, SEQUENCE_KEY)
            .filter(|raw| !raw.is_empty())
    }

    /// Decode the stored sequence. Missing or unreadable values give an empty sequence.
    pub fn load(store: &dyn PlayerDataStore, player: PlayerId) -> ComboSequence {
        Self::load_raw(store, player)
            .map(|raw| ComboSequence::from_symbols(&decode_sequence(&raw)))
            .unwrap_or_default()
    }

    /// Remove the stored sequence.
    pub fn clear(store: &mut dyn PlayerDataStore, player: PlayerId) {
        store.remove(player, SEQUENCE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InputSymbol::*;

    const ALICE: PlayerId = PlayerId::from_u128(1);
    const BOB: PlayerId = PlayerId::from_u128(2);

    #[test]
    fn test_memory_store() {
        let mut store = MemoryDataStore::new();
        store.set(ALICE, SEQUENCE_KEY, "SNEAK");
        assert_eq!(store.get(ALICE, SEQUENCE_KEY).as_deref(), Some("SNEAK"));
        assert_eq!(store.get(BOB, SEQUENCE_KEY), None);

        store.remove(ALICE, SEQUENCE_KEY);
        assert_eq!(store.get(ALICE, SEQUENCE_KEY), None);
        assert_eq!(store.player_count(), 0);

        // Removing twice is harmless
        store.remove(ALICE, SEQUENCE_KEY);
    }

    #[test]
    fn test_keys_are_namespaced() {
        let mut store = MemoryDataStore::new();
        let other = DataKey::new("other_plugin", "current");
        store.set(ALICE, SEQUENCE_KEY, "SNEAK");
        store.set(ALICE, other, "x");
        store.remove(ALICE, SEQUENCE_KEY);
        assert_eq!(store.get(ALICE, other).as_deref(), Some("x"));
    }

    #[test]
    fn test_persistence_roundtrip() {
        let mut store = MemoryDataStore::new();
        SequencePersistence::store(&mut store, ALICE, "SNEAK|LEFT");
        assert_eq!(
            SequencePersistence::load(&store, ALICE).symbols(),
            &[Sneak, Left]
        );

        SequencePersistence::clear(&mut store, ALICE);
        assert!(SequencePersistence::load(&store, ALICE).is_empty());
    }

    #[test]
    fn test_persistence_legacy_value() {
        let mut store = MemoryDataStore::new();
        store.set(ALICE, SEQUENCE_KEY, "SNEAKWWS");
        assert_eq!(
            SequencePersistence::load(&store, ALICE).symbols(),
            &[Sneak, Forward, Forward, Backward]
        );
    }

    #[test]
    fn test_persistence_missing_or_garbage() {
        let mut store = MemoryDataStore::new();
        assert!(SequencePersistence::load(&store, BOB).is_empty());

        store.set(BOB, SEQUENCE_KEY, "");
        assert_eq!(SequencePersistence::load_raw(&store, BOB), None);

        store.set(BOB, SEQUENCE_KEY, "???");
        assert!(SequencePersistence::load(&store, BOB).is_empty());
    }

    #[test]
    fn test_store_empty_removes() {
        let mut store = MemoryDataStore::new();
        SequencePersistence::store(&mut store, ALICE, "SNEAK");
        SequencePersistence::store(&mut store, ALICE, "");
        assert_eq!(store.get(ALICE, SEQUENCE_KEY), None);
    }

    #[test]
    fn test_player_data_resource() {
        let mut data = PlayerData::default();
        data.store_mut().set(ALICE, SEQUENCE_KEY, "SNEAK");
        assert_eq!(data.store().get(ALICE, SEQUENCE_KEY).as_deref(), Some("SNEAK"));
    }
}
