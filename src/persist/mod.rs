//! Persistence layer for tracker configuration and player data.
//!
//! Provides RON-based loading of the [`SequenceConfig`] and input event
//! entries, and a RON-file-backed [`PlayerDataStore`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{DataKey, PlayerDataStore, PlayerId, SequenceConfig};
use crate::input_events::{InputEventEntries, InputEventEntry};

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "input_sequence.ron";

/// Serializable tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SequenceConfigFile {
    /// Sequence tracker actions and combo routes.
    #[serde(default)]
    pub sequence: SequenceConfig,
    /// Input event entries.
    #[serde(default)]
    pub input_events: Vec<InputEventEntry>,
}

impl SequenceConfigFile {
    /// Create a new empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save config to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_ron(self, path.as_ref())
    }

    /// Load config from file, returning default if file doesn't exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Failure reading or writing the tracker config or the player data file.
///
/// The tick loop never sees these: loaders log them and fall back to
/// defaults or an empty store.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The file could not be read or written (path, reason).
    Io(String, String),
    /// The file is not valid RON for the expected shape (path, reason).
    Parse(String, String),
    /// The value could not be rendered as RON.
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, reason) => write!(f, "cannot access '{}': {}", path, reason),
            ConfigError::Parse(path, reason) => write!(f, "invalid RON in '{}': {}", path, reason),
            ConfigError::Serialize(reason) => write!(f, "cannot encode RON: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {}

fn write_ron<T: Serialize>(value: &T, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(parent.display().to_string(), e.to_string()))?;
        }
    }

    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .enumerate_arrays(false);

    let contents = ron::ser::to_string_pretty(value, pretty)
        .map_err(|e| ConfigError::Serialize(e.to_string()))?;

    fs::write(path, contents)
        .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))
}

/// Resource tracking the config file path.
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub String);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(DEFAULT_CONFIG_FILE.to_string())
    }
}

/// Request to re-read the config file.
///
/// The new config replaces the old one as a whole; the route table is
/// rebuilt before the next tick is processed.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ReloadSequenceConfig;

/// Apply a loaded config file to the live resources.
pub fn apply_config_file(
    file: SequenceConfigFile,
    config: &mut SequenceConfig,
    entries: &mut InputEventEntries,
) {
    *config = file.sequence;
    entries.replace(file.input_events);
}

fn load_into(
    path: &str,
    config: &mut SequenceConfig,
    entries: &mut InputEventEntries,
) {
    if !Path::new(path).exists() {
        info!("No input sequence config found at '{}', using defaults", path);
        return;
    }

    match SequenceConfigFile::load(path) {
        Ok(file) => {
            info!(
                "Loaded {} combo routes and {} input event entries from '{}'",
                file.sequence.routes.len(),
                file.input_events.len(),
                path
            );
            apply_config_file(file, config, entries);
        }
        Err(e) => {
            error!("Failed to load input sequence config: {}", e);
        }
    }
}

/// System to load config on startup.
pub fn load_config_on_startup(
    mut config: ResMut<SequenceConfig>,
    mut entries: ResMut<InputEventEntries>,
    config_path: Res<ConfigPath>,
) {
    load_into(&config_path.0, &mut config, &mut entries);
}

/// System that reloads config when a [`ReloadSequenceConfig`] arrives.
pub fn reload_config(
    mut requests: MessageReader<ReloadSequenceConfig>,
    mut config: ResMut<SequenceConfig>,
    mut entries: ResMut<InputEventEntries>,
    config_path: Res<ConfigPath>,
) {
    // Several requests in one frame collapse into one reload
    if requests.read().count() == 0 {
        return;
    }
    load_into(&config_path.0, &mut config, &mut entries);
}

/// Player data kept in a RON file.
///
/// Writes only mark the store dirty; [`PlayerDataStore::flush`] writes the
/// file. The plugin flushes once per frame in `Last`.
#[derive(Debug)]
pub struct RonDataStore {
    path: PathBuf,
    values: HashMap<PlayerId, HashMap<String, String>>,
    dirty: bool,
}

impl RonDataStore {
    /// Open a store, loading existing data if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let values = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;
            ron::from_str(&contents)
                .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    /// Open a store, starting empty if the file is missing or unreadable.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!("Starting with empty player data: {}", e);
                Self {
                    path,
                    values: HashMap::new(),
                    dirty: false,
                }
            }
        }
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if there are unwritten changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the file now.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        write_ron(&self.values, &self.path)?;
        self.dirty = false;
        Ok(())
    }
}

impl PlayerDataStore for RonDataStore {
    fn get(&self, player: PlayerId, key: DataKey) -> Option<String> {
        self.values
            .get(&player)
            .and_then(|values| values.get(&key.to_string()))
            .cloned()
    }

    fn set(&mut self, player: PlayerId, key: DataKey, value: &str) {
        let values = self.values.entry(player).or_default();
        if values.get(&key.to_string()).map(String::as_str) != Some(value) {
            values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }

    fn remove(&mut self, player: PlayerId, key: DataKey) {
        if let Some(values) = self.values.get_mut(&player) {
            if values.remove(&key.to_string()).is_some() {
                self.dirty = true;
            }
            if values.is_empty() {
                self.values.remove(&player);
            }
        }
    }

    fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        if let Err(e) = self.save() {
            error!("Failed to save player data: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionRef, ComboRoute, InputKind, SEQUENCE_KEY};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_file_roundtrip() {
        let mut file = SequenceConfigFile::new();
        file.sequence = SequenceConfig::new()
            .on_complete("combo_done")
            .route("shift + w + w + s", "dash");
        file.input_events
            .push(InputEventEntry::new().kind(InputKind::Drop).trigger("dropped"));

        let temp = NamedTempFile::new().unwrap();
        file.save(temp.path()).unwrap();

        let loaded = SequenceConfigFile::load(temp.path()).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_config_file_load_missing() {
        let result = SequenceConfigFile::load("nonexistent_file.ron");
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_config_file_load_or_default() {
        let file = SequenceConfigFile::load_or_default("nonexistent_file.ron");
        assert!(file.sequence.routes.is_empty());
        assert!(file.input_events.is_empty());
    }

    #[test]
    fn test_config_parse_ron() {
        let ron_content = r#"(
    sequence: (
        on_update: Some("combo_hud"),
        routes: [
            (combo: "shift + w + a + space", action: Some("leap")),
            (combo: "SNEAK|S|S|S"),
        ],
    ),
    input_events: [
        (triggers: ["on_swap"], input_kind: Some(SwapHands)),
        (triggers: ["on_jump"], input_kind: Some(Symbol(Jump))),
    ],
)"#;

        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(ron_content.as_bytes()).unwrap();
        temp.flush().unwrap();

        let file = SequenceConfigFile::load(temp.path()).unwrap();
        assert_eq!(file.sequence.on_update, Some(ActionRef::from("combo_hud")));
        assert_eq!(file.sequence.on_complete, None);
        assert_eq!(
            file.sequence.routes[0],
            ComboRoute::new("shift + w + a + space", "leap")
        );
        assert_eq!(file.sequence.routes[1].action, None);
        assert_eq!(file.input_events.len(), 2);
        assert_eq!(file.input_events[0].input_kind, Some(InputKind::SwapHands));
    }

    #[test]
    fn test_config_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"(sequence: oops").unwrap();
        temp.flush().unwrap();

        assert!(matches!(
            SequenceConfigFile::load(temp.path()),
            Err(ConfigError::Parse(..))
        ));
    }

    #[test]
    fn test_config_error_names_the_file() {
        let err = SequenceConfigFile::load("missing_sequence_config.ron").unwrap_err();
        assert!(err.to_string().contains("missing_sequence_config.ron"));

        let err = ConfigError::Parse("players.ron".into(), "expected map".into());
        assert_eq!(err.to_string(), "invalid RON in 'players.ron': expected map");
    }

    #[test]
    fn test_apply_config_file() {
        let mut config = SequenceConfig::new();
        let mut entries = InputEventEntries::new();
        let mut file = SequenceConfigFile::new();
        file.sequence = SequenceConfig::new().route("shift+d+d+d", "spin");
        file.input_events.push(InputEventEntry::new().trigger("any"));

        apply_config_file(file, &mut config, &mut entries);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_ron_store_persists_across_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players").join("data.ron");
        let alice = PlayerId::from_u128(42);

        let mut store = RonDataStore::open(&path).unwrap();
        store.set(alice, SEQUENCE_KEY, "SNEAK|LEFT");
        assert!(store.is_dirty());
        store.flush();
        assert!(!store.is_dirty());

        let reopened = RonDataStore::open(&path).unwrap();
        assert_eq!(reopened.get(alice, SEQUENCE_KEY).as_deref(), Some("SNEAK|LEFT"));
    }

    #[test]
    fn test_ron_store_remove_marks_dirty() {
        let dir = TempDir::new().unwrap();
        let alice = PlayerId::from_u128(42);
        let mut store = RonDataStore::open(dir.path().join("data.ron")).unwrap();

        store.remove(alice, SEQUENCE_KEY);
        assert!(!store.is_dirty());

        store.set(alice, SEQUENCE_KEY, "SNEAK");
        store.flush();
        store.remove(alice, SEQUENCE_KEY);
        assert!(store.is_dirty());
        assert_eq!(store.get(alice, SEQUENCE_KEY), None);
    }

    #[test]
    fn test_ron_store_open_or_empty_on_garbage() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"not ron at all {").unwrap();
        temp.flush().unwrap();

        assert!(RonDataStore::open(temp.path()).is_err());
        let store = RonDataStore::open_or_empty(temp.path());
        assert_eq!(store.get(PlayerId::from_u128(1), SEQUENCE_KEY), None);
    }
}
