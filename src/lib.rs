//! Per-player input combo tracking for tick-driven Bevy servers.
//!
//! Players in scope build up short combos out of rising-edge key presses.
//! A combo always starts with SNEAK and is at most four presses long:
//!
//! - **Sessions**: one bounded, SNEAK-gated accumulator per player in scope
//! - **Triggers**: scripted actions on every accepted press, on completion,
//!   and for exact combo routes
//! - **Persistence**: the in-progress combo is mirrored into player data
//! - **Display**: a read-only view for HUDs and placeholders
//!
//! # Features
//!
//! - `persist` (default): RON config file and a RON-file player data store
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_input_sequence::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(MinimalPlugins)
//!         .add_plugins(InputSequencePlugin::default())
//!         .insert_resource(
//!             SequenceConfig::new()
//!                 .on_update("combo_hud")
//!                 .route("SHIFT + W + W + S", "dash_back"),
//!         )
//!         .add_systems(Update, run_actions)
//!         .run();
//! }
//!
//! fn run_actions(mut triggers: MessageReader<TriggerAction>) {
//!     for trigger in triggers.read() {
//!         info!("{} -> {}", trigger.player, trigger.action);
//!     }
//! }
//! ```

use bevy::ecs::schedule::{InternedScheduleLabel, ScheduleLabel};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

// Core module (always available)
pub mod core;

pub mod audience;
pub mod input_events;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

// Re-export core types at crate root for convenience
pub use core::{
    InputSymbol, InputKind,
    InputSnapshot, EdgeDetector,
    ComboSequence, SequenceSession, SequenceStep, MAX_SEQUENCE_LEN,
    normalize_combo, parse_combo, decode_sequence, format_sequence, DisplayStyle,
    ActionRef, ComboRoute, RouteTable,
    SequenceConfig,
    PlayerId, DataKey, PlayerDataStore, MemoryDataStore, PlayerData,
    SequencePersistence, SEQUENCE_KEY,
    SequenceSessions,
    AudienceEnter, AudienceExit, PlayerInputSample, PlayerInputEvent, RawInput,
    TriggerAction, TriggerCause, InputEventContext,
    SequenceUpdated, SequenceCompleted,
    SequenceEventsPlugin,
    SequenceDisplay, display_sequence,
};

pub use audience::{AudienceFilter, Inverted, MovementAudience, PlayerMovement};
pub use input_events::{InputEventEntries, InputEventEntry};

#[cfg(feature = "persist")]
pub use persist::{
    ConfigError, ConfigPath, ReloadSequenceConfig, RonDataStore, SequenceConfigFile,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        InputSymbol, InputSnapshot, ComboSequence, DisplayStyle,
        ActionRef, ComboRoute, SequenceConfig,
        PlayerId, PlayerDataStore, PlayerData,
        AudienceEnter, AudienceExit, PlayerInputSample, PlayerInputEvent, RawInput,
        TriggerAction, TriggerCause, SequenceUpdated, SequenceCompleted,
        SequenceDisplay,
    };
    pub use crate::input_events::{InputEventEntries, InputEventEntry};
    #[cfg(feature = "persist")]
    pub use crate::persist::ReloadSequenceConfig;
    pub use crate::{InputSequencePlugin, SequenceSystems, TrackerTick};
}

/// Server tick rate used when the plugin runs in `FixedUpdate`.
pub const DEFAULT_TICK_RATE_HZ: f64 = 20.0;

/// Number of tracker ticks processed so far.
///
/// Stamped on every [`TriggerAction`].
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerTick(pub u64);

/// Ordering of the tracker's systems within its schedule.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceSystems {
    /// Config reloads and route table rebuilds.
    Config,
    /// Audience enter/exit handling.
    Scope,
    /// Per-tick sequence tracking.
    Track,
    /// Input event entry dispatch.
    Dispatch,
}

/// Main tracker plugin.
///
/// # Configuration
///
/// ```ignore
/// // 20 Hz fixed tick
/// InputSequencePlugin::default()
///
/// // Host drives its own tick schedule
/// InputSequencePlugin::in_schedule(Update)
/// ```
pub struct InputSequencePlugin {
    schedule: InternedScheduleLabel,
}

impl Default for InputSequencePlugin {
    fn default() -> Self {
        Self::in_schedule(FixedUpdate)
    }
}

impl InputSequencePlugin {
    /// Run the tracker in `schedule`, once per run of that schedule.
    pub fn in_schedule(schedule: impl ScheduleLabel) -> Self {
        Self {
            schedule: schedule.intern(),
        }
    }
}

impl Plugin for InputSequencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SequenceSessions>()
            .init_resource::<SequenceConfig>()
            .init_resource::<RouteTable>()
            .init_resource::<PlayerData>()
            .init_resource::<InputEventEntries>()
            .init_resource::<TrackerTick>()
            .add_plugins(core::SequenceEventsPlugin);

        if self.schedule == FixedUpdate.intern() {
            app.insert_resource(Time::<Fixed>::from_hz(DEFAULT_TICK_RATE_HZ));
        }

        // Tick pipeline:
        // 1. rebuild_route_table: swap the table if the config changed
        // 2. apply_audience_changes: create/discard sessions
        // 3. track_input_sequences: edges -> steps -> store, messages, triggers
        // 4. dispatch_input_events: input event entries
        app.configure_sets(
            self.schedule,
            (
                SequenceSystems::Config,
                SequenceSystems::Scope,
                SequenceSystems::Track,
                SequenceSystems::Dispatch,
            )
                .chain(),
        )
        .add_systems(
            self.schedule,
            (
                rebuild_route_table
                    .run_if(resource_changed::<SequenceConfig>)
                    .in_set(SequenceSystems::Config),
                apply_audience_changes.in_set(SequenceSystems::Scope),
                (advance_tick, track_input_sequences)
                    .chain()
                    .in_set(SequenceSystems::Track),
                input_events::dispatch_input_events.in_set(SequenceSystems::Dispatch),
            ),
        )
        .add_systems(Last, flush_player_data);

        // Persistence (feature-gated)
        #[cfg(feature = "persist")]
        {
            app.init_resource::<persist::ConfigPath>()
                .add_message::<persist::ReloadSequenceConfig>()
                .add_systems(Startup, persist::load_config_on_startup)
                .add_systems(
                    self.schedule,
                    persist::reload_config
                        .before(rebuild_route_table)
                        .in_set(SequenceSystems::Config),
                );
        }
    }
}

/// System that rebuilds the route table from the current config.
fn rebuild_route_table(config: Res<SequenceConfig>, mut table: ResMut<RouteTable>) {
    *table = RouteTable::from_routes(&config.routes);
    debug!("Rebuilt combo route table ({} routes)", table.len());
}

/// System that opens and closes sessions on audience changes.
///
/// Exits are applied before enters, so a player who leaves and rejoins
/// within one tick ends up with a fresh session.
fn apply_audience_changes(
    mut enters: MessageReader<AudienceEnter>,
    mut exits: MessageReader<AudienceExit>,
    mut sessions: ResMut<SequenceSessions>,
    mut data: ResMut<PlayerData>,
) {
    for exit in exits.read() {
        if sessions.exit(exit.player).is_some() {
            debug!("Player {} left the input sequence audience", exit.player);
        }
        SequencePersistence::clear(data.store_mut(), exit.player);
    }

    for enter in enters.read() {
        if sessions.enter(enter.player) {
            debug!("Player {} joined the input sequence audience", enter.player);
        } else {
            debug!("Player {} re-entered, session reset", enter.player);
        }
        SequencePersistence::clear(data.store_mut(), enter.player);
    }
}

fn advance_tick(mut tick: ResMut<TrackerTick>) {
    tick.0 += 1;
}

/// Outgoing tracker messages.
#[derive(SystemParam)]
struct SequenceOutput<'w> {
    updated: MessageWriter<'w, SequenceUpdated>,
    completed: MessageWriter<'w, SequenceCompleted>,
    triggers: MessageWriter<'w, TriggerAction>,
}

impl SequenceOutput<'_> {
    fn trigger(&mut self, action: ActionRef, player: PlayerId, tick: u64, cause: TriggerCause) {
        self.triggers.write(TriggerAction { action, player, tick, cause });
    }
}

/// System that feeds input samples through each player's session.
fn track_input_sequences(
    mut samples: MessageReader<PlayerInputSample>,
    mut sessions: ResMut<SequenceSessions>,
    mut data: ResMut<PlayerData>,
    config: Res<SequenceConfig>,
    routes: Res<RouteTable>,
    tick: Res<TrackerTick>,
    mut output: SequenceOutput,
) {
    for sample in samples.read() {
        let player = sample.player;
        let Some(session) = sessions.get_mut(player) else {
            trace!("Ignoring input sample from {}: not in scope", player);
            continue;
        };

        for step in session.tick(sample.input) {
            match step {
                SequenceStep::Reset => {
                    SequencePersistence::clear(data.store_mut(), player);
                }
                SequenceStep::Accepted(sequence) => {
                    let canonical = sequence.canonical();
                    debug!("Player {} sequence: {}", player, canonical);
                    SequencePersistence::store(data.store_mut(), player, &canonical);
                    output.updated.write(SequenceUpdated { player, sequence });

                    if let Some(action) = &config.on_update {
                        output.trigger(
                            action.clone(),
                            player,
                            tick.0,
                            TriggerCause::SequenceUpdated { canonical },
                        );
                    }
                }
                SequenceStep::Completed(sequence) => {
                    let canonical = sequence.canonical();
                    let routed = routes.lookup(&canonical).cloned();
                    debug!("Player {} completed sequence {}", player, canonical);
                    output.completed.write(SequenceCompleted {
                        player,
                        sequence,
                        routed: routed.clone(),
                    });

                    if let Some(action) = &config.on_complete {
                        output.trigger(
                            action.clone(),
                            player,
                            tick.0,
                            TriggerCause::SequenceCompleted { canonical: canonical.clone() },
                        );
                    }

                    if let Some(action) = routed {
                        info!("Combo {} matched for {}: running '{}'", canonical, player, action);
                        output.trigger(action, player, tick.0, TriggerCause::ComboRoute { canonical });
                    }
                }
            }
        }
    }
}

/// System that flushes buffered player data once per frame.
fn flush_player_data(mut data: ResMut<PlayerData>) {
    data.store_mut().flush();
}
