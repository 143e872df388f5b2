//! Core tracker types, usable without the `persist` feature.
//!
//! This module provides the building blocks of the combo automaton:
//! - [`InputSnapshot`] / [`EdgeDetector`] - per-tick input and rising edges
//! - [`SequenceSession`] - the bounded, SNEAK-gated accumulator
//! - [`normalize_combo`] - combo text normalization
//! - [`RouteTable`] - exact-match combo routing
//! - [`SequencePersistence`] - storing the sequence in a [`PlayerDataStore`]
//! - Messages for communication with the host

mod symbol;
mod snapshot;
mod sequence;
mod normalize;
mod codec;
mod router;
mod config;
mod store;
mod sessions;
mod events;
mod display;

pub use symbol::{InputSymbol, InputKind};
pub use snapshot::{InputSnapshot, EdgeDetector};
pub use sequence::{ComboSequence, SequenceSession, SequenceStep, MAX_SEQUENCE_LEN};
pub use normalize::{
    normalize_combo, parse_combo, join_tokens, symbol_for_alias,
    COMBO_DELIMITERS, CANONICAL_SEPARATOR,
};
pub use codec::{decode_sequence, decode_legacy, format_sequence, DisplayStyle};
pub use router::{ActionRef, ComboRoute, RouteTable, is_reachable_combo};
pub use config::SequenceConfig;
pub use store::{
    PlayerId, DataKey, PlayerDataStore, MemoryDataStore, PlayerData,
    SequencePersistence, SEQUENCE_KEY,
};
pub use sessions::SequenceSessions;
pub use events::{
    AudienceEnter, AudienceExit, PlayerInputSample, PlayerInputEvent, RawInput,
    TriggerAction, TriggerCause, InputEventContext,
    SequenceUpdated, SequenceCompleted,
    SequenceEventsPlugin,
};
pub use display::{SequenceDisplay, display_sequence};
