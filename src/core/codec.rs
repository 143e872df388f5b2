//! Decoding persisted sequences and formatting them for display.
//!
//! Persisted values are normally canonical pipe-joined tokens. Older values
//! were written without delimiters (`"SNEAKWWS"`); those are decoded with a
//! greedy scan. Decoding never fails, unrecognized input is skipped.

use super::{InputSymbol, join_tokens};

/// Literal tokens of the legacy format, longest first.
const LEGACY_WORDS: [(&str, InputSymbol); 3] = [
    ("SPRINT", InputSymbol::Sprint),
    ("SPACE", InputSymbol::Jump),
    ("SNEAK", InputSymbol::Sneak),
];

/// Decode a persisted sequence in either format.
///
/// # Examples
///
/// ```
/// use bevy_input_sequence::core::{decode_sequence, InputSymbol::*};
///
/// assert_eq!(decode_sequence("SNEAK|FORWARD"), vec![Sneak, Forward]);
/// assert_eq!(decode_sequence("SNEAKWWS"), vec![Sneak, Forward, Forward, Backward]);
/// ```
pub fn decode_sequence(raw: &str) -> Vec<InputSymbol> {
    if raw.contains('|') {
        raw.split('|')
            .filter_map(|token| InputSymbol::from_token(token.trim()))
            .collect()
    } else {
        decode_legacy(raw)
    }
}

/// Decode the delimiter-less legacy format.
pub fn decode_legacy(raw: &str) -> Vec<InputSymbol> {
    let bytes = raw.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    'scan: while i < bytes.len() {
        for (word, symbol) in LEGACY_WORDS {
            let end = i + word.len();
            if end <= bytes.len() && bytes[i..end].eq_ignore_ascii_case(word.as_bytes()) {
                out.push(symbol);
                i = end;
                continue 'scan;
            }
        }

        match bytes[i].to_ascii_uppercase() {
            b'W' => out.push(InputSymbol::Forward),
            b'A' => out.push(InputSymbol::Left),
            b'S' => out.push(InputSymbol::Backward),
            b'D' => out.push(InputSymbol::Right),
            _ => {}
        }
        i += 1;
    }

    out
}

/// How a sequence is rendered for placeholder consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayStyle {
    /// `"W + W + S + SPACE"`
    #[default]
    Full,
    /// `"W+W+S+␣"`
    Short,
    /// `"FORWARD|FORWARD|BACKWARD|JUMP"`
    Raw,
}

impl DisplayStyle {
    /// Parse a style name (`""`/`"full"`, `"short"`, `"raw"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "full" => Some(DisplayStyle::Full),
            "short" => Some(DisplayStyle::Short),
            "raw" => Some(DisplayStyle::Raw),
            _ => None,
        }
    }
}

/// Render symbols in the given style. Empty input renders as `""`.
pub fn format_sequence(symbols: &[InputSymbol], style: DisplayStyle) -> String {
    match style {
        DisplayStyle::Full => symbols
            .iter()
            .map(InputSymbol::pretty)
            .collect::<Vec<_>>()
            .join(" + "),
        DisplayStyle::Short => symbols
            .iter()
            .map(InputSymbol::short)
            .collect::<Vec<_>>()
            .join("+"),
        DisplayStyle::Raw => join_tokens(symbols),
    }
}
