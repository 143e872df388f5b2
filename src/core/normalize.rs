//! Combo text normalization.
//!
//! Turns human-entered combo descriptions such as `"shift + w + a + space"`
//! or `"SNEAK|W|A|JUMP"` into the canonical pipe form `"SNEAK|FORWARD|LEFT|JUMP"`.
//! The same canonical form is what live sequences persist, so route lookups
//! compare like with like.

use super::InputSymbol;

/// Characters accepted between combo steps.
pub const COMBO_DELIMITERS: [char; 4] = ['+', '|', ',', '>'];

/// Separator of the canonical form.
pub const CANONICAL_SEPARATOR: char = '|';

/// Map an uppercase, whitespace-free token to its symbol.
///
/// Unknown tokens return `None`.
pub fn symbol_for_alias(token: &str) -> Option<InputSymbol> {
    let symbol = match token {
        "SHIFT" | "CROUCH" | "SNEAK" => InputSymbol::Sneak,
        "SPACE" | "JUMP" | "␣" => InputSymbol::Jump,
        "SPRINT" | "RUN" => InputSymbol::Sprint,
        "W" | "FORWARD" | "UP" => InputSymbol::Forward,
        "S" | "BACKWARD" | "DOWN" => InputSymbol::Backward,
        "A" | "LEFT" => InputSymbol::Left,
        "D" | "RIGHT" => InputSymbol::Right,
        _ => return None,
    };
    Some(symbol)
}

/// Parse free-form combo text into symbols, dropping anything unrecognized.
///
/// # Examples
///
/// ```
/// use bevy_input_sequence::core::{parse_combo, InputSymbol};
///
/// assert_eq!(
///     parse_combo("crouch > up"),
///     vec![InputSymbol::Sneak, InputSymbol::Forward],
/// );
/// ```
pub fn parse_combo(text: &str) -> Vec<InputSymbol> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    compact
        .split(COMBO_DELIMITERS)
        .filter(|token| !token.is_empty())
        .filter_map(symbol_for_alias)
        .collect()
}

/// Normalize free-form combo text to canonical pipe-joined tokens.
///
/// Blank input yields an empty string. Already canonical input is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use bevy_input_sequence::core::normalize_combo;
///
/// assert_eq!(normalize_combo("shift + w + a + space"), "SNEAK|FORWARD|LEFT|JUMP");
/// assert_eq!(normalize_combo("SNEAK|W|A|JUMP"), "SNEAK|FORWARD|LEFT|JUMP");
/// ```
pub fn normalize_combo(text: &str) -> String {
    join_tokens(&parse_combo(text))
}

/// Join symbols into the canonical form.
pub fn join_tokens(symbols: &[InputSymbol]) -> String {
    let mut out = String::new();
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            out.push(CANONICAL_SEPARATOR);
        }
        out.push_str(symbol.token());
    }
    out
}
