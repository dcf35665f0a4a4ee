//! Keyboard input.

/// Letters that correspond to moves in [`crate::Dialect::Size3`] notation.
pub const MOVE_KEYS: &str = "RLUDFBMESXYZ";

/// Returns the move for a letter key, or `None` if the key does not
/// correspond to a move.
///
/// The case of `key` is ignored. With either Shift or Caps Lock (but not both)
/// the move is clockwise; otherwise it is counterclockwise.
pub fn move_for_key(key: char, shift: bool, caps_lock: bool) -> Option<String> {
    if !key.is_ascii_alphabetic() {
        return None;
    }
    let letter = key.to_ascii_uppercase();
    if !MOVE_KEYS.contains(letter) {
        return None;
    }
    Some(match shift ^ caps_lock {
        true => letter.to_string(),
        false => format!("{letter}'"),
    })
}

/// Returns the moves for a string of typed characters, where an uppercase
/// letter means Shift was held. Characters that are not move keys are
/// skipped.
pub fn moves_for_typed_text(text: &str) -> Vec<String> {
    text.chars()
        .filter_map(|c| move_for_key(c, c.is_ascii_uppercase(), false))
        .collect()
}
