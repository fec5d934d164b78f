//! Physical key codes
//!
//! Keys are identified by their DOM `KeyboardEvent.code` names (`KeyA`,
//! `Quote`, `Space`, ...). Layout authors may also address the alphanumeric
//! block by ISO 9995 position (`E00`..`B10`), which is translated here.

/// The space bar; subject to per-layer space overrides
pub const SPACE: &str = "Space";

/// Right Alt (AltGr); tracked by the engine as a sticky modifier
pub const ALT_RIGHT: &str = "AltRight";

/// ISO positions paired with the physical code found at that position.
///
/// C12 does not exist on ISO boards; the key right of C11 is D13.
pub const ISO_KEY_CODES: [(&str, &str); 48] = [
    // Row E
    ("E00", "Backquote"),
    ("E01", "Digit1"),
    ("E02", "Digit2"),
    ("E03", "Digit3"),
    ("E04", "Digit4"),
    ("E05", "Digit5"),
    ("E06", "Digit6"),
    ("E07", "Digit7"),
    ("E08", "Digit8"),
    ("E09", "Digit9"),
    ("E10", "Digit0"),
    ("E11", "Minus"),
    ("E12", "Equal"),

    // Row D
    ("D01", "KeyQ"),
    ("D02", "KeyW"),
    ("D03", "KeyE"),
    ("D04", "KeyR"),
    ("D05", "KeyT"),
    ("D06", "KeyY"),
    ("D07", "KeyU"),
    ("D08", "KeyI"),
    ("D09", "KeyO"),
    ("D10", "KeyP"),
    ("D11", "BracketLeft"),
    ("D12", "BracketRight"),

    // Row C
    ("C01", "KeyA"),
    ("C02", "KeyS"),
    ("C03", "KeyD"),
    ("C04", "KeyF"),
    ("C05", "KeyG"),
    ("C06", "KeyH"),
    ("C07", "KeyJ"),
    ("C08", "KeyK"),
    ("C09", "KeyL"),
    ("C10", "Semicolon"),
    ("C11", "Quote"),
    ("D13", "Backslash"),

    // Row B
    ("B00", "IntlBackslash"),
    ("B01", "KeyZ"),
    ("B02", "KeyX"),
    ("B03", "KeyC"),
    ("B04", "KeyV"),
    ("B05", "KeyB"),
    ("B06", "KeyN"),
    ("B07", "KeyM"),
    ("B08", "Comma"),
    ("B09", "Period"),
    ("B10", "Slash"),
];

/// Looks up the physical code for an ISO position
pub fn iso_to_code(position: &str) -> Option<&'static str> {
    ISO_KEY_CODES
        .iter()
        .find(|(iso, _)| *iso == position)
        .map(|(_, code)| *code)
}

/// Whether a key name is shaped like an ISO position (row letter + two digits)
pub fn looks_like_iso(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() == 3
        && matches!(bytes[0], b'A'..=b'E')
        && bytes[1].is_ascii_digit()
        && bytes[2].is_ascii_digit()
}
