//! Window signals and key matching
//!
//! The controller does not subscribe to global window or document events.
//! Instead the host (the winit event loop, or a test harness) is the injected
//! input and resize source: it translates raw events into [`WindowSignal`]s
//! and delivers them through `App::handle_signal`. Unsubscribing is the host
//! ceasing to deliver, or dropping the controller.

use serde::{Deserialize, Serialize};

/// A signal delivered by the host environment
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSignal {
    /// The display surface was resized
    Resized {
        /// New surface width in pixels
        width: u32,
        /// New surface height in pixels
        height: u32,
    },
    /// A key was pressed
    KeyDown(KeyInput),
}

/// A key-press as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyInput {
    /// Raw key code
    pub code: u32,
    /// The character produced, for printable keys
    pub character: Option<char>,
}

impl KeyInput {
    /// Build a key-press from a printable character
    ///
    /// The code follows the legacy keyboard-code convention for letters:
    /// the uppercase ASCII value.
    pub fn from_char(character: char) -> Self {
        Self {
            code: character.to_ascii_uppercase() as u32,
            character: Some(character),
        }
    }

    /// Build a key-press from a raw key code only
    pub fn from_code(code: u32) -> Self {
        Self {
            code,
            character: None,
        }
    }
}

/// The configured debug-overlay toggle key
///
/// Matches either by raw key code or by single character, case-insensitively.
/// Deserializes from a TOML integer (`inspector = 73`) or a one-character
/// string (`inspector = "i"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InspectorKey {
    /// Raw key code
    Code(u32),
    /// Printable character, matched case-insensitively
    Char(char),
}

impl InspectorKey {
    /// Whether a key-press matches this key
    pub fn matches(&self, key: &KeyInput) -> bool {
        match self {
            InspectorKey::Code(code) => *code == key.code,
            InspectorKey::Char(ch) => key
                .character
                .map(|pressed| pressed.eq_ignore_ascii_case(ch))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_match_is_case_insensitive() {
        let inspector = InspectorKey::Char('i');
        assert!(inspector.matches(&KeyInput::from_char('i')));
        assert!(inspector.matches(&KeyInput::from_char('I')));
        assert!(!inspector.matches(&KeyInput::from_char('j')));
    }

    #[test]
    fn test_code_match_is_exact() {
        let inspector = InspectorKey::Code(73);
        assert!(inspector.matches(&KeyInput::from_code(73)));
        assert!(!inspector.matches(&KeyInput::from_code(74)));
    }

    #[test]
    fn test_char_key_does_not_match_bare_code() {
        // A code-only press carries no character to compare against
        let inspector = InspectorKey::Char('i');
        assert!(!inspector.matches(&KeyInput::from_code(73)));
    }

    #[test]
    fn test_from_char_uses_uppercase_code() {
        let key = KeyInput::from_char('i');
        assert_eq!(key.code, 'I' as u32);
        assert_eq!(key.character, Some('i'));
    }
}
