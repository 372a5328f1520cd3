use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Shift is part of the character itself, so it is dropped for chars
    pub fn from_event(event: &KeyEvent) -> Self {
        let mut modifiers = event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT);
        if !matches!(event.code, KeyCode::Char(_)) {
            modifiers |= event.modifiers & KeyModifiers::SHIFT;
        }
        Self::new(event.code, modifiers)
    }

    /// Parse notation like `<C-x>`, `<A-x>`, `<Tab>`, `<PageUp>` or a
    /// single character
    pub fn parse(notation: &str) -> Option<Self> {
        let Some(inner) = notation
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        else {
            let mut chars = notation.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Self::plain(KeyCode::Char(c))),
                _ => None,
            };
        };

        let (modifiers, name) = match inner.split_once('-') {
            Some(("C", name)) if !name.is_empty() => (KeyModifiers::CONTROL, name),
            Some(("A", name)) if !name.is_empty() => (KeyModifiers::ALT, name),
            _ => (KeyModifiers::NONE, inner),
        };

        let code = match name {
            "Tab" => KeyCode::Tab,
            "Enter" | "CR" => KeyCode::Enter,
            "Esc" => KeyCode::Esc,
            "Up" => KeyCode::Up,
            "Down" => KeyCode::Down,
            "Left" => KeyCode::Left,
            "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "PageUp" => KeyCode::PageUp,
            "PageDown" => KeyCode::PageDown,
            "BS" | "Backspace" => KeyCode::Backspace,
            "Del" | "Delete" => KeyCode::Delete,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if modifiers != KeyModifiers::NONE => {
                        KeyCode::Char(c.to_ascii_lowercase())
                    }
                    _ => return None,
                }
            }
        };

        Some(Self::new(code, modifiers))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Evaluation
    Submit,
    Complete,

    // History
    HistoryUp,
    HistoryDown,

    // Caret movement
    MoveLeft,
    MoveRight,
    MoveToLineStart,
    MoveToLineEnd,

    // Editing
    DeleteBackward,
    DeleteForward,

    // Transcript
    ClearTranscript,
    ScrollUp,
    ScrollDown,

    // Other
    PickObject,
    Quit,
}

impl Action {
    /// Name used by `bind(key, action)` in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "submit" => Action::Submit,
            "complete" => Action::Complete,
            "history_up" => Action::HistoryUp,
            "history_down" => Action::HistoryDown,
            "left" => Action::MoveLeft,
            "right" => Action::MoveRight,
            "home" => Action::MoveToLineStart,
            "end" => Action::MoveToLineEnd,
            "delete_backward" => Action::DeleteBackward,
            "delete_forward" => Action::DeleteForward,
            "clear" => Action::ClearTranscript,
            "scroll_up" => Action::ScrollUp,
            "scroll_down" => Action::ScrollDown,
            "pick_object" => Action::PickObject,
            "quit" => Action::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// Single-key bindings for the console
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Key, Action>,
}

impl Keymap {
    pub fn new() -> Self {
        let bindings = [
            (Key::plain(KeyCode::Enter), Action::Submit),
            (Key::plain(KeyCode::Tab), Action::Complete),
            (Key::plain(KeyCode::Up), Action::HistoryUp),
            (Key::plain(KeyCode::Down), Action::HistoryDown),
            (Key::plain(KeyCode::Left), Action::MoveLeft),
            (Key::plain(KeyCode::Right), Action::MoveRight),
            (Key::plain(KeyCode::Home), Action::MoveToLineStart),
            (Key::plain(KeyCode::End), Action::MoveToLineEnd),
            (Key::ctrl('a'), Action::MoveToLineStart),
            (Key::ctrl('e'), Action::MoveToLineEnd),
            (Key::plain(KeyCode::Backspace), Action::DeleteBackward),
            (Key::plain(KeyCode::Delete), Action::DeleteForward),
            (Key::ctrl('l'), Action::ClearTranscript),
            (Key::ctrl('o'), Action::PickObject),
            (Key::plain(KeyCode::PageUp), Action::ScrollUp),
            (Key::plain(KeyCode::PageDown), Action::ScrollDown),
            (Key::ctrl('c'), Action::Quit),
            (Key::ctrl('d'), Action::Quit),
        ];

        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Defaults with the user's `bind()` calls applied on top. Entries that
    /// don't parse are logged and skipped.
    pub fn with_overrides(keybinds: &HashMap<String, String>) -> Self {
        let mut keymap = Self::new();
        for (notation, name) in keybinds {
            match (Key::parse(notation), Action::from_name(name)) {
                (Some(key), Some(action)) => {
                    keymap.bindings.insert(key, action);
                }
                (None, _) => warn!(key = %notation, "ignoring binding with unknown key notation"),
                (_, None) => warn!(action = %name, "ignoring binding to unknown action"),
            }
        }
        keymap
    }

    pub fn lookup(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(&Key::from_event(event)).copied()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}
