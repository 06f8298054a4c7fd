//! Keyboard shortcut mapping.

/// A key, reduced to what the search controller cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// The Escape key.
    Escape,
    /// The Enter key.
    Enter,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
}

/// A key press with the platform modifier state.
///
/// `modifier` is Cmd on macOS and Ctrl elsewhere; hosts fold both into one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub key: Key,
    /// Whether the platform modifier was held.
    pub modifier: bool,
}

impl KeyPress {
    /// A press with no modifier.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifier: false,
        }
    }

    /// A press with the platform modifier held.
    pub fn with_modifier(key: Key) -> Self {
        Self {
            key,
            modifier: true,
        }
    }
}

/// Global shortcuts recognised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Modifier + K.
    FocusSearch,
    /// Escape.
    Dismiss,
}

/// Maps a key press to a shortcut, if it is one.
pub fn shortcut_for(press: KeyPress) -> Option<Shortcut> {
    match press.key {
        Key::Char(c) if press.modifier && c.eq_ignore_ascii_case(&'k') => {
            Some(Shortcut::FocusSearch)
        }
        Key::Escape => Some(Shortcut::Dismiss),
        _ => None,
    }
}
