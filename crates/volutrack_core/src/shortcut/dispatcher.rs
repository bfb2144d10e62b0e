//! Chord parsing and shortcut dispatch.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Chord modifier string for the primary modifier (Ctrl on Linux/Windows).
pub const MODIFIER_CTRL: &str = "ctrl";
/// Alias of [`MODIFIER_CTRL`] for macOS-style declarations.
pub const MODIFIER_CMD: &str = "cmd";
/// Alias of [`MODIFIER_CTRL`].
pub const MODIFIER_META: &str = "meta";
pub const MODIFIER_SHIFT: &str = "shift";
pub const MODIFIER_ALT: &str = "alt";

/// Parsed key combination.
///
/// `ctrl` stands for the platform primary modifier; an event holding either
/// Ctrl or Meta satisfies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// Lower-cased key name, e.g. `z`, `?`, `escape`.
    pub key: String,
}

/// Raw key event as reported by the host UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    /// Plain key press without modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    EmptyChord,
    MissingKey(String),
    UnknownModifier(String),
}

impl Display for ShortcutParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChord => write!(f, "shortcut chord must not be empty"),
            Self::MissingKey(chord) => write!(f, "shortcut chord has no key: `{chord}`"),
            Self::UnknownModifier(value) => write!(f, "unknown shortcut modifier: `{value}`"),
        }
    }
}

impl Error for ShortcutParseError {}

impl KeyChord {
    /// Parses a `+`-separated chord. The last segment is the key, every
    /// earlier segment must be a known modifier. Matching is case-insensitive.
    pub fn parse(value: &str) -> Result<Self, ShortcutParseError> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ShortcutParseError::EmptyChord);
        }

        // A bare `+` (or a trailing `++`) binds the plus key itself.
        let (modifier_part, key) = match normalized.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None if normalized == "+" => (None, "+"),
            None => match normalized.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, normalized.as_str()),
            },
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ShortcutParseError::MissingKey(value.to_string()));
        }

        let mut chord = KeyChord {
            ctrl: false,
            shift: false,
            alt: false,
            key: key.to_string(),
        };
        for modifier in modifier_part
            .into_iter()
            .flat_map(|prefix| prefix.split('+'))
            .map(str::trim)
        {
            match modifier {
                MODIFIER_CTRL | MODIFIER_CMD | MODIFIER_META => chord.ctrl = true,
                MODIFIER_SHIFT => chord.shift = true,
                MODIFIER_ALT => chord.alt = true,
                "" => return Err(ShortcutParseError::MissingKey(value.to_string())),
                other => return Err(ShortcutParseError::UnknownModifier(other.to_string())),
            }
        }

        Ok(chord)
    }

    /// Exact modifier-set equality plus case-insensitive key equality.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let primary_held = event.ctrl || event.meta;
        primary_held == self.ctrl
            && event.shift == self.shift
            && event.alt == self.alt
            && event.key.to_lowercase() == self.key
    }
}

impl Display for KeyChord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.key.chars().count() == 1 {
            write!(f, "{}", self.key.to_uppercase())
        } else {
            let mut chars = self.key.chars();
            match chars.next() {
                Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
                None => Ok(()),
            }
        }
    }
}

/// Ordered chord → action table.
#[derive(Debug, Clone)]
pub struct ShortcutTable<A> {
    bindings: Vec<(KeyChord, A)>,
}

impl<A: Copy> ShortcutTable<A> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Appends a binding; earlier bindings take precedence.
    pub fn bind(mut self, chord: &str, action: A) -> Result<Self, ShortcutParseError> {
        self.bindings.push((KeyChord::parse(chord)?, action));
        Ok(self)
    }

    /// Returns the action of the first matching chord, or `None` so the
    /// caller lets the event pass through.
    pub fn dispatch(&self, event: &KeyEvent) -> Option<A> {
        self.bindings
            .iter()
            .find(|(chord, _)| chord.matches(event))
            .map(|(_, action)| *action)
    }

    pub fn bindings(&self) -> &[(KeyChord, A)] {
        &self.bindings
    }
}

impl<A: Copy> Default for ShortcutTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in guest list actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    FocusNameInput,
    FocusSearch,
    ExportCsv,
    Print,
    ToggleDarkMode,
    UndoRemoval,
    ToggleHelp,
    CloseHelp,
}

impl ShortcutAction {
    /// Help-overlay description.
    pub fn description(self) -> &'static str {
        match self {
            Self::FocusNameInput => "Focus guest name input",
            Self::FocusSearch => "Focus search",
            Self::ExportCsv => "Export to CSV",
            Self::Print => "Print guest list",
            Self::ToggleDarkMode => "Toggle dark mode",
            Self::UndoRemoval => "Undo last deletion",
            Self::ToggleHelp => "Show/hide keyboard shortcuts",
            Self::CloseHelp => "Close keyboard shortcuts",
        }
    }
}

const DEFAULT_BINDINGS: &[(&str, ShortcutAction)] = &[
    ("ctrl+n", ShortcutAction::FocusNameInput),
    ("ctrl+f", ShortcutAction::FocusSearch),
    ("ctrl+e", ShortcutAction::ExportCsv),
    ("ctrl+p", ShortcutAction::Print),
    ("ctrl+d", ShortcutAction::ToggleDarkMode),
    ("ctrl+z", ShortcutAction::UndoRemoval),
    ("?", ShortcutAction::ToggleHelp),
    // Most layouts need Shift to produce `?`.
    ("shift+?", ShortcutAction::ToggleHelp),
    ("escape", ShortcutAction::CloseHelp),
];

/// Standard guest list shortcut table.
pub fn default_shortcuts() -> ShortcutTable<ShortcutAction> {
    ShortcutTable {
        bindings: DEFAULT_BINDINGS
            .iter()
            .filter_map(|(chord, action)| KeyChord::parse(chord).ok().map(|c| (c, *action)))
            .collect(),
    }
}
