//! Keyboard shortcut registry and key-to-command mapping.

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    DeleteSelected,
    CancelDrag,
    Undo,
    Redo,
    Save,
}

/// Modifier keys held during a key press. `meta` (Cmd on macOS) counts as
/// Ctrl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub const fn ctrl_shift() -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::NONE
        }
    }

    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == modifiers.command()
            && self.shift == modifiers.shift
            && !modifiers.alt
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("Delete", false, false, Command::DeleteSelected, "Delete selected element"),
    Shortcut::new("Backspace", false, false, Command::DeleteSelected, "Delete selected element"),
    Shortcut::new("Escape", false, false, Command::CancelDrag, "Cancel current drag"),
    Shortcut::new("Z", true, false, Command::Undo, "Undo"),
    Shortcut::new("Z", true, true, Command::Redo, "Redo"),
    Shortcut::new("Y", true, false, Command::Redo, "Redo"),
    Shortcut::new("S", true, false, Command::Save, "Save project"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Map a key press to a command. `key` is the key name as reported by
    /// the platform (`"Delete"`, `"z"`, `"Z"`, ...).
    pub fn command_for(key: &str, modifiers: Modifiers) -> Option<Command> {
        SHORTCUTS
            .iter()
            .find(|shortcut| shortcut.matches(key, modifiers))
            .map(|shortcut| shortcut.command)
    }

    /// Render all shortcuts as a help table.
    pub fn help() -> String {
        let mut out = String::from("=== Keyboard Shortcuts ===\n");
        for shortcut in SHORTCUTS {
            out.push_str(&format!("  {:20} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }
}
