//! Centralized keyboard shortcuts registry.
//!
//! This module is the single source of truth for every shortcut in the
//! wizard. It is consumed by:
//! - components, which subscribe their context's shortcuts on mount
//! - `HelpDialog` for displaying help text
//! - the `keys` subcommand

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::stepper::StepperAction;
use crate::ui::timer::TimerAction;

/// A key plus the modifiers that must be held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Whether a key event triggers this chord.
    ///
    /// Shift is ignored for character keys since it is already folded into
    /// the character itself.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.code != self.code {
            return false;
        }
        match self.code {
            KeyCode::Char(_) => {
                event.modifiers.difference(KeyModifiers::SHIFT)
                    == self.modifiers.difference(KeyModifiers::SHIFT)
            }
            // Terminals report Shift+Tab as BackTab with SHIFT held
            KeyCode::BackTab => true,
            _ => event.modifiers == self.modifiers,
        }
    }

    /// Format chord for display (e.g., "q", "Ctrl+→")
    pub fn display(&self) -> String {
        let key = format_keycode(&self.code);
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", key)
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("Alt+{}", key)
        } else {
            key
        }
    }
}

/// What a shortcut (or a click on a control) asks the page to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleHelp,
    FocusNext,
    FocusPrev,
    /// Press the focused control
    Activate,
    Stepper(StepperAction),
    Timer(TimerAction),
}

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary chord for this shortcut
    pub chord: KeyChord,
    /// Alternative chord (e.g., uppercase variant)
    pub alt_chord: Option<KeyChord>,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    pub command: Command,
    /// Component whose lifetime scopes this shortcut
    pub context: ShortcutContext,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Active for as long as the app runs
    General,
    /// Active while the stepper is mounted
    Stepper,
    /// Active while the timer is mounted
    Timer,
}

impl ShortcutContext {
    /// Display name for this context
    pub fn display_name(&self) -> &'static str {
        match self {
            ShortcutContext::General => "General",
            ShortcutContext::Stepper => "Stepper",
            ShortcutContext::Timer => "Timer",
        }
    }

    /// All contexts in display order
    pub fn all() -> &'static [ShortcutContext] {
        &[
            ShortcutContext::General,
            ShortcutContext::Stepper,
            ShortcutContext::Timer,
        ]
    }
}

impl Shortcut {
    /// Whether either chord matches the event
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.chord.matches(event) || self.alt_chord.is_some_and(|alt| alt.matches(event))
    }

    /// Format key for display (e.g., "q", "Tab", "Enter/Space")
    pub fn key_display(&self) -> String {
        let primary = self.chord.display();
        match &self.alt_chord {
            Some(alt) => format!("{}/{}", primary, alt.display()),
            None => primary,
        }
    }

    /// Format key for help dialog (left-padded to 13 chars)
    pub fn key_display_padded(&self) -> String {
        format!("{:<13}", self.key_display())
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", key),
    }
}

/// Static registry of all keyboard shortcuts
pub static SHORTCUTS: &[Shortcut] = &[
    // === General ===
    Shortcut {
        chord: KeyChord::plain(KeyCode::Char('q')),
        alt_chord: Some(KeyChord::ctrl(KeyCode::Char('c'))),
        description: "Quit",
        command: Command::Quit,
        context: ShortcutContext::General,
    },
    Shortcut {
        chord: KeyChord::plain(KeyCode::Char('?')),
        alt_chord: None,
        description: "Toggle help",
        command: Command::ToggleHelp,
        context: ShortcutContext::General,
    },
    Shortcut {
        chord: KeyChord::plain(KeyCode::Tab),
        alt_chord: None,
        description: "Focus next control",
        command: Command::FocusNext,
        context: ShortcutContext::General,
    },
    Shortcut {
        chord: KeyChord::plain(KeyCode::BackTab),
        alt_chord: None,
        description: "Focus previous control",
        command: Command::FocusPrev,
        context: ShortcutContext::General,
    },
    Shortcut {
        chord: KeyChord::plain(KeyCode::Enter),
        alt_chord: Some(KeyChord::plain(KeyCode::Char(' '))),
        description: "Press focused control",
        command: Command::Activate,
        context: ShortcutContext::General,
    },
    // === Stepper ===
    Shortcut {
        chord: KeyChord::ctrl(KeyCode::Right),
        alt_chord: None,
        description: "Next step",
        command: Command::Stepper(StepperAction::Advance),
        context: ShortcutContext::Stepper,
    },
    Shortcut {
        chord: KeyChord::ctrl(KeyCode::Left),
        alt_chord: None,
        description: "Previous step",
        command: Command::Stepper(StepperAction::Retreat),
        context: ShortcutContext::Stepper,
    },
    // === Timer ===
    Shortcut {
        chord: KeyChord::plain(KeyCode::Char('s')),
        alt_chord: Some(KeyChord::plain(KeyCode::Char('S'))),
        description: "Start timer",
        command: Command::Timer(TimerAction::Start),
        context: ShortcutContext::Timer,
    },
    Shortcut {
        chord: KeyChord::plain(KeyCode::Char('p')),
        alt_chord: Some(KeyChord::plain(KeyCode::Char('P'))),
        description: "Pause timer",
        command: Command::Timer(TimerAction::Pause),
        context: ShortcutContext::Timer,
    },
    Shortcut {
        chord: KeyChord::plain(KeyCode::Char('r')),
        alt_chord: Some(KeyChord::plain(KeyCode::Char('R'))),
        description: "Reset timer",
        command: Command::Timer(TimerAction::Reset),
        context: ShortcutContext::Timer,
    },
];

/// Get all shortcuts for a given context
pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Get all shortcuts grouped by context
pub fn all_shortcuts_grouped() -> Vec<(ShortcutContext, Vec<&'static Shortcut>)> {
    ShortcutContext::all()
        .iter()
        .map(|ctx| (*ctx, shortcuts_for_context(*ctx).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_all_shortcuts_have_descriptions() {
        for shortcut in SHORTCUTS {
            assert!(
                !shortcut.description.is_empty(),
                "Shortcut {:?} has empty description",
                shortcut.chord
            );
        }
    }

    #[test]
    fn test_no_two_shortcuts_share_a_chord() {
        for (i, a) in SHORTCUTS.iter().enumerate() {
            for b in &SHORTCUTS[i + 1..] {
                assert_ne!(a.chord, b.chord, "{} and {}", a.description, b.description);
            }
        }
    }

    #[test]
    fn test_ctrl_chord_requires_modifier() {
        let chord = KeyChord::ctrl(KeyCode::Right);
        assert!(chord.matches(&key(KeyCode::Right, KeyModifiers::CONTROL)));
        assert!(!chord.matches(&key(KeyCode::Right, KeyModifiers::NONE)));
        assert!(!chord.matches(&key(KeyCode::Left, KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_char_chord_ignores_shift() {
        let chord = KeyChord::plain(KeyCode::Char('?'));
        assert!(chord.matches(&key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        assert!(!chord.matches(&key(KeyCode::Char('?'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_backtab_matches_with_shift() {
        let chord = KeyChord::plain(KeyCode::BackTab);
        let mut event = key(KeyCode::BackTab, KeyModifiers::SHIFT);
        event.kind = KeyEventKind::Press;
        assert!(chord.matches(&event));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeyChord::ctrl(KeyCode::Right).display(), "Ctrl+→");
        assert_eq!(KeyChord::plain(KeyCode::Char(' ')).display(), "Space");

        let quit = &SHORTCUTS[0];
        assert_eq!(quit.key_display(), "q/Ctrl+c");
    }

    #[test]
    fn test_shortcuts_for_context() {
        let stepper: Vec<_> = shortcuts_for_context(ShortcutContext::Stepper).collect();
        assert_eq!(stepper.len(), 2);
        assert!(stepper
            .iter()
            .all(|s| matches!(s.command, Command::Stepper(_))));
    }

    #[test]
    fn test_all_shortcuts_grouped() {
        let grouped = all_shortcuts_grouped();
        assert_eq!(grouped.len(), 3); // General, Stepper, Timer
        assert!(grouped.iter().all(|(_, shortcuts)| !shortcuts.is_empty()));
    }
}
