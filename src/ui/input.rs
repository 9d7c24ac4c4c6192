//! Key bindings. The playback controller only ever sees [`Command`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::replay::controller::Command;

/// Help line shown under the iteration caption.
pub const KEY_HELP: &str = "[SPACE/RIGHT]: next | [LEFT]: previous | [Q/ESC]: quit";

/// Maps a key press to a playback command. Releases and repeats are ignored.
#[must_use]
pub fn key_to_command(key: &KeyEvent) -> Command {
    if key.kind != KeyEventKind::Press {
        return Command::Ignore;
    }
    match key.code {
        KeyCode::Right | KeyCode::Char(' ') => Command::Advance,
        KeyCode::Left => Command::Retreat,
        _ => Command::Ignore,
    }
}

/// Keys that close the viewer.
#[must_use]
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
