use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave the current screen: abandons a run in progress, otherwise quits.
    Exit,
    Confirm,
    Turn(Direction),
    /// Quit from anywhere.
    Quit,
}

/// Source of player commands, drained once per frame.
pub trait InputSource {
    /// Everything that arrived since the last call, oldest first. Never blocks.
    fn poll_commands(&mut self) -> Result<Vec<Command>>;
}

pub fn map_key(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let cmd = match ev.code {
        KeyCode::Esc => Command::Exit,
        KeyCode::Enter | KeyCode::Char(' ') => Command::Confirm,
        KeyCode::Char('w') | KeyCode::Char('8') | KeyCode::Up => Command::Turn(Up),
        KeyCode::Char('a') | KeyCode::Char('4') | KeyCode::Left => Command::Turn(Left),
        KeyCode::Char('s') | KeyCode::Char('2') | KeyCode::Down => Command::Turn(Down),
        KeyCode::Char('d') | KeyCode::Char('6') | KeyCode::Right => Command::Turn(Right),
        _ => return None,
    };

    Some(cmd)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
