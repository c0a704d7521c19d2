use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::event::{poll, read, Event};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute, queue, terminal};
use log::info;

use crate::input::{map_key, Command, InputSource};
use crate::paint::Surface;
use crate::TermInt;

/// The terminal as a render surface.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    /// Set once setup has started changing terminal state.
    taken_over: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        Ok(TermManager::with_size(width, height))
    }

    fn with_size(width: TermInt, height: TermInt) -> Self {
        TermManager { width, height, stdout: stdout(), taken_over: false }
    }

    /// Takes over the terminal. Fails without touching it if it is smaller
    /// than `needed`.
    pub fn setup(&mut self, title: &str, needed: (TermInt, TermInt)) -> Result<()> {
        if self.width < needed.0 || self.height < needed.1 {
            bail!(
                "terminal is {}x{}, the game needs at least {}x{}",
                self.width,
                self.height,
                needed.0,
                needed.1
            );
        }

        self.taken_over = true;
        execute!(self.stdout, EnterAlternateScreen, SetTitle(title))
            .context("entering alternate screen")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("hiding cursor")?;
        self.clear()
    }

    /// Undoes whatever `setup` got to. Does nothing if it never started.
    pub fn restore(&mut self) -> Result<()> {
        if !self.taken_over {
            return Ok(());
        }
        info!("restoring terminal");
        self.taken_over = false;
        terminal::disable_raw_mode().context("disabling raw mode")?;
        execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
        .context("leaving alternate screen")?;
        Ok(())
    }
}

impl Surface for TermManager {
    fn paint(
        &mut self,
        at: (TermInt, TermInt),
        text: &str,
        fg: Color,
        bg: Color,
    ) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(at.0, at.1),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(text)
        )
        .context("writing to terminal")?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, terminal::Clear(ClearType::All))
            .context("clearing terminal")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing terminal")
    }
}

/// Key presses from the terminal, read without blocking.
pub struct KeyQueue;

impl InputSource for KeyQueue {
    fn poll_commands(&mut self) -> Result<Vec<Command>> {
        let mut commands = vec![];

        while poll(Duration::from_millis(0)).context("polling terminal events")? {
            if let Event::Key(ev) = read().context("reading terminal event")? {
                commands.extend(map_key(&ev));
            }
        }

        Ok(commands)
    }
}
