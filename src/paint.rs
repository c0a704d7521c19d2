use std::collections::HashMap;

use anyhow::Result;
use crossterm::style::Color;

use crate::{Coords, TermInt};

/// Two render cells wide, so a field cell looks square in a terminal.
pub const SQUARE: &str = "██";
pub const CLEAR_SQUARE: &str = "  ";

pub const BACKGROUND: Color = Color::Black;

/// Whatever the frame gets drawn onto.
pub trait Surface {
    /// Writes `text` at render position `at` with the given colors.
    fn paint(&mut self, at: (TermInt, TermInt), text: &str, fg: Color, bg: Color) -> Result<()>;

    /// Blanks the whole surface.
    fn clear(&mut self) -> Result<()>;

    /// Pushes everything painted so far to the screen.
    fn flush(&mut self) -> Result<()>;
}

/// Insertion-ordered map from cell to color. Writing a cell that is already
/// present replaces its color and keeps its original position.
#[derive(Default, Debug, Clone)]
pub struct PaintMap {
    entries: Vec<(Coords, Color)>,
    index: HashMap<Coords, usize>,
}

impl PaintMap {
    pub fn upsert(&mut self, pos: Coords, color: Color) {
        match self.index.get(&pos) {
            Some(&i) => self.entries[i].1 = color,
            None => {
                self.index.insert(pos, self.entries.len());
                self.entries.push((pos, color));
            }
        }
    }

    pub fn get(&self, pos: Coords) -> Option<Color> {
        self.index.get(&pos).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Coords, Color)> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

/// Cells to erase and cells to draw for the upcoming frame.
#[derive(Default, Debug, Clone)]
pub struct PaintBuffer {
    to_erase: PaintMap,
    to_draw: PaintMap,
}

impl PaintBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn erase(&mut self, pos: Coords) {
        self.to_erase.upsert(pos, BACKGROUND);
    }

    pub fn draw(&mut self, pos: Coords, color: Color) {
        self.to_draw.upsert(pos, color);
    }

    pub fn to_erase(&self) -> &PaintMap {
        &self.to_erase
    }

    pub fn to_draw(&self) -> &PaintMap {
        &self.to_draw
    }

    pub fn is_empty(&self) -> bool {
        self.to_erase.is_empty() && self.to_draw.is_empty()
    }

    /// Drops everything queued, e.g. when the screen is about to be wiped.
    pub fn discard(&mut self) {
        self.to_erase.clear();
        self.to_draw.clear();
    }

    /// Paints erases first and draws second, so a cell in both ends up drawn,
    /// then leaves both sets empty.
    pub fn flush_to<S: Surface>(
        &mut self,
        surface: &mut S,
        scale: (TermInt, TermInt),
    ) -> Result<()> {
        for (pos, color) in self.to_erase.iter() {
            surface.paint(pos.scale(scale), CLEAR_SQUARE, *color, *color)?;
        }

        for (pos, color) in self.to_draw.iter() {
            surface.paint(pos.scale(scale), SQUARE, *color, BACKGROUND)?;
        }

        self.discard();
        Ok(())
    }
}
