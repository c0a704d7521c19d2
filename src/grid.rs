use std::fmt;

use crate::{FieldInt, TermInt};
use Direction::*;

/// A cell of the playing field, in field units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Coords {
    pub x: FieldInt,
    pub y: FieldInt,
}

impl Coords {
    pub const fn new(x: FieldInt, y: FieldInt) -> Self {
        Coords { x, y }
    }

    /// Maps a field cell to the top-left render cell it occupies.
    pub fn scale(self, by: (TermInt, TermInt)) -> (TermInt, TermInt) {
        (self.x as TermInt * by.0, self.y as TermInt * by.1)
    }

    /// The neighbouring cell in `dir`, without wrapping.
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Coords::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.opposite() == other
    }

    fn delta(self) -> (FieldInt, FieldInt) {
        match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }
}

/// The rectangular, toroidal playing field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    width: FieldInt,
    height: FieldInt,
}

impl Field {
    pub fn new(width: FieldInt, height: FieldInt) -> Self {
        Field { width, height }
    }

    pub fn width(&self) -> FieldInt {
        self.width
    }

    pub fn height(&self) -> FieldInt {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, pos: Coords) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Folds a position that left the field back in from the opposite edge,
    /// each axis independently.
    pub fn wrap(&self, pos: Coords) -> Coords {
        Coords::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// One movement step in `dir` on the torus.
    pub fn step(&self, pos: Coords, dir: Direction) -> Coords {
        self.wrap(pos.offset(dir))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coords> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coords::new(x, y)))
    }

    /// Perimeter cells in clockwise order: top edge left to right, right edge
    /// top to bottom, bottom edge right to left, left edge bottom to top.
    pub fn perimeter(&self) -> Vec<Coords> {
        let (max_x, max_y) = (self.width - 1, self.height - 1);
        let mut cells = Vec::with_capacity(2 * (self.width + self.height) as usize);

        cells.extend((0..=max_x).map(|x| Coords::new(x, 0)));
        cells.extend((1..=max_y).map(|y| Coords::new(max_x, y)));
        cells.extend((0..max_x).rev().map(|x| Coords::new(x, max_y)));
        cells.extend((1..max_y).rev().map(|y| Coords::new(0, y)));

        cells
    }

    /// Advances a perimeter cell one position clockwise. A cell on a corner
    /// picks up the motion of the edge it turns onto.
    pub fn step_clockwise(&self, pos: Coords) -> Coords {
        let (max_x, max_y) = (self.width - 1, self.height - 1);

        if pos.x == 0 && pos.y == 0 {
            Coords::new(1, 0)
        } else if pos.x == 0 {
            Coords::new(0, pos.y - 1)
        } else if pos.x == max_x && pos.y == max_y {
            Coords::new(max_x - 1, max_y)
        } else if pos.x == max_x {
            Coords::new(max_x, pos.y + 1)
        } else if pos.y == 0 {
            Coords::new(pos.x + 1, 0)
        } else if pos.y == max_y {
            Coords::new(pos.x - 1, max_y)
        } else {
            // Not on the perimeter, nothing to follow
            pos
        }
    }
}
