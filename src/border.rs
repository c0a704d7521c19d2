use std::time::Duration;

use crossterm::style::Color;

use crate::config::Settings;
use crate::paint::PaintBuffer;
use crate::{Coords, Field};

pub const FRAME_COLOR: Color = Color::White;

const BAND_COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Colored runs of border cells crawling clockwise around the field on the
/// idle screens.
#[derive(Debug, Clone)]
pub struct BorderAnimator {
    field: Field,
    bands: Vec<(Color, Vec<Coords>)>,
    period: Duration,
    elapsed: Duration,
}

impl BorderAnimator {
    pub fn new(settings: &Settings) -> Self {
        let field = settings.field;
        let perimeter = field.perimeter();

        let bands = (0..settings.border_bands)
            .map(|band| {
                let color = BAND_COLORS[band % BAND_COLORS.len()];
                let start = band * settings.band_offset;
                let cells = perimeter
                    .iter()
                    .skip(start)
                    .step_by(settings.band_spacing)
                    .copied()
                    .collect();
                (color, cells)
            })
            .collect();

        BorderAnimator { field, bands, period: settings.border_period, elapsed: Duration::ZERO }
    }

    pub fn bands(&self) -> &[(Color, Vec<Coords>)] {
        &self.bands
    }

    /// Queues the whole frame: the plain border plus every band at its
    /// current position. Also restarts the animation clock.
    pub fn render_all(&mut self, paint: &mut PaintBuffer) {
        self.elapsed = Duration::ZERO;

        for pos in self.field.perimeter() {
            paint.draw(pos, FRAME_COLOR);
        }
        for (color, cells) in &self.bands {
            for pos in cells {
                paint.draw(*pos, *color);
            }
        }
    }

    /// Accumulates `delta` and moves every band one cell once a period has
    /// built up. Returns whether the bands moved.
    pub fn advance(&mut self, delta: Duration, paint: &mut PaintBuffer) -> bool {
        self.elapsed += delta;
        if self.elapsed < self.period {
            return false;
        }
        self.elapsed -= self.period;

        for (_, cells) in &self.bands {
            for pos in cells {
                paint.draw(*pos, FRAME_COLOR);
            }
        }

        let field = self.field;
        for (color, cells) in &mut self.bands {
            for pos in cells.iter_mut() {
                *pos = field.step_clockwise(*pos);
                paint.draw(*pos, *color);
            }
        }

        true
    }
}
