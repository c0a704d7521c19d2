use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use simplelog::LevelFilter;

use crate::{Field, TermInt};

#[derive(Parser, Debug, Clone)]
#[command(name = "snake")]
#[command(about = "Snake on a wrap-around field, in the terminal", long_about = None)]
pub struct Args {
    /// fixed seed for food placement (random by default)
    #[arg(long)]
    pub seed: Option<u64>,

    /// write a log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// log verbosity when --log-file is given
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

/// Tuning of the game. Not exposed on the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub field: Field,
    /// Render cells per field cell, per axis.
    pub scale: (TermInt, TermInt),
    pub frame_period: Duration,
    /// Subtracted from every sleep to absorb oversleeping.
    pub sleep_margin: Duration,
    pub snake_length: usize,
    pub snake_period: Duration,
    pub snake_speedup: Duration,
    pub snake_min_period: Duration,
    pub growth_per_food: u32,
    pub border_period: Duration,
    pub border_bands: usize,
    pub band_spacing: usize,
    pub band_offset: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            field: Field::new(40, 40),
            scale: (2, 1),
            frame_period: Duration::from_millis(50),
            sleep_margin: Duration::from_millis(5),
            snake_length: 5,
            snake_period: Duration::from_millis(100),
            snake_speedup: Duration::from_millis(10),
            snake_min_period: Duration::from_millis(50),
            growth_per_food: 2,
            border_period: Duration::from_millis(250),
            border_bands: 6,
            band_spacing: 12,
            band_offset: 2,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let (w, h) = (self.field.width(), self.field.height());
        if w < 3 || h < 3 {
            bail!("field must be at least 3x3, got {}x{}", w, h);
        }
        if self.snake_length == 0 || self.snake_length > (h as usize) / 2 {
            bail!("a snake of length {} does not fit a field {} cells high", self.snake_length, h);
        }
        if self.frame_period.is_zero()
            || self.snake_min_period.is_zero()
            || self.border_period.is_zero()
        {
            bail!("periods must be non-zero");
        }
        if self.snake_min_period > self.snake_period {
            bail!(
                "minimum snake period {:?} exceeds the starting period {:?}",
                self.snake_min_period,
                self.snake_period
            );
        }
        if self.border_bands > 1 && self.band_offset == 0 {
            bail!(
                "{} bands with no offset between them all start on the same cell",
                self.border_bands
            );
        }
        if self.band_spacing == 0 || self.border_bands * self.band_offset > self.band_spacing {
            bail!(
                "{} bands spaced {} apart overlap within {} cells",
                self.border_bands,
                self.band_offset,
                self.band_spacing
            );
        }
        let perimeter = 2 * (w as usize + h as usize) - 4;
        if self.border_bands * self.band_offset > perimeter {
            bail!(
                "{} bands spaced {} apart do not fit a border of {} cells",
                self.border_bands,
                self.band_offset,
                perimeter
            );
        }
        Ok(())
    }

    /// Render cells needed: the scaled field plus one status row.
    pub fn screen_size(&self) -> (TermInt, TermInt) {
        let (w, h) = (self.field.width() as TermInt, self.field.height() as TermInt);
        (w * self.scale.0, h * self.scale.1 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.screen_size(), (80, 41));
    }

    #[test]
    fn rejects_floor_above_start() {
        let s = Settings { snake_min_period: Duration::from_millis(200), ..Settings::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_overlapping_bands() {
        let s = Settings { border_bands: 7, ..Settings::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_bands_on_one_cell() {
        let s = Settings { band_offset: 0, ..Settings::default() };
        assert!(s.validate().is_err());

        let single = Settings { band_offset: 0, border_bands: 1, ..Settings::default() };
        assert!(single.validate().is_ok());
    }

    #[test]
    fn rejects_bands_longer_than_the_border() {
        // 3x3 has an 8 cell border, six bands two apart need 12
        let s = Settings { field: Field::new(3, 3), snake_length: 1, ..Settings::default() };
        assert!(s.validate().is_err());

        let fits = Settings { border_bands: 4, ..s };
        assert!(fits.validate().is_ok());
    }

    #[test]
    fn rejects_tiny_field() {
        let s = Settings { field: Field::new(2, 40), ..Settings::default() };
        assert!(s.validate().is_err());
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from(["snake", "--seed", "7", "--log-level", "debug"]).unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.log_level, LevelFilter::Debug);
        assert!(args.log_file.is_none());
    }
}
