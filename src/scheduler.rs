use std::thread::sleep;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::info;

use crate::game::{Flow, Game};
use crate::input::InputSource;
use crate::paint::Surface;

/// Fixed-period frame loop.
#[derive(Copy, Clone, Debug)]
pub struct Scheduler {
    pub period: Duration,
    pub margin: Duration,
}

impl Scheduler {
    pub fn new(period: Duration, margin: Duration) -> Self {
        Scheduler { period, margin }
    }

    /// Runs frames until a command asks to exit. Each frame drains the input,
    /// advances the game by the wall time since the previous frame started,
    /// renders, then sleeps off what is left of the period.
    pub fn run<S: Surface, I: InputSource>(&self, game: &mut Game<S>, input: &mut I) -> Result<()> {
        let mut last_start = Instant::now();
        let mut frames: u64 = 0;

        loop {
            let start = Instant::now();
            let delta = start.duration_since(last_start);
            last_start = start;
            frames += 1;

            for cmd in input.poll_commands()? {
                if game.handle(cmd)? == Flow::Exit {
                    info!("exit requested after {} frames", frames);
                    return Ok(());
                }
            }

            game.update(delta)?;
            game.render()?;

            if let Some(nap) = self.sleep_budget(start.elapsed()) {
                sleep(nap);
            }
        }
    }

    /// Time left to sleep after spending `spent` on a frame, if any.
    pub fn sleep_budget(&self, spent: Duration) -> Option<Duration> {
        self.period
            .checked_sub(spent)
            .and_then(|left| left.checked_sub(self.margin))
            .filter(|nap| !nap.is_zero())
    }
}
