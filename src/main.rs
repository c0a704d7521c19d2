use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, WriteLogger};

use snake::config::{Args, Settings};
use snake::game::Game;
use snake::scheduler::Scheduler;
use snake::term::{KeyQueue, TermManager};

fn main() -> Result<()> {
    let args = Args::parse();

    // The screen belongs to the game, so logs only ever go to a file
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        WriteLogger::init(args.log_level, Config::default(), file).context("initializing logger")?;
    }

    let settings = Settings::default();
    settings.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("starting with seed {}", seed);

    let mut term = TermManager::new()?;
    let ready = term.setup("Snake", settings.screen_size());

    let scheduler = Scheduler::new(settings.frame_period, settings.sleep_margin);
    let mut game = Game::new(settings, term, StdRng::seed_from_u64(seed));

    let played = ready
        .and_then(|_| game.enter_start_screen())
        .and_then(|_| scheduler.run(&mut game, &mut KeyQueue));

    // Restore the terminal whatever happened above
    let restored = game.into_surface().restore();
    played.and(restored)
}
