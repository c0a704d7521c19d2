use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::style::Color;
use log::{debug, info, trace};
use rand::rngs::StdRng;

use crate::border::BorderAnimator;
use crate::config::Settings;
use crate::food::place_food;
use crate::input::Command;
use crate::paint::{PaintBuffer, Surface, BACKGROUND};
use crate::snake::{MoveResult::*, Snake};
use crate::{Coords, Direction, TermInt};

const SNAKE_COLOR: Color = Color::DarkGreen;
const HEAD_COLOR: Color = Color::Green;
const FOOD_COLOR: Color = Color::Red;
const TEXT_COLOR: Color = Color::White;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    StartScreen,
    Playing,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What exists only while a game is being played.
struct Run {
    snake: Snake,
    food: Coords,
}

/// The whole simulation: current mode, the run in progress, scores, the idle
/// border and the pending paint for the next frame.
pub struct Game<S: Surface> {
    settings: Settings,
    surface: S,
    paint: PaintBuffer,
    border: BorderAnimator,
    rng: StdRng,
    mode: Mode,
    run: Option<Run>,
    score: u32,
    record: u32,
    won: bool,
}

impl<S: Surface> Game<S> {
    pub fn new(settings: Settings, surface: S, rng: StdRng) -> Self {
        let border = BorderAnimator::new(&settings);
        Game {
            settings,
            surface,
            paint: PaintBuffer::new(),
            border,
            rng,
            mode: Mode::StartScreen,
            run: None,
            score: 0,
            record: 0,
            won: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn record(&self) -> u32 {
        self.record
    }

    /// Whether the last run ended with the snake filling the field.
    pub fn won(&self) -> bool {
        self.won
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.run.as_ref().map(|run| &run.snake)
    }

    pub fn food(&self) -> Option<Coords> {
        self.run.as_ref().map(|run| run.food)
    }

    pub fn border(&self) -> &BorderAnimator {
        &self.border
    }

    pub fn paint(&self) -> &PaintBuffer {
        &self.paint
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Swaps in a different snake and food for the run in progress. Has no
    /// effect outside of play.
    #[doc(hidden)]
    pub fn set_board(&mut self, snake: Snake, food: Coords) {
        if let Some(run) = self.run.as_mut() {
            run.snake = snake;
            run.food = food;
        }
    }

    pub fn handle(&mut self, cmd: Command) -> Result<Flow> {
        match (self.mode, cmd) {
            (_, Command::Quit) => return Ok(Flow::Exit),
            (Mode::StartScreen | Mode::GameOver, Command::Exit) => return Ok(Flow::Exit),
            (Mode::StartScreen, Command::Confirm) => self.start_game()?,
            (Mode::GameOver, Command::Confirm) => self.enter_start_screen()?,
            (Mode::Playing, Command::Exit) => {
                info!("run abandoned at score {}", self.score);
                self.enter_start_screen()?
            }
            (Mode::Playing, Command::Turn(dir)) => self.turn(dir),
            _ => {}
        }

        Ok(Flow::Continue)
    }

    /// Moves the active mode's simulation forward by `delta` of wall time.
    pub fn update(&mut self, delta: Duration) -> Result<()> {
        match self.mode {
            Mode::StartScreen | Mode::GameOver => {
                self.border.advance(delta, &mut self.paint);
            }
            Mode::Playing => self.step_snake(delta)?,
        }
        Ok(())
    }

    /// Flushes queued cells to the surface, erases before draws.
    pub fn render(&mut self) -> Result<()> {
        self.paint.flush_to(&mut self.surface, self.settings.scale)?;
        self.surface.flush()
    }

    pub fn enter_start_screen(&mut self) -> Result<()> {
        info!("entering start screen");
        self.mode = Mode::StartScreen;
        self.run = None;
        self.redraw_idle_screen()?;

        let mut lines = vec![
            "S N A K E".to_string(),
            String::new(),
            "Enter  - play".to_string(),
            "Arrows - steer".to_string(),
            "Esc    - quit".to_string(),
        ];
        if self.record > 0 {
            lines.push(String::new());
            lines.push(format!("Record: {}", self.record));
        }
        self.draw_banner(&lines)
    }

    fn start_game(&mut self) -> Result<()> {
        info!("starting a new run");
        self.mode = Mode::Playing;
        self.score = 0;
        self.won = false;
        self.paint.discard();
        self.surface.clear()?;

        let field = self.settings.field;
        let head = Coords::new(field.width() / 2, field.height() * 3 / 4);
        let length = self.settings.snake_length;
        let snake = Snake::new(head, length, Direction::Up, &field, &self.settings);
        let food = place_food(&field, &snake, &mut self.rng)
            .ok_or_else(|| anyhow!("no room for food on an empty field"))?;

        for (i, pos) in snake.body().iter().enumerate() {
            self.paint.draw(*pos, if i == 0 { HEAD_COLOR } else { SNAKE_COLOR });
        }
        self.paint.draw(food, FOOD_COLOR);
        self.run = Some(Run { snake, food });

        self.draw_status()
    }

    fn enter_game_over(&mut self, won: bool) -> Result<()> {
        let how = if won { ", field full" } else { "" };
        info!("game over with score {} (record {}){}", self.score, self.record, how);
        if self.score > self.record {
            self.record = self.score;
        }
        self.mode = Mode::GameOver;
        self.won = won;
        self.run = None;
        self.redraw_idle_screen()?;

        let lines = [
            if won { "YOU WIN" } else { "GAME OVER" }.to_string(),
            String::new(),
            format!("Score:  {}", self.score),
            format!("Record: {}", self.record),
            String::new(),
            "Enter - continue".to_string(),
            "Esc   - quit".to_string(),
        ];
        self.draw_banner(&lines)
    }

    fn turn(&mut self, dir: Direction) {
        if let Some(run) = self.run.as_mut() {
            if !run.snake.set_direction(dir) {
                trace!("ignored reversing turn {:?}", dir);
            }
        }
    }

    fn step_snake(&mut self, delta: Duration) -> Result<()> {
        let field = self.settings.field;
        let run = match self.run.as_mut() {
            Some(run) => run,
            None => return Ok(()),
        };

        let moved = match run.snake.advance(delta, &field, run.food) {
            Some(moved) => moved,
            None => return Ok(()),
        };
        trace!("snake step: {:?}", moved);

        match moved {
            Crashed { at } => {
                debug!("snake ran into itself at {}", at);
                self.enter_game_over(false)
            }
            Moved { new_head, old_tail, ate } => {
                if let Some(tail) = old_tail {
                    self.paint.erase(tail);
                }
                if let Some(neck) = run.snake.body().get(1) {
                    self.paint.draw(*neck, SNAKE_COLOR);
                }
                self.paint.draw(new_head, HEAD_COLOR);

                if !ate {
                    return Ok(());
                }

                self.score += 1;
                debug!(
                    "ate food at {}, score {}, period {:?}",
                    new_head,
                    self.score,
                    run.snake.period()
                );

                match place_food(&field, &run.snake, &mut self.rng) {
                    Some(food) => {
                        run.food = food;
                        self.paint.draw(food, FOOD_COLOR);
                        self.draw_status()
                    }
                    None => self.enter_game_over(true),
                }
            }
        }
    }

    /// Wipes the screen and queues the full decorative border.
    fn redraw_idle_screen(&mut self) -> Result<()> {
        self.paint.discard();
        self.surface.clear()?;
        self.border.render_all(&mut self.paint);
        Ok(())
    }

    fn draw_status(&mut self) -> Result<()> {
        let row = self.settings.field.height() as TermInt * self.settings.scale.1;
        let text = format!("Score: {:<6} Record: {}", self.score, self.record);
        self.draw_text((0, row), &text)
    }

    fn draw_banner(&mut self, lines: &[String]) -> Result<()> {
        let (width, height) = self.settings.screen_size();
        let top = (height / 2).saturating_sub(lines.len() as TermInt / 2);

        for (i, line) in lines.iter().enumerate().filter(|(_, line)| !line.is_empty()) {
            let x = (width / 2).saturating_sub(line.chars().count() as TermInt / 2);
            self.draw_text((x, top + i as TermInt), line)?;
        }
        Ok(())
    }

    fn draw_text(&mut self, at: (TermInt, TermInt), text: &str) -> Result<()> {
        self.surface.paint(at, text, TEXT_COLOR, BACKGROUND)
    }
}
