mod board;
mod config;
mod engine;
mod food;
mod game;
mod input;
mod render;
mod snake;
mod term;

use std::fs::File;

use anyhow::{bail, Context, Result};
use crossterm::style::Color;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::GameConfig;
use crate::engine::Outcome;
use crate::game::{GameSummary, SnakeGame};
use crate::input::KeyboardInput;
use crate::term::TermManager;

pub type TermInt = u16;
pub type Coords = (u16, u16);

const WINDOW_TITLE: &str = "Console Snake";
const LOG_FILE: &str = "console-snake.log";

fn main() -> Result<()> {
    // The screen belongs to the game, so logs go to a file
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(LOG_FILE).with_context(|| format!("failed to create {}", LOG_FILE))?,
    )
    .context("failed to initialize logger")?;

    let config = GameConfig::default();
    let mut term = TermManager::new().context("failed to read terminal size")?;
    check_terminal_size(&term, &config)?;

    let result = term
        .setup(WINDOW_TITLE)
        .context("failed to prepare terminal")
        .and_then(|()| play(&mut term, config));
    if let Err(err) = term.restore() {
        error!("Failed to restore terminal: {}", err);
    }

    let summary = result?;
    info!(
        "Final score {} at {} ms per tick ({})",
        summary.final_score, summary.final_tick_interval, summary.outcome
    );
    println!("Game over ({}). Final score: {}", summary.outcome, summary.final_score);
    Ok(())
}

fn check_terminal_size(term: &TermManager, config: &GameConfig) -> Result<()> {
    let (width, height) = term.get_terminal_size();
    let needed = (config.board_width as TermInt + 2, config.board_height as TermInt + 3);

    if width < needed.0 || height < needed.1 {
        bail!(
            "terminal is {}x{}, the game needs at least {}x{}",
            width,
            height,
            needed.0,
            needed.1
        );
    }

    Ok(())
}

fn play(term: &mut TermManager, config: GameConfig) -> Result<GameSummary> {
    let summary = {
        let mut game = SnakeGame::new(config, KeyboardInput, &mut *term, rand::thread_rng());
        game.run().context("game loop failed")?
    };

    let headline = match summary.outcome {
        Outcome::BoardFilled => "BOARD CLEARED!",
        _ => "GAME OVER!",
    };
    let score_line = format!("Final Score: {}", summary.final_score);
    term.show_message(&[
        (headline, Color::Red),
        ("", Color::Reset),
        (&score_line, Color::Yellow),
        ("", Color::Reset),
        ("Press any key to exit...", Color::White),
    ])
    .context("failed to show game over screen")?;
    term.read_key_blocking().context("failed to read key")?;

    Ok(summary)
}
