use std::{io, thread::sleep, time::Duration};

use log::{debug, info};
use rand::Rng;

use crate::config::GameConfig;
use crate::engine::{self, GameState, Outcome};
use crate::input::{InputEvent, InputSource};
use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
    GameOver,
}

/// What the host shell gets back once a game has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub final_score: u32,
    pub final_tick_interval: u64,
    pub outcome: Outcome,
}

/// Drives one game: polls input, steps the engine, renders, then waits out the tick.
pub struct SnakeGame<I, R, G> {
    config: GameConfig,
    input: I,
    renderer: R,
    rng: G,
    phase: Phase,
    state: Option<GameState>,
}

impl<I: InputSource, R: Renderer, G: Rng> SnakeGame<I, R, G> {
    pub fn new(config: GameConfig, input: I, renderer: R, rng: G) -> Self {
        SnakeGame { config, input, renderer, rng, phase: Phase::Initializing, state: None }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Builds the opening position and draws it.
    pub fn start(&mut self) -> io::Result<()> {
        let state = GameState::new(self.config, &mut self.rng);
        info!(
            "New game on a {}x{} board, tick interval {} ms",
            state.board.width(),
            state.board.height(),
            state.tick_interval_ms
        );

        self.renderer.render(&state)?;
        self.state = Some(state);
        self.phase = Phase::Running;
        Ok(())
    }

    /// One input-update-render pass. Does not sleep. A game that has not
    /// started yet is only set up and drawn.
    pub fn tick(&mut self) -> io::Result<Phase> {
        if self.phase == Phase::Initializing {
            self.start()?;
            return Ok(self.phase);
        }

        if self.phase != Phase::Running {
            return Ok(self.phase);
        }
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => return Ok(self.phase),
        };

        let requested = match self.input.poll()? {
            Some(InputEvent::Quit) => {
                debug!("Quit requested with score {}", state.score);
                state.quit();
                self.phase = Phase::GameOver;
                return Ok(self.phase);
            }
            Some(InputEvent::Move(direction)) => direction,
            None => state.direction(),
        };

        let next = engine::step(state, requested, &mut self.rng);
        if next.score != state.score {
            debug!("Food eaten: score {}, tick interval {} ms", next.score, next.tick_interval_ms);
        }
        *state = next;

        self.renderer.render(state)?;

        if let Some(outcome) = state.outcome {
            info!("Game over ({}) with score {}", outcome, state.score);
            self.phase = Phase::GameOver;
        }

        Ok(self.phase)
    }

    /// Starts the game if needed, then ticks until it ends, sleeping for the
    /// current tick interval after every frame.
    pub fn run(&mut self) -> io::Result<GameSummary> {
        if self.phase == Phase::Initializing {
            self.start()?;
        }

        while let Some(state) = self.state.as_ref().filter(|_| self.phase == Phase::Running) {
            sleep(Duration::from_millis(state.tick_interval_ms));
            self.tick()?;
        }

        // GameOver is only entered once the state carries an outcome
        Ok(self.summary().expect("finished game has an outcome"))
    }

    /// Available once the game is over.
    pub fn summary(&self) -> Option<GameSummary> {
        let state = self.state.as_ref()?;
        state.outcome.map(|outcome| GameSummary {
            final_score: state.score,
            final_tick_interval: state.tick_interval_ms,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::{self, *};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    /// Hands out one scripted event per poll, then nothing.
    struct ScriptedInput(VecDeque<Option<InputEvent>>);

    impl InputSource for ScriptedInput {
        fn poll(&mut self) -> io::Result<Option<InputEvent>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<GameState>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, state: &GameState) -> io::Result<()> {
            self.frames.push(state.clone());
            Ok(())
        }
    }

    fn game(script: Vec<Option<InputEvent>>) -> SnakeGame<ScriptedInput, RecordingRenderer, ChaCha8Rng> {
        SnakeGame::new(
            GameConfig::default(),
            ScriptedInput(script.into()),
            RecordingRenderer::default(),
            ChaCha8Rng::seed_from_u64(99),
        )
    }

    fn mv(d: Direction) -> Option<InputEvent> {
        Some(InputEvent::Move(d))
    }

    #[test]
    fn start_initializes_and_draws_once() {
        let mut game = game(vec![]);
        assert_eq!(game.phase(), Phase::Initializing);
        assert!(game.state().is_none());

        game.start().unwrap();
        assert_eq!(game.phase(), Phase::Running);
        let state = game.state().unwrap();
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
        assert_eq!(game.renderer().frames.len(), 1);
    }

    #[test]
    fn each_tick_renders_the_updated_state() {
        let mut game = game(vec![None, mv(Up), None]);
        game.start().unwrap();
        for _ in 0..3 {
            assert_eq!(game.tick().unwrap(), Phase::Running);
        }

        let frames = &game.renderer().frames;
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[1].snake.head(), crate::board::Position::new(31, 10));
        assert_eq!(frames[2].snake.head(), crate::board::Position::new(31, 9));
        assert_eq!(frames[3].direction(), Up);
        assert_eq!(frames.last(), game.state());
    }

    #[test]
    fn quit_ends_before_update_and_render() {
        let mut game = game(vec![None, Some(InputEvent::Quit), mv(Down)]);
        game.start().unwrap();
        game.tick().unwrap();
        let before = game.state().unwrap().snake.clone();

        assert_eq!(game.tick().unwrap(), Phase::GameOver);
        assert_eq!(game.renderer().frames.len(), 2);
        assert_eq!(game.state().unwrap().snake, before);

        // Terminal: later ticks change nothing
        assert_eq!(game.tick().unwrap(), Phase::GameOver);
        assert_eq!(game.renderer().frames.len(), 2);

        let summary = game.summary().unwrap();
        assert_eq!(summary.outcome, Outcome::Quit);
        assert_eq!(summary.final_score, 0);
        assert_eq!(summary.final_tick_interval, 150);
    }

    #[test]
    fn run_stops_at_the_wall() {
        // Heading right from x=30 on a 60-wide board takes 30 ticks to leave it
        let mut game = game(vec![]);
        game.config = GameConfig { initial_tick_interval_ms: 1, tick_interval_floor_ms: 1, ..GameConfig::default() };

        let summary = game.run().unwrap();
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(summary.outcome, Outcome::HitWall);
        assert_eq!(summary.final_score % 10, 0);
        let last = game.renderer().frames.last().unwrap();
        assert!(last.is_over());
    }

    #[test]
    fn tick_from_initializing_only_starts_the_game() {
        let mut game = game(vec![None]);
        assert_eq!(game.tick().unwrap(), Phase::Running);
        assert_eq!(game.renderer().frames.len(), 1);
        assert_eq!(game.state().unwrap().snake.head(), crate::board::Position::new(30, 10));

        game.tick().unwrap();
        assert_eq!(game.renderer().frames.len(), 2);
    }

    #[test]
    fn run_draws_the_opening_position_first() {
        let mut game = game(vec![Some(InputEvent::Quit)]);
        game.config = GameConfig { initial_tick_interval_ms: 1, tick_interval_floor_ms: 1, ..GameConfig::default() };

        let summary = game.run().unwrap();
        assert_eq!(summary.outcome, Outcome::Quit);
        let frames = &game.renderer().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].snake.head(), crate::board::Position::new(30, 10));
        assert!(!frames[0].is_over());
    }

    #[test]
    fn reversal_input_is_ignored() {
        let mut game = game(vec![mv(Left)]);
        game.start().unwrap();
        game.tick().unwrap();
        let state = game.state().unwrap();
        assert_eq!(state.direction(), Right);
        assert_eq!(state.snake.head(), crate::board::Position::new(31, 10));
    }
}
