//! Movement, collision and growth rules.
//!
//! [`step`] is the only way a running game changes: it reads the current
//! [`GameState`] and returns the next one, leaving the input untouched.

use std::fmt;

use rand::Rng;

use crate::board::{Board, Position};
use crate::config::GameConfig;
use crate::food::place_food;
use crate::snake::{Direction, Snake};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HitWall,
    HitSelf,
    Quit,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

impl Outcome {
    pub fn is_crash(self) -> bool {
        matches!(self, Outcome::HitWall | Outcome::HitSelf)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::HitWall => "hit the wall",
            Outcome::HitSelf => "ran into itself",
            Outcome::Quit => "quit",
            Outcome::BoardFilled => "filled the board",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    pub snake: Snake,
    /// Absent only after the board has been filled.
    pub food: Option<Position>,
    pub score: u32,
    pub tick_interval_ms: u64,
    /// Set once the game is over; the state is frozen from then on.
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Centered snake facing right, first food placed, score and speed reset.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        config.validate();

        let board = Board::new(config.board_width, config.board_height);
        let snake = Snake::new(board.center(), config.initial_snake_length, Direction::Right);
        let food = place_food(&snake, &board, rng);
        assert!(food.is_some(), "no room for the first food");

        GameState {
            config,
            board,
            snake,
            food,
            score: 0,
            tick_interval_ms: config.initial_tick_interval_ms,
            outcome: None,
        }
    }

    /// A fresh game with a hand-placed snake and food.
    #[cfg(test)]
    pub fn with_layout(config: GameConfig, snake: Snake, food: Position) -> Self {
        GameState {
            config,
            board: Board::new(config.board_width, config.board_height),
            snake,
            food: Some(food),
            score: 0,
            tick_interval_ms: config.initial_tick_interval_ms,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Ends the game at the player's request.
    pub fn quit(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Quit);
        }
    }
}

/// Advances the game by one tick in response to `requested`.
///
/// The self-collision test runs against the body as it was before the move,
/// tail included, because the tail only leaves its cell once the move is known
/// to be legal.
pub fn step<R: Rng + ?Sized>(state: &GameState, requested: Direction, rng: &mut R) -> GameState {
    let mut next = state.clone();
    if state.is_over() {
        return next;
    }

    let direction = state.direction().resolve(requested);
    let new_head = state.snake.head().step(direction);

    if !state.board.in_bounds(new_head) {
        next.outcome = Some(Outcome::HitWall);
        return next;
    }

    if state.snake.occupies(new_head) {
        next.outcome = Some(Outcome::HitSelf);
        return next;
    }

    if state.food == Some(new_head) {
        next.snake.grow(new_head, direction);
        next.score += state.config.score_per_food;
        next.tick_interval_ms = state.config.next_tick_interval(state.tick_interval_ms);
        next.food = place_food(&next.snake, &next.board, rng);
        if next.food.is_none() {
            next.outcome = Some(Outcome::BoardFilled);
        }
    } else {
        next.snake.advance(new_head, direction);
    }

    next
}
