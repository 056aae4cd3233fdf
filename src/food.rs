use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Position};
use crate::snake::Snake;

/// Picks a uniformly random free cell for the next food item.
/// Returns `None` once the snake covers the whole board.
pub fn place_food<R: Rng + ?Sized>(snake: &Snake, board: &Board, rng: &mut R) -> Option<Position> {
    if snake.len() >= board.cell_count() {
        return None;
    }

    let choices: Vec<Position> = board.cells().filter(|&pos| !snake.occupies(pos)).collect();
    choices.choose(rng).copied()
}
