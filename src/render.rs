use std::io;

use crossterm::style::Color;

use crate::board::Position;
use crate::engine::GameState;
use crate::term::{Styled, TermManager};
use crate::TermInt;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'F';
const DEAD_SNAKE_CHAR: char = 'X';

const HEAD_COLOR: Color = Color::Yellow;
const BODY_COLOR: Color = Color::Cyan;
const FOOD_COLOR: Color = Color::Green;
const DEAD_SNAKE_COLOR: Color = Color::Red;
const STATUS_COLOR: Color = Color::White;

const EMPTY: Styled = (' ', Color::Reset);

/// Draws a complete game snapshot. Called once per tick, after the update.
pub trait Renderer {
    fn render(&mut self, state: &GameState) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, state: &GameState) -> io::Result<()> {
        (**self).render(state)
    }
}

/// Glyphs for every board cell plus the status line, independent of any terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    cells: Vec<Styled>,
    status: String,
}

impl Frame {
    pub fn compose(state: &GameState) -> Self {
        let width = state.board.width() as usize;
        let mut cells = vec![EMPTY; state.board.cell_count()];
        let index = |pos: &Position| pos.y as usize * width + pos.x as usize;

        if let Some(food) = state.food {
            cells[index(&food)] = (FOOD_CHAR, FOOD_COLOR);
        }

        let crashed = state.outcome.map_or(false, |o| o.is_crash());
        for (i, pos) in state.snake.segments().enumerate() {
            cells[index(pos)] = match (crashed, i) {
                (true, _) => (DEAD_SNAKE_CHAR, DEAD_SNAKE_COLOR),
                (false, 0) => (state.direction().head_char(), HEAD_COLOR),
                (false, _) => (SNAKE_BODY_CHAR, BODY_COLOR),
            };
        }

        let status = format!(
            "Score: {} | Speed: {} units/s ",
            state.score,
            1000 / state.tick_interval_ms
        );

        Frame { width, cells, status }
    }

    #[cfg(test)]
    pub fn cell(&self, pos: Position) -> Styled {
        self.cells[pos.y as usize * self.width + pos.x as usize]
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn rows(&self) -> impl Iterator<Item = &[Styled]> + '_ {
        self.cells.chunks(self.width)
    }
}

impl Renderer for TermManager {
    fn render(&mut self, state: &GameState) -> io::Result<()> {
        let frame = Frame::compose(state);
        let size = (state.board.width() as TermInt + 2, state.board.height() as TermInt + 2);

        self.draw_border((0, 0), size)?;
        for (y, row) in frame.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                self.print_at((x as TermInt + 1, y as TermInt + 1), cell)?;
            }
        }
        self.print_str((0, size.1), frame.status(), STATUS_COLOR)?;

        self.flush()
    }
}
