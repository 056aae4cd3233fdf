use crate::{Coords, TermInt};
use std::io::{self, stdout, Stdout, Write};

use crossterm::event::{read, Event, KeyEvent, KeyEventKind};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use crossterm::{cursor, execute, queue, style, terminal};

const BORDER_CHAR: char = '#';
const BORDER_COLOR: Color = Color::DarkGrey;

/// A glyph and the colour it is drawn in.
pub type Styled = (char, Color);

const BLANK: Styled = (' ', Color::Reset);

/// Copy of what is currently on screen, so unchanged cells are never rewritten.
pub struct ScreenBuffer {
    width: TermInt,
    height: TermInt,
    cells: Vec<Styled>,
}

impl ScreenBuffer {
    pub fn new(width: TermInt, height: TermInt) -> Self {
        ScreenBuffer { width, height, cells: vec![BLANK; width as usize * height as usize] }
    }

    /// Records `cell` at `pos`. Returns false when nothing needs to be written,
    /// either because `pos` is off screen or the cell already shows exactly that.
    pub fn update(&mut self, pos: Coords, cell: Styled) -> bool {
        if pos.0 >= self.width || pos.1 >= self.height {
            return false;
        }

        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        if self.cells[idx] == cell {
            return false;
        }

        self.cells[idx] = cell;
        true
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }
}

/// Owns the terminal while the game runs.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: ScreenBuffer,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = ScreenBuffer::new(width, height);
        Ok(TermManager { width, height, stdout: stdout(), screen })
    }

    /// Takes over the terminal. On failure whatever was already changed is undone.
    pub fn setup(&mut self, title: &str) -> io::Result<()> {
        let res = self.try_setup(title);
        undo_on_error(res, || {
            let _ = self.restore();
        })
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            style::ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Draws a rectangle outline whose outer corners are `top_left` and
    /// `top_left + size - 1`.
    pub fn draw_border(&mut self, top_left: Coords, size: Coords) -> io::Result<()> {
        let (left, top) = top_left;
        let (width, height) = size;
        let (right, bottom) = (left + width - 1, top + height - 1);
        let cell = (BORDER_CHAR, BORDER_COLOR);

        for x in left..=right {
            self.print_at((x, top), cell)?;
            self.print_at((x, bottom), cell)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), cell)?;
            self.print_at((right, y), cell)?;
        }

        Ok(())
    }

    /// Prints each line centered on screen inside a blank box, in its own colour.
    pub fn show_message(&mut self, lines: &[(&str, Color)]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|(x, _)| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at((top_left.0 + x_diff, y), BLANK)?;
            }
        }

        for (i, (line, color)) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            self.print_str((top_left.0, y), &padded_line, *color)?;
        }

        self.flush()
    }

    /// Queues `cell` at `pos` unless the screen already shows it there.
    pub fn print_at(&mut self, pos: Coords, cell: Styled) -> io::Result<()> {
        if !self.screen.update(pos, cell) {
            return Ok(());
        }

        let (ch, color) = cell;
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(color),
            style::Print(ch)
        )
    }

    pub fn print_str(&mut self, pos: Coords, s: &str, color: Color) -> io::Result<()> {
        for (i, ch) in s.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), (ch, color))?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen.clear();
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn try_setup(&mut self, title: &str) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, SetTitle(title))?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }
}

/// Runs `undo` when `res` is an error, then hands `res` back.
fn undo_on_error<T, F: FnOnce()>(res: io::Result<T>, undo: F) -> io::Result<T> {
    if res.is_err() {
        undo();
    }
    res
}
