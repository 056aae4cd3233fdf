use std::{io, time::Duration};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

/// What the player asked for since the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Move(Direction),
    Quit,
}

/// Non-blocking source of player input, polled once per tick.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<Option<InputEvent>>;
}

/// Reads the keyboard through crossterm's event queue.
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> io::Result<Option<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if let Some(input) = map_key(&ev) {
                    events.push(input);
                }
            }
        }

        Ok(coalesce(events))
    }
}

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    match ev.code {
        KeyCode::Char('c') if ev.modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Move(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Move(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Move(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Move(Direction::Right)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Collapses everything queued since the last tick into one event.
/// The latest move wins, but a quit anywhere in the batch is never lost.
pub fn coalesce<I: IntoIterator<Item = InputEvent>>(events: I) -> Option<InputEvent> {
    events.into_iter().fold(None, |latest, ev| match (latest, ev) {
        (Some(InputEvent::Quit), _) => latest,
        _ => Some(ev),
    })
}
