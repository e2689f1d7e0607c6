use std::{io::{Stdout, Write, stdout}, time::Duration};

use crate::game::Input;
use crate::snake::Direction::*;

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, read, poll};

/// Output sink and key source backed by the real terminal.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    pub fn restore(&mut self) -> Result<()> {
        self.set_raw_mode(false)?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    /// Drains every pending key press without blocking.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    /// Replaces whatever is on screen with `frame`.
    pub fn draw_frame(&mut self, frame: &str) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        // Raw mode doesn't translate \n, so return the carriage ourselves
        for (i, line) in frame.split('\n').enumerate() {
            if i > 0 {
                queue!(self.stdout, style::Print("\r\n"))?;
            }
            queue!(self.stdout, style::Print(line))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        }
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        }
    }
}

/// Key bindings: arrows or WASD steer, space starts, Esc quits and
/// Ctrl+C quits from anywhere.
pub fn key_to_input(ev: &KeyEvent) -> Option<Input> {
    if is_ctrl_c(ev) {
        return Some(Input::ForceQuit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(Input::Move(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(Input::Move(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(Input::Move(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(Input::Move(Right)),
        KeyCode::Char(' ') => Some(Input::Start),
        KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
