//! Interactive terminal loop

use super::{Command, Flow, Session};
use crate::config::Settings;
use crate::utils::BoardFormatter;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Raw mode and alternate screen for the lifetime of the guard
struct RawTerminal;

impl RawTerminal {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = RawTerminal;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        tracing::debug!("terminal raw mode enabled");
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

/// Key pressed since the last poll, without blocking
fn poll_key() -> io::Result<Option<char>> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            // Raw mode swallows SIGINT
            if modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                return Ok(Some('q'));
            }
            return Ok(Some(c));
        }
    }
    Ok(None)
}

fn draw(out: &mut impl Write, session: &Session) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    out.write_all(BoardFormatter::to_raw_lines(&session.render()).as_bytes())?;
    out.flush()
}

/// Render, poll, dispatch, sleep, until `Q`
pub fn run_interactive(settings: Settings) -> Result<()> {
    let interval = Duration::from_millis(settings.simulation.tick_interval_ms);
    let mut session = Session::new(settings);

    let _terminal = RawTerminal::enter().context("Failed to enter raw terminal mode")?;
    let mut stdout = io::stdout();

    loop {
        draw(&mut stdout, &session).context("Failed to draw board")?;

        let command = Command::from_key(poll_key().context("Failed to poll keyboard")?);
        if command != Command::Step {
            tracing::debug!(?command, generation = session.generation(), "command");
        }
        if session.dispatch(command) == Flow::Quit {
            break;
        }

        thread::sleep(interval);
    }

    tracing::info!(generation = session.generation(), "session ended");
    Ok(())
}
