//! Status Bar Demo: A live bar pinned to the bottom of the terminal.
//!
//! Demonstrates:
//! - Left segments for an editor-style mode and a key counter
//! - A tagged clock on the right, refreshed once per second
//! - Resize handling through the `Widget` trait
//! - Adding and removing right segments at runtime
//!
//! Keyboard:
//!   i / Esc  → Switch mode
//!   + / -    → Add / remove a right segment
//!   q        → Exit (also Ctrl+C)
//!
//! Pass a TOML file as the first argument to load bar options from it.
//! Logs go to stderr; set `RUST_LOG=segbar=debug` and redirect stderr to
//! watch segment bookkeeping.

use crossterm::{
    cursor, event, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use segbar::{BarOptions, Color, InputEvent, KeyCode, Modifiers, Rect, SegmentId, StatusBar, Widget};
use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// Restores the terminal when the demo exits, including on error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Insert,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => BarOptions::load(path)?,
        None => BarOptions::default(),
    };

    let (width, height) = terminal::size()?;
    let mut bar = StatusBar::new(&options)?;
    bar.set_bounds(Rect::from_size(width, height).bottom_rows(options.height));

    let mode = bar.add_left(10, "");
    let keys = bar.add_left(12, "");
    let clock = bar.add_right(14, "");
    bar.set_tag(clock, "clock")?;

    let _guard = TerminalGuard::enter()?;
    let mut state = Mode::Normal;
    let mut key_count = 0u32;
    let mut extra = 0u32;

    set_mode(&mut bar, mode, state);
    update_clock(&mut bar);
    loop {
        let count_text = format!("keys {key_count}");
        if bar.segment(keys).is_some_and(|s| s.text() != count_text) {
            if let Some(segment) = bar.segment_mut(keys) {
                segment.set_text(count_text);
            }
        }
        if bar.needs_redraw() {
            draw(&bar)?;
            bar.clear_redraw();
        }

        if !event::poll(Duration::from_millis(250))? {
            update_clock(&mut bar);
            continue;
        }
        let Some(input) = InputEvent::from_crossterm(event::read()?) else {
            continue;
        };

        match input {
            InputEvent::Key { code, modifiers } => {
                key_count += 1;
                match code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('c') if modifiers.control => break,
                    KeyCode::Char('i') => {
                        state = Mode::Insert;
                        set_mode(&mut bar, mode, state);
                    }
                    KeyCode::Esc => {
                        state = Mode::Normal;
                        set_mode(&mut bar, mode, state);
                    }
                    KeyCode::Char('+') => {
                        extra += 1;
                        let id = bar.add_right(8, format!("+{extra}"));
                        if let Some(segment) = bar.segment_mut(id) {
                            segment.set_colors(Color::Indexed(16), Color::Indexed(67));
                        }
                    }
                    KeyCode::Char('-') => {
                        // The clock stays; only added segments come off.
                        if bar.right_len() > 1 && bar.remove_right(bar.right_len() - 1).is_some() {
                            extra = extra.saturating_sub(1);
                        }
                    }
                    _ => {}
                }
            }
            InputEvent::Resize { width, height } => {
                execute!(io::stdout(), Clear(ClearType::All))?;
                bar.set_bounds(Rect::from_size(width, height).bottom_rows(bar.height()));
            }
            _ => {}
        }
    }

    Ok(())
}

fn set_mode(bar: &mut StatusBar, id: SegmentId, mode: Mode) {
    let Some(segment) = bar.segment_mut(id) else {
        return;
    };
    match mode {
        Mode::Normal => {
            segment.set_text("NORMAL");
            segment.set_colors(Color::Indexed(235), Color::Indexed(114));
        }
        Mode::Insert => {
            segment.set_text("INSERT");
            segment.set_colors(Color::Indexed(235), Color::Indexed(214));
        }
    }
    segment.set_modifiers(Modifiers::BOLD);
}

fn update_clock(bar: &mut StatusBar) {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() % 86_400);
    let text = format!("{:02}:{:02}:{:02} UTC", secs / 3600, secs / 60 % 60, secs % 60);
    if bar.get_tag("clock").is_some_and(|s| s.text() == text) {
        return;
    }
    if let Some(clock) = bar.get_tag_mut("clock") {
        clock.set_text(text);
    }
}

fn draw(bar: &StatusBar) -> io::Result<()> {
    let mut stdout = io::stdout();
    let bounds = bar.bounds();
    for (row, line) in (bounds.y..).zip(bar.render().split('\n')) {
        queue!(stdout, cursor::MoveTo(bounds.x, row), Print(line))?;
    }
    stdout.flush()
}
