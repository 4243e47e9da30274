use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style, terminal, ExecutableCommand, QueueableCommand,
};

use tile48::engine::{Difficulty, Direction, SIZE};
use tile48::{Error, Result};

use super::colors::{Rgb, Theme};
use super::events::{Event, EventSource, UserInput};
use super::renderer::{Banner, Frame, Renderer};

const TILE_WIDTH: u16 = 8;
const TILE_HEIGHT: u16 = 3;
const BOARD_X: u16 = 2;
const BOARD_Y: u16 = 3;
const HELP: &str = "arrows/hjkl move  u undo  n new  1-4 difficulty  d theme  q quit";

/// Smallest terminal that fits the header, board, banner and help line. The help line is the
/// widest row; banners are kept shorter than it.
pub(crate) const MIN_WIDTH: u16 = BOARD_X + HELP.len() as u16;
pub(crate) const MIN_HEIGHT: u16 = BOARD_Y + TILE_HEIGHT * SIZE as u16 + 4;

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
    light: Theme,
    dark: Theme,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self {
            w,
            light: Theme::new(false),
            dark: Theme::new(true),
        })
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        log_failure("showing cursor", self.w.execute(cursor::Show));
        log_failure("leaving alternate screen", self.w.execute(terminal::LeaveAlternateScreen));
        log_failure("disabling raw mode", terminal::disable_raw_mode());
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn size_hint(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn render(&mut self, frame: &Frame) -> Result<()> {
        let (width, height) = self.size_hint()?;
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(Error::TerminalTooSmall(MIN_WIDTH, MIN_HEIGHT));
        }

        let theme = if frame.dark_mode { &self.dark } else { &self.light };
        let text = crossterm::style::Color::from(&theme.text);
        let background = crossterm::style::Color::from(&theme.background);

        self.w.queue(terminal::BeginSynchronizedUpdate)?;
        self.w.queue(style::SetBackgroundColor(background))?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.queue(style::SetForegroundColor(text))?;

        self.w.queue(cursor::MoveTo(BOARD_X, 0))?;
        self.w.queue(style::Print(format!(
            "score {:<8} best {:<8} difficulty {}",
            frame.score, frame.stats.best_score, frame.difficulty
        )))?;
        self.w.queue(cursor::MoveTo(BOARD_X, 1))?;
        self.w.queue(style::Print(format!(
            "games {:<8} best tile {:<8} undo {}",
            frame.stats.games_played, frame.stats.best_tile, frame.undo_depth
        )))?;

        for (y, row) in frame.grid.rows().iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                let (bg, fg) = theme.tile(*value);
                let label = match value {
                    0 => String::new(),
                    v => v.to_string(),
                };
                queue_tile(&mut self.w, x as u16, y as u16, bg, fg, &label)?;
            }
        }

        self.w.queue(style::SetBackgroundColor(background))?;
        self.w.queue(style::SetForegroundColor(text))?;
        let banner_y = BOARD_Y + TILE_HEIGHT * SIZE as u16 + 1;
        if let Some(banner) = &frame.banner {
            self.w.queue(cursor::MoveTo(BOARD_X, banner_y))?;
            self.w
                .queue(style::SetAttribute(style::Attribute::Bold))?
                .queue(style::Print(banner_message(banner)))?
                .queue(style::SetAttribute(style::Attribute::Reset))?;
        }
        self.w.queue(cursor::MoveTo(BOARD_X, banner_y + 2))?;
        self.w.queue(style::Print(HELP))?;

        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::EndSynchronizedUpdate)?;
        self.w.flush()?;
        Ok(())
    }

    fn render_message(&mut self, message: &str) -> Result<()> {
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.queue(cursor::MoveTo(0, 0))?;
        self.w.queue(style::Print(message))?;
        self.w.flush()?;
        Ok(())
    }
}

// terminal restoration keeps going after a failed step
fn log_failure<T>(what: &str, result: std::io::Result<T>) -> bool {
    match result {
        Ok(_) => false,
        Err(e) => {
            log::error!("{}: {}", what, e);
            true
        }
    }
}

fn banner_message(banner: &Banner) -> String {
    match banner {
        Banner::Won => String::from("2048! keep going, or n for a new game"),
        Banner::GameOver(score) => format!("game over, score {}. n new game, u undo", score),
    }
}

fn queue_tile<W: Write>(w: &mut W, x: u16, y: u16, bg: &Rgb, fg: &Rgb, label: &str) -> Result<()> {
    let left = BOARD_X + x * TILE_WIDTH;
    let top = BOARD_Y + y * TILE_HEIGHT;
    w.queue(style::SetBackgroundColor(bg.into()))?;
    w.queue(style::SetForegroundColor(fg.into()))?;
    for line in 0..TILE_HEIGHT {
        let content = if line == TILE_HEIGHT / 2 { label } else { "" };
        w.queue(cursor::MoveTo(left, top + line))?;
        // one column of margin on the right separates neighbouring tiles
        w.queue(style::Print(format!(
            "{:^width$}",
            content,
            width = TILE_WIDTH as usize - 1
        )))?;
    }
    Ok(())
}

#[derive(Default)]
pub(crate) struct CrosstermEvents {}

impl EventSource for CrosstermEvents {
    /// Block until the next relevant crossterm event.
    fn next_event(&self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(input) => return Ok(Event::UserInput(input)),
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            };
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    if ke.kind == KeyEventKind::Release {
        return None;
    }
    if ke.modifiers.contains(KeyModifiers::CONTROL) && ke.code == KeyCode::Char('c') {
        return Some(UserInput::Quit);
    }
    // modified keys are never game input
    if !(ke.modifiers - KeyModifiers::SHIFT).is_empty()
        || (ke.modifiers.contains(KeyModifiers::SHIFT) && !matches!(ke.code, KeyCode::Char(_)))
    {
        return None;
    }
    match ke.code {
        KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Direction(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Direction(Direction::Down)),
        KeyCode::Char('u') => Some(UserInput::Undo),
        KeyCode::Char('n') => Some(UserInput::NewGame),
        KeyCode::Char('d') => Some(UserInput::ToggleTheme),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            Some(UserInput::Difficulty(Difficulty::ALL[idx]))
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
        _ => None,
    }
}
