use std::time::Duration;

use tile48::engine::{Event as SessionEvent, Session};
use tile48::{Error, Result};

use crate::store::Store;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::renderer::{Banner, Frame, Renderer};

/// Pause between drawing the final spawned tile and announcing the loss.
const GAME_OVER_DELAY: Duration = Duration::from_millis(300);

pub(crate) struct App<R: Renderer, E: EventSource> {
    renderer: R,
    event_source: E,
    session: Session,
    store: Store,
    banner: Option<Banner>,
    game_over_delay: Duration,
}

impl<R: Renderer, E: EventSource> App<R, E> {
    pub(crate) fn new(session: Session, store: Store, renderer: R, event_source: E) -> Self {
        Self {
            renderer,
            event_source,
            session,
            store,
            banner: None,
            game_over_delay: GAME_OVER_DELAY,
        }
    }

    /// Run takes control of the terminal until the player quits.
    pub(crate) fn run(mut self) -> Result<()> {
        self.draw()?;
        loop {
            match self.event_source.next_event()? {
                Event::UserInput(UserInput::Quit) => break,
                Event::UserInput(input) => self.handle(input)?,
                Event::Resize => (),
            }
            self.draw()?;
        }
        log::info!("quitting with score {}", self.session.score());
        Ok(())
    }
}

impl<R: Renderer, E: EventSource> App<R, E> {
    fn handle(&mut self, input: UserInput) -> Result<()> {
        match input {
            UserInput::Direction(direction) => {
                if self.session.shift(direction).changed {
                    self.present_events()?;
                }
            }
            UserInput::Undo => {
                if self.session.undo() && !self.session.is_game_over() {
                    // a won game keeps its banner
                    if let Some(Banner::GameOver(_)) = self.banner {
                        self.banner = None;
                    }
                }
            }
            UserInput::NewGame => {
                self.session.init(self.session.difficulty());
                self.banner = None;
            }
            UserInput::Difficulty(difficulty) => {
                self.session.set_difficulty(difficulty);
                self.banner = None;
            }
            UserInput::ToggleTheme => {
                let dark = self.store.toggle_dark_mode();
                log::debug!("dark mode {}", dark);
                self.store.save()?;
            }
            UserInput::Quit => (),
        }
        Ok(())
    }

    fn present_events(&mut self) -> Result<()> {
        let events = self.session.take_events();
        if events.is_empty() {
            return Ok(());
        }
        self.store.set_stats(self.session.stats());
        self.store.save()?;
        for event in events {
            match event {
                SessionEvent::Won => self.banner = Some(Banner::Won),
                SessionEvent::GameOver => {
                    // let the last spawned tile show before the banner covers the moment
                    self.draw()?;
                    std::thread::sleep(self.game_over_delay);
                    self.banner = Some(Banner::GameOver(self.session.score()));
                }
            }
        }
        Ok(())
    }

    fn frame(&self) -> Frame {
        Frame {
            grid: self.session.grid(),
            score: self.session.score(),
            difficulty: self.session.difficulty(),
            stats: self.session.stats(),
            undo_depth: self.session.history_len(),
            banner: self.banner.clone(),
            dark_mode: self.store.dark_mode(),
        }
    }

    fn draw(&mut self) -> Result<()> {
        let frame = self.frame();
        match self.renderer.render(&frame) {
            Err(Error::TerminalTooSmall(width, height)) => self.renderer.render_message(&format!(
                "terminal too small, resize to at least {} x {}",
                width, height
            )),
            other => other,
        }
    }
}
