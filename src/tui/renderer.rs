use tile48::engine::{Difficulty, Grid, Score, Stats};
use tile48::Result;

/// Banner is a message shown under the board once the game reaches a terminal state.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Banner {
    Won,
    GameOver(Score),
}

/// Frame is everything a renderer needs to draw one screen.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Frame {
    pub(crate) grid: Grid,
    pub(crate) score: Score,
    pub(crate) difficulty: Difficulty,
    pub(crate) stats: Stats,
    pub(crate) undo_depth: usize,
    pub(crate) banner: Option<Banner>,
    pub(crate) dark_mode: bool,
}

pub(crate) trait Renderer {
    fn size_hint(&self) -> Result<(u16, u16)>;
    /// Draw the frame, failing with `Error::TerminalTooSmall` if it does not fit.
    fn render(&mut self, frame: &Frame) -> Result<()>;
    fn render_message(&mut self, message: &str) -> Result<()>;
}
