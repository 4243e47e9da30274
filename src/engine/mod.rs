pub mod grid;
pub mod history;
pub mod session;
pub mod shift;
pub mod spawn;
pub mod stats;
pub mod terminal;
pub mod transform;

pub use grid::{Grid, Idx, Score, Tile, SIZE, WIN_TILE};
pub use history::Snapshot;
pub use session::{Event, MoveResult, Session, Status};
pub use shift::Direction;
pub use spawn::Difficulty;
pub use stats::Stats;
