use serde::{Deserialize, Serialize};

use super::grid::{Grid, Score, Tile};

/// Aggregate statistics across every finished game.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub games_played: u32,
    pub best_score: Score,
    pub best_tile: Tile,
}

impl Stats {
    /// Count a finished game, keeping the best score and the largest tile on `grid`.
    pub fn record(&mut self, score: Score, grid: &Grid) {
        self.games_played += 1;
        self.best_score = self.best_score.max(score);
        self.best_tile = self.best_tile.max(grid.max_tile());
    }
}
