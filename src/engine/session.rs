use rand::RngCore;

use super::grid::{Grid, Score};
use super::history::{History, Snapshot};
use super::shift::{apply_shift, Direction};
use super::spawn::{spawn_tile, Difficulty, Spawn};
use super::stats::Stats;
use super::terminal::{has_moves, is_won};

/// Status is the externally visible state of a session. A won session keeps accepting moves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Playing,
    Won,
    GameOver,
}

/// Terminal transitions queued for the host, which decides when to present them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Won,
    GameOver,
}

/// MoveResult reports what a single shift did to the session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MoveResult {
    pub changed: bool,
    pub score_delta: Score,
    pub spawned: Option<Spawn>,
}

/// Session owns all mutable game state: the grid, score, difficulty, undo history and terminal
/// flags, along with the aggregate stats that terminal transitions update.
pub struct Session {
    rng: Box<dyn RngCore>,
    difficulty: Difficulty,
    grid: Grid,
    score: Score,
    history: History,
    has_won: bool,
    is_over: bool,
    stats: Stats,
    events: Vec<Event>,
}

impl Session {
    /// Start a new game at the given difficulty using the given random number generator.
    pub fn new(rng: impl RngCore + 'static, difficulty: Difficulty, stats: Stats) -> Self {
        let mut session = Self {
            rng: Box::new(rng),
            difficulty,
            grid: Grid::default(),
            score: 0,
            history: History::default(),
            has_won: false,
            is_over: false,
            stats,
            events: Vec::new(),
        };
        session.init(difficulty);
        session
    }

    /// Resume play from a snapshot with an empty undo history. A snapshot that already holds the
    /// winning tile does not announce the win again.
    pub fn resume(
        rng: impl RngCore + 'static,
        difficulty: Difficulty,
        snapshot: Snapshot,
        stats: Stats,
    ) -> Self {
        Self {
            rng: Box::new(rng),
            difficulty,
            grid: snapshot.grid,
            score: snapshot.score,
            history: History::default(),
            has_won: is_won(&snapshot.grid),
            is_over: !has_moves(&snapshot.grid),
            stats,
            events: Vec::new(),
        }
    }

    /// Discard the current game and start over with two spawned tiles.
    pub fn init(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.grid = Grid::default();
        self.score = 0;
        self.history.clear();
        self.has_won = false;
        self.is_over = false;
        self.events.clear();
        for _ in 0..2 {
            let (grid, _) = spawn_tile(&self.grid, self.difficulty, &mut self.rng);
            self.grid = grid;
        }
        log::info!("new game at {} difficulty", self.difficulty);
    }

    /// Changing difficulty always starts a new game.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.init(difficulty);
    }

    /// shift attempts to slide the grid towards `direction`. Nothing happens unless the grid
    /// changes; otherwise the pre-move state is saved for undo, a tile is spawned and the
    /// terminal conditions are re-evaluated.
    pub fn shift(&mut self, direction: Direction) -> MoveResult {
        if self.is_over {
            log::debug!("ignoring {} shift, game is over", direction);
            return MoveResult::default();
        }

        let shift = apply_shift(&self.grid, direction);
        if !shift.changed {
            log::debug!("{} shift changed nothing", direction);
            return MoveResult::default();
        }

        self.history.push(Snapshot {
            grid: self.grid,
            score: self.score,
        });
        self.score += shift.gain;
        let (grid, spawned) = spawn_tile(&shift.grid, self.difficulty, &mut self.rng);
        self.grid = grid;
        log::debug!(
            "shifted {}, gained {}, score {}\n{}",
            direction,
            shift.gain,
            self.score,
            self.grid
        );

        if !self.has_won && is_won(&self.grid) {
            self.has_won = true;
            self.finish(Event::Won);
        }
        if !has_moves(&self.grid) {
            self.is_over = true;
            self.finish(Event::GameOver);
        }

        MoveResult {
            changed: true,
            score_delta: shift.gain,
            spawned,
        }
    }

    /// Restore the state from before the most recent move. Returns false if there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        let snapshot = match self.history.pop() {
            Some(s) => s,
            None => return false,
        };
        self.grid = snapshot.grid;
        self.score = snapshot.score;
        // the win is one-shot for the session; a restored grid always had a legal move
        self.is_over = !has_moves(&self.grid);
        log::debug!("undo to score {}, {} left", self.score, self.history.len());
        true
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn is_game_over(&self) -> bool {
        self.is_over
    }

    pub fn status(&self) -> Status {
        if self.is_over {
            Status::GameOver
        } else if self.has_won {
            Status::Won
        } else {
            Status::Playing
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Drain the terminal events raised since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

// private methods
impl Session {
    fn finish(&mut self, event: Event) {
        self.stats.record(self.score, &self.grid);
        log::info!(
            "{:?} with score {} and best tile {}",
            event,
            self.score,
            self.grid.max_tile()
        );
        self.events.push(event);
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, grid: Grid, score: Score) {
        self.grid = grid;
        self.score = score;
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rstest::*;

    use super::*;
    use crate::engine::grid::{Idx, Tile, SIZE, WIN_TILE};
    use crate::engine::history::HISTORY_LIMIT;

    fn session(difficulty: Difficulty) -> Session {
        let _ = env_logger::builder().is_test(true).try_init();
        Session::new(SmallRng::seed_from_u64(42), difficulty, Stats::default())
    }

    fn with_grid(slots: [[Tile; 4]; 4], score: Score) -> Session {
        let mut s = session(Difficulty::Medium);
        s.set_state(Grid::from(slots), score);
        s
    }

    fn tile_count(grid: &Grid) -> usize {
        SIZE * SIZE - grid.empty_slots().count()
    }

    /// Shift in the first direction that changes the grid.
    fn any_shift(s: &mut Session) -> MoveResult {
        for direction in Direction::ALL {
            let result = s.shift(direction);
            if result.changed {
                return result;
            }
        }
        panic!("no direction changed the grid:\n{}", s.grid());
    }

    #[rstest]
    #[case(Difficulty::Easy)]
    #[case(Difficulty::VeryHard)]
    fn init_spawns_two_tiles(#[case] difficulty: Difficulty) {
        let s = session(difficulty);
        assert_eq!(tile_count(&s.grid()), 2);
        assert!(s.grid().rows().iter().flatten().all(|v| [0, 2, 4].contains(v)));
        assert_eq!(s.score(), 0);
        assert_eq!(s.status(), Status::Playing);
        assert_eq!(s.difficulty(), difficulty);
        assert!(!s.can_undo());
    }

    #[test]
    fn unchanged_shift_is_a_noop() {
        let slots = [[2, 4, 8, 16], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
        let mut s = with_grid(slots, 12);
        let result = s.shift(Direction::Left);
        assert_eq!(result, MoveResult::default());
        assert_eq!(s.grid(), Grid::from(slots));
        assert_eq!(s.score(), 12);
        assert_eq!(s.history_len(), 0);
    }

    #[test]
    fn changed_shift_spawns_and_scores() {
        let mut s = with_grid([[2, 2, 0, 0], [0, 0, 0, 0], [4, 0, 4, 0], [0, 0, 0, 0]], 0);
        let result = s.shift(Direction::Left);
        assert!(result.changed);
        assert_eq!(result.score_delta, 12);
        assert_eq!(s.score(), 12);
        let spawned = result.spawned.expect("grid had room");
        assert_eq!(s.grid().get(&spawned.idx), spawned.value);
        assert_eq!(tile_count(&s.grid()), 3);
        assert_eq!(s.history_len(), 1);
    }

    #[test]
    fn undo_restores_pre_move_state() {
        let slots = [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 8]];
        let mut s = with_grid(slots, 40);
        assert!(s.shift(Direction::Right).changed);
        assert_ne!(s.grid(), Grid::from(slots));

        assert!(s.undo());
        assert_eq!(s.grid(), Grid::from(slots));
        assert_eq!(s.score(), 40);
        assert!(!s.undo());
    }

    #[test]
    fn history_is_bounded() {
        let mut s = session(Difficulty::Medium);
        let mut states = Vec::new();
        for _ in 0..=HISTORY_LIMIT {
            any_shift(&mut s);
            states.push((s.grid(), s.score()));
        }
        assert_eq!(s.history_len(), HISTORY_LIMIT);

        for _ in 0..HISTORY_LIMIT {
            assert!(s.undo());
        }
        assert_eq!((s.grid(), s.score()), states[0]);
        assert!(!s.undo());
        assert_eq!((s.grid(), s.score()), states[0]);
    }

    #[test]
    fn win_fires_once() {
        let mut s = with_grid([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 0);
        s.shift(Direction::Left);
        assert!(s.has_won());
        assert_eq!(s.status(), Status::Won);
        assert_eq!(s.take_events(), vec![Event::Won]);
        assert_eq!(s.stats().games_played, 1);
        assert_eq!(s.stats().best_tile, WIN_TILE);
        assert_eq!(s.stats().best_score, WIN_TILE);

        // a second 2048 appearing later must not trigger again
        s.set_state(
            Grid::from([[2048, 0, 0, 0], [1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            s.score(),
        );
        assert!(s.shift(Direction::Left).changed);
        let wins = s.grid().rows().iter().flatten().filter(|v| **v == WIN_TILE).count();
        assert_eq!(wins, 2);
        assert!(s.take_events().is_empty());
        assert_eq!(s.stats().games_played, 1);
        assert_eq!(s.status(), Status::Won);

        // and neither do two of them persisting across further moves
        any_shift(&mut s);
        assert!(s.take_events().is_empty());
        assert_eq!(s.stats().games_played, 1);
    }

    #[test]
    fn game_over_when_no_moves_remain() {
        let slots = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [0, 16, 32, 64]];
        let mut s = with_grid(slots, 100);
        let result = s.shift(Direction::Left);
        assert!(result.changed);
        assert_eq!(result.spawned.map(|sp| sp.idx), Some(Idx(3, 3)));
        assert!(s.is_game_over());
        assert_eq!(s.status(), Status::GameOver);
        assert_eq!(s.take_events(), vec![Event::GameOver]);
        assert_eq!(
            s.stats(),
            Stats {
                games_played: 1,
                best_score: 100,
                best_tile: 64,
            }
        );

        for direction in Direction::ALL {
            assert!(!s.shift(direction).changed);
        }

        // undo is allowed after a loss and reopens the game
        assert!(s.undo());
        assert_eq!(s.grid(), Grid::from(slots));
        assert_eq!(s.status(), Status::Playing);
    }

    #[test]
    fn resume_from_snapshot() {
        let won = Grid::from([[2048, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let mut s = Session::resume(
            SmallRng::seed_from_u64(1),
            Difficulty::Hard,
            Snapshot {
                grid: won,
                score: 20000,
            },
            Stats::default(),
        );
        assert_eq!(s.status(), Status::Won);
        assert_eq!(s.score(), 20000);
        assert!(!s.can_undo());
        assert!(s.shift(Direction::Down).changed);
        assert!(s.take_events().is_empty());

        let lost = Grid::from([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let s = Session::resume(
            SmallRng::seed_from_u64(1),
            Difficulty::Hard,
            Snapshot {
                grid: lost,
                score: 0,
            },
            Stats::default(),
        );
        assert_eq!(s.status(), Status::GameOver);
    }

    #[test]
    fn set_difficulty_resets() {
        let mut s = with_grid([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], 50);
        s.shift(Direction::Left);
        assert!(s.has_won());

        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.difficulty(), Difficulty::Hard);
        assert_eq!(s.score(), 0);
        assert_eq!(tile_count(&s.grid()), 2);
        assert!(!s.has_won());
        assert!(!s.can_undo());
        assert!(s.take_events().is_empty());
        // stats survive a reset
        assert_eq!(s.stats().games_played, 1);
    }

    #[test]
    fn score_tracks_merge_gains() {
        let mut s = session(Difficulty::Easy);
        let mut total = 0;
        for _ in 0..50 {
            if s.is_game_over() {
                break;
            }
            total += any_shift(&mut s).score_delta;
            assert_eq!(s.score(), total);
        }
    }
}
