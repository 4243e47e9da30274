use rand::distributions::{Bernoulli, Distribution};
use rand::seq::IteratorRandom;
use rand::Rng;

use super::grid::{Grid, Idx, Tile};
use crate::error::Error;

/// Difficulty selects how likely a new tile is to be a 2 rather than a 4.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    VeryHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    /// Probability that a spawned tile is a 2.
    pub fn two_chance(&self) -> f64 {
        match self {
            Self::Easy => 0.95,
            Self::Medium => 0.90,
            Self::Hard => 0.80,
            Self::VeryHard => 0.70,
        }
    }

    fn distribution(&self) -> Bernoulli {
        Bernoulli::new(self.two_chance()).expect("spawn chances are always within [0, 1]")
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::VeryHard => "very-hard",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "very-hard" | "very_hard" => Ok(Self::VeryHard),
            _ => Err(Error::UnknownDifficulty(s.to_string())),
        }
    }
}

/// A tile placed onto the grid after a move.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Spawn {
    pub idx: Idx,
    pub value: Tile,
}

/// Place a 2 or a 4 into a uniformly chosen empty slot.
///
/// A full grid is returned untouched with no spawn.
pub fn spawn_tile<R: Rng + ?Sized>(
    grid: &Grid,
    difficulty: Difficulty,
    rng: &mut R,
) -> (Grid, Option<Spawn>) {
    let idx = match grid.empty_slots().choose(rng) {
        Some(idx) => idx,
        None => {
            log::trace!("no empty slot to spawn into");
            return (*grid, None);
        }
    };
    let value = if difficulty.distribution().sample(rng) {
        2
    } else {
        4
    };
    log::trace!("spawning {} at {}", value, idx);
    (grid.with(&idx, value), Some(Spawn { idx, value }))
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rstest::*;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn spawns_into_empty_slot() {
        let initial = Grid::from([[2, 4, 8, 16], [32, 64, 128, 256], [2, 0, 8, 16], [4, 8, 16, 32]]);
        let (grid, spawn) = spawn_tile(&initial, Difficulty::Medium, &mut rng());
        let spawn = spawn.expect("one slot was empty");
        assert_eq!(spawn.idx, Idx(1, 2));
        assert!(spawn.value == 2 || spawn.value == 4);
        assert_eq!(grid.get(&Idx(1, 2)), spawn.value);
        assert!(grid.is_full());
        assert_eq!(initial.get(&Idx(1, 2)), 0);
    }

    #[test]
    fn full_grid_is_a_noop() {
        let full = Grid::from([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let (grid, spawn) = spawn_tile(&full, Difficulty::Easy, &mut rng());
        assert_eq!(grid, full);
        assert!(spawn.is_none());
    }

    #[test]
    fn spawn_location_is_uniform() {
        let mut rng = rng();
        let mut counts = [0usize; 16];
        for _ in 0..16_000 {
            let (_, spawn) = spawn_tile(&Grid::default(), Difficulty::Medium, &mut rng);
            let idx = spawn.expect("grid is empty").idx;
            counts[idx.y() * 4 + idx.x()] += 1;
        }
        for count in counts {
            assert!((800..1200).contains(&count), "count {} is not near 1000", count);
        }
    }

    #[rstest]
    #[case(Difficulty::Easy)]
    #[case(Difficulty::Medium)]
    #[case(Difficulty::Hard)]
    #[case(Difficulty::VeryHard)]
    fn two_ratio_converges(#[case] difficulty: Difficulty) {
        let mut rng = rng();
        let trials = 20_000;
        let twos = (0..trials)
            .filter_map(|_| spawn_tile(&Grid::default(), difficulty, &mut rng).1)
            .filter(|spawn| spawn.value == 2)
            .count();
        let ratio = twos as f64 / trials as f64;
        assert!(
            (ratio - difficulty.two_chance()).abs() < 0.015,
            "{} ratio {} too far from {}",
            difficulty,
            ratio,
            difficulty.two_chance()
        );
    }

    #[rstest]
    #[case("easy", Difficulty::Easy)]
    #[case("Medium", Difficulty::Medium)]
    #[case("hard", Difficulty::Hard)]
    #[case("very-hard", Difficulty::VeryHard)]
    #[case("very_hard", Difficulty::VeryHard)]
    fn parse(#[case] input: &str, #[case] expected: Difficulty) {
        assert_eq!(input.parse::<Difficulty>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(
            "nightmare".parse::<Difficulty>(),
            Err(Error::UnknownDifficulty(_))
        ));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
