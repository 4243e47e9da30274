/// Side length of the board.
pub const SIZE: usize = 4;

/// The tile whose first appearance wins the game.
pub const WIN_TILE: Tile = 2048;

/// A single slot value; 0 is an empty slot, anything else is a power of two.
pub type Tile = u32;

pub type Score = u32;

/// Idx addresses a slot by column (x) and row (y).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Idx(pub usize, pub usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    pub fn x(&self) -> usize {
        self.0
    }

    pub fn y(&self) -> usize {
        self.1
    }
}

/// Grid is the 4x4 board. It is a plain value: moves produce a new grid rather than mutating the
/// one that was captured for undo.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Grid {
    slots: [[Tile; SIZE]; SIZE],
}

impl From<[[Tile; SIZE]; SIZE]> for Grid {
    fn from(slots: [[Tile; SIZE]; SIZE]) -> Self {
        Self { slots }
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.slots {
            for value in row {
                write!(f, "{:>6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid {
    pub fn rows(&self) -> [[Tile; SIZE]; SIZE] {
        self.slots
    }

    pub fn get(&self, idx: &Idx) -> Tile {
        *self
            .slots
            .get(idx.1)
            .unwrap_or_else(|| panic!("invalid y coordinate {}", idx.1))
            .get(idx.0)
            .unwrap_or_else(|| panic!("invalid x coordinate {}", idx.0))
    }

    /// Returns a copy of this grid with `value` written at `idx`.
    pub fn with(mut self, idx: &Idx, value: Tile) -> Self {
        let rf = self
            .slots
            .get_mut(idx.1)
            .unwrap_or_else(|| panic!("invalid y coordinate {}", idx.1))
            .get_mut(idx.0)
            .unwrap_or_else(|| panic!("invalid x coordinate {}", idx.0));
        *rf = value;
        self
    }

    /// Empty slots in row-major order.
    pub fn empty_slots(&self) -> impl Iterator<Item = Idx> + '_ {
        self.slots.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value == 0)
                .map(move |(x, _)| Idx(x, y))
        })
    }

    pub fn is_full(&self) -> bool {
        self.empty_slots().next().is_none()
    }

    pub fn contains(&self, value: Tile) -> bool {
        self.slots.iter().flatten().any(|v| *v == value)
    }

    pub fn max_tile(&self) -> Tile {
        self.slots.iter().flatten().copied().max().unwrap_or(0)
    }
}
