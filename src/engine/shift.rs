use super::grid::{Grid, Score};
use super::transform::{rotate_clockwise, rotate_counter_clockwise, slide_line};
use crate::error::Error;

/// Direction represents the direction indicated by the player.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(Error::UnknownDirection(s.to_string())),
        }
    }
}

/// The outcome of sliding a whole grid in one direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Shift {
    pub grid: Grid,
    /// Sum of the values produced by merges.
    pub gain: Score,
    pub changed: bool,
}

/// Slide every row or column of `grid` towards `direction`.
///
/// Right is a reversed Left; Up and Down are rotated so that the target edge becomes the left
/// edge, slid left, then rotated back.
pub fn apply_shift(grid: &Grid, direction: Direction) -> Shift {
    let rows = grid.rows();
    let (slots, gain) = match direction {
        Direction::Left => slide_rows(rows),
        Direction::Right => {
            let (mut slots, gain) = slide_rows(reverse_rows(rows));
            slots = reverse_rows(slots);
            (slots, gain)
        }
        Direction::Up => {
            let (slots, gain) = slide_rows(rotate_counter_clockwise(rows));
            (rotate_clockwise(slots), gain)
        }
        Direction::Down => {
            let (slots, gain) = slide_rows(rotate_clockwise(rows));
            (rotate_counter_clockwise(slots), gain)
        }
    };
    let shifted = Grid::from(slots);
    Shift {
        grid: shifted,
        gain,
        changed: shifted != *grid,
    }
}

fn slide_rows<const N: usize>(rows: [[u32; N]; N]) -> ([[u32; N]; N], Score) {
    let mut gain = 0;
    let slots = rows.map(|row| {
        let (slid, row_gain) = slide_line(row);
        gain += row_gain;
        slid
    });
    (slots, gain)
}

fn reverse_rows<const N: usize>(mut rows: [[u32; N]; N]) -> [[u32; N]; N] {
    rows.iter_mut().for_each(|row| row.reverse());
    rows
}
