//! Pure line and matrix transforms that every move is built from.

use super::grid::{Score, Tile};

/// Slide a line towards its start, merging equal neighbours once.
///
/// Returns the new line along with the sum of the values produced by merges. A run of three
/// equal values only merges the leading pair, so `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
pub fn slide_line<const N: usize>(line: [Tile; N]) -> ([Tile; N], Score) {
    let mut compacted: Vec<Tile> = line.iter().copied().filter(|v| *v != 0).collect();
    let mut gain: Score = 0;

    for i in 1..compacted.len() {
        let (pivot, cmp) = (compacted[i - 1], compacted[i]);
        // a zeroed pivot was consumed by the previous merge and must not merge again
        if pivot != 0 && pivot == cmp {
            compacted[i - 1] = pivot + cmp;
            compacted[i] = 0;
            gain += pivot + cmp;
        }
    }

    let mut out = [0; N];
    for (slot, value) in out
        .iter_mut()
        .zip(compacted.into_iter().filter(|v| *v != 0))
    {
        *slot = value;
    }
    (out, gain)
}

/// Rotate a square matrix a quarter turn clockwise.
pub fn rotate_clockwise<T: Copy + Default, const N: usize>(m: [[T; N]; N]) -> [[T; N]; N] {
    let mut out = [[T::default(); N]; N];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            *slot = m[N - 1 - c][r];
        }
    }
    out
}

/// Rotate a square matrix a quarter turn counter-clockwise; the inverse of [`rotate_clockwise`].
pub fn rotate_counter_clockwise<T: Copy + Default, const N: usize>(
    m: [[T; N]; N],
) -> [[T; N]; N] {
    let mut out = [[T::default(); N]; N];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, slot) in row.iter_mut().enumerate() {
            *slot = m[c][N - 1 - r];
        }
    }
    out
}
