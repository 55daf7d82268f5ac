//! Grid dimensions for a board.

use serde::{Deserialize, Serialize};

/// Rows and columns of the card grid.
///
/// Boards are as square as possible, with columns never fewer than rows:
/// `columns = ceil(sqrt(n))`, `rows = ceil(n / columns)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub columns: usize,
}

impl GridSize {
    /// Grid for `cards` cards. An empty board has an empty grid.
    ///
    /// ```
    /// use memory_match::layout::GridSize;
    ///
    /// assert_eq!(GridSize::for_cards(12), GridSize { rows: 3, columns: 4 });
    /// assert_eq!(GridSize::for_cards(16), GridSize { rows: 4, columns: 4 });
    /// assert_eq!(GridSize::for_cards(2), GridSize { rows: 1, columns: 2 });
    /// ```
    #[must_use]
    pub fn for_cards(cards: usize) -> Self {
        if cards == 0 {
            return Self { rows: 0, columns: 0 };
        }
        let columns = ceil_sqrt(cards);
        let rows = cards.div_ceil(columns);
        Self { rows, columns }
    }

    /// Number of slots in the grid.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// Row and column of card `index`, filling rows left to right.
    #[must_use]
    pub fn position(&self, index: usize) -> (usize, usize) {
        debug_assert!(self.columns > 0);
        (index / self.columns, index % self.columns)
    }
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    // Correct float rounding in either direction.
    while c * c > n {
        c -= 1;
    }
    while c * c < n {
        c += 1;
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_boards() {
        assert_eq!(GridSize::for_cards(1), GridSize { rows: 1, columns: 1 });
        assert_eq!(GridSize::for_cards(4), GridSize { rows: 2, columns: 2 });
        assert_eq!(GridSize::for_cards(6), GridSize { rows: 2, columns: 3 });
        assert_eq!(GridSize::for_cards(10), GridSize { rows: 3, columns: 4 });
        assert_eq!(GridSize::for_cards(20), GridSize { rows: 4, columns: 5 });
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(GridSize::for_cards(0).capacity(), 0);
    }

    #[test]
    fn test_position() {
        let grid = GridSize::for_cards(10);
        assert_eq!(grid.position(0), (0, 0));
        assert_eq!(grid.position(3), (0, 3));
        assert_eq!(grid.position(4), (1, 0));
        assert_eq!(grid.position(9), (2, 1));
    }

    #[test]
    fn test_ceil_sqrt_exact_squares() {
        for c in 1..200usize {
            assert_eq!(ceil_sqrt(c * c), c);
            assert_eq!(ceil_sqrt(c * c + 1), c + 1);
        }
    }
}
