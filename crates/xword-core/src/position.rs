//! Grid position type.

use std::fmt::{self, Display};

/// A cell position on a crossword grid.
///
/// Columns grow to the right and rows grow downward, so `(0, 0)` is the
/// top-left corner.
///
/// # Examples
///
/// ```
/// use xword_core::Position;
///
/// let pos = Position::new(3, 1);
/// assert_eq!(pos.col(), 3);
/// assert_eq!(pos.row(), 1);
/// assert_eq!(pos.to_string(), "(3, 1)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    col: usize,
    row: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    #[inline]
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Returns the column index.
    #[must_use]
    #[inline]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the row index.
    #[must_use]
    #[inline]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the position moved by `(dcol, drow)`, or `None` when the result
    /// falls outside a `width` x `height` grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use xword_core::Position;
    ///
    /// let pos = Position::new(0, 2);
    /// assert_eq!(pos.offset(1, -1, 3, 3), Some(Position::new(1, 1)));
    /// assert_eq!(pos.offset(-1, 0, 3, 3), None);
    /// assert_eq!(pos.offset(0, 1, 3, 3), None);
    /// ```
    #[must_use]
    pub fn offset(self, dcol: isize, drow: isize, width: usize, height: usize) -> Option<Self> {
        let col = self.col.checked_add_signed(dcol)?;
        let row = self.row.checked_add_signed(drow)?;
        (col < width && row < height).then_some(Self { col, row })
    }

    /// Returns the row-major index of this position in a grid of `width` columns.
    #[must_use]
    #[inline]
    pub const fn to_index(self, width: usize) -> usize {
        self.row * width + self.col
    }

    /// Returns the position of a row-major `index` in a grid of `width` columns.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    #[must_use]
    #[inline]
    pub const fn from_index(index: usize, width: usize) -> Self {
        Self {
            col: index % width,
            row: index / width,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Positions order row-major: by row, then by column.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(usize, usize)> for Position {
    fn from((col, row): (usize, usize)) -> Self {
        Self::new(col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversion() {
        let pos = Position::new(2, 3);
        assert_eq!(pos.to_index(5), 17);
        assert_eq!(Position::from_index(17, 5), pos);
    }

    #[test]
    fn test_offset_bounds() {
        let pos = Position::new(4, 4);
        assert_eq!(pos.offset(1, 1, 5, 5), None);
        assert_eq!(pos.offset(-1, -1, 5, 5), Some(Position::new(3, 3)));
        assert_eq!(Position::new(0, 0).offset(-1, 1, 5, 5), None);
    }

    #[test]
    fn test_ordering_is_row_major() {
        assert!(Position::new(5, 0) < Position::new(0, 1));
        assert!(Position::new(1, 2) < Position::new(2, 2));
    }
}
