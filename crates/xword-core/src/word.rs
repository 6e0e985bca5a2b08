//! Words: ordered runs of squares.

use std::{iter::FusedIterator, slice};

use crate::{Direction, Position, WordError};

/// An ordered, non-empty sequence of square positions.
///
/// Most words run in a straight line between two squares. Irregular grids
/// (diagramless editing, acrostics) use an explicit list instead.
///
/// # Examples
///
/// ```
/// use xword_core::{Direction, Position, Word};
///
/// let word = Word::straight(Position::new(0, 2), Position::new(3, 2))?;
/// assert_eq!(word.direction(), Some(Direction::Across));
/// assert_eq!(word.len(), 4);
/// assert!(word.contains(Position::new(2, 2)));
///
/// let snake = Word::from_positions([Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)])?;
/// assert_eq!(snake.angle(), 315);
/// assert_eq!(snake.direction(), Some(Direction::DiagonalSe));
/// # Ok::<(), xword_core::WordError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    inner: WordInner,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum WordInner {
    /// Runs in a straight line; `direction` always leads from `start` to `end`.
    Straight {
        start: Position,
        end: Position,
        direction: Direction,
    },
    /// Never empty.
    Explicit(Vec<Position>),
}

impl Word {
    /// Creates a straight word between two squares.
    ///
    /// # Errors
    ///
    /// Returns [`WordError::NotAligned`] if the squares do not lie on a
    /// horizontal, vertical, or 45 degree diagonal line.
    pub fn straight(start: Position, end: Position) -> Result<Self, WordError> {
        let direction = Direction::between(start, end).ok_or(WordError::NotAligned { start, end })?;
        Ok(Self {
            inner: WordInner::Straight {
                start,
                end,
                direction,
            },
        })
    }

    /// Creates a word from an explicit list of squares.
    ///
    /// # Errors
    ///
    /// Returns [`WordError::Empty`] if the list is empty.
    pub fn from_positions(positions: impl IntoIterator<Item = Position>) -> Result<Self, WordError> {
        let positions: Vec<_> = positions.into_iter().collect();
        if positions.is_empty() {
            return Err(WordError::Empty);
        }
        Ok(Self {
            inner: WordInner::Explicit(positions),
        })
    }

    /// Returns the first square.
    #[must_use]
    pub fn front(&self) -> Position {
        match &self.inner {
            WordInner::Straight { start, .. } => *start,
            WordInner::Explicit(positions) => positions.first().copied().unwrap_or_default(),
        }
    }

    /// Returns the last square.
    #[must_use]
    pub fn back(&self) -> Position {
        match &self.inner {
            WordInner::Straight { end, .. } => *end,
            WordInner::Explicit(positions) => positions.last().copied().unwrap_or_default(),
        }
    }

    /// Returns the number of squares.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.inner {
            WordInner::Straight { start, end, .. } => {
                start.col().abs_diff(end.col()).max(start.row().abs_diff(end.row())) + 1
            }
            WordInner::Explicit(positions) => positions.len(),
        }
    }

    /// Returns `false`; words always have at least one square.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the squares from front to back.
    #[must_use]
    pub fn positions(&self) -> Positions<'_> {
        let inner = match &self.inner {
            WordInner::Straight {
                start, direction, ..
            } => PositionsInner::Straight {
                next: *start,
                direction: *direction,
                remaining: self.len(),
            },
            WordInner::Explicit(positions) => PositionsInner::Explicit(positions.iter()),
        };
        Positions { inner }
    }

    /// Returns `true` if the word includes `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }

    /// Returns how far into the word `pos` is, counting from 0.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.positions().position(|p| p == pos)
    }

    /// Returns the angle from the first to the last square in whole degrees.
    #[must_use]
    pub fn angle(&self) -> u16 {
        match &self.inner {
            WordInner::Straight { direction, .. } => direction.angle(),
            WordInner::Explicit(_) => Direction::angle_between(self.front(), self.back()),
        }
    }

    /// Returns the direction of the word, if its angle is a multiple of 45 degrees.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        match &self.inner {
            WordInner::Straight { direction, .. } => Some(*direction),
            WordInner::Explicit(_) => Direction::from_angle(i32::from(self.angle())),
        }
    }
}

/// Iterator over the squares of a [`Word`].
#[derive(Debug, Clone)]
pub struct Positions<'a> {
    inner: PositionsInner<'a>,
}

#[derive(Debug, Clone)]
enum PositionsInner<'a> {
    Straight {
        next: Position,
        direction: Direction,
        remaining: usize,
    },
    Explicit(slice::Iter<'a, Position>),
}

impl Iterator for Positions<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            PositionsInner::Straight {
                next,
                direction,
                remaining,
            } => {
                if *remaining == 0 {
                    return None;
                }
                let current = *next;
                *remaining -= 1;
                if *remaining > 0 {
                    let (dcol, drow) = direction.delta();
                    match current.offset(dcol, drow, usize::MAX, usize::MAX) {
                        Some(pos) => *next = pos,
                        None => *remaining = 0,
                    }
                }
                Some(current)
            }
            PositionsInner::Explicit(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match &self.inner {
            PositionsInner::Straight { remaining, .. } => *remaining,
            PositionsInner::Explicit(iter) => iter.len(),
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for Positions<'_> {}

impl FusedIterator for Positions<'_> {}
