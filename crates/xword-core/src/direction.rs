//! The eight canonical grid directions.

use std::fmt::{self, Display};

use crate::Position;

/// One of the eight compass directions a word can run in.
///
/// Directions are identified by their angle in degrees, measured
/// counter-clockwise from east with rows growing downward on screen.
///
/// | Direction      | Angle | Step (col, row) |
/// |----------------|-------|-----------------|
/// | `Across`       | 0     | (+1, 0)         |
/// | `DiagonalNe`   | 45    | (+1, -1)        |
/// | `Up`           | 90    | (0, -1)         |
/// | `DiagonalNw`   | 135   | (-1, -1)        |
/// | `Left`         | 180   | (-1, 0)         |
/// | `DiagonalSw`   | 225   | (-1, +1)        |
/// | `Down`         | 270   | (0, +1)         |
/// | `DiagonalSe`   | 315   | (+1, +1)        |
///
/// # Examples
///
/// ```
/// use xword_core::Direction;
///
/// assert_eq!(Direction::Across.opposite(), Direction::Left);
/// assert_eq!(Direction::Down.angle(), 270);
/// assert_eq!(Direction::from_angle(-90), Some(Direction::Down));
/// assert_eq!(Direction::from_angle(30), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Direction {
    /// East, the usual across direction.
    Across,
    /// North-east.
    DiagonalNe,
    /// North.
    Up,
    /// North-west.
    DiagonalNw,
    /// West, the reverse of across.
    Left,
    /// South-west.
    DiagonalSw,
    /// South, the usual down direction.
    Down,
    /// South-east.
    DiagonalSe,
}

impl Direction {
    /// All directions in increasing angle order.
    pub const ALL: [Self; 8] = [
        Self::Across,
        Self::DiagonalNe,
        Self::Up,
        Self::DiagonalNw,
        Self::Left,
        Self::DiagonalSw,
        Self::Down,
        Self::DiagonalSe,
    ];

    /// Returns the angle of this direction in degrees.
    #[must_use]
    pub const fn angle(self) -> u16 {
        match self {
            Self::Across => 0,
            Self::DiagonalNe => 45,
            Self::Up => 90,
            Self::DiagonalNw => 135,
            Self::Left => 180,
            Self::DiagonalSw => 225,
            Self::Down => 270,
            Self::DiagonalSe => 315,
        }
    }

    /// Returns the direction for an angle in degrees, if it is a multiple of 45.
    ///
    /// Any integer angle is accepted and normalized into `[0, 360)` first.
    #[must_use]
    pub fn from_angle(angle: i32) -> Option<Self> {
        let angle = angle.rem_euclid(360);
        if angle % 45 != 0 {
            return None;
        }
        let index = usize::try_from(angle / 45).ok()?;
        Some(Self::ALL[index])
    }

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Across => Self::Left,
            Self::DiagonalNe => Self::DiagonalSw,
            Self::Up => Self::Down,
            Self::DiagonalNw => Self::DiagonalSe,
            Self::Left => Self::Across,
            Self::DiagonalSw => Self::DiagonalNe,
            Self::Down => Self::Up,
            Self::DiagonalSe => Self::DiagonalNw,
        }
    }

    /// Returns the `(col, row)` step of one move in this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Across => (1, 0),
            Self::DiagonalNe => (1, -1),
            Self::Up => (0, -1),
            Self::DiagonalNw => (-1, -1),
            Self::Left => (-1, 0),
            Self::DiagonalSw => (-1, 1),
            Self::Down => (0, 1),
            Self::DiagonalSe => (1, 1),
        }
    }

    /// Returns `true` for the four diagonal directions.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        let (dcol, drow) = self.delta();
        dcol != 0 && drow != 0
    }

    /// Returns the direction from `from` to `to`.
    ///
    /// Returns `None` unless the two positions share a row, a column, or a
    /// 45 degree diagonal. Identical positions are treated as [`Direction::Across`].
    ///
    /// # Examples
    ///
    /// ```
    /// use xword_core::{Direction, Position};
    ///
    /// let a = Position::new(1, 1);
    /// assert_eq!(Direction::between(a, Position::new(1, 4)), Some(Direction::Down));
    /// assert_eq!(Direction::between(a, Position::new(0, 0)), Some(Direction::DiagonalNw));
    /// assert_eq!(Direction::between(a, Position::new(2, 3)), None);
    /// ```
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let (dcol, drow) = signed_delta(from, to);
        if dcol == 0 && drow == 0 {
            return Some(Self::Across);
        }
        if dcol != 0 && drow != 0 && dcol.abs() != drow.abs() {
            return None;
        }
        let step = (dcol.signum(), drow.signum());
        Self::ALL.into_iter().find(|dir| dir.delta() == step)
    }

    /// Returns the angle from `from` to `to` in whole degrees, in `[0, 360)`.
    ///
    /// Identical positions yield 0.
    #[must_use]
    pub fn angle_between(from: Position, to: Position) -> u16 {
        let (dcol, drow) = signed_delta(from, to);
        #[expect(clippy::cast_precision_loss)]
        let radians = (-drow as f64).atan2(dcol as f64);
        let degrees = radians.to_degrees().round().rem_euclid(360.0);
        #[expect(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let degrees = degrees as u16;
        degrees % 360
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Across => "Across",
            Self::DiagonalNe => "Diagonal NE",
            Self::Up => "Up",
            Self::DiagonalNw => "Diagonal NW",
            Self::Left => "Left",
            Self::DiagonalSw => "Diagonal SW",
            Self::Down => "Down",
            Self::DiagonalSe => "Diagonal SE",
        };
        f.write_str(name)
    }
}

#[expect(clippy::cast_possible_wrap)]
fn signed_delta(from: Position, to: Position) -> (isize, isize) {
    (
        to.col() as isize - from.col() as isize,
        to.row() as isize - from.row() as isize,
    )
}
