//! Error types for grid, square, word, and clue operations.

use crate::{Position, square::REBUS_ENTRY_LENGTH};

/// Errors raised by [`Grid`](crate::Grid) accessors and checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// The coordinates lie outside the grid.
    #[display("square ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfRange {
        /// Requested column.
        col: usize,
        /// Requested row.
        row: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// A word was required but none was given.
    #[display("no word to check")]
    NoWord,
}

/// Errors raised when setting square contents.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SquareError {
    /// The entry is longer than a rebus may be.
    #[display("entry has {len} characters (at most {REBUS_ENTRY_LENGTH} allowed)")]
    LongString {
        /// Number of characters in the rejected entry.
        len: usize,
    },
    /// The entry contains a character that cannot appear in a square.
    #[display("character {ch:?} is not allowed in a square")]
    InvalidString {
        /// The offending character.
        ch: char,
    },
    /// The square does not hold a symbol.
    #[display("square has no symbol")]
    NoSymbol,
    /// A color string is not a 3 or 6 digit hex value.
    #[display("invalid color {text:?}")]
    InvalidColor {
        /// The rejected input.
        text: String,
    },
}

/// Errors raised when constructing a [`Word`](crate::Word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WordError {
    /// The endpoints of a straight word are not on a line of 45 degree multiples.
    #[display("squares {start} and {end} are not aligned")]
    NotAligned {
        /// First square of the word.
        start: Position,
        /// Last square of the word.
        end: Position,
    },
    /// An explicit word was given no squares.
    #[display("word has no squares")]
    Empty,
}

/// Errors raised by [`Clues`](crate::Clues) lookups.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CluesError {
    /// No clue list exists for the direction.
    #[display("unknown clue direction: {direction}")]
    NoClues {
        /// The requested direction name.
        direction: String,
    },
}
