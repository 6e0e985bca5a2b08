//! Error types for `.puz` text handling and puzzle assembly.

/// Errors raised when encoding text for a `.puz` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EncodingError {
    /// The character has no Windows-1252 encoding.
    #[display("character {ch:?} cannot be encoded in a version {version} puzzle")]
    Unencodable {
        /// The offending character.
        ch: char,
        /// The format version that selected the encoding.
        version: u16,
    },
}

/// Errors raised by [`Puzzle`](crate::Puzzle) operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PuzzleError {
    /// Text could not be encoded.
    #[display("cannot encode text: {_0}")]
    #[from]
    Encoding(EncodingError),
    /// Text carries markup other than line breaks.
    #[display("puz format does not support formatted text: {text:?}")]
    Formatted {
        /// The rejected text.
        text: String,
    },
    /// The clue lists do not match the numbered grid.
    #[display("{direction} clue count mismatch: grid has {expected}, list has {found}")]
    InvalidClues {
        /// The clue list direction.
        direction: String,
        /// Clues the grid asks for.
        expected: usize,
        /// Clues present.
        found: usize,
    },
    /// The grid does not fit in a `.puz` header.
    #[display("{width}x{height} grid is too large for a puz file")]
    GridTooLarge {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// The number of clue texts does not match the numbered grid.
    #[display("grid wants {expected} clues, got {found}")]
    ClueCount {
        /// Clues the grid asks for.
        expected: usize,
        /// Clue texts given.
        found: usize,
    },
    /// A clue number is not numeric and cannot be ordered.
    #[display("clue number {number:?} is not numeric")]
    NonNumericClue {
        /// The clue's number as written.
        number: String,
    },
}
