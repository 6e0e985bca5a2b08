//! `.puz` support for crossword puzzles.
//!
//! This crate connects the format-independent model of [`xword_core`] to the
//! Across Lite `.puz` format: the [`Puzzle`] document with its metadata, text
//! encoding by format version, and the [`Checksummer`] that computes the
//! header checksums.
//!
//! # Overview
//!
//! - [`puzzle`]: the puzzle document and clue numbering
//! - [`encoding`]: Windows-1252 and UTF-8 text by format version
//! - [`text`]: conversion of XML-escaped text to plain `.puz` text
//! - [`checksummer`]: CIB, primary, and masked checksums
//!
//! # Examples
//!
//! ```
//! use xword_core::{Grid, Position};
//! use xword_puz::{Checksummer, Puzzle};
//!
//! let mut grid = Grid::new(3, 3);
//! for (square, ch) in grid.iter_mut().zip("CATARETEN".chars()) {
//!     square.set_solution(&ch.to_string())?;
//! }
//! let mut puzzle = Puzzle::with_grid(grid);
//! puzzle.set_meta("title", "Pets");
//! puzzle.set_all_clues(["Feline", "Taxi", "Consumed", "Region", "Stop", "Decade"])?;
//! assert_eq!(puzzle.grid()[Position::new(0, 1)].number(), "4");
//!
//! let empty = Checksummer::from_puzzle(&puzzle)?.checksums();
//! puzzle.grid_mut()[Position::new(0, 0)].set_text("C")?;
//! let filled = Checksummer::from_puzzle(&puzzle)?.checksums();
//! assert_eq!(empty.cib, filled.cib);
//! assert_ne!(empty.primary, filled.primary);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod checksummer;
pub mod encoding;
pub mod error;
pub mod puzzle;
pub mod text;

// Re-export commonly used types
pub use self::{
    checksummer::{Checksummer, Checksums},
    error::{EncodingError, PuzzleError},
    puzzle::Puzzle,
};
