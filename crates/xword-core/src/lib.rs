//! Core data structures for crossword puzzles.
//!
//! This crate models a crossword document independently of any file format:
//! the grid of squares, the words running through it, and the clues that
//! describe them. It also implements the two algorithms the `.puz` format
//! relies on, the rolling checksum and the solution scrambler.
//!
//! # Overview
//!
//! 1. **Geometry**
//!    - [`position`]: `(col, row)` coordinates
//!    - [`direction`]: the eight compass directions and their angles
//!
//! 2. **Document model**
//!    - [`square`]: a single cell with its entry, solution, and markup
//!    - [`grid`]: the rectangular grid, traversal, numbering, and checks
//!    - [`word`]: straight or explicit runs of squares
//!    - [`clue`]: clues, clue lists, and the per-direction collection
//!
//! 3. **Format algorithms**
//!    - [`char_table`]: Windows-1252 tables mapping entries to grid and plain letters
//!    - [`checksum`]: the 16-bit `.puz` checksum
//!    - [`scramble`]: the keyed solution scrambler and key search
//!
//! # Examples
//!
//! ```
//! use xword_core::{Direction, Grid, Position};
//!
//! let mut grid = Grid::new(5, 5);
//! for pos in [Position::new(0, 0), Position::new(4, 4)] {
//!     grid[pos].set_solution(".")?;
//! }
//! grid.number_grid();
//!
//! assert_eq!(grid[Position::new(1, 0)].number(), "1");
//! assert_eq!(grid[Position::new(0, 1)].number(), "5");
//! let (across, down) = grid.count_clues();
//! assert_eq!((across, down), (5, 5));
//!
//! let word = grid.word_at(Position::new(2, 2), Direction::Down).unwrap();
//! assert_eq!(word.len(), 5);
//! # Ok::<(), xword_core::SquareError>(())
//! ```

pub mod char_table;
pub mod checksum;
pub mod clue;
pub mod direction;
pub mod error;
pub mod grid;
pub mod position;
pub mod scramble;
pub mod square;
pub mod word;

// Re-export commonly used types
pub use self::{
    checksum::cksum_region,
    clue::{Clue, ClueList, Clues},
    direction::Direction,
    error::{CluesError, GridError, SquareError, WordError},
    grid::{Grid, GridFlags, GridKind},
    position::Position,
    scramble::{KeyAttempt, KeySearch, Scrambler},
    square::{Color, Corner, Side, Square, SquareFlags, Validation},
    word::Word,
};
