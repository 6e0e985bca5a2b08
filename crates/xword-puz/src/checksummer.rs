//! `.puz` file checksums.
//!
//! A `.puz` header carries three kinds of checksum over the puzzle content:
//!
//! - the CIB checksum over the 8-byte control information block (width,
//!   height, clue count, grid type, grid flags);
//! - the primary checksum, seeded with the CIB checksum and run over the
//!   solution, the grid text, the title, author and copyright, every clue and
//!   the notes;
//! - eight masked bytes built from separate checksums of the CIB, the
//!   solution, the grid text, and the remaining text, XORed with `ICHEATED`.
//!
//! Each text field takes part only when it is non-empty. Title, author,
//! copyright and notes include their NUL terminator; clues do not. Notes
//! count only from format version [`NOTES_MIN_VERSION`].

use std::iter::Peekable;

use xword_core::{Clue, Grid, cksum_region};

use crate::{
    Puzzle, PuzzleError,
    encoding::{self, NOTES_MIN_VERSION},
    text,
};

/// Mask XORed into the low bytes of the masked checksums.
const LOW_MASK: [u8; 4] = *b"ICHE";

/// Mask XORed into the high bytes of the masked checksums.
const HIGH_MASK: [u8; 4] = *b"ATED";

/// The checksums stored in a `.puz` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Checksums {
    /// Checksum of the control information block.
    pub cib: u16,
    /// Checksum of the whole puzzle.
    pub primary: u16,
    /// The masked checksum bytes.
    pub masked: [u8; 8],
}

/// Collects the checksummed fields of a puzzle and computes its checksums.
///
/// A checksummer is built either from a [`Puzzle`] or field by field with the
/// setters, for writers that assemble a file incrementally. The accessors
/// return exactly the encoded bytes that were checksummed.
///
/// # Examples
///
/// ```
/// use xword_core::Grid;
/// use xword_puz::{Checksummer, Puzzle};
///
/// let mut grid = Grid::new(2, 2);
/// for (square, ch) in grid.iter_mut().zip("ABCD".chars()) {
///     square.set_solution(&ch.to_string())?;
/// }
/// let mut puzzle = Puzzle::with_grid(grid);
/// puzzle.set_meta("title", "Tiny");
/// puzzle.set_all_clues(["Ab", "Ac", "Bd", "Cd"])?;
///
/// let checksummer = Checksummer::from_puzzle(&puzzle)?;
/// assert_eq!(checksummer.solution(), b"ABCD");
/// assert_eq!(checksummer.grid_text(), b"----");
/// assert_eq!(checksummer.cib(), [2, 2, 4, 0, 1, 0, 0, 0]);
///
/// let checksums = checksummer.checksums();
/// assert!(checksummer.test_checksums(&checksums));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Checksummer {
    cib: [u8; 8],
    solution: Vec<u8>,
    grid_text: Vec<u8>,
    title: Vec<u8>,
    author: Vec<u8>,
    copyright: Vec<u8>,
    clues: Vec<Vec<u8>>,
    notes: Vec<u8>,
    version: u16,
}

impl Checksummer {
    /// Creates a checksummer with every field empty.
    #[must_use]
    pub fn new(version: u16) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Collects the fields of `puzzle` at the puzzle's own format version.
    ///
    /// # Errors
    ///
    /// Fails as [`Checksummer::with_version`] does.
    pub fn from_puzzle(puzzle: &Puzzle) -> Result<Self, PuzzleError> {
        Self::with_version(puzzle, puzzle.version())
    }

    /// Collects the fields of `puzzle` as a version `version` file stores them.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::GridTooLarge`] if a grid dimension does not fit
    /// in a byte, [`PuzzleError::NonNumericClue`] if an across or down clue
    /// cannot be ordered, and [`PuzzleError::Formatted`] or
    /// [`PuzzleError::Encoding`] if text cannot be stored.
    pub fn with_version(puzzle: &Puzzle, version: u16) -> Result<Self, PuzzleError> {
        let grid = puzzle.grid();
        let too_large = || PuzzleError::GridTooLarge {
            width: grid.width(),
            height: grid.height(),
        };
        let width = u8::try_from(grid.width()).map_err(|_| too_large())?;
        let height = u8::try_from(grid.height()).map_err(|_| too_large())?;

        let mut checksummer = Self::new(version);
        checksummer.set_width(width);
        checksummer.set_height(height);
        checksummer.set_grid_type(grid.kind().type_code());
        checksummer.set_grid_flag(grid.flags().bits());

        let (solution, grid_text) = grid_strings(grid);
        checksummer.set_solution(solution);
        checksummer.set_grid_text(grid_text);

        checksummer.set_title(encoding::encode(puzzle.title(), version)?);
        checksummer.set_author(encoding::encode(puzzle.author(), version)?);
        checksummer.set_copyright(encoding::encode(puzzle.copyright(), version)?);
        checksummer.set_notes(text::puz_text(&puzzle.notes(), version)?);

        let clues = ordered_clues(puzzle)?
            .into_iter()
            .map(|clue| text::puz_text(clue.text(), version))
            .collect::<Result<Vec<_>, _>>()?;
        checksummer.set_clues(clues);

        Ok(checksummer)
    }

    /// Computes the checksums of the current fields.
    #[must_use]
    pub fn checksums(&self) -> Checksums {
        let cib = cksum_region(&self.cib, 0);
        let primary = cksum_region(&self.solution, cib);
        let primary = cksum_region(&self.grid_text, primary);
        let primary = self.cksum_text(primary);

        let sums = [
            cib,
            cksum_region(&self.solution, 0),
            cksum_region(&self.grid_text, 0),
            self.cksum_text(0),
        ];
        let mut masked = [0; 8];
        for (i, sum) in sums.into_iter().enumerate() {
            let [low, high] = sum.to_le_bytes();
            masked[i] = LOW_MASK[i] ^ low;
            masked[i + 4] = HIGH_MASK[i] ^ high;
        }

        Checksums {
            cib,
            primary,
            masked,
        }
    }

    /// Returns `true` if `expected` matches the checksums of the current fields.
    ///
    /// Mismatches are logged at debug level.
    #[must_use]
    pub fn test_checksums(&self, expected: &Checksums) -> bool {
        let actual = self.checksums();
        if actual == *expected {
            return true;
        }
        log::debug!("checksum      expected    computed");
        log::debug!("cib           {:>8}    {:>8}", expected.cib, actual.cib);
        log::debug!("primary       {:>8}    {:>8}", expected.primary, actual.primary);
        for (i, (e, a)) in expected.masked.iter().zip(actual.masked).enumerate() {
            log::debug!("masked[{i}]     {e:>8}    {a:>8}");
        }
        false
    }

    /// Runs the checksum over title, author, copyright, clues and notes.
    fn cksum_text(&self, seed: u16) -> u16 {
        let mut cksum = seed;
        for field in [&self.title, &self.author, &self.copyright] {
            cksum = cksum_terminated(field, cksum);
        }
        for clue in &self.clues {
            cksum = cksum_region(clue, cksum);
        }
        if self.version >= NOTES_MIN_VERSION {
            cksum = cksum_terminated(&self.notes, cksum);
        }
        cksum
    }

    // CIB

    /// Returns the control information block.
    #[must_use]
    pub fn cib(&self) -> [u8; 8] {
        self.cib
    }

    /// Sets the grid width.
    pub fn set_width(&mut self, width: u8) {
        self.cib[0] = width;
    }

    /// Sets the grid height.
    pub fn set_height(&mut self, height: u8) {
        self.cib[1] = height;
    }

    /// Sets the number of clues.
    pub fn set_clue_count(&mut self, count: u16) {
        self.cib[2..4].copy_from_slice(&count.to_le_bytes());
    }

    /// Sets the grid type code.
    pub fn set_grid_type(&mut self, grid_type: u16) {
        self.cib[4..6].copy_from_slice(&grid_type.to_le_bytes());
    }

    /// Sets the grid flag word.
    pub fn set_grid_flag(&mut self, flag: u16) {
        self.cib[6..8].copy_from_slice(&flag.to_le_bytes());
    }

    // Content

    /// Returns the solution string.
    #[must_use]
    pub fn solution(&self) -> &[u8] {
        &self.solution
    }

    /// Sets the solution string.
    pub fn set_solution(&mut self, solution: impl Into<Vec<u8>>) {
        self.solution = solution.into();
    }

    /// Returns the player's grid string.
    #[must_use]
    pub fn grid_text(&self) -> &[u8] {
        &self.grid_text
    }

    /// Sets the player's grid string.
    pub fn set_grid_text(&mut self, grid_text: impl Into<Vec<u8>>) {
        self.grid_text = grid_text.into();
    }

    /// Returns the encoded title.
    #[must_use]
    pub fn title(&self) -> &[u8] {
        &self.title
    }

    /// Sets the encoded title.
    pub fn set_title(&mut self, title: impl Into<Vec<u8>>) {
        self.title = title.into();
    }

    /// Returns the encoded author.
    #[must_use]
    pub fn author(&self) -> &[u8] {
        &self.author
    }

    /// Sets the encoded author.
    pub fn set_author(&mut self, author: impl Into<Vec<u8>>) {
        self.author = author.into();
    }

    /// Returns the encoded copyright.
    #[must_use]
    pub fn copyright(&self) -> &[u8] {
        &self.copyright
    }

    /// Sets the encoded copyright.
    pub fn set_copyright(&mut self, copyright: impl Into<Vec<u8>>) {
        self.copyright = copyright.into();
    }

    /// Returns the encoded clues in file order.
    #[must_use]
    pub fn clues(&self) -> &[Vec<u8>] {
        &self.clues
    }

    /// Sets the encoded clues in file order and updates the clue count.
    ///
    /// The count saturates at `u16::MAX`.
    pub fn set_clues(&mut self, clues: Vec<Vec<u8>>) {
        self.set_clue_count(u16::try_from(clues.len()).unwrap_or(u16::MAX));
        self.clues = clues;
    }

    /// Returns the encoded notes.
    #[must_use]
    pub fn notes(&self) -> &[u8] {
        &self.notes
    }

    /// Sets the encoded notes.
    pub fn set_notes(&mut self, notes: impl Into<Vec<u8>>) {
        self.notes = notes.into();
    }

    /// Returns the format version.
    #[must_use]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Sets the format version.
    pub fn set_version(&mut self, version: u16) {
        self.version = version;
    }
}

/// Checksums a NUL-terminated field, skipping it when empty.
fn cksum_terminated(field: &[u8], seed: u16) -> u16 {
    if field.is_empty() {
        return seed;
    }
    cksum_region(&[0], cksum_region(field, seed))
}

/// Builds the row-major solution and player strings.
fn grid_strings(grid: &Grid) -> (Vec<u8>, Vec<u8>) {
    let black = if grid.kind().is_diagramless() { b':' } else { b'.' };
    grid.iter()
        .map(|square| {
            if !square.is_white() {
                return (black, black);
            }
            let text = match square.plain_text() {
                Some(plain) if !square.is_blank() => plain,
                _ => b'-',
            };
            (square.plain_solution(), text)
        })
        .unzip()
}

/// Merges the across and down clues by number, across first on ties.
fn ordered_clues(puzzle: &Puzzle) -> Result<Vec<&Clue>, PuzzleError> {
    let clues = puzzle.clues();
    let numeric = |clue: &Clue| {
        if clue.int() < 0 {
            Err(PuzzleError::NonNumericClue {
                number: clue.number().to_owned(),
            })
        } else {
            Ok(())
        }
    };
    let lists = [clues.across(), clues.down()];
    for clue in lists.iter().flatten().flat_map(|list| list.iter()) {
        numeric(clue)?;
    }

    let mut across = lists[0].into_iter().flatten().peekable();
    let mut down = lists[1].into_iter().flatten().peekable();
    let mut ordered = Vec::with_capacity(clues.clue_count());
    while let Some(clue) = next_by_number(&mut across, &mut down) {
        ordered.push(clue);
    }
    Ok(ordered)
}

fn next_by_number<'a, A, D>(across: &mut Peekable<A>, down: &mut Peekable<D>) -> Option<&'a Clue>
where
    A: Iterator<Item = &'a Clue>,
    D: Iterator<Item = &'a Clue>,
{
    match (across.peek(), down.peek()) {
        (Some(a), Some(d)) if d.int() < a.int() => down.next(),
        (Some(_), _) => across.next(),
        (None, _) => down.next(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use xword_core::{GridFlags, GridKind};

    use super::*;

    /// ```text
    /// . A B
    /// C D E
    /// F G .
    /// ```
    fn sample_puzzle() -> Puzzle {
        let mut grid = Grid::new(3, 3);
        for (square, ch) in grid.iter_mut().zip(".ABCDEFG.".chars()) {
            square.set_solution(&ch.to_string()).unwrap();
        }
        let mut puzzle = Puzzle::with_grid(grid);
        puzzle.set_meta("title", "Test");
        puzzle.set_meta("author", "Me");
        puzzle
            .set_all_clues(["Alpha", "Apple", "Bee", "Cede", "Cf", "Fig"])
            .unwrap();
        puzzle
    }

    mod fields {
        use super::*;

        #[test]
        fn test_from_puzzle() {
            let checksummer = Checksummer::from_puzzle(&sample_puzzle()).unwrap();
            assert_eq!(checksummer.cib(), [3, 3, 6, 0, 1, 0, 0, 0]);
            assert_eq!(checksummer.solution(), b".ABCDEFG.");
            assert_eq!(checksummer.grid_text(), b".-------.");
            assert_eq!(checksummer.title(), b"Test");
            assert_eq!(checksummer.copyright(), b"");
            let clues: Vec<_> = checksummer.clues().iter().map(Vec::as_slice).collect();
            assert_eq!(clues, [&b"Alpha"[..], b"Apple", b"Bee", b"Cede", b"Cf", b"Fig"]);
        }

        #[test]
        fn test_grid_text_uses_player_entries() {
            let mut puzzle = sample_puzzle();
            puzzle.grid_mut()[xword_core::Position::new(1, 0)].set_text("x").unwrap();
            puzzle.grid_mut()[xword_core::Position::new(2, 0)].set_text("EEL").unwrap();
            let checksummer = Checksummer::from_puzzle(&puzzle).unwrap();
            assert_eq!(checksummer.grid_text(), b".XE-----.");
        }

        #[test]
        fn test_diagramless_black_squares() {
            let mut puzzle = sample_puzzle();
            puzzle.grid_mut().set_kind(GridKind::Diagramless);
            puzzle.grid_mut().set_flags(GridFlags::SCRAMBLED);
            let checksummer = Checksummer::from_puzzle(&puzzle).unwrap();
            assert_eq!(checksummer.solution(), b":ABCDEFG:");
            assert_eq!(checksummer.grid_text(), b":-------:");
            assert_eq!(checksummer.cib()[4..], [0x01, 0x04, 0x04, 0x00]);
        }

        #[test]
        fn test_clues_merge_by_number() {
            let mut puzzle = sample_puzzle();
            let down = puzzle.clues_mut().get_clue_list_mut("Down").unwrap();
            down.iter_mut().for_each(|clue| clue.set_text(format!("d{}", clue.number())));
            let across = puzzle.clues_mut().get_clue_list_mut("Across").unwrap();
            across.iter_mut().for_each(|clue| clue.set_text(format!("a{}", clue.number())));

            let checksummer = Checksummer::from_puzzle(&puzzle).unwrap();
            let clues: Vec<_> = checksummer.clues().iter().map(Vec::as_slice).collect();
            assert_eq!(clues, [&b"a1"[..], b"d1", b"d2", b"a3", b"d3", b"a4"]);
        }

        #[test]
        fn test_clue_text_is_unescaped() {
            let mut puzzle = sample_puzzle();
            puzzle
                .clues_mut()
                .get_clue_list_mut("Across")
                .unwrap()
                .find_by_number_mut(1)
                .unwrap()
                .set_text("Salt &amp; pepper<br/>shaker");
            let checksummer = Checksummer::from_puzzle(&puzzle).unwrap();
            assert_eq!(checksummer.clues()[0], b"Salt & pepper\r\nshaker");
        }

        #[test]
        fn test_errors() {
            let mut puzzle = sample_puzzle();
            puzzle.set_meta("author", "\u{263a}");
            assert!(matches!(
                Checksummer::from_puzzle(&puzzle),
                Err(PuzzleError::Encoding(_))
            ));
            assert!(Checksummer::with_version(&puzzle, 20).is_ok());

            let mut puzzle = sample_puzzle();
            puzzle.set_meta("notes", "<i>no</i>");
            assert!(matches!(
                Checksummer::from_puzzle(&puzzle),
                Err(PuzzleError::Formatted { .. })
            ));

            let mut puzzle = sample_puzzle();
            puzzle.clues_mut().entry("Down").push(xword_core::Clue::new("7b", "odd"));
            assert_eq!(
                Checksummer::from_puzzle(&puzzle),
                Err(PuzzleError::NonNumericClue {
                    number: "7b".to_owned()
                })
            );

            let puzzle = Puzzle::with_grid(Grid::new(256, 1));
            assert_eq!(
                Checksummer::from_puzzle(&puzzle),
                Err(PuzzleError::GridTooLarge {
                    width: 256,
                    height: 1
                })
            );
        }
    }

    mod checksums {
        use super::*;

        #[test]
        fn test_known_values() {
            let checksums = Checksummer::from_puzzle(&sample_puzzle()).unwrap().checksums();
            assert_eq!(
                checksums,
                Checksums {
                    cib: 0x6200,
                    primary: 0x44d4,
                    masked: [0x49, 0x30, 0x12, 0x42, 0x23, 0xe4, 0x91, 0xee],
                }
            );
        }

        #[test]
        fn test_known_values_with_notes() {
            let mut puzzle = sample_puzzle();
            puzzle.set_meta("notes", "Be nice");
            let checksums = Checksummer::from_puzzle(&puzzle).unwrap().checksums();
            assert_eq!(
                checksums,
                Checksums {
                    cib: 0x6200,
                    primary: 0x2ca7,
                    masked: [0x49, 0x30, 0x12, 0x49, 0x23, 0xe4, 0x91, 0x24],
                }
            );
        }

        #[test]
        fn test_notes_ignored_before_version_13() {
            let plain = Checksummer::with_version(&sample_puzzle(), 12).unwrap().checksums();
            let mut puzzle = sample_puzzle();
            puzzle.set_meta("notes", "Be nice");
            let noted = Checksummer::with_version(&puzzle, 12).unwrap().checksums();
            assert_eq!(plain, noted);
        }

        #[test]
        fn test_empty_fields_do_not_count() {
            let base = Checksummer::from_puzzle(&sample_puzzle()).unwrap().checksums();
            let mut puzzle = sample_puzzle();
            puzzle.set_meta("copyright", "");
            puzzle.set_meta("notes", "");
            puzzle.set_meta("description", "");
            assert_eq!(Checksummer::from_puzzle(&puzzle).unwrap().checksums(), base);
        }

        #[test]
        fn test_incremental_matches_from_puzzle() {
            let from_puzzle = Checksummer::from_puzzle(&sample_puzzle()).unwrap();
            let mut built = Checksummer::new(13);
            built.set_width(3);
            built.set_height(3);
            built.set_grid_type(0x0001);
            built.set_grid_flag(0);
            built.set_solution(*b".ABCDEFG.");
            built.set_grid_text(*b".-------.");
            built.set_title(*b"Test");
            built.set_author(*b"Me");
            built.set_clues(
                ["Alpha", "Apple", "Bee", "Cede", "Cf", "Fig"]
                    .map(|clue| clue.as_bytes().to_vec())
                    .to_vec(),
            );
            assert_eq!(built, from_puzzle);
            assert_eq!(built.checksums(), from_puzzle.checksums());
        }

        #[test]
        fn test_mismatch() {
            let checksummer = Checksummer::from_puzzle(&sample_puzzle()).unwrap();
            let mut checksums = checksummer.checksums();
            assert!(checksummer.test_checksums(&checksums));
            checksums.masked[7] ^= 1;
            assert!(!checksummer.test_checksums(&checksums));
        }

        proptest! {
            #[test]
            fn proptest_deterministic(title in "[ -~]{0,20}", notes in "[a-z ]{0,20}") {
                let mut puzzle = sample_puzzle();
                puzzle.set_meta("title", title);
                puzzle.set_meta("notes", notes);
                let a = Checksummer::from_puzzle(&puzzle).unwrap();
                let b = Checksummer::from_puzzle(&puzzle).unwrap();
                prop_assert_eq!(a.checksums(), b.checksums());
            }

            #[test]
            fn proptest_title_leaves_grid_sums(title in "[A-Z]{0,20}") {
                let base = Checksummer::from_puzzle(&sample_puzzle()).unwrap();
                let mut changed = base.clone();
                changed.set_title(title.into_bytes());
                let (base, changed) = (base.checksums(), changed.checksums());
                prop_assert_eq!(base.cib, changed.cib);
                prop_assert_eq!(&base.masked[..3], &changed.masked[..3]);
                prop_assert_eq!(&base.masked[4..7], &changed.masked[4..7]);
            }
        }
    }
}
