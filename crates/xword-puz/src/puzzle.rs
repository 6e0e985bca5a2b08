//! The puzzle document.

use xword_core::{Clue, ClueList, Clues, Direction, Grid, Position, clue};

use crate::{PuzzleError, encoding::DEFAULT_VERSION};

/// Metadata keys combined into the puzzle notes, in order.
const NOTES_KEYS: [&str; 3] = ["notes", "description", "instructions"];

/// A crossword puzzle: grid, clues, and metadata.
///
/// Metadata is an ordered list of key/value pairs. The keys `title`,
/// `author`, `copyright`, `notes`, `description` and `instructions` have
/// accessors; any other key is kept as is.
///
/// # Examples
///
/// ```
/// use xword_puz::Puzzle;
///
/// let mut puzzle = Puzzle::new();
/// puzzle.set_meta("title", "Sunday Special");
/// puzzle.set_meta("notes", "Theme entries are circled.");
/// puzzle.set_meta("instructions", "Read the circles top to bottom.");
///
/// assert_eq!(puzzle.title(), "Sunday Special");
/// assert_eq!(
///     puzzle.notes(),
///     "Notes\nTheme entries are circled.\n\nInstructions\nRead the circles top to bottom.",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    grid: Grid,
    clues: Clues,
    metadata: Vec<(String, String)>,
    version: u16,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl Puzzle {
    /// Creates an empty puzzle at the default format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            clues: Clues::new(),
            metadata: Vec::new(),
            version: DEFAULT_VERSION,
        }
    }

    /// Creates a puzzle around an existing grid.
    #[must_use]
    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::new()
        }
    }

    /// Returns the grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the grid mutably.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Returns the clues.
    #[must_use]
    pub fn clues(&self) -> &Clues {
        &self.clues
    }

    /// Returns the clues mutably.
    pub fn clues_mut(&mut self) -> &mut Clues {
        &mut self.clues
    }

    /// Returns the `.puz` format version.
    #[must_use]
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Sets the `.puz` format version.
    pub fn set_version(&mut self, version: u16) {
        self.version = version;
    }

    /// Returns `true` if the grid's solution is scrambled.
    #[must_use]
    pub fn is_scrambled(&self) -> bool {
        self.grid.is_scrambled()
    }

    // Metadata

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Stores `value` under `key`, keeping the key's position if it exists.
    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.metadata.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.metadata.push((key, value)),
        }
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove_meta(&mut self, key: &str) -> Option<String> {
        let index = self.metadata.iter().position(|(k, _)| k == key)?;
        Some(self.metadata.remove(index).1)
    }

    /// Iterates over the metadata in insertion order.
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the title, or `""`.
    #[must_use]
    pub fn title(&self) -> &str {
        self.meta("title").unwrap_or_default()
    }

    /// Returns the author, or `""`.
    #[must_use]
    pub fn author(&self) -> &str {
        self.meta("author").unwrap_or_default()
    }

    /// Returns the copyright, or `""`.
    #[must_use]
    pub fn copyright(&self) -> &str {
        self.meta("copyright").unwrap_or_default()
    }

    /// Combines the notes, description and instructions into one text.
    ///
    /// Empty sections are skipped. A lone section is returned as is; when
    /// several are present each is headed by its title-cased key and they
    /// are separated by a blank line.
    #[must_use]
    pub fn notes(&self) -> String {
        let sections: Vec<_> = NOTES_KEYS
            .iter()
            .filter_map(|&key| self.meta(key).filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect();
        match sections.as_slice() {
            [] => String::new(),
            [(_, value)] => (*value).to_owned(),
            _ => sections
                .iter()
                .map(|(key, value)| format!("{}\n{value}", title_case(key)))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    // Numbering

    /// Numbers the grid, then renumbers the across and down clues in grid
    /// order and attaches their words.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidClues`] if a list's length differs from
    /// the number of squares wanting a clue in that direction. The grid is
    /// numbered even on error; the clues are left untouched.
    pub fn number_clues(&mut self) -> Result<(), PuzzleError> {
        self.grid.number_grid();
        let (across, down) = self.clue_starts();
        for (key, starts) in [(clue::ACROSS, &across), (clue::DOWN, &down)] {
            let found = self.clues.get_clue_list(key).map_or(0, |list| list.len());
            if found != starts.len() {
                return Err(PuzzleError::InvalidClues {
                    direction: key.to_owned(),
                    expected: starts.len(),
                    found,
                });
            }
        }

        for (key, starts, dir) in [
            (clue::ACROSS, across, Direction::Across),
            (clue::DOWN, down, Direction::Down),
        ] {
            let Ok(list) = self.clues.get_clue_list_mut(key) else {
                continue;
            };
            for (clue, pos) in list.iter_mut().zip(starts) {
                clue.set_number(self.grid[pos].number());
                match self.grid.word_at(pos, dir) {
                    Some(word) => clue.set_word(word),
                    None => clue.clear_word(),
                }
            }
        }
        Ok(())
    }

    /// Numbers the grid and replaces the across and down clues with `texts`,
    /// taken in grid order: for each square, its across clue, then its down
    /// clue.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::ClueCount`] if the number of texts differs from
    /// the number of clues the grid wants. The clues are left untouched on
    /// error.
    pub fn set_all_clues<S: Into<String>>(
        &mut self,
        texts: impl IntoIterator<Item = S>,
    ) -> Result<(), PuzzleError> {
        self.grid.number_grid();
        let texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        let grid = &self.grid;
        let starts: Vec<(Position, Direction)> = grid
            .positions()
            .flat_map(move |pos| {
                [Direction::Across, Direction::Down]
                    .into_iter()
                    .filter(move |&dir| grid.wants_clue(pos, dir))
                    .map(move |dir| (pos, dir))
            })
            .collect();
        if texts.len() != starts.len() {
            return Err(PuzzleError::ClueCount {
                expected: starts.len(),
                found: texts.len(),
            });
        }

        let mut across = ClueList::default();
        let mut down = ClueList::default();
        for ((pos, dir), text) in starts.into_iter().zip(texts) {
            let mut clue = Clue::new(grid[pos].number(), text);
            if let Some(word) = grid.word_at(pos, dir) {
                clue.set_word(word);
            }
            if dir.is_across() {
                across.push(clue);
            } else {
                down.push(clue);
            }
        }
        self.clues.set_clue_list(clue::ACROSS, across);
        self.clues.set_clue_list(clue::DOWN, down);
        Ok(())
    }

    fn clue_starts(&self) -> (Vec<Position>, Vec<Position>) {
        let starts = |dir| {
            self.grid
                .positions()
                .filter(|&pos| self.grid.wants_clue(pos, dir))
                .collect::<Vec<_>>()
        };
        (starts(Direction::Across), starts(Direction::Down))
    }
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
