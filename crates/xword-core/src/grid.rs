//! The crossword grid.

use std::{
    collections::BTreeMap,
    ops::{Index, IndexMut},
};

use rand::Rng;

use crate::{
    Direction, GridError, Position, Square, Word,
    scramble::{self, KeySearch, Scrambler},
    square::SquareFlags,
};

/// The layout variant of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum GridKind {
    /// An ordinary crossword.
    #[default]
    Normal,
    /// A crossword whose black squares are hidden from the solver.
    Diagramless,
    /// An acrostic, where squares sharing a number are linked.
    Acrostic,
    /// A coded crossword, where squares sharing a number are linked.
    Coded,
}

impl GridKind {
    /// Returns the `.puz` grid type code.
    ///
    /// Acrostic and coded grids are stored as normal grids.
    #[must_use]
    pub const fn type_code(self) -> u16 {
        match self {
            Self::Diagramless => 0x0401,
            Self::Normal | Self::Acrostic | Self::Coded => 0x0001,
        }
    }

    /// Returns the grid kind for a `.puz` grid type code.
    #[must_use]
    pub const fn from_type_code(code: u16) -> Self {
        match code {
            0x0401 => Self::Diagramless,
            _ => Self::Normal,
        }
    }

    /// Returns `true` if squares sharing a clue number are linked as partners.
    #[must_use]
    pub const fn has_partners(self) -> bool {
        matches!(self, Self::Acrostic | Self::Coded)
    }
}

bitflags::bitflags! {
    /// Grid-wide flags, stored as the `.puz` grid flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GridFlags: u16 {
        /// The puzzle has no solution.
        const NO_SOLUTION = 0x0002;
        /// The solution is scrambled.
        const SCRAMBLED = 0x0004;
    }
}

/// A rectangular grid of squares.
///
/// Squares are stored in row-major order and addressed by [`Position`].
/// Adjacency is computed from the grid dimensions on demand, so traversal is
/// always consistent with the current size.
///
/// Traversal in [`Direction::Across`] and [`Direction::Down`] wraps like a
/// flattened grid: across runs row by row and down runs column by column.
/// [`Direction::Left`] and [`Direction::Up`] are their reverses. Diagonal
/// steps never wrap.
///
/// # Examples
///
/// ```
/// use xword_core::{Direction, Grid, Position};
///
/// let mut grid = Grid::new(3, 2);
/// assert_eq!(grid.next(Position::new(2, 0), Direction::Across), Some(Position::new(0, 1)));
/// assert_eq!(grid.next(Position::new(0, 1), Direction::Down), Some(Position::new(1, 0)));
/// assert_eq!(grid.next(Position::new(2, 1), Direction::Across), None);
/// assert_eq!(grid.next(Position::new(2, 0), Direction::DiagonalSe), None);
///
/// grid.at_mut(1, 0)?.set_solution(".")?;
/// grid.number_grid();
/// assert_eq!(grid.at(0, 0)?.number(), "1");
/// assert_eq!(grid.at(2, 0)?.number(), "2");
/// assert_eq!(grid.at(1, 1)?.number(), "");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    squares: Vec<Square>,
    kind: GridKind,
    flags: GridFlags,
    key: u16,
    checksum: u16,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Grid {
    /// Creates a grid of white, blank squares.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width: 0,
            height: 0,
            squares: Vec::new(),
            kind: GridKind::Normal,
            flags: GridFlags::empty(),
            key: 0,
            checksum: 0,
        };
        grid.set_size(width, height);
        grid
    }

    /// Returns the number of columns.
    #[must_use]
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the grid has no squares.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Resizes the grid.
    ///
    /// Squares inside both the old and new bounds keep their contents, new
    /// squares are white and blank, and partner links to removed squares are
    /// dropped.
    pub fn set_size(&mut self, width: usize, height: usize) {
        let (old_width, old_height) = (self.width, self.height);
        let mut old: Vec<Option<Square>> = std::mem::take(&mut self.squares)
            .into_iter()
            .map(Some)
            .collect();
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };

        self.squares = (0..width * height)
            .map(|index| {
                let pos = Position::from_index(index, width);
                let kept = (pos.col() < old_width && pos.row() < old_height)
                    .then(|| old[pos.to_index(old_width)].take())
                    .flatten();
                match kept {
                    Some(mut square) => {
                        square.set_position(pos);
                        square
                    }
                    None => Square::new(pos),
                }
            })
            .collect();
        self.width = width;
        self.height = height;

        for square in &mut self.squares {
            square.retain_partners(|p| p.col() < width && p.row() < height);
        }
    }

    // Grid metadata

    /// Returns the layout variant.
    #[must_use]
    pub fn kind(&self) -> GridKind {
        self.kind
    }

    /// Sets the layout variant.
    pub fn set_kind(&mut self, kind: GridKind) {
        self.kind = kind;
    }

    /// Returns the grid flags.
    #[must_use]
    pub fn flags(&self) -> GridFlags {
        self.flags
    }

    /// Replaces the grid flags.
    pub fn set_flags(&mut self, flags: GridFlags) {
        self.flags = flags;
    }

    /// Returns `true` if any of `flag` is set.
    #[must_use]
    pub fn has_flag(&self, flag: GridFlags) -> bool {
        self.flags.intersects(flag)
    }

    /// Returns `true` if the solution is scrambled.
    #[must_use]
    pub fn is_scrambled(&self) -> bool {
        self.has_flag(GridFlags::SCRAMBLED)
    }

    /// Returns `true` if the grid carries a solution.
    #[must_use]
    pub fn has_solution(&self) -> bool {
        !self.has_flag(GridFlags::NO_SOLUTION)
    }

    /// Returns the scrambling key, zero if none.
    #[must_use]
    pub fn key(&self) -> u16 {
        self.key
    }

    /// Sets the scrambling key.
    pub fn set_key(&mut self, key: u16) {
        self.key = key;
    }

    /// Returns the checksum of the unscrambled solution, zero if none.
    #[must_use]
    pub fn checksum(&self) -> u16 {
        self.checksum
    }

    /// Sets the checksum of the unscrambled solution.
    pub fn set_checksum(&mut self, checksum: u16) {
        self.checksum = checksum;
    }

    // Access

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.col() < self.width && pos.row() < self.height
    }

    /// Returns the square at `pos`, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Square> {
        self.contains(pos)
            .then(|| &self.squares[pos.to_index(self.width)])
    }

    /// Returns the square at `pos` mutably, if it lies inside the grid.
    #[must_use]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Square> {
        if self.contains(pos) {
            Some(&mut self.squares[pos.to_index(self.width)])
        } else {
            None
        }
    }

    /// Returns the square at `(col, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if the coordinates lie outside the grid.
    pub fn at(&self, col: usize, row: usize) -> Result<&Square, GridError> {
        let err = self.out_of_range(col, row);
        self.get(Position::new(col, row)).ok_or(err)
    }

    /// Returns the square at `(col, row)` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if the coordinates lie outside the grid.
    pub fn at_mut(&mut self, col: usize, row: usize) -> Result<&mut Square, GridError> {
        let err = self.out_of_range(col, row);
        self.get_mut(Position::new(col, row)).ok_or(err)
    }

    fn out_of_range(&self, col: usize, row: usize) -> GridError {
        GridError::OutOfRange {
            col,
            row,
            width: self.width,
            height: self.height,
        }
    }

    /// Iterates over the squares in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Square> {
        self.squares.iter()
    }

    /// Iterates mutably over the squares in row-major order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Square> {
        self.squares.iter_mut()
    }

    /// Iterates over the squares in column-major ("down") order.
    pub fn iter_down(&self) -> impl Iterator<Item = &Square> + '_ {
        self.positions_down().map(|pos| &self[pos])
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width;
        (0..self.squares.len()).map(move |index| Position::from_index(index, width))
    }

    /// Iterates over all positions in column-major ("down") order.
    pub fn positions_down(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width, self.height);
        (0..width).flat_map(move |col| (0..height).map(move |row| Position::new(col, row)))
    }

    // Traversal

    /// Returns the first square in across order.
    #[must_use]
    pub fn first(&self) -> Option<Position> {
        (!self.is_empty()).then_some(Position::new(0, 0))
    }

    /// Returns the last square in across order.
    #[must_use]
    pub fn last(&self) -> Option<Position> {
        (!self.is_empty()).then(|| Position::new(self.width - 1, self.height - 1))
    }

    /// Returns the first white square in across order.
    #[must_use]
    pub fn first_white(&self) -> Option<Position> {
        self.iter().find(|sq| sq.is_white()).map(Square::position)
    }

    /// Returns the last white square in across order.
    #[must_use]
    pub fn last_white(&self) -> Option<Position> {
        self.iter().rev().find(|sq| sq.is_white()).map(Square::position)
    }

    /// Returns the square after `pos` in direction `dir`.
    ///
    /// Across and down traversal wrap to the next row or column; the last
    /// square has no successor. Diagonals return `None` at the grid edge.
    #[must_use]
    pub fn next(&self, pos: Position, dir: Direction) -> Option<Position> {
        if !self.contains(pos) {
            return None;
        }
        let (width, height) = (self.width, self.height);
        let (col, row) = (pos.col(), pos.row());
        let (col, row) = match dir {
            Direction::Across if col + 1 < width => (col + 1, row),
            Direction::Across if row + 1 < height => (0, row + 1),
            Direction::Left if col > 0 => (col - 1, row),
            Direction::Left if row > 0 => (width - 1, row - 1),
            Direction::Down if row + 1 < height => (col, row + 1),
            Direction::Down if col + 1 < width => (col + 1, 0),
            Direction::Up if row > 0 => (col, row - 1),
            Direction::Up if col > 0 => (col - 1, height - 1),
            Direction::Across | Direction::Left | Direction::Down | Direction::Up => return None,
            _ => {
                let (dcol, drow) = dir.delta();
                return pos.offset(dcol, drow, width, height);
            }
        };
        Some(Position::new(col, row))
    }

    /// Returns the square before `pos` in direction `dir`.
    #[must_use]
    pub fn prev(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.next(pos, dir.opposite())
    }

    /// Returns the successor of `pos` in every direction, in [`Direction::ALL`] order.
    #[must_use]
    pub fn neighbors(&self, pos: Position) -> [Option<Position>; 8] {
        Direction::ALL.map(|dir| self.next(pos, dir))
    }

    /// Returns `true` if a geometric step from `pos` in `dir` leaves the grid.
    #[must_use]
    pub fn is_edge(&self, pos: Position, dir: Direction) -> bool {
        let (dcol, drow) = dir.delta();
        pos.offset(dcol, drow, self.width, self.height).is_none()
    }

    // Words

    /// Walks from `pos` in `dir` while squares are white and returns the last
    /// white square reached.
    ///
    /// The walk stops at the grid edge without wrapping. Returns `None` if the
    /// square at `pos` is not white.
    #[must_use]
    pub fn find_word_boundary(&self, pos: Position, dir: Direction) -> Option<Position> {
        if !self.get(pos)?.is_white() {
            return None;
        }
        let (dcol, drow) = dir.delta();
        let mut current = pos;
        while let Some(next) = current.offset(dcol, drow, self.width, self.height) {
            if !self[next].is_white() {
                break;
            }
            current = next;
        }
        Some(current)
    }

    /// Returns the first square of the word through `pos` in `dir`.
    #[must_use]
    pub fn word_start(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.find_word_boundary(pos, dir.opposite())
    }

    /// Returns the last square of the word through `pos` in `dir`.
    #[must_use]
    pub fn word_end(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.find_word_boundary(pos, dir)
    }

    /// Returns the word through `pos` in `dir`, if it has more than one square.
    #[must_use]
    pub fn word_at(&self, pos: Position, dir: Direction) -> Option<Word> {
        let start = self.word_start(pos, dir)?;
        let end = self.word_end(pos, dir)?;
        if start == end {
            return None;
        }
        Word::straight(start, end).ok()
    }

    /// Returns `true` if `pos` starts a word of two or more squares in `dir`.
    #[must_use]
    pub fn wants_clue(&self, pos: Position, dir: Direction) -> bool {
        self.get(pos).is_some_and(Square::is_white)
            && self.word_start(pos, dir) == Some(pos)
            && self.word_end(pos, dir) != Some(pos)
    }

    /// Returns `true` if `pos` wants an across or a down clue.
    #[must_use]
    pub fn has_clue(&self, pos: Position) -> bool {
        self.wants_clue(pos, Direction::Across) || self.wants_clue(pos, Direction::Down)
    }

    /// Returns the number of squares wanting an across and a down clue.
    #[must_use]
    pub fn count_clues(&self) -> (usize, usize) {
        self.positions().fold((0, 0), |(across, down), pos| {
            (
                across + usize::from(self.wants_clue(pos, Direction::Across)),
                down + usize::from(self.wants_clue(pos, Direction::Down)),
            )
        })
    }

    /// Numbers the grid.
    ///
    /// Squares that want a clue are labelled 1, 2, 3, ... in row-major order;
    /// every other square loses its label.
    pub fn number_grid(&mut self) {
        let numbered: Vec<bool> = self.positions().map(|pos| self.has_clue(pos)).collect();
        let mut number = 1;
        for (square, has_clue) in self.squares.iter_mut().zip(numbered) {
            if has_clue {
                square.set_number(number.to_string());
                number += 1;
            } else {
                square.clear_number();
            }
        }
    }

    // Partners

    /// Links squares sharing a clue number in acrostic and coded grids.
    ///
    /// Existing links are cleared first. Other grid kinds are left untouched.
    pub fn find_partner_squares(&mut self) {
        if !self.kind.has_partners() {
            return;
        }
        self.clear_partners();
        let mut groups: BTreeMap<String, Vec<Position>> = BTreeMap::new();
        for square in self.iter().filter(|sq| sq.has_number()) {
            groups
                .entry(square.number().to_owned())
                .or_default()
                .push(square.position());
        }
        for group in groups.values() {
            for (i, &a) in group.iter().enumerate() {
                for &b in &group[i + 1..] {
                    self[a].add_partner(b);
                    self[b].add_partner(a);
                }
            }
        }
    }

    /// Links two squares as partners of each other.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] if either square lies outside the grid.
    pub fn link_partners(&mut self, a: Position, b: Position) -> Result<(), GridError> {
        for pos in [a, b] {
            if !self.contains(pos) {
                return Err(self.out_of_range(pos.col(), pos.row()));
            }
        }
        self[a].add_partner(b);
        self[b].add_partner(a);
        Ok(())
    }

    /// Removes all partner links.
    pub fn clear_partners(&mut self) {
        for square in &mut self.squares {
            square.clear_partners();
        }
    }

    // Checking

    /// Returns the positions of all incorrect squares.
    ///
    /// See [`Square::check`] for the meaning of the options.
    #[must_use]
    pub fn check_grid(&self, check_blank: bool, strict_rebus: bool) -> Vec<Position> {
        self.iter()
            .filter(|sq| !sq.check(check_blank, strict_rebus))
            .map(Square::position)
            .collect()
    }

    /// Returns the positions of incorrect squares in `word`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NoWord`] if `word` is `None`, or
    /// [`GridError::OutOfRange`] if the word leaves the grid.
    pub fn check_word(
        &self,
        word: Option<&Word>,
        check_blank: bool,
        strict_rebus: bool,
    ) -> Result<Vec<Position>, GridError> {
        let word = word.ok_or(GridError::NoWord)?;
        let mut incorrect = Vec::new();
        for pos in word.positions() {
            let square = self.at(pos.col(), pos.row())?;
            if !square.check(check_blank, strict_rebus) {
                incorrect.push(pos);
            }
        }
        Ok(incorrect)
    }

    // Text dumps

    /// Returns the plain solution letters in row-major order, with `delim`
    /// after each row.
    #[must_use]
    pub fn solution_string(&self, delim: &str) -> String {
        self.row_string(delim, |sq| char::from(sq.plain_solution()))
    }

    /// Returns the plain entry letters in row-major order, with `delim` after
    /// each row.
    ///
    /// Pencilled entries are lower-case, and entries with no plain form are `-`.
    #[must_use]
    pub fn text_string(&self, delim: &str) -> String {
        self.row_string(delim, |sq| {
            let plain = char::from(sq.plain_text().unwrap_or(b'-'));
            if sq.has_flag(SquareFlags::PENCIL) {
                plain.to_ascii_lowercase()
            } else {
                plain
            }
        })
    }

    /// Returns the GEXT byte of every square in row-major order.
    #[must_use]
    pub fn gext_bytes(&self) -> Vec<u8> {
        self.iter().map(Square::gext).collect()
    }

    fn row_string(&self, delim: &str, mut f: impl FnMut(&Square) -> char) -> String {
        let mut data = String::with_capacity(self.squares.len() + self.height * delim.len());
        for row in self.squares.chunks(self.width.max(1)) {
            data.extend(row.iter().map(&mut f));
            data.push_str(delim);
        }
        data
    }

    // Scrambling

    /// Scrambles the solution with `key`.
    ///
    /// A `key` of zero reuses the grid's key, or picks a random one if the
    /// grid has none. Returns `false` and leaves the grid unchanged if the
    /// solution cannot be scrambled.
    pub fn scramble_solution(&mut self, key: u16) -> bool {
        Scrambler::new(self).scramble_solution(key)
    }

    /// Scrambles the solution, drawing a missing key from `rng`.
    pub fn scramble_solution_with_rng<R: Rng>(&mut self, key: u16, rng: &mut R) -> bool {
        Scrambler::new(self).scramble_solution_with_rng(key, rng)
    }

    /// Unscrambles the solution with `key`.
    ///
    /// Returns `false` and leaves the grid unchanged if the result does not
    /// match the stored checksum.
    pub fn unscramble_solution(&mut self, key: u16) -> bool {
        Scrambler::new(self).unscramble_solution(key)
    }

    /// Returns `true` if the player's entries match the scrambled solution's
    /// stored checksum.
    #[must_use]
    pub fn check_scrambled_grid(&self) -> bool {
        scramble::check_user_grid(self)
    }

    /// Starts an exhaustive search for the scrambling key.
    #[must_use]
    pub fn key_search(&self) -> KeySearch {
        KeySearch::new(self)
    }
}

impl Index<Position> for Grid {
    type Output = Square;

    fn index(&self, pos: Position) -> &Self::Output {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {}x{} grid",
            self.width,
            self.height
        );
        &self.squares[pos.to_index(self.width)]
    }
}

impl IndexMut<Position> for Grid {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        assert!(
            self.contains(pos),
            "position {pos} out of range for {}x{} grid",
            self.width,
            self.height
        );
        &mut self.squares[pos.to_index(self.width)]
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Square;
    type IntoIter = std::slice::Iter<'a, Square>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
