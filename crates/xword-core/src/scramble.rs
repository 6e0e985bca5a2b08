//! The `.puz` solution scrambler.
//!
//! Scrambling works on the plain solution letters of the white squares taken
//! in column-major ("down") order. A four digit key drives four rounds, one
//! per digit. Each round:
//!
//! 1. adds key digit `j % 4` to the letter at position `j`, wrapping past `Z`;
//! 2. rotates the string left by the round's digit;
//! 3. riffles the two halves together, back half first.
//!
//! The grid stores the key and the checksum of the unscrambled letters, so a
//! player's finished grid can be verified without revealing the solution.
//!
//! # Examples
//!
//! ```
//! use xword_core::{Grid, scramble};
//!
//! let mut grid = Grid::new(4, 4);
//! for (square, ch) in grid.iter_mut().zip("CRUSHINGBLOWSTOP".chars()) {
//!     square.set_solution(&ch.to_string())?;
//! }
//! assert!(grid.scramble_solution(1234));
//! assert!(grid.is_scrambled());
//! assert_ne!(grid.solution_string(""), "CRUSHINGBLOWSTOP");
//!
//! assert!(!grid.unscramble_solution(4321));
//! assert!(grid.unscramble_solution(1234));
//! assert_eq!(grid.solution_string(""), "CRUSHINGBLOWSTOP");
//! # Ok::<(), xword_core::SquareError>(())
//! ```

use rand::Rng;

use crate::{Grid, Position, cksum_region, grid::GridFlags};

/// Smallest valid scrambling key.
pub const MIN_KEY: u16 = 1000;

/// Largest valid scrambling key.
pub const MAX_KEY: u16 = 9999;

/// Fewest white squares a grid needs to be scrambled.
pub const MIN_SCRAMBLE_LENGTH: usize = 12;

/// Scrambles and unscrambles a grid's solution in place.
#[derive(Debug)]
pub struct Scrambler<'a> {
    grid: &'a mut Grid,
}

impl<'a> Scrambler<'a> {
    /// Creates a scrambler for `grid`.
    pub fn new(grid: &'a mut Grid) -> Self {
        Self { grid }
    }

    /// Scrambles the solution, generating a key with the thread-local RNG if needed.
    ///
    /// See [`Scrambler::scramble_solution_with_rng`].
    pub fn scramble_solution(&mut self, key: u16) -> bool {
        self.scramble_solution_with_rng(key, &mut rand::rng())
    }

    /// Scrambles the solution.
    ///
    /// A `key` of zero reuses the grid's key, or draws a random key from `rng`
    /// when the grid has none. Returns `false` without touching the grid if:
    ///
    /// - the grid is empty or flagged as having no solution,
    /// - the key is outside [`MIN_KEY`]`..=`[`MAX_KEY`],
    /// - fewer than [`MIN_SCRAMBLE_LENGTH`] white squares exist,
    /// - a solution letter is not `A`-`Z`,
    /// - the solution checksums to zero.
    pub fn scramble_solution_with_rng<R: Rng>(&mut self, key: u16, rng: &mut R) -> bool {
        if !can_scramble(self.grid) {
            return false;
        }
        let key = match key {
            0 if self.grid.key() != 0 => self.grid.key(),
            0 => rng.random_range(MIN_KEY..=MAX_KEY),
            key => key,
        };
        let Some(digits) = key_digits(key) else {
            log::debug!("refusing to scramble with out-of-range key {key}");
            return false;
        };
        let Some((positions, letters)) = solution_down(self.grid) else {
            return false;
        };
        let checksum = cksum_region(&letters, 0);
        if checksum == 0 {
            log::debug!("refusing to scramble a solution with a zero checksum");
            return false;
        }

        let scrambled = scramble_digits(&letters, digits);
        write_letters(self.grid, &positions, &scrambled);
        self.grid.set_flags(self.grid.flags() | GridFlags::SCRAMBLED);
        self.grid.set_checksum(checksum);
        self.grid.set_key(key);
        log::debug!("scrambled {} letters with key {key}", letters.len());
        true
    }

    /// Unscrambles the solution with `key`.
    ///
    /// Returns `false` without touching the grid if the grid cannot be
    /// scrambled at all, or if the unscrambled letters do not match the stored
    /// checksum. On success the scrambled flag, key and checksum are cleared.
    pub fn unscramble_solution(&mut self, key: u16) -> bool {
        if !can_scramble(self.grid) {
            return false;
        }
        let Some(digits) = key_digits(key) else {
            log::debug!("refusing to unscramble with out-of-range key {key}");
            return false;
        };
        let Some((positions, letters)) = solution_down(self.grid) else {
            return false;
        };
        let candidate = unscramble_digits(&letters, digits);
        if cksum_region(&candidate, 0) != self.grid.checksum() {
            log::debug!("key {key} does not match the stored checksum");
            return false;
        }

        write_letters(self.grid, &positions, &candidate);
        self.grid.set_flags(self.grid.flags() - GridFlags::SCRAMBLED);
        self.grid.set_checksum(0);
        self.grid.set_key(0);
        true
    }
}

/// Returns `true` if the player's entries, read in down order, match the
/// grid's stored checksum.
#[must_use]
pub fn check_user_grid(grid: &Grid) -> bool {
    let letters: Vec<u8> = grid
        .iter_down()
        .filter(|sq| sq.is_white())
        .map(|sq| sq.plain_text().unwrap_or(0))
        .collect();
    cksum_region(&letters, 0) == grid.checksum()
}

/// Scrambles a string of `A`-`Z` letters with `key`.
///
/// Returns `None` if `key` is outside [`MIN_KEY`]`..=`[`MAX_KEY`] or a byte is
/// not an upper-case ASCII letter.
///
/// # Examples
///
/// ```
/// use xword_core::scramble::{scramble_letters, unscramble_letters};
///
/// let scrambled = scramble_letters(b"ABCDEFGHIJKLM", 1234).unwrap();
/// assert_ne!(scrambled, b"ABCDEFGHIJKLM");
/// assert_eq!(unscramble_letters(&scrambled, 1234).unwrap(), b"ABCDEFGHIJKLM");
/// ```
#[must_use]
pub fn scramble_letters(letters: &[u8], key: u16) -> Option<Vec<u8>> {
    let digits = key_digits(key)?;
    is_letters(letters).then(|| scramble_digits(letters, digits))
}

/// Reverses [`scramble_letters`].
#[must_use]
pub fn unscramble_letters(letters: &[u8], key: u16) -> Option<Vec<u8>> {
    let digits = key_digits(key)?;
    is_letters(letters).then(|| unscramble_digits(letters, digits))
}

/// The result of trying one key during a [`KeySearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyAttempt {
    /// The key tried.
    pub key: u16,
    /// Whether unscrambling with the key matched the stored checksum.
    pub matched: bool,
}

/// An exhaustive search for a lost scrambling key.
///
/// Yields one [`KeyAttempt`] per key from [`MIN_KEY`] to [`MAX_KEY`]. The grid
/// is never modified, so the caller may stop between attempts at any time and
/// apply a matching key with [`Grid::unscramble_solution`].
///
/// # Examples
///
/// ```
/// use xword_core::Grid;
///
/// let mut grid = Grid::new(4, 4);
/// for (square, ch) in grid.iter_mut().zip("PUZZLEDOVERKEYSX".chars()) {
///     square.set_solution(&ch.to_string())?;
/// }
/// assert!(grid.scramble_solution(2718));
///
/// let key = grid.key_search().find_key();
/// assert!(key.is_some());
/// assert!(grid.unscramble_solution(key.unwrap()));
/// assert_eq!(grid.solution_string(""), "PUZZLEDOVERKEYSX");
/// # Ok::<(), xword_core::SquareError>(())
/// ```
#[derive(Debug, Clone)]
pub struct KeySearch {
    letters: Vec<u8>,
    checksum: u16,
    next: u16,
}

impl KeySearch {
    /// Prepares a key search over `grid`'s current solution.
    ///
    /// A grid that cannot be unscrambled yields no attempts.
    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        let letters = if can_scramble(grid) {
            solution_down(grid).map(|(_, letters)| letters)
        } else {
            None
        };
        match letters {
            Some(letters) => Self {
                letters,
                checksum: grid.checksum(),
                next: MIN_KEY,
            },
            None => Self {
                letters: Vec::new(),
                checksum: grid.checksum(),
                next: MAX_KEY + 1,
            },
        }
    }

    /// Returns `true` if unscrambling with `key` matches the stored checksum.
    #[must_use]
    pub fn test_key(&self, key: u16) -> bool {
        key_digits(key).is_some_and(|digits| {
            !self.letters.is_empty()
                && cksum_region(&unscramble_digits(&self.letters, digits), 0) == self.checksum
        })
    }

    /// Runs the search to completion and returns the first matching key.
    #[must_use]
    pub fn find_key(self) -> Option<u16> {
        self.into_iter()
            .find(|attempt| attempt.matched)
            .map(|attempt| attempt.key)
    }
}

impl Iterator for KeySearch {
    type Item = KeyAttempt;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > MAX_KEY {
            return None;
        }
        let key = self.next;
        self.next += 1;
        let matched = self.test_key(key);
        if matched {
            log::debug!("key search matched key {key}");
        }
        Some(KeyAttempt { key, matched })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from((MAX_KEY + 1).saturating_sub(self.next));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for KeySearch {}

fn can_scramble(grid: &Grid) -> bool {
    if grid.is_empty() {
        log::debug!("cannot scramble an empty grid");
        return false;
    }
    if !grid.has_solution() {
        log::debug!("cannot scramble a grid without a solution");
        return false;
    }
    true
}

fn key_digits(key: u16) -> Option<[u8; 4]> {
    if !(MIN_KEY..=MAX_KEY).contains(&key) {
        return None;
    }
    let digit = |div: u16| u8::try_from(key / div % 10).unwrap_or(0);
    Some([digit(1000), digit(100), digit(10), digit(1)])
}

fn is_letters(letters: &[u8]) -> bool {
    letters.iter().all(u8::is_ascii_uppercase)
}

/// Collects the white squares in down order with their plain solution letters.
fn solution_down(grid: &Grid) -> Option<(Vec<Position>, Vec<u8>)> {
    let (positions, letters): (Vec<_>, Vec<_>) = grid
        .iter_down()
        .filter(|sq| sq.is_white())
        .map(|sq| (sq.position(), sq.plain_solution()))
        .unzip();
    if letters.len() < MIN_SCRAMBLE_LENGTH {
        log::debug!(
            "solution has {} letters, fewer than the {MIN_SCRAMBLE_LENGTH} needed to scramble",
            letters.len()
        );
        return None;
    }
    if !is_letters(&letters) {
        log::debug!("solution contains characters other than A-Z");
        return None;
    }
    Some((positions, letters))
}

fn write_letters(grid: &mut Grid, positions: &[Position], letters: &[u8]) {
    for (&pos, &letter) in positions.iter().zip(letters) {
        grid[pos].replace_solution_letter(letter);
    }
}

fn scramble_digits(letters: &[u8], digits: [u8; 4]) -> Vec<u8> {
    let mut s = letters.to_vec();
    for &shift in &digits {
        for (j, ch) in s.iter_mut().enumerate() {
            *ch += digits[j % 4];
            if *ch > b'Z' {
                *ch -= 26;
            }
        }
        if !s.is_empty() {
            let shift = usize::from(shift) % s.len();
            s.rotate_left(shift);
        }
        s = riffle(&s);
        log::trace!("scramble round: {}", String::from_utf8_lossy(&s));
    }
    s
}

fn unscramble_digits(letters: &[u8], digits: [u8; 4]) -> Vec<u8> {
    let mut s = letters.to_vec();
    for &shift in digits.iter().rev() {
        s = unriffle(&s);
        if !s.is_empty() {
            let shift = usize::from(shift) % s.len();
            s.rotate_right(shift);
        }
        for (j, ch) in s.iter_mut().enumerate() {
            *ch -= digits[j % 4];
            if *ch < b'A' {
                *ch += 26;
            }
        }
    }
    s
}

/// Interleaves the halves of `s`, back half first. An odd middle letter from
/// the back half goes last.
fn riffle(s: &[u8]) -> Vec<u8> {
    let (front, back) = s.split_at(s.len() / 2);
    let mut out = Vec::with_capacity(s.len());
    for (&b, &f) in back.iter().zip(front) {
        out.push(b);
        out.push(f);
    }
    if back.len() > front.len() {
        out.push(back[back.len() - 1]);
    }
    out
}

fn unriffle(s: &[u8]) -> Vec<u8> {
    let back = s.iter().step_by(2);
    let front = s.iter().skip(1).step_by(2);
    front.chain(back).copied().collect()
}
