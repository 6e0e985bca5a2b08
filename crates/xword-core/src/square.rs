//! A single crossword cell.

use crate::{Position, SquareError, char_table};

/// Maximum number of characters in a rebus entry.
pub const REBUS_ENTRY_LENGTH: usize = 8;

/// Text of a square with no entry.
pub const BLANK: &str = "-";

/// Solution of a black square.
pub const BLACK: &str = ".";

bitflags::bitflags! {
    /// Per-square state flags.
    ///
    /// The low byte matches the GEXT section of the `.puz` format; the
    /// remaining bits are kept in memory only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SquareFlags: u16 {
        /// The entry was written in pencil.
        const PENCIL = 0x0008;
        /// The entry was marked incorrect at some point.
        const PREVIOUSLY_INCORRECT = 0x0010;
        /// The entry is currently marked incorrect.
        const INCORRECT = 0x0020;
        /// The entry was revealed.
        const REVEALED = 0x0040;
        /// The square is circled.
        const CIRCLE = 0x0080;
        /// The square has a background color.
        const COLOR = 0x0100;
        /// The square is not part of the grid.
        const MISSING = 0x0200;
        /// The square belongs to a theme entry.
        const THEME = 0x0400;
        /// The square is an annotation rather than a playable cell.
        const ANNOTATION = 0x0800;
    }
}

impl SquareFlags {
    /// Flags stored in the `.puz` GEXT byte.
    pub const GEXT: Self = Self::PENCIL
        .union(Self::PREVIOUSLY_INCORRECT)
        .union(Self::INCORRECT)
        .union(Self::REVEALED)
        .union(Self::CIRCLE);

    /// Returns the GEXT byte for these flags.
    #[must_use]
    pub fn gext(self) -> u8 {
        u8::try_from(self.intersection(Self::GEXT).bits()).unwrap_or(0)
    }

    /// Returns the flags encoded by a GEXT byte.
    #[must_use]
    pub fn from_gext(byte: u8) -> Self {
        Self::from_bits_truncate(u16::from(byte)).intersection(Self::GEXT)
    }
}

/// How strictly square setters treat input they cannot store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Validation {
    /// Reject long entries and characters outside the grid alphabet.
    #[default]
    Strict,
    /// Truncate long entries and drop characters outside the grid alphabet.
    Permissive,
}

/// An RGB background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red component.
    pub red: u8,
    /// Green component.
    pub green: u8,
    /// Blue component.
    pub blue: u8,
}

impl Color {
    /// White, which means "no color".
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a color from its components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses a `#rgb` or `#rrggbb` hex string. The `#` is optional.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::InvalidColor`] if the input is not 3 or 6 hex digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use xword_core::square::Color;
    ///
    /// assert_eq!(Color::from_hex("#f80")?, Color::new(0xff, 0x88, 0x00));
    /// assert_eq!(Color::from_hex("1a2B3c")?, Color::new(0x1a, 0x2b, 0x3c));
    /// assert!(Color::from_hex("#12345").is_err());
    /// # Ok::<(), xword_core::SquareError>(())
    /// ```
    pub fn from_hex(text: &str) -> Result<Self, SquareError> {
        let invalid = || SquareError::InvalidColor {
            text: text.to_owned(),
        };
        let digits = text.strip_prefix('#').unwrap_or(text);
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let parse = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut parts = [0; 3];
                for (part, ch) in parts.iter_mut().zip(digits.chars()) {
                    *part = parse(&ch.to_string())? * 0x11;
                }
                Ok(Self::new(parts[0], parts[1], parts[2]))
            }
            6 => Ok(Self::new(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A corner of a square, holding a small mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// A side of a square, which may carry a thick bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left edge.
    Left,
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
}

/// A crossword square.
///
/// Text and solution are never empty: an empty entry is stored as [`BLANK`],
/// and a black square has the solution [`BLACK`]. Besides the full solution
/// (which may be a rebus), every square keeps a single plain ASCII solution
/// letter used by checksums and the solution scrambler.
///
/// Squares are created and positioned by their [`Grid`](crate::Grid).
///
/// # Examples
///
/// ```
/// use xword_core::Grid;
///
/// let mut grid = Grid::new(3, 3);
/// let square = grid.at_mut(1, 1)?;
/// square.set_solution("heart")?;
/// square.set_text("h")?;
/// assert_eq!(square.solution(), "HEART");
/// assert_eq!(square.plain_solution(), b'H');
/// assert!(square.has_solution_rebus());
/// assert!(square.check(true, false));
/// assert!(!square.check(true, true));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    position: Position,
    text: String,
    solution: String,
    plain_solution: u8,
    number: String,
    flags: SquareFlags,
    color: Color,
    marks: [String; 4],
    bars: [bool; 4],
    partners: Vec<Position>,
}

impl Square {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            position,
            text: BLANK.to_owned(),
            solution: BLANK.to_owned(),
            plain_solution: b'-',
            number: String::new(),
            flags: SquareFlags::empty(),
            color: Color::WHITE,
            marks: Default::default(),
            bars: [false; 4],
            partners: Vec::new(),
        }
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Returns the position of this square in its grid.
    #[must_use]
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the column of this square.
    #[must_use]
    #[inline]
    pub fn col(&self) -> usize {
        self.position.col()
    }

    /// Returns the row of this square.
    #[must_use]
    #[inline]
    pub fn row(&self) -> usize {
        self.position.row()
    }

    // General state

    /// Returns `true` if the square is black.
    #[must_use]
    pub fn is_black(&self) -> bool {
        self.solution == BLACK
    }

    /// Returns `true` if the square is playable: neither black nor missing.
    #[must_use]
    pub fn is_white(&self) -> bool {
        !self.is_black() && !self.is_missing()
    }

    /// Returns `true` if the square is not part of the grid.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(SquareFlags::MISSING)
    }

    /// Marks the square as missing or present.
    pub fn set_missing(&mut self, missing: bool) {
        self.flags.set(SquareFlags::MISSING, missing);
    }

    /// Returns `true` if the player has not entered anything.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text == BLANK
    }

    /// Returns `true` if the solution is unknown.
    #[must_use]
    pub fn is_solution_blank(&self) -> bool {
        self.solution == BLANK
    }

    // Text and solution

    /// Returns the player's entry.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the full solution, which may be a rebus.
    #[must_use]
    pub fn solution(&self) -> &str {
        &self.solution
    }

    /// Returns the plain ASCII form of the player's entry.
    ///
    /// Blank squares yield `b'-'`. Returns `None` if the first character has
    /// no plain form.
    #[must_use]
    pub fn plain_text(&self) -> Option<u8> {
        plain_of(&self.text)
    }

    /// Returns the plain ASCII solution letter.
    #[must_use]
    pub fn plain_solution(&self) -> u8 {
        self.plain_solution
    }

    /// Sets the player's entry with strict validation.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::LongString`] if the entry is longer than
    /// [`REBUS_ENTRY_LENGTH`], or [`SquareError::InvalidString`] if it contains
    /// a character outside the grid alphabet.
    pub fn set_text(&mut self, text: &str) -> Result<(), SquareError> {
        self.set_text_with(text, Validation::Strict)
    }

    /// Sets the player's entry.
    ///
    /// # Errors
    ///
    /// With [`Validation::Strict`], fails as [`Square::set_text`] does.
    /// [`Validation::Permissive`] never fails.
    pub fn set_text_with(&mut self, text: &str, validation: Validation) -> Result<(), SquareError> {
        self.text = normalize(text, validation)?;
        Ok(())
    }

    /// Sets the solution and derives the plain solution from its first character.
    ///
    /// If the first character has no plain form, the plain solution is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Fails as [`Square::set_text`] does.
    pub fn set_solution(&mut self, solution: &str) -> Result<(), SquareError> {
        self.set_solution_with(solution, Validation::Strict)
    }

    /// Sets the solution with the given validation mode.
    ///
    /// # Errors
    ///
    /// With [`Validation::Strict`], fails as [`Square::set_text`] does.
    pub fn set_solution_with(
        &mut self,
        solution: &str,
        validation: Validation,
    ) -> Result<(), SquareError> {
        self.set_solution_rebus_with(solution, validation)?;
        // An unmappable first character keeps the previous plain letter.
        if let Some(plain) = plain_of(&self.solution) {
            self.plain_solution = plain;
        }
        Ok(())
    }

    /// Sets the solution and an explicit plain solution letter.
    ///
    /// # Errors
    ///
    /// Fails as [`Square::set_text`] does, or with [`SquareError::InvalidString`]
    /// if `plain` has no plain form.
    pub fn set_solution_with_plain(&mut self, solution: &str, plain: char) -> Result<(), SquareError> {
        let plain = char_table::to_plain(plain).ok_or(SquareError::InvalidString { ch: plain })?;
        self.set_solution_rebus(solution)?;
        self.plain_solution = plain;
        Ok(())
    }

    /// Sets the plain solution letter and leaves the full solution unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::InvalidString`] if `plain` has no plain form.
    pub fn set_plain_solution(&mut self, plain: char) -> Result<(), SquareError> {
        self.plain_solution =
            char_table::to_plain(plain).ok_or(SquareError::InvalidString { ch: plain })?;
        Ok(())
    }

    /// Sets the full solution and leaves the plain solution unchanged.
    ///
    /// # Errors
    ///
    /// Fails as [`Square::set_text`] does.
    pub fn set_solution_rebus(&mut self, rebus: &str) -> Result<(), SquareError> {
        self.set_solution_rebus_with(rebus, Validation::Strict)
    }

    fn set_solution_rebus_with(
        &mut self,
        rebus: &str,
        validation: Validation,
    ) -> Result<(), SquareError> {
        self.solution = normalize(rebus, validation)?;
        Ok(())
    }

    /// Replaces the plain solution letter, keeping any rebus solution.
    ///
    /// Squares without a rebus get `letter` as their full solution too.
    pub(crate) fn replace_solution_letter(&mut self, letter: u8) {
        if !self.has_solution_rebus() {
            self.solution = char::from(letter).to_string();
        }
        self.plain_solution = letter;
    }

    /// Sets the solution to a symbol. The plain solution must be set separately.
    pub fn set_solution_symbol(&mut self, symbol: char) {
        self.solution = format!("[{symbol}]");
    }

    /// Sets the player's entry to a symbol.
    pub fn set_text_symbol(&mut self, symbol: char) {
        self.text = format!("[{symbol}]");
    }

    /// Returns `true` if the entry is more than its plain letter.
    #[must_use]
    pub fn has_text_rebus(&self) -> bool {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (None, _) => false,
            (Some(_), Some(_)) => true,
            (Some(first), None) => self.plain_text() != u8::try_from(first).ok(),
        }
    }

    /// Returns `true` if the solution is more than its plain letter.
    #[must_use]
    pub fn has_solution_rebus(&self) -> bool {
        let mut chars = self.solution.chars();
        match (chars.next(), chars.next()) {
            (_, Some(_)) => true,
            (first, None) => first != Some(char::from(self.plain_solution)),
        }
    }

    /// Returns `true` if the entry is a symbol.
    #[must_use]
    pub fn has_text_symbol(&self) -> bool {
        is_symbol(&self.text)
    }

    /// Returns `true` if the solution is a symbol.
    #[must_use]
    pub fn has_solution_symbol(&self) -> bool {
        is_symbol(&self.solution)
    }

    /// Returns the symbol in the entry.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::NoSymbol`] if the entry is not a symbol.
    pub fn text_symbol(&self) -> Result<char, SquareError> {
        symbol_of(&self.text)
    }

    /// Returns the symbol in the solution.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::NoSymbol`] if the solution is not a symbol.
    pub fn solution_symbol(&self) -> Result<char, SquareError> {
        symbol_of(&self.solution)
    }

    /// Returns `true` if the entry is correct.
    ///
    /// Black squares are always correct. A blank entry over a known solution is
    /// correct only when `check_blank` is `false`. With `strict_rebus`, or when
    /// the entry is itself a rebus, the full strings must match; otherwise only
    /// the plain letters are compared.
    #[must_use]
    pub fn check(&self, check_blank: bool, strict_rebus: bool) -> bool {
        if self.is_black() {
            return true;
        }
        if self.is_blank() && !self.is_solution_blank() {
            return !check_blank;
        }
        if strict_rebus || self.has_text_rebus() {
            self.solution == self.text
        } else {
            self.plain_text() == Some(self.plain_solution)
        }
    }

    // Clue number

    /// Returns the clue number label, empty when unnumbered.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns `true` if the square carries a clue number.
    #[must_use]
    pub fn has_number(&self) -> bool {
        !self.number.is_empty()
    }

    /// Sets the clue number label.
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = number.into();
    }

    /// Removes the clue number label.
    pub fn clear_number(&mut self) {
        self.number.clear();
    }

    // Flags

    /// Returns all flags.
    #[must_use]
    pub fn flags(&self) -> SquareFlags {
        self.flags
    }

    /// Replaces all flags.
    pub fn set_flags(&mut self, flags: SquareFlags) {
        self.flags = flags;
    }

    /// Returns `true` if any of `flag` is set.
    #[must_use]
    pub fn has_flag(&self, flag: SquareFlags) -> bool {
        self.flags.intersects(flag)
    }

    /// Sets `flag`.
    pub fn add_flag(&mut self, flag: SquareFlags) {
        self.flags.insert(flag);
    }

    /// Clears `flag`.
    pub fn remove_flag(&mut self, flag: SquareFlags) {
        self.flags.remove(flag);
    }

    /// Sets `flag` if `on`, clears it otherwise.
    pub fn replace_flag(&mut self, flag: SquareFlags, on: bool) {
        self.flags.set(flag, on);
    }

    /// Flips `flag`.
    pub fn toggle_flag(&mut self, flag: SquareFlags) {
        let on = !self.has_flag(flag);
        self.replace_flag(flag, on);
    }

    /// Returns the `.puz` GEXT byte.
    #[must_use]
    pub fn gext(&self) -> u8 {
        self.flags.gext()
    }

    /// Replaces the GEXT flags from a `.puz` byte, keeping in-memory flags.
    pub fn set_gext(&mut self, byte: u8) {
        self.flags.remove(SquareFlags::GEXT);
        self.flags.insert(SquareFlags::from_gext(byte));
    }

    /// Returns `true` if the square is circled.
    #[must_use]
    pub fn has_circle(&self) -> bool {
        self.has_flag(SquareFlags::CIRCLE)
    }

    /// Circles or uncircles the square.
    pub fn set_circle(&mut self, circle: bool) {
        self.replace_flag(SquareFlags::CIRCLE, circle);
    }

    // Color

    /// Returns the background color; white when the square has none.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if the square has a background color.
    #[must_use]
    pub fn has_color(&self) -> bool {
        self.has_flag(SquareFlags::COLOR)
    }

    /// Sets the background color. White removes it.
    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.color = Color::new(red, green, blue);
        self.replace_flag(SquareFlags::COLOR, self.color != Color::WHITE);
    }

    /// Sets the background color from a `#rgb` or `#rrggbb` string.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::InvalidColor`] if the string cannot be parsed.
    pub fn set_color_hex(&mut self, text: &str) -> Result<(), SquareError> {
        let Color { red, green, blue } = Color::from_hex(text)?;
        self.set_color(red, green, blue);
        Ok(())
    }

    /// Removes the background color.
    pub fn remove_color(&mut self) {
        self.set_color(255, 255, 255);
    }

    // Marks and bars

    /// Returns the mark in a corner, empty if none.
    #[must_use]
    pub fn mark(&self, corner: Corner) -> &str {
        &self.marks[corner as usize]
    }

    /// Sets the mark in a corner.
    pub fn set_mark(&mut self, corner: Corner, mark: impl Into<String>) {
        self.marks[corner as usize] = mark.into();
    }

    /// Returns `true` if a bar is drawn on `side`.
    #[must_use]
    pub fn bar(&self, side: Side) -> bool {
        self.bars[side as usize]
    }

    /// Draws or removes a bar on `side`.
    pub fn set_bar(&mut self, side: Side, bar: bool) {
        self.bars[side as usize] = bar;
    }

    // Partners

    /// Returns the squares linked to this one in acrostic and coded grids.
    #[must_use]
    pub fn partners(&self) -> &[Position] {
        &self.partners
    }

    pub(crate) fn add_partner(&mut self, pos: Position) {
        if pos != self.position && !self.partners.contains(&pos) {
            self.partners.push(pos);
        }
    }

    pub(crate) fn retain_partners(&mut self, mut keep: impl FnMut(Position) -> bool) {
        self.partners.retain(|&pos| keep(pos));
    }

    pub(crate) fn clear_partners(&mut self) {
        self.partners.clear();
    }
}

/// Returns `true` if `s` is a bracketed symbol such as `[x]`.
#[must_use]
pub fn is_symbol(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    matches!(chars.as_slice(), ['[', _, ']'])
}

fn symbol_of(s: &str) -> Result<char, SquareError> {
    match s.chars().collect::<Vec<_>>().as_slice() {
        ['[', symbol, ']'] => Ok(*symbol),
        _ => Err(SquareError::NoSymbol),
    }
}

fn plain_of(s: &str) -> Option<u8> {
    let first = s.chars().next().unwrap_or('-');
    char_table::to_plain(first)
}

/// Normalizes an entry for storage in a square.
///
/// Empty input becomes [`BLANK`]. [`BLACK`], [`BLANK`] and symbols pass
/// through unchanged. Everything else is mapped through the grid alphabet.
///
/// # Errors
///
/// With [`Validation::Strict`], returns [`SquareError::LongString`] or
/// [`SquareError::InvalidString`] for entries that cannot be stored.
///
/// # Examples
///
/// ```
/// use xword_core::square::{Validation, normalize};
///
/// assert_eq!(normalize("", Validation::Strict)?, "-");
/// assert_eq!(normalize("abc", Validation::Strict)?, "ABC");
/// assert!(normalize("a*c", Validation::Strict).is_err());
/// assert_eq!(normalize("a*c", Validation::Permissive)?, "AC");
/// assert_eq!(normalize("abcdefghij", Validation::Permissive)?, "ABCDEFGH");
/// # Ok::<(), xword_core::SquareError>(())
/// ```
pub fn normalize(input: &str, validation: Validation) -> Result<String, SquareError> {
    if input.is_empty() {
        return Ok(BLANK.to_owned());
    }
    if input == BLACK || input == BLANK || is_symbol(input) {
        return Ok(input.to_owned());
    }
    let len = input.chars().count();
    if len > REBUS_ENTRY_LENGTH && validation.is_strict() {
        return Err(SquareError::LongString { len });
    }
    let mut normalized = String::with_capacity(input.len());
    for ch in input.chars().take(REBUS_ENTRY_LENGTH) {
        match char_table::to_grid(ch) {
            Some(grid) => normalized.push(grid),
            None if validation.is_strict() => return Err(SquareError::InvalidString { ch }),
            None => {}
        }
    }
    if normalized.is_empty() {
        normalized.push_str(BLANK);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Square {
        Square::new(Position::new(0, 0))
    }

    #[test]
    fn test_new_square_is_white_and_blank() {
        let sq = square();
        assert!(sq.is_white());
        assert!(sq.is_blank());
        assert!(sq.is_solution_blank());
        assert_eq!(sq.plain_solution(), b'-');
        assert_eq!(sq.plain_text(), Some(b'-'));
        assert!(!sq.has_color());
    }

    #[test]
    fn test_set_text_normalizes() {
        let mut sq = square();
        sq.set_text("q").unwrap();
        assert_eq!(sq.text(), "Q");
        sq.set_text("").unwrap();
        assert!(sq.is_blank());
        sq.set_text("[%]").unwrap();
        assert!(sq.has_text_symbol());
        assert_eq!(sq.text_symbol(), Ok('%'));
    }

    #[test]
    fn test_strict_validation_errors() {
        let mut sq = square();
        assert_eq!(
            sq.set_text("ABCDEFGHI"),
            Err(SquareError::LongString { len: 9 })
        );
        assert_eq!(sq.set_text("A.B"), Err(SquareError::InvalidString { ch: '.' }));
        assert!(sq.is_blank());
    }

    #[test]
    fn test_permissive_validation() {
        let mut sq = square();
        sq.set_text_with("**", Validation::Permissive).unwrap();
        assert!(sq.is_blank());
        sq.set_solution_with("stretching", Validation::Permissive)
            .unwrap();
        assert_eq!(sq.solution(), "STRETCHI");
        assert_eq!(sq.plain_solution(), b'S');
    }

    #[test]
    fn test_black_square() {
        let mut sq = square();
        sq.set_solution(BLACK).unwrap();
        assert!(sq.is_black());
        assert!(!sq.is_white());
        assert_eq!(sq.plain_solution(), b'.');
        assert!(sq.check(true, true));
    }

    #[test]
    fn test_missing_square_is_not_white() {
        let mut sq = square();
        sq.set_missing(true);
        assert!(!sq.is_white());
        assert!(!sq.is_black());
    }

    #[test]
    fn test_solution_keeps_plain_when_unmappable() {
        let mut sq = square();
        sq.set_solution("A").unwrap();
        // Greek has no plain form, so the earlier letter stays.
        sq.set_solution("\u{3b1}").unwrap();
        assert_eq!(sq.solution(), "\u{391}");
        assert_eq!(sq.plain_solution(), b'A');
    }

    #[test]
    fn test_permissive_solution_plain_follows_stored_text() {
        let mut sq = square();
        sq.set_solution_with("*B", Validation::Permissive).unwrap();
        assert_eq!(sq.solution(), "B");
        assert_eq!(sq.plain_solution(), b'B');
        assert!(!sq.has_solution_rebus());

        sq.set_text("B").unwrap();
        assert!(sq.check(true, false));
        assert!(sq.check(true, true));
    }

    #[test]
    fn test_rebus_detection() {
        let mut sq = square();
        sq.set_solution("A").unwrap();
        assert!(!sq.has_solution_rebus());
        sq.set_solution_rebus("STAR").unwrap();
        assert!(sq.has_solution_rebus());
        assert_eq!(sq.plain_solution(), b'A');
        sq.set_solution_with_plain("7", 'S').unwrap();
        assert!(sq.has_solution_rebus());

        sq.set_text("A").unwrap();
        assert!(!sq.has_text_rebus());
        sq.set_text("\u{e9}").unwrap();
        assert!(sq.has_text_rebus());
    }

    #[test]
    fn test_symbol_solution() {
        let mut sq = square();
        sq.set_solution_symbol('\u{2665}');
        assert_eq!(sq.solution_symbol(), Ok('\u{2665}'));
        assert_eq!(sq.text_symbol(), Err(SquareError::NoSymbol));
    }

    #[test]
    fn test_check_rules() {
        let mut sq = square();
        sq.set_solution("HEART").unwrap();

        // Blank entry over a known solution.
        assert!(sq.check(false, false));
        assert!(!sq.check(true, false));

        sq.set_text("H").unwrap();
        assert!(sq.check(true, false));
        assert!(!sq.check(true, true));

        sq.set_text("HEAR").unwrap();
        assert!(!sq.check(true, false));
        sq.set_text("heart").unwrap();
        assert!(sq.check(true, true));

        sq.set_text("X").unwrap();
        assert!(!sq.check(false, false));
    }

    #[test]
    fn test_check_blank_solution() {
        let mut sq = square();
        assert!(sq.check(true, false));
        sq.set_text("A").unwrap();
        assert!(!sq.check(true, false));
    }

    #[test]
    fn test_color() {
        let mut sq = square();
        sq.set_color(10, 20, 30);
        assert!(sq.has_color());
        assert_eq!(sq.color(), Color::new(10, 20, 30));
        sq.set_color(255, 255, 255);
        assert!(!sq.has_color());
        sq.set_color_hex("#0f0").unwrap();
        assert_eq!(sq.color(), Color::new(0, 255, 0));
        sq.remove_color();
        assert!(!sq.has_color());
        assert_eq!(sq.color(), Color::WHITE);
        assert!(matches!(
            sq.set_color_hex("zzz"),
            Err(SquareError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_flags_and_gext() {
        let mut sq = square();
        sq.add_flag(SquareFlags::CIRCLE | SquareFlags::THEME);
        assert_eq!(sq.gext(), 0x80);
        sq.toggle_flag(SquareFlags::PENCIL);
        assert_eq!(sq.gext(), 0x88);
        sq.toggle_flag(SquareFlags::PENCIL);
        assert!(!sq.has_flag(SquareFlags::PENCIL));
        sq.set_gext(0x60);
        assert!(sq.has_flag(SquareFlags::INCORRECT));
        assert!(sq.has_flag(SquareFlags::REVEALED));
        assert!(!sq.has_circle());
        assert!(sq.has_flag(SquareFlags::THEME));
    }

    #[test]
    fn test_marks_and_bars() {
        let mut sq = square();
        sq.set_mark(Corner::TopRight, "3");
        assert_eq!(sq.mark(Corner::TopRight), "3");
        assert_eq!(sq.mark(Corner::TopLeft), "");
        sq.set_bar(Side::Bottom, true);
        assert!(sq.bar(Side::Bottom));
        assert!(!sq.bar(Side::Top));
    }

    #[test]
    fn test_number() {
        let mut sq = square();
        assert!(!sq.has_number());
        sq.set_number("12a");
        assert_eq!(sq.number(), "12a");
        sq.clear_number();
        assert!(!sq.has_number());
    }
}
