//! Clues and clue lists.

use std::{cmp::Ordering, slice};

use crate::{CluesError, Position, Word};

/// Canonical key of the across clue list.
pub const ACROSS: &str = "Across";

/// Canonical key of the down clue list.
pub const DOWN: &str = "Down";

/// A numbered clue.
///
/// The number is kept as written so that labels like `"12a"` survive; its
/// integer value is `-1` when it does not parse.
///
/// # Examples
///
/// ```
/// use xword_core::Clue;
///
/// let clue = Clue::new("17", "Hidden &amp; found");
/// assert_eq!(clue.int(), 17);
/// assert_eq!(Clue::new("17a", "").int(), -1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    number: String,
    int: i32,
    text: String,
    word: Option<Word>,
}

impl Clue {
    /// Creates a clue with no word.
    #[must_use]
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        let number = number.into();
        let int = parse_number(&number);
        Self {
            number,
            int,
            text: text.into(),
            word: None,
        }
    }

    /// Attaches `word` to the clue.
    #[must_use]
    pub fn with_word(mut self, word: Word) -> Self {
        self.word = Some(word);
        self
    }

    /// Returns the number as written.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the number as an integer, or `-1` if it is not numeric.
    #[must_use]
    pub fn int(&self) -> i32 {
        self.int
    }

    /// Replaces the number.
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = number.into();
        self.int = parse_number(&self.number);
    }

    /// Returns the clue text. Markup is kept XML-escaped.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the clue text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Returns the word the clue answers, if assigned.
    #[must_use]
    pub fn word(&self) -> Option<&Word> {
        self.word.as_ref()
    }

    /// Assigns the word the clue answers.
    pub fn set_word(&mut self, word: Word) {
        self.word = Some(word);
    }

    /// Removes the word.
    pub fn clear_word(&mut self) {
        self.word = None;
    }

    /// Orders clues by their integer number.
    ///
    /// Both clues must have numeric numbers; the ordering of non-numeric clues
    /// is unspecified.
    #[must_use]
    pub fn cmp_by_number(&self, other: &Self) -> Ordering {
        debug_assert!(
            self.int >= 0 && other.int >= 0,
            "comparing non-numeric clues {:?} and {:?}",
            self.number,
            other.number
        );
        self.int.cmp(&other.int)
    }
}

fn parse_number(number: &str) -> i32 {
    number.trim().parse::<u32>().ok().and_then(|n| i32::try_from(n).ok()).unwrap_or(-1)
}

/// An ordered list of clues under a title such as "Across".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueList {
    title: String,
    clues: Vec<Clue>,
}

impl ClueList {
    /// Creates an empty list.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            clues: Vec::new(),
        }
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the display title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Appends a clue.
    pub fn push(&mut self, clue: Clue) {
        self.clues.push(clue);
    }

    /// Returns the number of clues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    /// Returns `true` if the list has no clues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    /// Iterates over the clues in order.
    pub fn iter(&self) -> slice::Iter<'_, Clue> {
        self.clues.iter()
    }

    /// Iterates mutably over the clues in order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Clue> {
        self.clues.iter_mut()
    }

    /// Sorts the clues by number.
    pub fn sort_by_number(&mut self) {
        self.clues.sort_by(Clue::cmp_by_number);
    }

    /// Finds the clue with integer number `number`.
    #[must_use]
    pub fn find_by_number(&self, number: i32) -> Option<&Clue> {
        self.clues.iter().find(|clue| clue.int == number)
    }

    /// Finds the clue with integer number `number`.
    pub fn find_by_number_mut(&mut self, number: i32) -> Option<&mut Clue> {
        self.clues.iter_mut().find(|clue| clue.int == number)
    }

    /// Finds the clue whose number is written exactly as `number`.
    #[must_use]
    pub fn find_by_number_str(&self, number: &str) -> Option<&Clue> {
        self.clues.iter().find(|clue| clue.number == number)
    }

    /// Finds the clue whose number is written exactly as `number`.
    pub fn find_by_number_str_mut(&mut self, number: &str) -> Option<&mut Clue> {
        self.clues.iter_mut().find(|clue| clue.number == number)
    }

    /// Finds the clue answered by `word`.
    #[must_use]
    pub fn find_by_word(&self, word: &Word) -> Option<&Clue> {
        self.clues.iter().find(|clue| clue.word.as_ref() == Some(word))
    }

    /// Finds the clue answered by `word`.
    pub fn find_by_word_mut(&mut self, word: &Word) -> Option<&mut Clue> {
        self.clues.iter_mut().find(|clue| clue.word.as_ref() == Some(word))
    }

    /// Finds the clue for the square at `pos`.
    ///
    /// A clue whose word starts at `pos` wins. Otherwise the clue whose word
    /// contains `pos` nearest its start is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use xword_core::{Clue, ClueList, Position, Word};
    ///
    /// let mut list = ClueList::new("Across");
    /// list.push(Clue::new("1", "first").with_word(Word::straight(Position::new(0, 0), Position::new(4, 0))?));
    /// list.push(Clue::new("2", "second").with_word(Word::straight(Position::new(2, 0), Position::new(4, 0))?));
    ///
    /// assert_eq!(list.find_by_square(Position::new(2, 0)).map(Clue::number), Some("2"));
    /// assert_eq!(list.find_by_square(Position::new(1, 0)).map(Clue::number), Some("1"));
    /// assert_eq!(list.find_by_square(Position::new(1, 1)), None);
    /// # Ok::<(), xword_core::WordError>(())
    /// ```
    #[must_use]
    pub fn find_by_square(&self, pos: Position) -> Option<&Clue> {
        self.index_by_square(pos).map(|index| &self.clues[index])
    }

    /// Finds the clue for the square at `pos`, as [`ClueList::find_by_square`].
    pub fn find_by_square_mut(&mut self, pos: Position) -> Option<&mut Clue> {
        self.index_by_square(pos).map(|index| &mut self.clues[index])
    }

    fn index_by_square(&self, pos: Position) -> Option<usize> {
        self.clues
            .iter()
            .enumerate()
            .filter_map(|(index, clue)| {
                let offset = clue.word.as_ref()?.index_of(pos)?;
                Some((offset, index))
            })
            .min()
            .map(|(_, index)| index)
    }
}

impl<'a> IntoIterator for &'a ClueList {
    type Item = &'a Clue;
    type IntoIter = slice::Iter<'a, Clue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<Clue> for ClueList {
    fn extend<T: IntoIterator<Item = Clue>>(&mut self, iter: T) {
        self.clues.extend(iter);
    }
}

/// All clue lists of a puzzle, keyed by direction name.
///
/// Lists keep insertion order. The keys `"Across"` and `"Down"` are matched
/// case-insensitively; other keys are matched exactly.
///
/// # Examples
///
/// ```
/// use xword_core::{Clue, ClueList, Clues};
///
/// let mut clues = Clues::new();
/// clues.set_clue_list("ACROSS", ClueList::default());
/// clues.entry("down").push(Clue::new("1", "Opposite of up"));
///
/// assert_eq!(clues.get_clue_list("Across")?.title(), "ACROSS");
/// assert_eq!(clues.down().map(|list| list.len()), Some(1));
/// assert!(clues.get_clue_list("Diagonal").is_err());
/// # Ok::<(), xword_core::CluesError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clues {
    lists: Vec<(String, ClueList)>,
}

impl Clues {
    /// Creates an empty set of clue lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of clue lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if there are no clue lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Returns the total number of clues in all lists.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.lists.iter().map(|(_, list)| list.len()).sum()
    }

    /// Iterates over `(key, list)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClueList)> {
        self.lists.iter().map(|(key, list)| (key.as_str(), list))
    }

    /// Stores `list` under `direction`, replacing any list already there.
    ///
    /// If `list` has no title, it takes the existing list's title, or
    /// `direction` as given.
    pub fn set_clue_list(&mut self, direction: &str, mut list: ClueList) {
        let key = normalize_direction(direction);
        match self.lists.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => {
                if list.title.is_empty() {
                    list.title = std::mem::take(&mut existing.title);
                }
                *existing = list;
            }
            None => {
                if list.title.is_empty() {
                    list.title = direction.to_owned();
                }
                self.lists.push((key, list));
            }
        }
    }

    /// Returns the list for `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`CluesError::NoClues`] if there is no such list.
    pub fn get_clue_list(&self, direction: &str) -> Result<&ClueList, CluesError> {
        let key = normalize_direction(direction);
        self.lists
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, list)| list)
            .ok_or_else(|| CluesError::NoClues {
                direction: direction.to_owned(),
            })
    }

    /// Returns the list for `direction` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`CluesError::NoClues`] if there is no such list.
    pub fn get_clue_list_mut(&mut self, direction: &str) -> Result<&mut ClueList, CluesError> {
        let key = normalize_direction(direction);
        self.lists
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, list)| list)
            .ok_or_else(|| CluesError::NoClues {
                direction: direction.to_owned(),
            })
    }

    /// Returns `true` if a list exists for `direction`.
    #[must_use]
    pub fn has_clue_list(&self, direction: &str) -> bool {
        self.get_clue_list(direction).is_ok()
    }

    /// Returns the list for `direction`, creating an empty one if needed.
    pub fn entry(&mut self, direction: &str) -> &mut ClueList {
        let key = normalize_direction(direction);
        let index = match self.lists.iter().position(|(k, _)| *k == key) {
            Some(index) => index,
            None => {
                self.lists.push((key, ClueList::new(direction)));
                self.lists.len() - 1
            }
        };
        &mut self.lists[index].1
    }

    /// Returns `true` if there is at least one clue and every clue has a word.
    #[must_use]
    pub fn has_words(&self) -> bool {
        let mut clues = self.lists.iter().flat_map(|(_, list)| list.iter()).peekable();
        clues.peek().is_some() && clues.all(|clue| clue.word.is_some())
    }

    /// Returns the across list, if any.
    #[must_use]
    pub fn across(&self) -> Option<&ClueList> {
        self.get_clue_list(ACROSS).ok()
    }

    /// Returns the down list, if any.
    #[must_use]
    pub fn down(&self) -> Option<&ClueList> {
        self.get_clue_list(DOWN).ok()
    }
}

fn normalize_direction(direction: &str) -> String {
    if direction.eq_ignore_ascii_case(ACROSS) {
        ACROSS.to_owned()
    } else if direction.eq_ignore_ascii_case(DOWN) {
        DOWN.to_owned()
    } else {
        direction.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(col: usize, row: usize) -> Position {
        Position::new(col, row)
    }

    fn across(col: usize, row: usize, len: usize) -> Word {
        Word::straight(pos(col, row), pos(col + len - 1, row)).unwrap()
    }

    mod clue {
        use super::*;

        #[test]
        fn test_number_parsing() {
            assert_eq!(Clue::new("12", "").int(), 12);
            assert_eq!(Clue::new(" 3 ", "").int(), 3);
            assert_eq!(Clue::new("3a", "").int(), -1);
            assert_eq!(Clue::new("", "").int(), -1);
            assert_eq!(Clue::new("-4", "").int(), -1);

            let mut clue = Clue::new("1", "");
            clue.set_number("22");
            assert_eq!(clue.int(), 22);
            assert_eq!(clue.number(), "22");
        }

        #[test]
        fn test_cmp_by_number() {
            let mut clues = [Clue::new("10", ""), Clue::new("2", ""), Clue::new("1", "")];
            clues.sort_by(Clue::cmp_by_number);
            let numbers: Vec<_> = clues.iter().map(Clue::number).collect();
            assert_eq!(numbers, ["1", "2", "10"]);
        }

        #[test]
        #[cfg(debug_assertions)]
        #[should_panic(expected = "comparing non-numeric clues")]
        fn test_cmp_non_numeric() {
            let _ = Clue::new("1", "").cmp_by_number(&Clue::new("A", ""));
        }
    }

    mod clue_list {
        use super::*;

        fn sample() -> ClueList {
            let mut list = ClueList::new("Across");
            list.push(Clue::new("1", "Start").with_word(across(0, 0, 5)));
            list.push(Clue::new("4", "Middle").with_word(across(3, 0, 2)));
            list.push(Clue::new("6a", "Odd label").with_word(across(0, 1, 3)));
            list
        }

        #[test]
        fn test_find_by_number() {
            let list = sample();
            assert_eq!(list.find_by_number(4).map(Clue::text), Some("Middle"));
            assert_eq!(list.find_by_number(5), None);
            assert_eq!(list.find_by_number_str("6a").map(Clue::text), Some("Odd label"));
            assert_eq!(list.find_by_number_str("6"), None);
        }

        #[test]
        fn test_find_by_word() {
            let list = sample();
            assert_eq!(list.find_by_word(&across(3, 0, 2)).map(Clue::number), Some("4"));
            assert_eq!(list.find_by_word(&across(3, 0, 1)), None);
        }

        #[test]
        fn test_find_by_square() {
            let list = sample();
            assert_eq!(list.find_by_square(pos(0, 0)).map(Clue::number), Some("1"));
            assert_eq!(list.find_by_square(pos(3, 0)).map(Clue::number), Some("4"));
            assert_eq!(list.find_by_square(pos(4, 0)).map(Clue::number), Some("4"));
            assert_eq!(list.find_by_square(pos(2, 1)).map(Clue::number), Some("6a"));
            assert_eq!(list.find_by_square(pos(4, 4)), None);
        }

        #[test]
        fn test_find_mut() {
            let mut list = sample();
            list.find_by_square_mut(pos(1, 0)).unwrap().set_text("Changed");
            assert_eq!(list.find_by_number(1).map(Clue::text), Some("Changed"));
            assert!(list.find_by_number_mut(99).is_none());
        }

        #[test]
        fn test_clues_without_words() {
            let mut list = ClueList::new("Down");
            list.push(Clue::new("1", "No word yet"));
            assert_eq!(list.find_by_square(pos(0, 0)), None);
            assert_eq!(list.find_by_number(1).map(Clue::word), Some(None));
        }

        #[test]
        fn test_sort_by_number() {
            let mut list = ClueList::new("Across");
            list.extend([Clue::new("9", ""), Clue::new("1", ""), Clue::new("5", "")]);
            list.sort_by_number();
            let numbers: Vec<_> = list.iter().map(Clue::int).collect();
            assert_eq!(numbers, [1, 5, 9]);
        }
    }

    mod clues {
        use super::*;

        #[test]
        fn test_direction_keys() {
            let mut clues = Clues::new();
            clues.set_clue_list("across", ClueList::default());
            clues.set_clue_list("Diagonal", ClueList::new("Slanted"));
            assert!(clues.has_clue_list("ACROSS"));
            assert!(clues.has_clue_list("Diagonal"));
            assert!(!clues.has_clue_list("diagonal"));
            assert_eq!(clues.across().map(ClueList::title), Some("across"));
            assert_eq!(clues.get_clue_list("Diagonal").map(ClueList::title), Ok("Slanted"));

            let keys: Vec<_> = clues.iter().map(|(key, _)| key).collect();
            assert_eq!(keys, ["Across", "Diagonal"]);
        }

        #[test]
        fn test_replace_keeps_title() {
            let mut clues = Clues::new();
            clues.set_clue_list("Across", ClueList::new("Horizontal"));
            let mut list = ClueList::default();
            list.push(Clue::new("1", "x"));
            clues.set_clue_list("ACROSS", list);
            assert_eq!(clues.len(), 1);
            let across = clues.across().unwrap();
            assert_eq!(across.title(), "Horizontal");
            assert_eq!(across.len(), 1);
        }

        #[test]
        fn test_missing_list() {
            let mut clues = Clues::new();
            assert_eq!(
                clues.get_clue_list("Down"),
                Err(CluesError::NoClues {
                    direction: "Down".to_owned()
                })
            );
            assert!(clues.get_clue_list_mut("Up").is_err());
            assert_eq!(clues.down(), None);
        }

        #[test]
        fn test_entry() {
            let mut clues = Clues::new();
            clues.entry("DOWN").push(Clue::new("1", "a"));
            clues.entry("Down").push(Clue::new("2", "b"));
            assert_eq!(clues.len(), 1);
            assert_eq!(clues.clue_count(), 2);
            assert_eq!(clues.down().map(ClueList::title), Some("DOWN"));
        }

        #[test]
        fn test_has_words() {
            let mut clues = Clues::new();
            assert!(!clues.has_words());
            clues.entry("Across").push(Clue::new("1", "a").with_word(across(0, 0, 3)));
            assert!(clues.has_words());
            clues.entry("Down").push(Clue::new("1", "b"));
            assert!(!clues.has_words());
        }
    }
}
