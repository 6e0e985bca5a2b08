//! Character translation tables for grid text.
//!
//! Grid text is stored as Unicode, but the legacy file format and its checksums
//! work on Windows-1252 bytes. The tables here are indexed by Windows-1252 byte
//! value and are plain constants, so lookups never touch global state.
//!
//! - [`to_grid`] maps a character to the upper-case alphabet accepted in squares.
//! - [`to_plain`] maps a character to the single ASCII byte used by checksums
//!   and the solution scrambler.

/// Unicode code points for Windows-1252 bytes `0x80..=0x9F`.
///
/// A zero entry marks a byte the code page leaves undefined.
const WINDOWS_1252_HIGH: [u16; 32] = [
    0x20ac, 0, 0x201a, 0x0192, 0x201e, 0x2026, 0x2020, 0x2021, //
    0x02c6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017d, 0, //
    0, 0x2018, 0x2019, 0x201c, 0x201d, 0x2022, 0x2013, 0x2014, //
    0x02dc, 0x2122, 0x0161, 0x203a, 0x0153, 0, 0x017e, 0x0178, //
];

#[rustfmt::skip]
const UPPER_CASE: [u8; 256] = [
//     0     1     2     3     4     5     6     7     8     9     a     b     c     d     e     f
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    b' ',    0,    0, b'#', b'$', b'%', b'&',    0,    0,    0,    0, b'+',    0, b'-', b'.',    0, // 2
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9',    0,    0,    0,    0,    0, b'?', // 3
    b'@', b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
    b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z', b'[',    0,    0,    0,    0, // 5
       0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 6
    b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z',    0,    0,    0,    0,    0, // 7
       0,    0,    0, 0x83,    0,    0,    0,    0,    0,    0, 0x8a,    0, 0x8c,    0, 0x8e,    0, // 8
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0, 0x8a,    0, 0x8c,    0, 0x8e, 0x9f, // 9
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0, 0xaa,    0,    0,    0,    0,    0, // a
       0,    0, 0xb2, 0xb3,    0, 0xb5,    0,    0,    0, 0xb9, 0xba,    0,    0,    0,    0,    0, // b
    0xc0, 0xc1, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xcb, 0xcc, 0xcd, 0xce, 0xcf, // c
    0xd0, 0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6,    0, 0xd8, 0xd9, 0xda, 0xdb, 0xdc, 0xdd, 0xde, 0xdf, // d
    0xc0, 0xc1, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xcb, 0xcc, 0xcd, 0xce, 0xcf, // e
    0xd0, 0xd1, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6,    0, 0xd8, 0xd9, 0xda, 0xdb, 0xdc, 0xdd, 0xde, 0x9f, // f
];

#[rustfmt::skip]
const ASCII: [u8; 256] = [
//     0     1     2     3     4     5     6     7     8     9     a     b     c     d     e     f
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    b'-',    0,    0, b'H', b'D', b'P', b'A',    0,    0,    0,    0, b'P',    0, b'-', b'.',    0, // 2
    b'Z', b'O', b'T', b'T', b'F', b'F', b'S', b'S', b'E', b'N',    0,    0,    0,    0,    0, b'Q', // 3
    b'A', b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
    b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z', b'-',    0,    0,    0,    0, // 5
       0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 6
    b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z',    0,    0,    0,    0,    0, // 7
       0,    0,    0, b'F',    0,    0,    0,    0,    0,    0, b'S',    0, b'O',    0, b'Z',    0, // 8
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0, b'S',    0, b'O',    0, b'Z', b'Y', // 9
       0,    0,    0,    0,    0,    0,    0,    0,    0,    0, b'A',    0,    0,    0,    0,    0, // a
       0,    0, b'T', b'T',    0, b'U',    0,    0,    0, b'O', b'O',    0,    0,    0,    0,    0, // b
    b'A', b'A', b'A', b'A', b'A', b'A', b'A', b'C', b'E', b'E', b'E', b'E', b'I', b'I', b'I', b'I', // c
    b'D', b'N', b'O', b'O', b'O', b'O', b'O',    0, b'O', b'U', b'U', b'U', b'U', b'Y', b'B', b'B', // d
    b'A', b'A', b'A', b'A', b'A', b'A', b'A', b'C', b'E', b'E', b'E', b'E', b'I', b'I', b'I', b'I', // e
    b'D', b'N', b'O', b'O', b'O', b'O', b'O',    0, b'O', b'U', b'U', b'U', b'U', b'Y', b'B', b'Y', // f
];

/// Encodes a character as a single Windows-1252 byte.
///
/// Returns `None` for characters outside the code page.
///
/// # Examples
///
/// ```
/// use xword_core::char_table::encode_windows_1252;
///
/// assert_eq!(encode_windows_1252('A'), Some(b'A'));
/// assert_eq!(encode_windows_1252('\u{20ac}'), Some(0x80));
/// assert_eq!(encode_windows_1252('\u{e9}'), Some(0xe9));
/// assert_eq!(encode_windows_1252('\u{3042}'), None);
/// ```
#[must_use]
pub fn encode_windows_1252(ch: char) -> Option<u8> {
    let code = u32::from(ch);
    if code < 0x80 || (0xa0..=0xff).contains(&code) {
        return u8::try_from(code).ok();
    }
    let index = WINDOWS_1252_HIGH
        .iter()
        .position(|&high| high != 0 && u32::from(high) == code)?;
    u8::try_from(0x80 + index).ok()
}

/// Decodes a single Windows-1252 byte.
///
/// Returns `None` for the five bytes the code page leaves undefined.
#[must_use]
pub fn decode_windows_1252(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9f => match WINDOWS_1252_HIGH[usize::from(byte - 0x80)] {
            0 => None,
            high => char::from_u32(u32::from(high)),
        },
        _ => Some(char::from(byte)),
    }
}

/// Maps a character to the grid alphabet.
///
/// Letters are upper-cased, and the digits and symbols `# $ % & + ? @`, space
/// and `-` pass through. The black square marker `.` and the symbol bracket `[`
/// are not valid grid characters on their own. Characters outside Windows-1252
/// are accepted when they are alphabetic, for puzzles stored as UTF-8.
///
/// # Examples
///
/// ```
/// use xword_core::char_table::to_grid;
///
/// assert_eq!(to_grid('q'), Some('Q'));
/// assert_eq!(to_grid('\u{e9}'), Some('\u{c9}'));
/// assert_eq!(to_grid('.'), None);
/// assert_eq!(to_grid('!'), None);
/// ```
#[must_use]
pub fn to_grid(ch: char) -> Option<char> {
    if ch == '.' || ch == '[' {
        return None;
    }
    match encode_windows_1252(ch) {
        Some(byte) => match UPPER_CASE[usize::from(byte)] {
            0 => None,
            upper => decode_windows_1252(upper),
        },
        None if ch.is_alphabetic() => {
            let mut upper = ch.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => Some(single),
                _ => Some(ch),
            }
        }
        None => None,
    }
}

/// Maps a character to its plain ASCII form.
///
/// Accented letters become their base letter, digits become the first letter
/// of their English name, symbols become the first letter of their name, and
/// space, `-` and `[` become `-`. Returns `None` when there is no plain form.
///
/// # Examples
///
/// ```
/// use xword_core::char_table::to_plain;
///
/// assert_eq!(to_plain('a'), Some(b'A'));
/// assert_eq!(to_plain('7'), Some(b'S'));
/// assert_eq!(to_plain('&'), Some(b'A'));
/// assert_eq!(to_plain('\u{d1}'), Some(b'N'));
/// assert_eq!(to_plain('*'), None);
/// ```
#[must_use]
pub fn to_plain(ch: char) -> Option<u8> {
    let byte = encode_windows_1252(ch)?;
    match ASCII[usize::from(byte)] {
        0 => None,
        plain => Some(plain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_1252_round_trip() {
        for byte in 0..=u8::MAX {
            if let Some(ch) = decode_windows_1252(byte) {
                assert_eq!(encode_windows_1252(ch), Some(byte), "byte {byte:#04x}");
            }
        }
    }

    #[test]
    fn test_windows_1252_undefined_bytes() {
        for byte in [0x81, 0x8d, 0x8f, 0x90, 0x9d] {
            assert_eq!(decode_windows_1252(byte), None);
        }
        assert_eq!(encode_windows_1252('\u{81}'), None);
    }

    #[test]
    fn test_windows_1252_high_table() {
        assert_eq!(encode_windows_1252('\u{2014}'), Some(0x97));
        assert_eq!(encode_windows_1252('\u{0178}'), Some(0x9f));
        assert_eq!(decode_windows_1252(0x99), Some('\u{2122}'));
    }

    #[test]
    fn test_to_grid_upper_cases_accents() {
        assert_eq!(to_grid('\u{161}'), Some('\u{160}'));
        assert_eq!(to_grid('\u{ff}'), Some('\u{178}'));
        assert_eq!(to_grid('\u{df}'), Some('\u{df}'));
    }

    #[test]
    fn test_to_grid_rejects_controls_and_markers() {
        assert_eq!(to_grid('\n'), None);
        assert_eq!(to_grid('['), None);
        assert_eq!(to_grid(']'), None);
        assert_eq!(to_grid('\u{d7}'), None);
    }

    #[test]
    fn test_to_grid_non_latin_letters() {
        assert_eq!(to_grid('\u{3b1}'), Some('\u{391}'));
        assert_eq!(to_grid('\u{2603}'), None);
    }

    #[test]
    fn test_to_plain_digits() {
        let plain: Vec<u8> = "0123456789".chars().filter_map(to_plain).collect();
        assert_eq!(plain, b"ZOTTFFSSEN");
    }

    #[test]
    fn test_to_plain_markers() {
        assert_eq!(to_plain(' '), Some(b'-'));
        assert_eq!(to_plain('-'), Some(b'-'));
        assert_eq!(to_plain('['), Some(b'-'));
        assert_eq!(to_plain('.'), Some(b'.'));
        assert_eq!(to_plain('\u{3b1}'), None);
    }

    #[test]
    fn test_to_grid_then_to_plain_is_upper_ascii() {
        for ch in ('a'..='z').chain('A'..='Z') {
            let grid = to_grid(ch).unwrap();
            assert_eq!(to_plain(grid), Some(ch.to_ascii_uppercase() as u8));
        }
    }
}
