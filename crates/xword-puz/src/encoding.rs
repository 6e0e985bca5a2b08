//! Text encoding for `.puz` strings.
//!
//! Files older than [`UTF8_MIN_VERSION`] store text as Windows-1252; newer
//! files store UTF-8.

use xword_core::char_table;

use crate::EncodingError;

/// First format version that stores text as UTF-8.
pub const UTF8_MIN_VERSION: u16 = 20;

/// First format version whose checksums cover the notes.
pub const NOTES_MIN_VERSION: u16 = 13;

/// Format version assumed when none is given.
pub const DEFAULT_VERSION: u16 = 13;

/// Encodes `text` the way a version `version` file stores it.
///
/// # Errors
///
/// Returns [`EncodingError::Unencodable`] if `version` selects Windows-1252
/// and `text` has a character outside that code page.
///
/// # Examples
///
/// ```
/// use xword_puz::encoding::encode;
///
/// assert_eq!(encode("Caf\u{e9} \u{20ac}", 13)?, b"Caf\xe9 \x80");
/// assert_eq!(encode("Caf\u{e9}", 20)?, "Caf\u{e9}".as_bytes());
/// assert!(encode("\u{3042}", 13).is_err());
/// # Ok::<(), xword_puz::EncodingError>(())
/// ```
pub fn encode(text: &str, version: u16) -> Result<Vec<u8>, EncodingError> {
    if version >= UTF8_MIN_VERSION {
        return Ok(text.as_bytes().to_vec());
    }
    text.chars()
        .map(|ch| char_table::encode_windows_1252(ch).ok_or(EncodingError::Unencodable { ch, version }))
        .collect()
}

/// Decodes bytes stored by a version `version` file.
///
/// Invalid sequences become U+FFFD.
#[must_use]
pub fn decode(bytes: &[u8], version: u16) -> String {
    if version >= UTF8_MIN_VERSION {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    bytes
        .iter()
        .map(|&byte| char_table::decode_windows_1252(byte).unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_1252_high_range() {
        assert_eq!(encode("\u{20ac}\u{2026}\u{178}", 13), Ok(vec![0x80, 0x85, 0x9f]));
        assert_eq!(decode(&[0x80, 0x85, 0x9f], 13), "\u{20ac}\u{2026}\u{178}");
    }

    #[test]
    fn test_unencodable_reports_version() {
        assert_eq!(
            encode("ok\u{263a}", 19),
            Err(EncodingError::Unencodable {
                ch: '\u{263a}',
                version: 19
            })
        );
        assert_eq!(encode("ok\u{263a}", 20), Ok("ok\u{263a}".as_bytes().to_vec()));
    }

    #[test]
    fn test_undefined_bytes_decode_to_replacement() {
        assert_eq!(decode(&[b'A', 0x81], 13), "A\u{fffd}");
        assert_eq!(decode(&[0xff], 20), "\u{fffd}");
    }
}
