//! Conversion of stored XML-escaped text to the plain text `.puz` files hold.
//!
//! Puzzle text is kept XML-escaped in memory, with `<br/>` for line breaks.
//! `.puz` files hold plain text, so escaped text is unescaped before it is
//! encoded and checksummed.

use crate::{PuzzleError, encoding};

/// Returns `true` if `text` has no markup other than `<br>` tags.
///
/// # Examples
///
/// ```
/// use xword_puz::text::is_plain;
///
/// assert!(is_plain("one<br/>two<br />three<br>"));
/// assert!(!is_plain("<i>italic</i>"));
/// assert!(!is_plain("a > b"));
/// ```
#[must_use]
pub fn is_plain(text: &str) -> bool {
    let mut rest = text;
    while let Some(index) = rest.find(['<', '>']) {
        let tail = &rest[index..];
        match br_tag_len(tail) {
            Some(len) => rest = &tail[len..],
            None => return false,
        }
    }
    true
}

/// Replaces `<br>` tags with `"\r\n"` and decodes character references.
///
/// Numeric references and the entities `amp`, `lt`, `gt`, `apos` and `quot`
/// are decoded. Unknown entities and a `&` without a closing `;` are kept as
/// written.
///
/// # Examples
///
/// ```
/// use xword_puz::text::unescape_xml;
///
/// assert_eq!(unescape_xml("Q&amp;A<br/>&#233;t&#xE9;"), "Q&A\r\n\u{e9}t\u{e9}");
/// assert_eq!(unescape_xml("&nbsp; & more"), "&nbsp; & more");
/// ```
#[must_use]
pub fn unescape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(index) = rest.find(['<', '&']) {
        out.push_str(&rest[..index]);
        let tail = &rest[index..];
        if tail.starts_with('<') {
            match br_tag_len(tail) {
                Some(len) => {
                    out.push_str("\r\n");
                    rest = &tail[len..];
                }
                None => {
                    out.push('<');
                    rest = &tail[1..];
                }
            }
            continue;
        }

        let name_len = tail[1..]
            .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '#'))
            .unwrap_or(tail.len() - 1);
        if !tail[1 + name_len..].starts_with(';') {
            out.push('&');
            rest = &tail[1..];
            continue;
        }
        let reference_len = name_len + 2;
        match entity_char(&tail[1..=name_len]) {
            Some(ch) => out.push(ch),
            None => out.push_str(&tail[..reference_len]),
        }
        rest = &tail[reference_len..];
    }
    out.push_str(rest);
    out
}

/// Converts escaped text to the encoded bytes a version `version` file stores.
///
/// # Errors
///
/// Returns [`PuzzleError::Formatted`] if the text has markup other than line
/// breaks, or [`PuzzleError::Encoding`] if it cannot be encoded.
pub fn puz_text(text: &str, version: u16) -> Result<Vec<u8>, PuzzleError> {
    if !is_plain(text) {
        return Err(PuzzleError::Formatted {
            text: text.to_owned(),
        });
    }
    Ok(encoding::encode(&unescape_xml(text), version)?)
}

/// Returns the length of a `<br>`, `<br/>` or `<br />` tag at the start of `text`.
fn br_tag_len(text: &str) -> Option<usize> {
    let inner = text.strip_prefix("<br")?;
    let end = inner.find('>')?;
    let slash = inner[..end].trim();
    (slash.is_empty() || slash == "/").then_some(3 + end + 1)
}

fn entity_char(entity: &str) -> Option<char> {
    if entity.len() < 2 {
        return None;
    }
    let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(decimal) = entity.strip_prefix('#') {
        if !decimal.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        decimal.parse().ok()?
    } else {
        return match entity {
            "apos" => Some('\''),
            "quot" => Some('"'),
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            _ => None,
        };
    };
    char::from_u32(code).filter(|&ch| ch != '\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodingError;

    #[test]
    fn test_br_tags() {
        assert_eq!(br_tag_len("<br>rest"), Some(4));
        assert_eq!(br_tag_len("<br/>"), Some(5));
        assert_eq!(br_tag_len("<br  / >x"), Some(8));
        assert_eq!(br_tag_len("<b>"), None);
        assert_eq!(br_tag_len("<br x>"), None);
        assert_eq!(br_tag_len("<br"), None);
    }

    #[test]
    fn test_unescape_entities() {
        assert_eq!(unescape_xml("&lt;tag&gt;"), "<tag>");
        assert_eq!(unescape_xml("&apos;&quot;"), "'\"");
        assert_eq!(unescape_xml("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(unescape_xml("&#0;&#xZZ;&;&a;"), "&#0;&#xZZ;&;&a;");
        assert_eq!(unescape_xml("trailing &amp"), "trailing &amp");
    }

    #[test]
    fn test_unescape_line_breaks() {
        assert_eq!(unescape_xml("a<br/>b<br />c<br>d"), "a\r\nb\r\nc\r\nd");
        assert_eq!(unescape_xml("a < b"), "a < b");
    }

    #[test]
    fn test_no_markup_is_unchanged() {
        let text = "Plain text, nothing to see";
        assert_eq!(unescape_xml(text), text);
        assert!(is_plain(text));
    }

    #[test]
    fn test_puz_text() {
        assert_eq!(puz_text("Fish &amp; chips", 13), Ok(b"Fish & chips".to_vec()));
        assert_eq!(
            puz_text("<b>bold</b>", 13),
            Err(PuzzleError::Formatted {
                text: "<b>bold</b>".to_owned()
            })
        );
        assert_eq!(
            puz_text("&#x263a;", 13),
            Err(PuzzleError::Encoding(EncodingError::Unencodable {
                ch: '\u{263a}',
                version: 13
            }))
        );
        assert_eq!(puz_text("&#x263a;", 20), Ok("\u{263a}".as_bytes().to_vec()));
    }
}
