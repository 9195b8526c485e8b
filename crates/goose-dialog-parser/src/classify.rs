//! Character classification for the dialog grammar.

/// Coarse classification of a single input code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    At,
    Newline,
    Space,
    Backtick,
    Other,
}

/// Classifies a code point. Whitespace is only ASCII space and newline; tabs
/// fall under `Other` except where `state` explicitly treats them as
/// headline-continuation indentation.
pub fn class(ch: char) -> Class {
    match ch {
        '@' => Class::At,
        '\n' => Class::Newline,
        ' ' => Class::Space,
        '`' => Class::Backtick,
        _ => Class::Other,
    }
}

/// Returns true for characters allowed inside a mention name: ASCII letters
/// and digits, `_`, `-`, `.`, and any Unicode letter or decimal digit.
///
/// This is the sole definition of a mention character, shared by the
/// streaming parser and the stand-alone [`crate::mentions::extract_mentions`]
/// helper. It relies on `char`'s built-in, generated Unicode property tables
/// rather than a hand-rolled range table.
///
/// `char::is_numeric` is broader than the `Nd` (decimal number) category
/// alone — it also admits `Nl`/`No` code points such as Roman numeral
/// letterlikes and superscript or vulgar-fraction digits. `char::to_digit`
/// would be `Nd`-exact but only recognizes ASCII `0`-`9`, which would drop
/// legitimate non-Latin decimal digits (e.g. Devanagari, Arabic-Indic) that
/// mention names are meant to allow. Tolerating the small `Nl`/`No`
/// over-acceptance is the better trade-off of the two.
pub fn is_mention_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || ch == '-'
        || ch == '.'
        || ch.is_alphabetic()
        || ch.is_numeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_ascii() {
        assert_eq!(class('@'), Class::At);
        assert_eq!(class('\n'), Class::Newline);
        assert_eq!(class(' '), Class::Space);
        assert_eq!(class('`'), Class::Backtick);
        assert_eq!(class('\t'), Class::Other);
        assert_eq!(class('x'), Class::Other);
    }

    #[test]
    fn mention_chars_cover_ascii_and_unicode() {
        assert!(is_mention_char('a'));
        assert!(is_mention_char('Z'));
        assert!(is_mention_char('9'));
        assert!(is_mention_char('_'));
        assert!(is_mention_char('-'));
        assert!(is_mention_char('.'));
        assert!(is_mention_char('é'));
        assert!(is_mention_char('九'));
        assert!(!is_mention_char(' '));
        assert!(!is_mention_char('@'));
        assert!(!is_mention_char('\n'));
        assert!(!is_mention_char('/'));
    }
}
