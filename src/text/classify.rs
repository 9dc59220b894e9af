//! Character classification used by the word automaton.
//!
//! Accented Latin-1 letters fold to their base letter before the vowel and
//! consonant tests, so `é` is a vowel and `ç` a consonant.

/// Coarse class of a code point, as seen by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Vowel,
    Consonant,
    Digit,
    Underscore,
    Whitespace,
    Punctuation,
    Separator,
    Merger,
    Other,
}

impl CharClass {
    /// Whether a word may start on this class.
    pub fn starts_word(self) -> bool {
        matches!(
            self,
            CharClass::Vowel | CharClass::Consonant | CharClass::Digit | CharClass::Underscore
        )
    }

    /// Whether this class terminates a word.
    pub fn ends_word(self) -> bool {
        matches!(
            self,
            CharClass::Whitespace | CharClass::Punctuation | CharClass::Separator
        )
    }
}

// U+00E0 'à' ..= U+00FC 'ü'; `None` marks '÷' and 'ø'
#[rustfmt::skip]
const LATIN1_FOLD: [Option<char>; 29] = [
    Some('a'), Some('a'), Some('a'), Some('a'), Some('a'), Some('a'), Some('a'),
    Some('c'),
    Some('e'), Some('e'), Some('e'), Some('e'),
    Some('i'), Some('i'), Some('i'), Some('i'),
    Some('o'),
    Some('n'),
    Some('o'), Some('o'), Some('o'), Some('o'), Some('o'),
    None, None,
    Some('u'), Some('u'), Some('u'), Some('u'),
];

/// Fold an accented Latin-1 letter to its lowercase ASCII base letter.
///
/// ASCII input is returned unchanged; anything else that has no ASCII base
/// letter yields `None`.
pub fn fold_latin1(ch: char) -> Option<char> {
    match ch {
        '\u{00E0}'..='\u{00FC}' => LATIN1_FOLD[ch as usize - 0xE0],
        '\u{00C0}'..='\u{00DC}' => LATIN1_FOLD[ch as usize - 0xC0],
        _ if ch.is_ascii() => Some(ch),
        _ => None,
    }
}

fn folded_letter(ch: char) -> Option<char> {
    fold_latin1(ch).filter(|c| c.is_ascii_alphabetic())
}

pub fn is_alphanumeric(ch: char) -> bool {
    ch.is_ascii_digit() || folded_letter(ch).is_some()
}

pub fn is_vowel(ch: char) -> bool {
    folded_letter(ch).is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
}

pub fn is_consonant(ch: char) -> bool {
    folded_letter(ch).is_some() && !is_vowel(ch)
}

pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

pub fn is_punctuation(ch: char) -> bool {
    matches!(ch, '.' | ',' | ':' | ';' | '?' | '!' | '\u{2013}' | '\u{2026}')
}

pub fn is_separator(ch: char) -> bool {
    matches!(ch, '-' | '"' | '[' | ']' | '(' | ')' | '\u{201C}' | '\u{201D}')
}

/// Apostrophes glue the two halves of a word together.
pub fn is_merger(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2018}' | '\u{2019}')
}

/// Whether `byte`, taken as a lone ASCII character, terminates a word.
pub fn is_delimiter_byte(byte: u8) -> bool {
    byte.is_ascii() && classify(byte as char).ends_word()
}

pub fn classify(ch: char) -> CharClass {
    if is_vowel(ch) {
        CharClass::Vowel
    } else if is_consonant(ch) {
        CharClass::Consonant
    } else if ch.is_ascii_digit() {
        CharClass::Digit
    } else if ch == '_' {
        CharClass::Underscore
    } else if is_whitespace(ch) {
        CharClass::Whitespace
    } else if is_punctuation(ch) {
        CharClass::Punctuation
    } else if is_separator(ch) {
        CharClass::Separator
    } else if is_merger(ch) {
        CharClass::Merger
    } else {
        CharClass::Other
    }
}
