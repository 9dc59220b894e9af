//! Word automaton over decoded code points
//!
//! Two states, outside a word and inside one. A word opens on an
//! alphanumeric code point or `_` and closes on whitespace, punctuation or
//! a separator. Anything else (apostrophes, symbols) leaves the state as is.

use super::types::{Measurement, ScanState};
use crate::text::{CharClass, CodePoints, classify, classify::is_consonant};

/// What a single code point did to the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    WordStart { vowel: bool },
    WordEnd { consonant: bool },
}

impl ScanState {
    /// Feed one code point.
    pub fn step(&mut self, ch: char) -> Transition {
        let class = classify(ch);
        let transition = if !self.in_word {
            if class.starts_word() {
                self.in_word = true;
                Transition::WordStart {
                    vowel: class == CharClass::Vowel,
                }
            } else {
                Transition::Stay
            }
        } else if class.ends_word() {
            self.in_word = false;
            Transition::WordEnd {
                consonant: self.previous.is_some_and(is_consonant),
            }
        } else {
            Transition::Stay
        };

        self.previous = Some(ch);
        transition
    }

    /// Close a word left open at end of input.
    pub fn finish(&mut self) -> Transition {
        if !self.in_word {
            return Transition::Stay;
        }

        self.in_word = false;
        Transition::WordEnd {
            consonant: self.previous.is_some_and(is_consonant),
        }
    }

    /// State after running `bytes` through the automaton from `self`.
    pub fn after(mut self, bytes: &[u8]) -> ScanState {
        for ch in CodePoints::new(bytes) {
            self.step(ch);
        }
        self
    }
}

impl Measurement {
    fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => {}
            Transition::WordStart { vowel } => {
                self.word_count += 1;
                if vowel {
                    self.words_start_vowel += 1;
                }
            }
            Transition::WordEnd { consonant } => {
                if consonant {
                    self.words_end_consonant += 1;
                }
            }
        }
    }
}

/// Measure one chunk.
///
/// `carry` is the automaton state at the first byte; `end_of_file` closes
/// a word still open after the last byte.
pub fn scan_chunk(bytes: &[u8], carry: ScanState, end_of_file: bool) -> (Measurement, ScanState) {
    let mut state = carry;
    let mut delta = Measurement::default();

    for ch in CodePoints::new(bytes) {
        delta.record(state.step(ch));
    }

    if end_of_file {
        delta.record(state.finish());
    }

    (delta, state)
}

/// Measure a complete in-memory text.
pub fn scan_text(text: &str) -> Measurement {
    scan_chunk(text.as_bytes(), ScanState::default(), true).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_sentence() {
        // Eu and a start with a vowel; no word ends in a consonant
        assert_eq!(scan_text("Eu vou a casa hoje"), Measurement::new(5, 2, 0));
    }

    #[test]
    fn test_consonant_endings_and_accents() {
        // "Olá" "mundo" "Estás" "bem" "Ção" "já"
        let m = scan_text("Olá, mundo! Estás bem? Ção já.");
        assert_eq!(m, Measurement::new(6, 2, 2));
    }

    #[test]
    fn test_word_open_at_end_of_file_is_closed() {
        assert_eq!(scan_text("hello world"), Measurement::new(2, 0, 1));
    }

    #[test]
    fn test_apostrophe_does_not_split_words() {
        assert_eq!(scan_text("d'água o’neill"), Measurement::new(2, 1, 1));
    }

    #[test]
    fn test_underscore_and_digits_start_words() {
        // "_x" ends on consonant, "42" is a word ending on a digit
        assert_eq!(scan_text("_x 42 a1b"), Measurement::new(3, 1, 2));
    }

    #[test]
    fn test_separators_end_words() {
        assert_eq!(scan_text("(sol)-lua “mar”"), Measurement::new(3, 0, 2));
    }

    #[test]
    fn test_without_end_of_file_flush() {
        let (delta, state) = scan_chunk(b"abc def", ScanState::default(), false);
        assert_eq!(delta, Measurement::new(2, 1, 1));
        assert!(state.in_word);
        assert_eq!(state.previous, Some('f'));
    }

    #[test]
    fn test_carry_joins_split_word() {
        let whole = scan_text("casas bonitas");

        let (first, carry) = scan_chunk(b"casas bon", ScanState::default(), false);
        let (second, _) = scan_chunk(b"itas", carry, true);

        assert_eq!(first + second, whole);
    }

    #[test]
    fn test_carry_with_cut_right_before_delimiter() {
        let (first, carry) = scan_chunk(b"mar", ScanState::default(), false);
        let (second, _) = scan_chunk(b" azul", carry, true);

        assert_eq!(first + second, scan_text("mar azul"));
        assert_eq!(first + second, Measurement::new(2, 1, 2));
    }

    #[test]
    fn test_after_matches_scan_state() {
        let carry = ScanState::default().after(b"um dois");
        assert_eq!(carry, scan_chunk(b"um dois", ScanState::default(), false).1);
    }

    #[test]
    fn test_empty_input() {
        assert!(scan_text("").is_zero());
        assert!(scan_text("  ... ").is_zero());
    }
}
