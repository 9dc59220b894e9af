//! Text decoding and character classification
//!
//! Stateless helpers consumed by the scan engine: a lenient UTF-8 decoder
//! over raw byte ranges and the vowel/consonant/delimiter tables.

pub mod classify;
pub mod utf8;

pub use classify::{CharClass, classify, is_delimiter_byte};
pub use utf8::{CodePoints, next_code_point};
