//! # wordtally - multi-threaded word statistics for text files
//!
//! Counts, per file, the words, the words beginning with a vowel and the
//! words ending with a consonant. Text is decoded as UTF-8 with Latin-1
//! accented letters folded to their base letter.
//!
//! Files are read in bounded chunks that always end right after a delimiter
//! byte, so any number of worker threads can scan them concurrently without
//! splitting words in ordinary text.
//!
//! ## Quick Start
//!
//! ```bash
//! wordtally count -n 4 book.txt notes.txt
//! wordtally count --format json book.txt
//! wordtally det matrices.bin
//! ```
//!
//! ```rust
//! use wordtally::scanner::{Measurement, scan_text};
//!
//! assert_eq!(scan_text("Eu vou a casa hoje"), Measurement::new(5, 2, 0));
//! ```

pub mod chunked;
pub mod cli;
pub mod config;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod scanner;
pub mod text;

pub use cli::{Cli, Output};
pub use config::{Settings, TallyConfig};
pub use scanner::{Coordinator, Measurement, TallyReport, TallyRunner};

/// Result type alias for wordtally operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
