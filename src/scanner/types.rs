use serde::Serialize;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use crate::error::CoordinatorError;

/// Word statistics for a byte range or a whole file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Measurement {
    pub word_count: u64,
    pub words_start_vowel: u64,
    pub words_end_consonant: u64,
}

impl Measurement {
    pub fn new(word_count: u64, words_start_vowel: u64, words_end_consonant: u64) -> Self {
        Self {
            word_count,
            words_start_vowel,
            words_end_consonant,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl AddAssign<&Measurement> for Measurement {
    fn add_assign(&mut self, delta: &Measurement) {
        self.word_count += delta.word_count;
        self.words_start_vowel += delta.words_start_vowel;
        self.words_end_consonant += delta.words_end_consonant;
    }
}

impl Add for Measurement {
    type Output = Measurement;

    fn add(mut self, rhs: Measurement) -> Measurement {
        self += &rhs;
        self
    }
}

/// State of the word automaton at a byte position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub in_word: bool,
    /// Last code point decoded before this position
    pub previous: Option<char>,
}

/// Tunables for chunk extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSettings {
    pub min_chunk_size: usize,
    pub delimiter: u8,
}

impl ChunkSettings {
    pub const DEFAULT_MIN_CHUNK_SIZE: usize = 4096;

    pub fn new(min_chunk_size: usize, delimiter: u8) -> Self {
        Self {
            min_chunk_size,
            delimiter,
        }
    }

    /// Ring buffer capacity; also the largest chunk ever handed out.
    pub fn capacity(&self) -> usize {
        self.min_chunk_size.saturating_mul(2)
    }
}

impl Default for ChunkSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_CHUNK_SIZE, b' ')
    }
}

/// Metadata of a chunk whose bytes were copied into the caller's buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub file_id: usize,
    pub len: usize,
    /// Automaton state at the first byte of the chunk
    pub carry: ScanState,
    /// Final chunk of its file
    pub last: bool,
}

/// How far the coordinator got with a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum FileStatus {
    Pending,
    Streaming,
    Done,
    Empty,
    Unreadable(String),
}

impl FileStatus {
    pub fn is_skipped(&self) -> bool {
        matches!(self, FileStatus::Empty | FileStatus::Unreadable(_))
    }
}

/// Data-section bookkeeping for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProgress {
    pub status: FileStatus,
    pub bytes: u64,
    pub chunks: u64,
}

impl Default for FileProgress {
    fn default() -> Self {
        Self {
            status: FileStatus::Pending,
            bytes: 0,
            chunks: 0,
        }
    }
}

/// Final per-file result
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub measurement: Measurement,
    pub bytes: u64,
    pub chunks: u64,
    pub status: FileStatus,
}

/// Read-only view of the coordinator once every worker has stopped
#[derive(Debug, Clone)]
pub struct CoordinatorSnapshot {
    pub success: bool,
    /// One slot per worker; `None` means the worker finished normally
    pub statuses: Vec<Option<CoordinatorError>>,
    pub files: Vec<FileReport>,
}

impl CoordinatorSnapshot {
    pub fn failures(&self) -> impl Iterator<Item = &CoordinatorError> {
        self.statuses.iter().flatten()
    }
}

/// A worker that stopped early
#[derive(Debug, Clone, Serialize)]
pub struct WorkerFailure {
    pub worker: usize,
    pub error: String,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct TallyReport {
    pub success: bool,
    pub workers: usize,
    pub files: Vec<FileReport>,
    pub failures: Vec<WorkerFailure>,
    pub elapsed_ms: u64,
}

impl TallyReport {
    pub fn from_snapshot(snapshot: CoordinatorSnapshot, workers: usize, elapsed_ms: u64) -> Self {
        let failures = snapshot
            .failures()
            .map(|e| WorkerFailure {
                worker: e.worker(),
                error: e.to_string(),
            })
            .collect();

        Self {
            success: snapshot.success,
            workers,
            files: snapshot.files,
            failures,
            elapsed_ms,
        }
    }

    pub fn total(&self) -> Measurement {
        self.files
            .iter()
            .fold(Measurement::default(), |acc, f| acc + f.measurement)
    }

    pub fn skipped_files(&self) -> usize {
        self.files.iter().filter(|f| f.status.is_skipped()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_addition() {
        let mut total = Measurement::new(1, 2, 3);
        total += &Measurement::new(10, 20, 30);
        assert_eq!(total, Measurement::new(11, 22, 33));
        assert_eq!(total + Measurement::new(1, 1, 1), Measurement::new(12, 23, 34));
    }

    #[test]
    fn test_capacity_is_twice_min_chunk() {
        assert_eq!(ChunkSettings::new(512, b' ').capacity(), 1024);
        assert_eq!(ChunkSettings::default().capacity(), 8192);
    }

    #[test]
    fn test_report_totals_and_skips() {
        let report = TallyReport {
            success: true,
            workers: 2,
            files: vec![
                FileReport {
                    path: "a.txt".into(),
                    measurement: Measurement::new(3, 1, 1),
                    bytes: 10,
                    chunks: 1,
                    status: FileStatus::Done,
                },
                FileReport {
                    path: "b.txt".into(),
                    measurement: Measurement::default(),
                    bytes: 0,
                    chunks: 0,
                    status: FileStatus::Unreadable("not found".into()),
                },
            ],
            failures: vec![],
            elapsed_ms: 0,
        };

        assert_eq!(report.total(), Measurement::new(3, 1, 1));
        assert_eq!(report.skipped_files(), 1);
    }
}
