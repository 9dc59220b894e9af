//! Error types for the scanning core

use std::fmt;

/// Which of the coordinator's two critical sections failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// File cursor and chunk buffer
    Data,
    /// Per-file measurements
    Results,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Data => f.write_str("data"),
            Section::Results => f.write_str("results"),
        }
    }
}

/// Errors surfaced by the coordinator to worker threads
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("worker {worker} could not enter the {section} section: lock poisoned by a panicked worker")]
    Synchronization { section: Section, worker: usize },

    #[error("worker {worker} submitted results for unknown file id {file_id} ({file_count} files)")]
    UnknownFile {
        worker: usize,
        file_id: usize,
        file_count: usize,
    },

    #[error("worker id {worker} is out of range for a pool of {pool_size} workers")]
    UnknownWorker { worker: usize, pool_size: usize },
}

impl CoordinatorError {
    pub fn worker(&self) -> usize {
        match self {
            CoordinatorError::Synchronization { worker, .. }
            | CoordinatorError::UnknownFile { worker, .. }
            | CoordinatorError::UnknownWorker { worker, .. } => *worker,
        }
    }
}

/// Errors raised while loading matrices for determinant computation
#[derive(Debug, thiserror::Error)]
pub enum MatrixError {
    #[error("could not open matrix file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read matrix header of '{path}': {source}")]
    Header {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid matrix header in '{path}': count {count}, order {order}")]
    InvalidHeader { path: String, count: i32, order: i32 },

    #[error("I/O error while reading matrices from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
