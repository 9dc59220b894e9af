//! Parallel word scanning
//!
//! Files are streamed through a [`Coordinator`], which hands out chunks cut
//! right after a delimiter byte together with the automaton state at the
//! cut. Workers run [`scan_chunk`] on each chunk and submit the partial
//! counts back, so totals do not depend on which worker saw which chunk.

pub mod coordinator;
pub mod engine;
pub mod parallel;
pub mod types;

pub use coordinator::Coordinator;
pub use engine::{Transition, scan_chunk, scan_text};
pub use parallel::{TallyRunner, tally_files};
pub use types::{
    Chunk, ChunkSettings, CoordinatorSnapshot, FileProgress, FileReport, FileStatus, Measurement, ScanState,
    TallyReport, WorkerFailure,
};
