//! Work distribution between scanning workers
//!
//! The coordinator streams an ordered list of files through one
//! [`ChunkedReader`] and hands out delimiter-aligned chunks to workers.
//! Two independent locks guard disjoint state:
//!
//! - the *data* section (file cursor, reader, carried automaton state and
//!   per-file progress), held while chunks are cut and files are read;
//! - the *results* section (per-file measurements), held only while a
//!   delta is added in.
//!
//! The two are never held at the same time. Scanning happens outside both,
//! so I/O is serialized while scanning runs in parallel.
//!
//! # File phases
//!
//! ```text
//!   buffer full      -> drain up to the delimiter, refill, advance if empty
//!   buffer not full  -> file exhausted: drain everything, advance
//!   advance          -> open the next file, skipping unreadable/empty ones
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use super::types::{
    Chunk, ChunkSettings, CoordinatorSnapshot, FileProgress, FileReport, FileStatus, Measurement,
    ScanState,
};
use crate::chunked::ChunkedReader;
use crate::error::{CoordinatorError, Section};
use crate::text::is_delimiter_byte;

#[derive(Debug, Default)]
struct DataSection {
    cursor: usize,
    reader: Option<ChunkedReader>,
    carry: ScanState,
    progress: Vec<FileProgress>,
}

impl DataSection {
    /// Point the reader at the first usable file at or after `start`.
    ///
    /// Leaves `cursor == files.len()` when none is left.
    fn advance(&mut self, files: &[PathBuf], start: usize, capacity: usize) {
        self.carry = ScanState::default();

        for (file_id, path) in files.iter().enumerate().skip(start) {
            let opened = match self.reader.as_mut() {
                Some(reader) => reader.swap_file(path),
                None => ChunkedReader::open(path, capacity).map(|reader| {
                    self.reader = Some(reader);
                }),
            };

            let progress = &mut self.progress[file_id];
            match opened {
                Ok(()) if self.reader.as_ref().is_some_and(|r| !r.is_empty()) => {
                    tracing::debug!("Streaming file {} ({})", file_id, path.display());
                    progress.status = FileStatus::Streaming;
                    self.cursor = file_id;
                    return;
                }
                Ok(()) => {
                    tracing::debug!("Skipping empty file {}", path.display());
                    progress.status = FileStatus::Empty;
                }
                Err(e) => {
                    tracing::info!("Skipping unreadable file {}: {}", path.display(), e);
                    progress.status = FileStatus::Unreadable(e.to_string());
                }
            }
        }

        self.cursor = files.len();
        if let Some(reader) = self.reader.take() {
            reader.close();
        }
        tracing::debug!("All {} files exhausted", files.len());
    }
}

#[derive(Debug, Default)]
struct ResultsSection {
    measurements: Vec<Measurement>,
}

/// Shared state of one scanning run.
///
/// Created with [`Coordinator::new`], seeded with [`Coordinator::initialize`]
/// and then shared by reference with the worker threads.
#[derive(Debug)]
pub struct Coordinator {
    settings: ChunkSettings,
    files: Vec<PathBuf>,
    data: Mutex<DataSection>,
    results: Mutex<ResultsSection>,
    statuses: Vec<OnceLock<CoordinatorError>>,
    success: AtomicBool,
}

impl Coordinator {
    pub fn new(settings: ChunkSettings) -> Self {
        Self {
            settings,
            files: Vec::new(),
            data: Mutex::new(DataSection::default()),
            results: Mutex::new(ResultsSection::default()),
            statuses: Vec::new(),
            success: AtomicBool::new(true),
        }
    }

    pub fn settings(&self) -> &ChunkSettings {
        &self.settings
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn worker_count(&self) -> usize {
        self.statuses.len()
    }

    /// Allocate per-file and per-worker storage and open the first usable
    /// file. Any previous run is torn down first.
    pub fn initialize(&mut self, files: Vec<PathBuf>, worker_count: usize) {
        self.teardown();

        let file_count = files.len();
        self.files = files;
        self.statuses = (0..worker_count).map(|_| OnceLock::new()).collect();

        let capacity = self.settings.capacity();
        let data = self.data.get_mut().unwrap_or_else(PoisonError::into_inner);
        data.progress = vec![FileProgress::default(); file_count];
        data.advance(&self.files, 0, capacity);

        let results = self.results.get_mut().unwrap_or_else(PoisonError::into_inner);
        results.measurements = vec![Measurement::default(); file_count];

        tracing::debug!(
            "Coordinator initialized: {} files, {} workers, {} byte buffer",
            file_count,
            worker_count,
            capacity
        );
    }

    /// Copy the next chunk into `out` (cleared first).
    ///
    /// Returns `Ok(None)` once every file is exhausted, and keeps doing so
    /// until the coordinator is re-initialized.
    pub fn acquire_chunk(
        &self,
        worker: usize,
        out: &mut Vec<u8>,
    ) -> Result<Option<Chunk>, CoordinatorError> {
        self.check_worker(worker)?;
        out.clear();

        let mut data = self
            .data
            .lock()
            .map_err(|_| CoordinatorError::Synchronization {
                section: Section::Data,
                worker,
            })?;

        let file_id = data.cursor;
        if file_id >= self.files.len() {
            return Ok(None);
        }

        let carry = data.carry;
        let ChunkSettings {
            min_chunk_size,
            delimiter,
        } = self.settings;

        let Some(reader) = data.reader.as_mut() else {
            return Ok(None);
        };

        let last = if reader.is_full() {
            reader.drain_until(min_chunk_size, delimiter, out);
            if let Err(e) = reader.fill() {
                // Whatever is still buffered goes out as the final chunk
                tracing::warn!("Read error in {}: {}", reader.path().display(), e);
            }
            reader.is_empty()
        } else {
            reader.drain_all(out);
            true
        };

        let progress = &mut data.progress[file_id];
        progress.bytes += out.len() as u64;
        progress.chunks += 1;

        tracing::trace!(
            "Worker {} took {} bytes of file {} (last: {})",
            worker,
            out.len(),
            file_id,
            last
        );

        if last {
            progress.status = FileStatus::Done;
            data.advance(&self.files, file_id + 1, self.settings.capacity());
        } else if is_delimiter_byte(delimiter) && out.last() == Some(&delimiter) {
            data.carry = ScanState::default();
        } else {
            // The cut fell inside a token; resume the automaton where it stopped
            data.carry = carry.after(out);
        }

        Ok(Some(Chunk {
            file_id,
            len: out.len(),
            carry,
            last,
        }))
    }

    /// Add a measurement delta into the running total of `file_id`.
    pub fn submit_result(
        &self,
        worker: usize,
        file_id: usize,
        delta: &Measurement,
    ) -> Result<(), CoordinatorError> {
        self.check_worker(worker)?;

        let mut results = self
            .results
            .lock()
            .map_err(|_| CoordinatorError::Synchronization {
                section: Section::Results,
                worker,
            })?;

        let file_count = results.measurements.len();
        let total = results
            .measurements
            .get_mut(file_id)
            .ok_or(CoordinatorError::UnknownFile {
                worker,
                file_id,
                file_count,
            })?;
        *total += delta;

        Ok(())
    }

    /// Record that `worker` stopped on `error`.
    ///
    /// Only the first error of each worker is kept. Returns whether this
    /// call recorded it.
    pub fn report_status(&self, worker: usize, error: CoordinatorError) -> bool {
        self.success.store(false, Ordering::SeqCst);

        match self.statuses.get(worker) {
            Some(slot) => slot.set(error).is_ok(),
            None => false,
        }
    }

    /// Snapshot of the run. Requires exclusive access, so every worker
    /// borrowing the coordinator must have finished.
    pub fn finalize(&mut self) -> CoordinatorSnapshot {
        let data = self.data.get_mut().unwrap_or_else(PoisonError::into_inner);
        let results = self.results.get_mut().unwrap_or_else(PoisonError::into_inner);

        let files = self
            .files
            .iter()
            .enumerate()
            .map(|(file_id, path)| {
                let progress = data.progress.get(file_id).cloned().unwrap_or_default();
                FileReport {
                    path: path.clone(),
                    measurement: results
                        .measurements
                        .get(file_id)
                        .copied()
                        .unwrap_or_default(),
                    bytes: progress.bytes,
                    chunks: progress.chunks,
                    status: progress.status,
                }
            })
            .collect();

        CoordinatorSnapshot {
            success: self.success.load(Ordering::SeqCst),
            statuses: self.statuses.iter().map(|s| s.get().cloned()).collect(),
            files,
        }
    }

    /// Close the active reader and drop all per-run state.
    pub fn teardown(&mut self) {
        let data = self.data.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(reader) = data.reader.take() {
            reader.close();
        }

        self.files.clear();
        self.statuses.clear();
        self.data = Mutex::new(DataSection::default());
        self.results = Mutex::new(ResultsSection::default());
        self.success = AtomicBool::new(true);
    }

    fn check_worker(&self, worker: usize) -> Result<(), CoordinatorError> {
        if worker < self.statuses.len() {
            Ok(())
        } else {
            Err(CoordinatorError::UnknownWorker {
                worker,
                pool_size: self.statuses.len(),
            })
        }
    }

    #[cfg(test)]
    fn poison(&self, section: Section) {
        std::thread::scope(|s| {
            let handle = s.spawn(|| match section {
                Section::Data => {
                    let _guard = self.data.lock();
                    panic!("poisoning data section");
                }
                Section::Results => {
                    let _guard = self.results.lock();
                    panic!("poisoning results section");
                }
            });
            assert!(handle.join().is_err());
        });
    }
}
