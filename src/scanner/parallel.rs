use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

use super::coordinator::Coordinator;
use super::engine::scan_chunk;
use super::types::{ChunkSettings, TallyReport};
use crate::parallel::ParallelConfig;

/// Runs one scan over a list of files with a fixed pool of worker threads
#[derive(Debug, Clone)]
pub struct TallyRunner {
    settings: ChunkSettings,
    workers: usize,
}

impl TallyRunner {
    pub fn new(settings: ChunkSettings, workers: usize) -> Self {
        Self {
            settings,
            workers: workers.max(1),
        }
    }

    /// Size the pool from CPU count and config limits
    pub fn with_config(settings: ChunkSettings, config: &ParallelConfig) -> Self {
        Self::new(settings, config.worker_count())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Scan `files`, blocking until every worker has finished.
    ///
    /// Worker failures do not make this return an error; they are listed in
    /// the report and clear its `success` flag. Only a worker panic does.
    pub fn run(&self, files: Vec<PathBuf>) -> Result<TallyReport> {
        let start_time = Instant::now();
        let mut coordinator = Coordinator::new(self.settings);
        coordinator.initialize(files, self.workers);

        tracing::info!(
            "Scanning {} files with {} workers ({} byte chunks)",
            coordinator.files().len(),
            self.workers,
            self.settings.min_chunk_size
        );

        let shared = &coordinator;
        crossbeam::thread::scope(|s| {
            for worker_id in 0..self.workers {
                s.spawn(move |_| worker_loop(shared, worker_id));
            }
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel scan"))?;

        let elapsed = start_time.elapsed();
        let snapshot = coordinator.finalize();
        coordinator.teardown();

        let report = TallyReport::from_snapshot(snapshot, self.workers, elapsed.as_millis() as u64);
        tracing::info!(
            "Scan completed in {:.3}s ({} files, {} skipped, success: {})",
            elapsed.as_secs_f64(),
            report.files.len(),
            report.skipped_files(),
            report.success
        );

        Ok(report)
    }
}

/// Pull, scan and submit chunks until the coordinator runs dry or fails.
fn worker_loop(coordinator: &Coordinator, worker_id: usize) {
    let mut buffer = Vec::with_capacity(coordinator.settings().capacity());
    let mut chunks = 0usize;

    loop {
        let chunk = match coordinator.acquire_chunk(worker_id, &mut buffer) {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Worker {} stopping: {}", worker_id, e);
                coordinator.report_status(worker_id, e);
                return;
            }
        };

        let (delta, _) = scan_chunk(&buffer, chunk.carry, chunk.last);

        if let Err(e) = coordinator.submit_result(worker_id, chunk.file_id, &delta) {
            tracing::error!("Worker {} stopping: {}", worker_id, e);
            coordinator.report_status(worker_id, e);
            return;
        }
        chunks += 1;
    }

    tracing::debug!("Worker {} finished after {} chunks", worker_id, chunks);
}

/// Convenience function for a scan with explicit settings
pub fn tally_files(files: Vec<PathBuf>, settings: ChunkSettings, workers: usize) -> Result<TallyReport> {
    TallyRunner::new(settings, workers).run(files)
}
