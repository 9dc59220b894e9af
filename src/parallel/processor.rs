use anyhow::Result;
use crossbeam::channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configuration for parallel processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Explicit worker count (0 = derive from CPU count)
    pub threads: usize,
    /// Maximum number of worker threads (0 = no limit)
    pub max_threads: usize,
    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
    /// Channel buffer size multiplier (buffer = workers * multiplier)
    pub channel_buffer_multiplier: usize,
    /// Progress trace frequency (every N items)
    pub progress_update_frequency: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            max_threads: 0,
            thread_percentage: 75,
            channel_buffer_multiplier: 2,
            progress_update_frequency: 5,
        }
    }
}

impl ParallelConfig {
    /// Workers to spawn before looking at the amount of work
    pub fn worker_count(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        calculate_optimal_workers(num_cpus::get(), self.max_threads, self.thread_percentage)
    }
}

/// Apply thread percentage and max_threads to a core count, never below 1
pub fn calculate_optimal_workers(cpu_cores: usize, max_threads: usize, thread_percentage: u8) -> usize {
    let max_by_percentage = std::cmp::max(1, (cpu_cores * thread_percentage as usize) / 100);

    if max_threads > 0 {
        std::cmp::min(max_threads, max_by_percentage)
    } else {
        max_by_percentage
    }
}

/// Result from processing a work item
#[derive(Debug)]
struct WorkResult<R> {
    index: usize,
    outcome: std::result::Result<R, String>,
}

/// Generic parallel processor for work distribution
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    /// Don't create more workers than work items
    pub fn workers_for(&self, work_count: usize) -> usize {
        std::cmp::min(self.config.worker_count(), work_count.max(1))
    }

    /// Process work items in parallel using a worker function
    ///
    /// # Arguments
    /// * `work_items` - Items to process
    /// * `worker_fn` - Function that processes each work item
    /// * `progress_label` - Label used in progress traces
    ///
    /// # Returns
    /// Successful results in original order. Failed items are logged and left out.
    pub fn process<T, R, F>(&self, work_items: Vec<T>, worker_fn: F, progress_label: &str) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> Result<R> + Sync,
    {
        let work_count = work_items.len();
        if work_count == 0 {
            return Ok(Vec::new());
        }

        let workers = self.workers_for(work_count);
        let buffer = workers * self.config.channel_buffer_multiplier.max(1);

        let (work_tx, work_rx): (Sender<(usize, T)>, Receiver<(usize, T)>) = bounded(buffer);
        let (result_tx, result_rx): (Sender<WorkResult<R>>, Receiver<WorkResult<R>>) = bounded(buffer * 2);

        let progress_counter = AtomicUsize::new(0);
        let frequency = self.config.progress_update_frequency.max(1);

        let indexed_results = crossbeam::thread::scope(|s| {
            for worker_id in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let progress_counter = &progress_counter;
                let worker_fn = &worker_fn;

                s.spawn(move |_| {
                    while let Ok((index, work_item)) = work_rx.recv() {
                        let outcome = worker_fn(work_item).map_err(|e| format!("{e:#}"));

                        if result_tx.send(WorkResult { index, outcome }).is_err() {
                            break;
                        }

                        let current = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                        if current % frequency == 0 || current == work_count {
                            tracing::trace!(
                                "{}: {}/{} items ({:.1}%) [worker-{}]",
                                progress_label,
                                current,
                                work_count,
                                current as f64 / work_count as f64 * 100.0,
                                worker_id
                            );
                        }
                    }
                });
            }

            // Producer: send work to workers
            s.spawn(move |_| {
                for (index, work_item) in work_items.into_iter().enumerate() {
                    if work_tx.send((index, work_item)).is_err() {
                        break;
                    }
                }
            });

            // Drop the original sender so the collector sees the end
            drop(result_tx);

            collect_results(result_rx, work_count)
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel processing"))?;

        let mut sorted_results = indexed_results;
        sorted_results.sort_by_key(|r| r.index);

        let successful_results = sorted_results
            .into_iter()
            .filter_map(|r| match r.outcome {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::warn!("{} item {} failed: {}", progress_label, r.index, e);
                    None
                }
            })
            .collect();

        Ok(successful_results)
    }
}

fn collect_results<R>(result_rx: Receiver<WorkResult<R>>, total_work: usize) -> Vec<WorkResult<R>> {
    let mut results = Vec::with_capacity(total_work);

    while let Ok(result) = result_rx.recv() {
        results.push(result);
        if results.len() >= total_work {
            break;
        }
    }

    results
}
