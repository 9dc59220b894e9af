//! Generic parallel execution
//!
//! Resource-aware worker sizing plus an ordered work-queue processor built on
//! crossbeam channels and scoped threads. The module knows nothing about the
//! work it runs: callers hand it items and a function.
//!
//! ```rust
//! use wordtally::parallel::{ParallelConfig, ParallelProcessor, calculate_optimal_workers};
//!
//! // 75% of 8 cores, capped at 4
//! assert_eq!(calculate_optimal_workers(8, 4, 75), 4);
//!
//! let processor = ParallelProcessor::new(ParallelConfig::default());
//! let doubled = processor.process(vec![1, 2, 3], |n| Ok(n * 2), "doubling").unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

pub mod processor;

pub use processor::{ParallelConfig, ParallelProcessor, calculate_optimal_workers};
