//! Configuration management for wordtally
//!
//! Settings are layered with figment (see [`TallyConfig`]) and then
//! extracted into the typed structs below.

pub mod core;
pub mod smart_load;

pub use self::core::{ChunkingOverrides, CliOverrides, ConfigFormat, OutputOverrides, TallyConfig, WorkerOverrides};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::parallel::ParallelConfig;
use crate::scanner::ChunkSettings;
use crate::text::is_delimiter_byte;

/// Fully merged configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub workers: WorkerSettings,
    pub output: OutputSettings,
}

/// How files are cut into chunks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub min_chunk_size: usize,
    /// A single ASCII byte that always ends a word
    pub delimiter: String,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            min_chunk_size: ChunkSettings::DEFAULT_MIN_CHUNK_SIZE,
            delimiter: " ".to_string(),
        }
    }
}

/// Worker pool sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// 0 = derive from CPU count
    pub threads: usize,
    /// 0 = no limit
    pub max_threads: usize,
    pub thread_percentage: u8,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            threads: 0,
            max_threads: 0,
            thread_percentage: 75,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Print elapsed time after the results
    pub timing: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            timing: true,
        }
    }
}

impl ChunkingSettings {
    /// Validate into the settings the coordinator runs with
    pub fn to_chunk_settings(&self) -> Result<ChunkSettings> {
        if self.min_chunk_size == 0 {
            bail!("chunking.min_chunk_size must be at least 1");
        }

        let delimiter = match self.delimiter.as_bytes() {
            [byte] if is_delimiter_byte(*byte) => *byte,
            _ => bail!(
                "chunking.delimiter must be a single ASCII whitespace, punctuation or separator character, got {:?}",
                self.delimiter
            ),
        };

        Ok(ChunkSettings::new(self.min_chunk_size, delimiter))
    }
}

impl WorkerSettings {
    pub fn to_parallel_config(&self) -> Result<ParallelConfig> {
        if !(1..=100).contains(&self.thread_percentage) {
            bail!(
                "workers.thread_percentage must be between 1 and 100, got {}",
                self.thread_percentage
            );
        }

        Ok(ParallelConfig {
            threads: self.threads,
            max_threads: self.max_threads,
            thread_percentage: self.thread_percentage,
            ..Default::default()
        })
    }
}
