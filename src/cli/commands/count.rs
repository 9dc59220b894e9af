use anyhow::{Context as _, Result, bail};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use super::positive_usize;
use crate::cli::Context;
use crate::config::{ChunkingOverrides, CliOverrides, OutputFormat, OutputOverrides, TallyConfig, WorkerOverrides};
use crate::scanner::{FileStatus, TallyReport, TallyRunner};

#[derive(Args)]
pub struct CountArgs {
    /// Number of worker threads (default: derived from CPU count)
    #[arg(short = 'n', long = "threads", value_name = "THREADS", value_parser = positive_usize())]
    pub threads: Option<usize>,

    /// Minimum chunk size in bytes
    #[arg(long = "min-chunk", value_name = "BYTES", value_parser = positive_usize())]
    pub min_chunk: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Text files to process
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl CountArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            chunking: ChunkingOverrides {
                min_chunk_size: self.min_chunk,
            },
            workers: WorkerOverrides { threads: self.threads },
            output: OutputOverrides { format: self.format },
        }
    }
}

pub fn execute(args: CountArgs, ctx: &Context) -> Result<()> {
    let config = TallyConfig::load(ctx.config.as_deref(), Some(args.overrides()))?;
    let settings = config.settings()?;

    let chunk_settings = settings.chunking.to_chunk_settings()?;
    let parallel = settings.workers.to_parallel_config()?;
    let runner = TallyRunner::with_config(chunk_settings, &parallel);

    let start = Instant::now();
    let report = runner.run(args.files).context("Word count failed")?;
    let elapsed = start.elapsed();

    match settings.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print_text_report(&report, ctx);
            if settings.output.timing {
                ctx.output.blank_line();
                ctx.output.result_line("Elapsed time", format!("{:.6} s", elapsed.as_secs_f64()));
            }
        }
    }

    if !report.success {
        for failure in &report.failures {
            ctx.output.error(&format!("Error at worker {}: {}", failure.worker, failure.error));
        }
        bail!("{} worker(s) stopped early; results are incomplete", report.failures.len());
    }

    Ok(())
}

fn print_text_report(report: &TallyReport, ctx: &Context) {
    let output = &ctx.output;

    if !output.is_quiet() {
        output.result_line("Number of worker threads", report.workers);
        output.result_line("Number of files for processing", report.files.len());
    }

    for file in &report.files {
        output.header(&format!("File name: {}", file.path.display()));
        output.result_line("Number of words", file.measurement.word_count);
        output.result_line(
            "Number of words beginning with a vowel",
            file.measurement.words_start_vowel,
        );
        output.result_line(
            "Number of words ending with a consonant",
            file.measurement.words_end_consonant,
        );
        match &file.status {
            FileStatus::Unreadable(reason) => {
                output.verbose(&format!("{} was not read: {}", file.path.display(), reason))
            }
            _ => output.verbose(&format!("{} bytes in {} chunks", file.bytes, file.chunks)),
        }
    }
}
