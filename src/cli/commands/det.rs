use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::positive_usize;
use crate::cli::Context;
use crate::config::{CliOverrides, TallyConfig, WorkerOverrides};
use crate::matrix::determinants_for_files;

#[derive(Args)]
pub struct DetArgs {
    /// Number of worker threads (default: derived from CPU count)
    #[arg(short = 'n', long = "threads", value_name = "THREADS", value_parser = positive_usize())]
    pub threads: Option<usize>,

    /// Binary matrix files to process
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

pub fn execute(args: DetArgs, ctx: &Context) -> Result<()> {
    let overrides = CliOverrides {
        workers: WorkerOverrides { threads: args.threads },
        ..Default::default()
    };
    let config = TallyConfig::load(ctx.config.as_deref(), Some(overrides))?;
    let parallel = config.settings()?.workers.to_parallel_config()?;

    let output = &ctx.output;
    for (path, outcome) in args.files.iter().zip(determinants_for_files(&args.files, &parallel)?) {
        let file = match outcome {
            Ok(file) => file,
            Err(e) => {
                output.warning(&format!("{}. Skipping", e));
                continue;
            }
        };

        output.header(&format!("Determinants for file '{}'", path.display()));
        println!("Number of matrices: {}", file.declared_count);
        println!("Order of the matrices: {}", file.order);
        output.blank_line();
        for (index, det) in file.determinants.iter().enumerate() {
            println!("Determinant for matrix {} is {}.", index + 1, format_scientific(*det));
        }
    }

    Ok(())
}

/// `1.234560e+03` style: six fraction digits, signed two-digit exponent
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{value:.6e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exp) => format!("{}e{}{:02}", mantissa, if exp < 0 { '-' } else { '+' }, exp.abs()),
            Err(_) => formatted,
        },
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(1234.56), "1.234560e+03");
        assert_eq!(format_scientific(-0.00025), "-2.500000e-04");
        assert_eq!(format_scientific(0.0), "0.000000e+00");
        assert_eq!(format_scientific(1e120), "1.000000e+120");
        assert_eq!(format_scientific(f64::INFINITY), "inf");
    }
}
