use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::Context;
use crate::config::{ConfigFormat, TallyConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
}

pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            let config = TallyConfig::load(ctx.config.as_deref(), None)?;

            // Validate the values a run would actually use
            let settings = config.settings()?;
            settings.chunking.to_chunk_settings()?;
            settings.workers.to_parallel_config()?;

            println!("{}", config.export_config(format)?);
        }
    }

    Ok(())
}
