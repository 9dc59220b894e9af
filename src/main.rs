use anyhow::Result;
use clap::Parser;

use wordtally::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
