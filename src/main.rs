use clap::Parser;

use areadraw::cli::{run, Cli};
use areadraw::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging()?;

    let summary = run(cli)?;
    println!("{}", summary);

    Ok(())
}
