// src/bin/cli.rs
use clap::Parser;
use panelist_report::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    panelist_report::log::init(args.verbose);

    let summary = cli::run(&args)?;
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
