mod platform;

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use platform::LogDestination;

#[derive(Parser)]
#[command(
    name = "notebook",
    about = "Per-application notebook panel driven by line commands on stdin"
)]
struct Cli {
    /// Settings file; defaults to ./notebook.ron
    settings: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "file")]
    log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    platform::run_app(cli.settings, cli.log, level)
}
