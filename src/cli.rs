use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "license-text",
    about = "Collect the full license text of every npm dependency into one document",
    version
)]
pub struct Cli {
    /// Directory holding the root package.json and node_modules
    pub input_dir: PathBuf,

    /// Document to write (truncated if it exists)
    pub output_file: PathBuf,

    /// Config file [default: <INPUT_DIR>/.license-text/config.toml, fallback ~/.config/license-text/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log every source attempt (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print warnings and the summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::WARN;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
