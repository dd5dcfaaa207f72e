mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use rotalog_core::config::loader::ConfigLoader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rotalog",
    version,
    about = "Append audit records to rotating CSV segment files"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/rotalog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved settings
    Doctor,

    /// Append records; each invocation starts a new segment file
    Record(RecordArgs),

    /// Write user1..user3 with two records per segment
    Demo(TargetArgs),

    /// List segment files in numeric order
    Segments(TargetArgs),
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Segment directory (overrides audit.directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Subjects to record, in order
    #[arg(required = true)]
    pub subjects: Vec<String>,

    /// Timestamp for every record (default: now)
    #[arg(long)]
    pub at: Option<String>,

    /// Records per segment (overrides audit.max_lines)
    #[arg(long)]
    pub max_lines: Option<usize>,

    #[command(flatten)]
    pub target: TargetArgs,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let loaded = ConfigLoader::load_or_default(cli.config.as_deref());
    let log_cfg = loaded.as_ref().map(|rc| rc.logging.clone()).unwrap_or_default();
    logging::init(&log_cfg)?;

    let result = match cli.command {
        Commands::Doctor => {
            if !cmd::doctor::run(cli.config.as_deref()) {
                logging::flush();
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Record(args) => cmd::record::run(loaded, &args),
        Commands::Demo(args) => cmd::demo::run(loaded, &args),
        Commands::Segments(args) => cmd::segments::run(loaded, &args),
    };

    logging::flush();
    result
}
