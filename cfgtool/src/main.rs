use std::path::PathBuf;

use clap::Parser;

use cfgtool::{
    commands::{Command, CommandHandler},
    ctx::{AppContext, PathConfig},
};

/// Edit schema-described settings, save them as an ini file and optionally
/// launch a program afterwards.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Schema document (.json or .toml).
    #[arg(long, default_value = "config.json")]
    schema: PathBuf,

    /// Settings file; defaults to the schema's `PRG_Ini_name` beside it.
    #[arg(long)]
    ini: Option<PathBuf>,

    /// Directory searched for launch targets; defaults to the schema's directory.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Launch target to preselect.
    #[arg(long)]
    exe: Option<String>,

    /// Extension of launch targets.
    #[arg(long, default_value = std::env::consts::EXE_EXTENSION)]
    ext: String,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let ctx = AppContext {
        paths: PathConfig {
            schema: cli.schema,
            ini: cli.ini,
            launch_dir: cli.dir,
        },
        extension: cli.ext,
        preferred: cli.exe,
    };

    CommandHandler::handle(&ctx, cli.command)
}
