use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jsondiff_engine::Format;

#[derive(Parser)]
#[command(
    name = "jsondiff",
    about = "jsondiff — show what changed between two JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the change tree between two documents
    Diff(DiffArgs),
    /// List every changed path between two documents
    Paths(PathsArgs),
}

/// Arguments shared by every comparison.
#[derive(Args)]
pub struct InputArgs {
    /// The previous document (`-` for stdin)
    pub old: PathBuf,
    /// The current document (`-` for stdin)
    pub new: PathBuf,
    /// Ignore a dot-joined path (repeatable)
    #[arg(short, long = "ignore", value_name = "PATH")]
    pub ignore: Vec<String>,
    /// TOML file with `format`, `ignore` and `pretty` settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Which side of each change to print
    #[arg(short, long)]
    pub show: Option<ShowArg>,
    /// Indent the output
    #[arg(long)]
    pub pretty: bool,
    /// Exit with status 1 when the documents differ
    #[arg(long)]
    pub exit_code: bool,
}

#[derive(Args)]
pub struct PathsArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ShowArg {
    New,
    Old,
    Both,
}

impl From<ShowArg> for Format {
    fn from(arg: ShowArg) -> Self {
        match arg {
            ShowArg::New => Format::NewOnly,
            ShowArg::Old => Format::OldOnly,
            ShowArg::Both => Format::BothAsPair,
        }
    }
}
