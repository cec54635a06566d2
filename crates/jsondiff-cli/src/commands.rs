use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use jsondiff_engine::{DiffConfig, DiffReport, Differ, DivergenceKind};
use serde_json::Value;
use tracing::debug;

use crate::cli::*;

const STDIN: &str = "-";

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args),
        Command::Paths(args) => cmd_paths(args),
    }
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.input)?;
    if let Some(show) = args.show {
        config.format = show.into();
    }
    config.pretty |= args.pretty;

    let (old, new) = read_inputs(&args.input)?;
    let differ = Differ::from_config(&config);
    let tree = differ.diff_values(&old, &new)?;
    let bytes = differ.encode(&tree)?;

    let mut out = io::stdout().lock();
    out.write_all(&bytes)?;
    writeln!(out)?;
    out.flush()?;

    if args.exit_code && !tree.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_paths(args: PathsArgs) -> anyhow::Result<()> {
    let config = load_config(&args.input)?;
    let (old, new) = read_inputs(&args.input)?;
    let report = Differ::from_config(&config).report(&old, &new)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.divergences)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &DiffReport) {
    if report.is_empty() {
        println!("No changes.");
        return;
    }
    for divergence in &report.divergences {
        let path = divergence.path.to_string();
        match divergence.kind {
            DivergenceKind::Added => println!("{} {}", "+".green().bold(), path.green()),
            DivergenceKind::Removed => println!("{} {}", "-".red().bold(), path.red()),
            DivergenceKind::Modified => println!("{} {}", "~".yellow().bold(), path),
            DivergenceKind::TypeChanged => println!("{} {}", "!".magenta().bold(), path),
        }
    }
    println!(
        "\n{} changes: {} added, {} removed, {} modified, {} type changes",
        report.len().to_string().bold(),
        report.additions(),
        report.removals(),
        report.modifications(),
        report.type_changes(),
    );
}

/// Load the optional config file and merge `--ignore` paths into it.
fn load_config(input: &InputArgs) -> anyhow::Result<DiffConfig> {
    let mut config = match &input.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse_config(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DiffConfig::default(),
    };
    for raw in &input.ignore {
        let path = jsondiff_types::Path::parse(raw)?;
        config.ignore.push(path);
    }
    debug!(format = ?config.format, ignored = config.ignore.len(), "config loaded");
    Ok(config)
}

fn parse_config(text: &str) -> anyhow::Result<DiffConfig> {
    Ok(toml::from_str(text)?)
}

fn read_inputs(input: &InputArgs) -> anyhow::Result<(Value, Value)> {
    if is_stdin(&input.old) && is_stdin(&input.new) {
        bail!("only one of the inputs can be read from stdin");
    }
    Ok((read_document(&input.old)?, read_document(&input.new)?))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

fn read_document(path: &Path) -> anyhow::Result<Value> {
    let text = if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing {} as JSON", path.display()))
}
