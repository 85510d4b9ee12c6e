//! Command-line interface for nestfmt
//! This binary reformats flat nested-call dumps and runs the grammar demo pipelines.
//!
//! Usage:
//!   nestfmt format [`<path>`] [--format `<format>`] [--indent `<n>`] [--epsilon `<sym>`]  - Reformat a nested-call string
//!   nestfmt demo [`<path>`]                                                         - Run the grammar demo pipelines
//!   nestfmt list-formats                                                          - List all available output formats
//!
//! Input is read from stdin when `<path>` is absent or `-`. Settings come from the
//! embedded defaults, then `./nestfmt.toml` (or `--config <file>`), then flags.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use nestfmt::nest::demo::{run_demo, SAMPLE_GRAMMAR};
use nestfmt::FormatRegistry;
use nestfmt_config::{Loader, NestfmtConfig};
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// Picked up from the working directory when `--config` is not given.
const LOCAL_CONFIG: &str = "nestfmt.toml";

fn printer_args() -> [Arg; 2] {
    [
        Arg::new("indent")
            .long("indent")
            .short('i')
            .help("Spaces per nesting level")
            .value_parser(value_parser!(usize)),
        Arg::new("epsilon")
            .long("epsilon")
            .short('e')
            .help("Symbol for the empty production (default: ε)"),
    ]
}

fn cli() -> Command {
    Command::new("nestfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for reindenting flat nested-call grammar dumps")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (repeatable); NESTFMT_LOG overrides")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("format")
                .about("Reformat a flat nested-call string")
                .arg(
                    Arg::new("path")
                        .help("File to read, '-' or nothing for stdin")
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)"),
                )
                .args(printer_args()),
        )
        .subcommand(
            Command::new("demo")
                .about("Run the grammar demo pipelines with the configured collaborators")
                .arg(
                    Arg::new("path")
                        .help("Grammar file, '-' for stdin; the sample grammar when omitted")
                        .index(1),
                )
                .args(printer_args()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn main() {
    let matches = cli().get_matches();
    // Global args are propagated into the subcommand's matches
    let verbosity = matches
        .subcommand()
        .map_or(0, |(_, sub)| sub.get_count("verbose"));
    init_logging(verbosity);

    if let Err(err) = run(&matches) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("NESTFMT_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("format", sub)) => handle_format_command(sub),
        Some(("demo", sub)) => handle_demo_command(sub),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    }
}

/// Layer the config file and the subcommand's flags over the defaults.
fn load_config(sub: &ArgMatches) -> anyhow::Result<NestfmtConfig> {
    let mut loader = match sub.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };

    if let Some(indent) = sub.get_one::<usize>("indent") {
        loader = loader.set_override("printer.indent_width", i64::try_from(*indent)?)?;
    }
    if let Some(epsilon) = sub.get_one::<String>("epsilon") {
        loader = loader.set_override("printer.epsilon", epsilon.as_str())?;
    }
    if let Ok(Some(format)) = sub.try_get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }

    let config = loader.build().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn read_input(path: Option<&String>) -> anyhow::Result<String> {
    match path.map(String::as_str) {
        None | Some("-") => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Error reading stdin")?;
            Ok(source)
        }
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Error reading file {}", path))
        }
    }
}

fn print_block(text: &str) {
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
}

/// Handle the format command
fn handle_format_command(sub: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(sub)?;
    let source = read_input(sub.get_one::<String>("path"))?;

    let registry = FormatRegistry::default();
    let output = registry.format_source(
        &source,
        &config.output.format,
        &config.printer.print_options(),
    )?;

    print_block(&output);
    Ok(())
}

/// Handle the demo command
fn handle_demo_command(sub: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(sub)?;
    let input = match sub.get_one::<String>("path") {
        Some(path) => read_input(Some(path))?,
        None => SAMPLE_GRAMMAR.to_string(),
    };

    let toolkit = config.collaborators.toolkit();
    let report = run_demo(&toolkit, &input, &config.printer.print_options());

    print!("{}", report);
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available output formats:\n");

    for format in registry.iter() {
        println!("  {}", format.name());
        println!("    {}", format.description());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }

    #[test]
    fn printer_flags_parse() {
        let matches = cli()
            .try_get_matches_from(["nestfmt", "format", "-i", "4", "-e", "EPS", "in.txt"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<usize>("indent"), Some(&4));
        assert_eq!(sub.get_one::<String>("epsilon").map(String::as_str), Some("EPS"));
        assert_eq!(sub.get_one::<String>("path").map(String::as_str), Some("in.txt"));
    }

    #[test]
    fn demo_has_no_format_flag() {
        assert!(cli()
            .try_get_matches_from(["nestfmt", "demo", "--format", "json"])
            .is_err());
    }
}
