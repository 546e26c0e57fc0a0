// Command-line interface for blockport
//
// Converts JSON documents between the block editor format and Portable Text.
//
// Usage:
//  blockport <input> [--to portable|editor] [-o <file>]   - Convert (default, direction detected when --to is absent)
//  blockport convert <input> [--to portable|editor] [-o <file>]
//  blockport to-portable <input> [-o <file>]             - Editor blocks -> Portable Text
//  blockport to-editor <input> [-o <file>]               - Portable Text -> editor blocks
//  blockport --list-rules                                - List the configured rules
//
// Configuration is read from ./blockport.toml when present, then from --config.
// Set RUST_LOG to see per-block conversion logs on stderr.

use blockport_cli::documents::{self, Direction};

use blockport_config::{BlockportConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "to-portable", "to-editor", "help"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input JSON file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("blockport")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between block editor JSON and Portable Text")
        .long_about(
            "blockport converts rich-text documents between a block editor's\n\
            {type, data} blocks with inline HTML and Portable Text nodes.\n\n\
            Examples:\n  \
            blockport post.json                         # Detect the direction from the JSON\n  \
            blockport post.json --to portable -o pt.json\n  \
            blockport to-editor pt.json                 # Portable Text -> editor blocks\n  \
            blockport --list-rules                      # Show converters and marks",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-rules")
                .long("list-rules")
                .help("List the configured converters, transformers and marks")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a blockport.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail when any block, node or mark is skipped")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a document (default command)")
                .arg(input_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (detected from the input when omitted)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            Direction::NAMES,
                        ))
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("to-portable")
                .about("Convert editor blocks to Portable Text")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("to-editor")
                .about("Convert Portable Text to editor blocks")
                .arg(input_arg())
                .arg(output_arg()),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => match with_default_command(&args) {
            Some(new_args) => match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_flag("strict"),
    );

    if matches.get_flag("list-rules") {
        handle_list_rules_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let direction = sub_matches.get_one::<String>("to").map(|to| {
                to.parse::<Direction>().unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                })
            });
            handle_convert_command(sub_matches, direction, &config);
        }
        Some(("to-portable", sub_matches)) => {
            handle_convert_command(sub_matches, Some(Direction::ToPortable), &config);
        }
        Some(("to-editor", sub_matches)) => {
            handle_convert_command(sub_matches, Some(Direction::ToEditor), &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Insert `convert` before the first positional argument, unless that
/// argument is already a subcommand
///
/// Leading global flags are skipped, so `blockport --strict post.json` works
/// like `blockport post.json --strict`.
fn with_default_command(args: &[String]) -> Option<Vec<String>> {
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => i += 2,
            arg if arg.starts_with('-') => i += 1,
            arg if SUBCOMMANDS.contains(&arg) => return None,
            _ => {
                let mut new_args = args[..i].to_vec();
                new_args.push("convert".to_string());
                new_args.extend_from_slice(&args[i..]);
                return Some(new_args);
            }
        }
    }
    None
}

fn handle_convert_command(
    matches: &ArgMatches,
    direction: Option<Direction>,
    config: &BlockportConfig,
) {
    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: an input file is required");
        std::process::exit(1);
    };
    let output = matches.get_one::<String>("output");

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let forward = config.editor_to_portable();
    let reverse = config.portable_to_editor();
    let (direction, outcome) =
        documents::convert_source(&source, direction, &forward, &reverse).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
    tracing::debug!(%direction, skipped = outcome.diagnostics.len(), "converted {input}");

    if config.convert.strict && !outcome.diagnostics.is_empty() {
        for diagnostic in &outcome.diagnostics {
            eprintln!("Error: {diagnostic}");
        }
        eprintln!(
            "Error: {} item(s) skipped while converting to {direction} (strict mode)",
            outcome.diagnostics.len()
        );
        std::process::exit(1);
    }

    let rendered = documents::render_json(&outcome.json, config.output.pretty).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => fs::write(path, rendered).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{rendered}"),
    }
}

fn handle_list_rules_command(config: &BlockportConfig) {
    let forward = config.editor_to_portable();
    let reverse = config.portable_to_editor();
    let render = reverse.render_config();

    println!("Editor -> Portable Text:\n");
    print_section("Block converters", &forward.converter_names());
    print_section("Transformers", &forward.transformer_names());
    print_section("Mark tags", &forward.marks().tags());

    println!("Portable Text -> Editor:\n");
    print_section("Node converters", &reverse.converter_names());
    print_section("Transformers", &reverse.transformer_names());
    print_section("Decorators", &render.decorator_names());
    print_section("Annotations", &render.annotation_names());
}

fn print_section(title: &str, names: &[String]) {
    println!("{title}:");
    if names.is_empty() {
        println!("  (none)");
    }
    for name in names {
        println!("  {name}");
    }
    println!();
}

fn load_cli_config(explicit_path: Option<&str>, strict: bool) -> BlockportConfig {
    let loader = Loader::new().with_optional_file("blockport.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = if strict {
        loader.set_override("convert.strict", true)
    } else {
        Ok(loader)
    };

    loader
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}
