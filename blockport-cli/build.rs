use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of Direction::NAMES from src/documents.rs
// Build scripts can't access src/ modules
const TARGETS: &[&str] = &["portable", "editor"];

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

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("blockport")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between block editor JSON and Portable Text")
        .arg_required_else_help(true)
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
                        .value_parser(clap::builder::PossibleValuesParser::new(TARGETS))
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
        );

    generate_to(Bash, &mut cmd, "blockport", &outdir)?;
    generate_to(Zsh, &mut cmd, "blockport", &outdir)?;
    generate_to(Fish, &mut cmd, "blockport", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
