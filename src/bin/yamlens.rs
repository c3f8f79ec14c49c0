//! Command-line interface for yamlens
//!
//! Reads YAML from stdin and shows how it is represented internally and
//! externally: node trees, event and token streams, normalized or
//! preserving YAML, and JSON.
//!
//! Usage:
//!   yamlens -e < input.yaml     - Event stream
//!   yamlens -t < input.yaml     - Token stream
//!   yamlens -j < input.yaml     - JSON encoding
//!   yamlens -y < input.yaml     - Normalized YAML
//!   yamlens -n < input.yaml     - Node structure (default)

use std::io::{self, IsTerminal, Read};
use std::process;

use clap::{Arg, ArgAction, Command};

use yamlens::yamlens::source::YamlSource;
use yamlens::yamlens::stream;

fn cli() -> Command {
    Command::new("yamlens")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting how YAML is represented internally and externally")
        .arg(flag("node", 'n', "Node formatting mode (default)"))
        .arg(flag("event", 'e', "Event formatting mode"))
        .arg(flag("EVENT", 'E', "Event Profuse; short for -e -p"))
        .arg(flag("token", 't', "Token formatting mode"))
        .arg(flag("TOKEN", 'T', "Token Profuse; short for -t -p"))
        .arg(flag("json", 'j', "JSON formatting mode (compact)"))
        .arg(flag("JSON", 'J', "JSON Pretty; short for -j -p"))
        .arg(flag("yaml", 'y', "YAML formatting mode"))
        .arg(flag("YAML", 'Y', "YAML Preserve; short for -y -p"))
        .arg(flag(
            "preserve",
            'p',
            "Preserve comments and styles (with -y); profuse/pretty elsewhere",
        ))
        .arg(
            Arg::new("profuse")
                .long("profuse")
                .help("Show line info for --token and --event")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Pretty JSON output (with -j)")
                .action(ArgAction::SetTrue),
        )
        .arg(flag("compact", 'c', "Compact output (flow style, no blank lines)"))
}

fn flag(name: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .short(short)
        .help(help)
        .action(ArgAction::SetTrue)
}

fn main() {
    let mut command = cli();
    let matches = command.clone().get_matches();
    let set = |name: &str| matches.get_flag(name);

    let preserve = set("preserve");
    let profuse = set("profuse") || preserve;
    let pretty = set("pretty") || preserve;
    let compact = set("compact");

    let any_mode = set("node")
        || set("event")
        || set("EVENT")
        || set("token")
        || set("TOKEN")
        || set("json")
        || set("JSON")
        || set("yaml")
        || set("YAML")
        || preserve;

    // Nothing piped in and nothing asked for: show help instead of hanging
    // on a read from the terminal.
    if !any_mode && !compact && io::stdin().is_terminal() {
        if let Err(error) = command.print_help() {
            eprintln!("Error: {error}");
            process::exit(1);
        }
        println!();
        return;
    }

    let mut input = String::new();
    if let Err(error) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error: failed to read stdin: {error}");
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut source = YamlSource::new(&input);

    let result = if set("event") {
        stream::process_events(&mut source, profuse, compact, &mut out)
    } else if set("EVENT") {
        stream::process_events(&mut source, true, compact, &mut out)
    } else if set("token") {
        stream::process_tokens(&mut source, profuse, compact, &mut out)
    } else if set("TOKEN") {
        stream::process_tokens(&mut source, true, compact, &mut out)
    } else if set("json") {
        stream::process_json(&input, pretty, &mut out)
    } else if set("JSON") {
        stream::process_json(&input, true, &mut out)
    } else if set("yaml") {
        stream::process_yaml(&mut source, preserve, &mut out)
    } else if set("YAML") || preserve {
        stream::process_yaml(&mut source, true, &mut out)
    } else {
        stream::process_nodes(&mut source, &mut out)
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        process::exit(1);
    }
}
