// Command-line interface for quire
//
// This binary converts documents between Markdown, HTML and plain text. All the
// conversion work lives in quire-babel; this crate parses arguments, loads the
// layered configuration from quire-config, and moves bytes between files and the
// conversion engine.
//
// Converting:
//
// A conversion needs a from and to pair. The source markup is detected from the file
// extension and can be overridden with an explicit --from flag. Reading from stdin
// (input "-") requires --from.
// Usage:
//  quire <input> --to <markup> [--from <markup>] [--output <file>]          - Convert (default)
//  quire convert <input> --to <markup> [--from <markup>] [--output <file>]  - Same as above
//  quire list [--json]                                                       - List directions
//
// Extra Parameters:
//
// Converter options can be passed using --extra-<option-name> <value>.
// Keys the configuration knows (css-class, escape-markdown, max-quote-depth, minify,
// locale, chunk-size) override the loaded configuration; any other key is handed to the
// converter as a per-call option, which rejects keys it does not understand.
// Example:
//  quire notes.txt --to html --extra-minify --extra-locale none

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use quire_babel::{Converter, FormatError, Locale, Markup, StreamAdapter};
use quire_config::{Loader, QuireConfig, LOCAL_CONFIG_FILE};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

const SUBCOMMANDS: &[&str] = &["convert", "list", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));

        if let Some(key) = key_opt {
            let has_value = args
                .get(i + 1)
                .map(|next| !next.starts_with('-'))
                .unwrap_or(false);

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("quire")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between Markdown, HTML and plain text")
        .long_about(
            "quire converts text between three markups: Markdown, HTML and plain text.\n\n\
            Commands:\n  \
            - convert: Convert a file or stdin (default command)\n  \
            - list:    Show the available conversion directions\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass converter options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            quire README.md --to html                  # Markdown to HTML on stdout\n  \
            quire page.html --to text -o page.txt      # HTML to a text file\n  \
            cat notes | quire - --from text --to html  # Read stdin\n  \
            quire notes.txt --to html --extra-minify   # Minified HTML",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a quire.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between markups (default command)")
                .long_about(
                    "Convert a document between markups.\n\n\
                    Directions:\n  \
                    - markdown → html\n  \
                    - html     → markdown, text\n  \
                    - text     → markdown, html\n\n\
                    The source markup is auto-detected from the file extension.\n\
                    Use '-' as input to read stdin (requires --from).\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    quire convert doc.md --to html                 # Markdown to HTML (stdout)\n  \
                    quire convert page.htm --to md -o page.md      # HTML to a Markdown file\n  \
                    quire doc.md --to html                         # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, or '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source markup (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target markup (required): markdown, html or text")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List available conversion directions")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the directions as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Put `convert` in front of arguments that start with an input path.
fn inject_convert(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    let is_input = first == "-" || !first.starts_with('-');
    if !is_input || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = vec![args[0].clone(), "convert".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => match inject_convert(&cleaned_args) {
            Some(new_args) => match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            handle_convert_command(sub_matches, &extra_params, &config);
        }
        Some(("list", sub_matches)) => {
            handle_list_command(&config, sub_matches.get_flag("json"));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) {
    let Some(input) = matches.get_one::<String>("input") else {
        eprintln!("Error: an input path is required");
        std::process::exit(1);
    };
    let to = matches
        .get_one::<String>("to")
        .map(|name| parse_markup(name))
        .unwrap_or_else(|| {
            eprintln!("Error: --to is required");
            std::process::exit(1);
        });
    let from = match matches.get_one::<String>("from") {
        Some(name) => parse_markup(name),
        None => detect_markup(input),
    };
    let output = matches.get_one::<String>("output").map(|s| s.as_str());

    let registry = config.registry();
    let converter = registry.get(from, to).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("Run 'quire list' to see the available directions");
        std::process::exit(1);
    });
    log::debug!("converting {input} with {}", converter.name());

    let reader: Box<dyn Read> = if input == "-" {
        Box::new(io::stdin().lock())
    } else {
        match File::open(input) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error reading file '{input}': {e}");
                std::process::exit(1);
            }
        }
    };

    let writer: Box<dyn Write> = match output {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdout().lock()),
    };

    if let Err(e) = convert_stream(converter, reader, writer, extra_params, config) {
        eprintln!("Conversion error: {e}");
        std::process::exit(1);
    }
}

fn convert_stream<R: Read, W: Write>(
    converter: &dyn Converter,
    reader: R,
    writer: W,
    extra_params: &HashMap<String, String>,
    config: &QuireConfig,
) -> Result<usize, FormatError> {
    StreamAdapter::new(converter)
        .with_chunk_size(config.stream.chunk_size)
        .with_options(extra_params.clone())
        .run(reader, writer)
}

/// Handle the list command
fn handle_list_command(config: &QuireConfig, json: bool) {
    let registry = config.registry();
    let converters = registry.converters();

    if json {
        let entries: Vec<_> = converters
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name(),
                    "from": c.source().name(),
                    "to": c.target().name(),
                    "description": c.description(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&entries) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Available conversions:\n");
    for converter in converters {
        println!(
            "  {:<18} {} → {}    {}",
            converter.name(),
            converter.source(),
            converter.target(),
            converter.description()
        );
    }
    println!("\nMarkups: markdown (.md), html (.html), text (.txt)");
}

fn parse_markup(name: &str) -> Markup {
    Markup::from_name(name).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("Known markups: markdown, html, text");
        std::process::exit(1);
    })
}

fn detect_markup(input: &str) -> Markup {
    if input == "-" {
        eprintln!("Error: reading stdin requires --from");
        std::process::exit(1);
    }
    Markup::from_filename(input).unwrap_or_else(|| {
        eprintln!("Error: Could not detect markup from filename '{input}'");
        eprintln!("Please specify --from explicitly");
        std::process::exit(1);
    })
}

fn load_cli_config(explicit_path: Option<&str>) -> QuireConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        log::debug!("configuration: defaults, {LOCAL_CONFIG_FILE} if present, {path}");
        loader.with_file(path)
    } else {
        log::debug!("configuration: defaults, {LOCAL_CONFIG_FILE} if present");
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Move the option keys the configuration knows from `extra_params` into `config`.
fn apply_config_overrides(config: &mut QuireConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["css-class", "class"]) {
        config.markdown.css_class = raw;
    }
    if let Some(raw) = take_override(extra_params, &["escape-markdown", "escape"]) {
        config.markdown.escape_markdown = parse_bool_arg("escape-markdown", &raw);
    }
    if let Some(raw) = extra_params.remove("max-quote-depth") {
        config.markdown.max_quote_depth = parse_usize_arg("max-quote-depth", &raw);
    }
    if let Some(raw) = extra_params.remove("minify") {
        config.plain.minify = parse_bool_arg("minify", &raw);
    }
    if let Some(raw) = extra_params.remove("locale") {
        config.plain.locale = Locale::from_name(&raw).unwrap_or_else(|e| {
            eprintln!("{e} (expected czech, slovak or none)");
            std::process::exit(1);
        });
    }
    if let Some(raw) = extra_params.remove("chunk-size") {
        config.stream.chunk_size = parse_usize_arg("chunk-size", &raw);
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_usize_arg(flag: &str, raw: &str) -> usize {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid number '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}
