// Command-line interface for folio
//
// This binary converts documents between HTML, plain text and the editor's JSON tree, using
// the codecs from folio-babel and the lookup tables from folio-config.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file
// extension, while being overridden by an explicit --from flag. The to falls back to
// `convert.default_to` from the configuration.
// Usage:
//  folio <input> [--to <format>] [--from <format>] [--output <file>]          - Convert (default)
//  folio convert <input> [--to <format>] [--from <format>] [--output <file>]  - Same as above
//  folio - --from html --to json                                              - Read stdin
//  folio tables                                - Print the effective HTML lookup tables
//  folio --list-formats                        - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  folio page.html --to json --extra-pretty

use clap::{Arg, ArgAction, Command, ValueHint};
use folio_babel::{FormatRegistry, HtmlTables};
use folio_config::{FolioConfig, Loader, LOCAL_CONFIG_FILE};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io::Read;

const STDIN_INPUT: &str = "-";
const SUBCOMMANDS: &[&str] = &["convert", "tables", "help"];

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
            // A following arg that does not look like a flag is the value
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

/// Whether `convert` should be injected in front of the first argument.
fn needs_convert_injection(args: &[String]) -> bool {
    match args.get(1) {
        Some(first) if first == STDIN_INPUT => true,
        Some(first) => !first.starts_with('-') && !SUBCOMMANDS.contains(&first.as_str()),
        None => false,
    }
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert documents between HTML, plain text and the folio JSON tree")
        .long_about(
            "folio converts rich-text documents between HTML, plain text and the\n\
            editor's JSON document tree.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (default command)\n  \
            - tables:  Print the effective HTML lookup tables\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            folio page.html --to json                 # HTML to JSON tree (stdout)\n  \
            folio page.html --to json --extra-pretty  # Indented JSON\n  \
            folio notes.txt --to html -o notes.html   # Plain text to HTML file\n  \
            cat page.html | folio - --from html --to text",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - html: HTML fragments (.html, .htm)\n  \
                    - text: Plain text, paragraphs split on blank lines (.txt, .text)\n  \
                    - json: The editor's document tree (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Use '-' as the input to read from stdin (requires --from).\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    folio convert page.html --to json          # HTML to JSON (stdout)\n  \
                    folio convert tree.json --to html -o a.html\n  \
                    folio page.html --to text                  # 'convert' is optional",
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
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (defaults to convert.default_to from the config)")
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
            Command::new("tables")
                .about("Print the effective HTML lookup tables")
                .long_about(
                    "Prints the HTML lookup tables after configuration layering, in the\n\
                    same TOML shape accepted by the [html] section of folio.toml.\n\n\
                    Examples:\n  \
                    folio tables                        # Built-in tables\n  \
                    folio tables --config custom.toml   # Tables with overrides applied",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if needs_convert_injection(&cleaned_args) {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logger(matches.get_flag("verbose"));

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let tables = HtmlTables::try_from(&config.html).unwrap_or_else(|e| {
        eprintln!("Invalid [html] configuration: {e}");
        std::process::exit(1);
    });

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&FormatRegistry::with_html_tables(tables));
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(|s| s.as_str())
                .unwrap_or(STDIN_INPUT);
            let registry = FormatRegistry::with_html_tables(tables);

            // Auto-detect --from if not provided
            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None if input == STDIN_INPUT => {
                    eprintln!("Error: --from is required when reading from stdin");
                    std::process::exit(1);
                }
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };
            let to = sub_matches
                .get_one::<String>("to")
                .cloned()
                .unwrap_or_else(|| config.convert.default_to.clone());
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());

            handle_convert_command(&registry, input, &from, &to, output, &extra_params, &config);
        }
        Some(("tables", _)) => {
            print!("{}", render_tables(&tables));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &FolioConfig,
) {
    // Validate formats exist
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading '{input}': {e}");
        std::process::exit(1);
    });

    debug!("converting '{input}' from {from} to {to}");
    let value = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let options = format_options(to, config, extra_params);
    let result = registry
        .serialize_with_options(&value, to, &options)
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == STDIN_INPUT {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

/// Options for the target format: config defaults first, `--extra-*` parameters on top.
fn format_options(
    to: &str,
    config: &FolioConfig,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    if to == "json" && config.convert.json.pretty {
        options.insert("pretty".to_string(), "true".to_string());
    }
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<6} {} (.{})",
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

/// Render lookup tables in the shape of the `[html]` config section.
fn render_tables(tables: &HtmlTables) -> String {
    let quoted = |items: Vec<&str>| {
        items
            .iter()
            .map(|item| format!("\"{item}\""))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = String::from("[html]\nelements = [\n");
    for (key, kind) in tables.elements().entries() {
        out.push_str(&format!("  {{ key = \"{key}\", type = \"{kind}\" }},\n"));
    }
    out.push_str("]\n");
    out.push_str(&format!(
        "block_elements = [{}]\n",
        quoted(tables.block_elements().collect())
    ));
    out.push_str(&format!(
        "inline_elements = [{}]\n",
        quoted(tables.inline_elements().collect())
    ));
    out.push_str("marks = [\n");
    for (tag, mark) in tables.mark_elements() {
        out.push_str(&format!("  {{ tag = \"{tag}\", mark = \"{mark}\" }},\n"));
    }
    out.push_str("]\n");
    out.push_str(&format!("image_type = \"{}\"\n", tables.image_type()));
    out
}

fn load_cli_config(explicit_path: Option<&str>) -> FolioConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
