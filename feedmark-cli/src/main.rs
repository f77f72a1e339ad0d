// Command-line interface for feedmark
//
// This binary renders syndication feed content as Markdown. The rendering itself lives in the
// feedmark-babel crate; this layer reads files, applies configuration and prints.
//
// Usage:
//  feedmark <input> [-o <output>]            - Convert an HTML fragment to Markdown (default)
//  feedmark convert <input> [-o <output>]    - Same as above (explicit)
//  feedmark feed <input> [--source <url>] [--limit <n>] [--detail | --json]
//                                            - List the items of an RSS/Atom document
//
// An input of "-" reads from stdin. Configuration comes from the embedded defaults, then
// ./feedmark.toml when present, then the file given with --config.

mod error;

use chrono::{DateTime, FixedOffset, Local};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use error::CliError;
use feedmark_babel::dates::{format_long_date, format_relative_date};
use feedmark_babel::{html_to_markdown_with_options, parse_feed, ConvertOptions, FeedItem};
use feedmark_config::{DateStyle, FeedmarkConfig, Loader, LOCAL_CONFIG_FILE};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "feed", "help"];

/// Separates detail documents when several items are printed.
const DETAIL_SEPARATOR: &str = "\n\n---\n\n";

fn build_cli() -> Command {
    Command::new("feedmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render RSS/Atom feed content as Markdown")
        .long_about(
            "feedmark converts the HTML bodies of feed items (forum posts, news articles,\n\
            quoted replies) into Markdown.\n\n\
            Commands:\n  \
            - convert: Convert an HTML fragment to Markdown (default command)\n  \
            - feed:    List the items of an RSS or Atom document\n\n\
            Examples:\n  \
            feedmark post.html                       # Convert to Markdown (stdout)\n  \
            feedmark post.html -o post.md            # Write to a file\n  \
            curl -s URL | feedmark feed - --source URL --detail",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a feedmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug diagnostics to stderr (overrides RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an HTML fragment to Markdown (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input HTML file, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
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
            Command::new("feed")
                .about("List the items of an RSS or Atom document")
                .long_about(
                    "Parse an RSS 2.0, RSS 1.0 or Atom document and print its items.\n\n\
                    By default one line per item is printed: title, author and publication\n\
                    date. Use --detail for the full Markdown document of every item, or\n\
                    --json for the parsed items.\n\n\
                    Examples:\n  \
                    feedmark feed news.xml --source https://news.test/rss.xml\n  \
                    feedmark feed news.xml --limit 5 --detail",
                )
                .arg(
                    Arg::new("input")
                        .help("Feed document, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_name("URL")
                        .help("URL the document was fetched from (resolves relative links)")
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .short('n')
                        .value_name("N")
                        .help("Maximum number of items (defaults to feed.limit)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("detail")
                        .long("detail")
                        .help("Print the Markdown document of every item")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("json"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the items as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Arguments with `convert` inserted, when the first argument is not a known subcommand.
fn with_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let first = args.get(1)?;
    let looks_like_input = first == "-" || !first.starts_with('-');
    if !looks_like_input || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }

    let mut injected = vec![args[0].clone(), "convert".to_string()];
    injected.extend_from_slice(&args[1..]);
    Some(injected)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => match with_default_subcommand(&args) {
            Some(injected) => match cli.try_get_matches_from(&injected) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    init_tracing(matches.get_flag("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` decides, warnings by default.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let limit = matches
        .subcommand_matches("feed")
        .and_then(|sub_matches| sub_matches.get_one::<usize>("limit"))
        .copied();
    let config = load_cli_config(matches.get_one::<String>("config").map(String::as_str), limit)?;

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(PathBuf::from);
            handle_convert_command(input, output.as_deref(), &config)
        }
        Some(("feed", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let source = sub_matches
                .get_one::<String>("source")
                .unwrap_or(input);
            let mode = if sub_matches.get_flag("json") {
                FeedOutput::Json
            } else if sub_matches.get_flag("detail") {
                FeedOutput::Detail
            } else {
                FeedOutput::List
            };
            handle_feed_command(input, source, config.feed.limit, mode, &config)
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    output: Option<&Path>,
    config: &FeedmarkConfig,
) -> Result<(), CliError> {
    let html = read_input(input)?;
    let options = ConvertOptions::from(&config.convert);
    let markdown = html_to_markdown_with_options(&html, &options);
    tracing::debug!(input, bytes = markdown.len(), "converted");

    match output {
        Some(path) => fs::write(path, format!("{markdown}\n")).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            println!("{markdown}");
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedOutput {
    List,
    Detail,
    Json,
}

/// Handle the feed command
fn handle_feed_command(
    input: &str,
    source: &str,
    limit: usize,
    mode: FeedOutput,
    config: &FeedmarkConfig,
) -> Result<(), CliError> {
    let xml = read_input(input)?;
    let items = parse_feed(&xml, source, limit).map_err(|source| CliError::Feed {
        path: PathBuf::from(input),
        source,
    })?;
    tracing::debug!(input, count = items.len(), "feed parsed");

    match mode {
        FeedOutput::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        FeedOutput::Detail => {
            let options = ConvertOptions::from(&config.convert);
            let documents: Vec<String> = items.iter().map(|item| item.to_markdown(&options)).collect();
            println!("{}", documents.join(DETAIL_SEPARATOR));
        }
        FeedOutput::List => {
            for item in &items {
                println!("{}", list_line(item, config.display.dates));
            }
        }
    }

    Ok(())
}

/// `title | author | date`, leaving out what the item does not have.
fn list_line(item: &FeedItem, dates: DateStyle) -> String {
    let mut parts = vec![item.title.clone()];
    if let Some(author) = item.author.as_deref().filter(|a| !a.is_empty()) {
        parts.push(author.to_string());
    }
    if let Some(published) = &item.published {
        parts.push(display_date(published, dates));
    }
    parts.join(" | ")
}

fn display_date(date: &DateTime<FixedOffset>, style: DateStyle) -> String {
    match style {
        DateStyle::Relative => format_relative_date(date, &Local::now()),
        DateStyle::Long => format_long_date(&date.with_timezone(&Local)),
    }
}

fn read_input(input: &str) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: PathBuf::from(input),
        source,
    };

    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(read_error)?;
        return Ok(buffer);
    }
    fs::read_to_string(input).map_err(read_error)
}

/// Defaults, then `./feedmark.toml`, then `--config`, then `--limit`.
fn load_cli_config(
    explicit_path: Option<&str>,
    limit: Option<usize>,
) -> Result<FeedmarkConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = explicit_path {
        loader = loader.with_file(path);
    }
    if let Some(limit) = limit {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        loader = loader.set_override("feed.limit", limit)?;
    }

    Ok(loader.build()?)
}
