//! Command-line interface for orgscan
//! This binary scans an org-style document and prints the items it contains.
//!
//! Usage:
//!   orgscan `<path>` [--format `<format>`] [--chunk-size `<bytes>`] [--capacity `<items>`]
//!           [--limit `<items>`] [--config `<file>`]
//!
//! Settings not given on the command line come from the config file, `ORGSCAN_*` environment
//! variables and the built-in defaults, in that order. Logging goes to stderr and is controlled
//! through `RUST_LOG`.

use clap::{value_parser, Arg, ArgMatches, Command};
use orgscan::org::config::{Loader, OrgscanConfig};
use orgscan::org::formats::{self, Format};
use orgscan::org::DocumentLoader;
use std::io::Write;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("orgscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scan org-style documents into headlines, keywords, comments and text")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the document to scan")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(Format::NAMES),
        )
        .arg(
            Arg::new("chunk-size")
                .long("chunk-size")
                .help("Bytes fed to the scanner per call")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("capacity")
                .long("capacity")
                .help("Items the scanner may buffer ahead of the output")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("limit")
                .long("limit")
                .short('n')
                .help("Stop after this many items")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<OrgscanConfig, String> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader = loader.with_env();
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(size) = matches.get_one::<u64>("chunk-size") {
        loader = loader
            .set_override("scan.chunk_size", *size as i64)
            .map_err(|e| e.to_string())?;
    }
    if let Some(capacity) = matches.get_one::<u64>("capacity") {
        loader = loader
            .set_override("scan.channel_capacity", *capacity as i64)
            .map_err(|e| e.to_string())?;
    }
    loader.build().map_err(|e| format!("Configuration error: {}", e))
}

async fn run(matches: ArgMatches) -> Result<(), String> {
    let config = load_config(&matches)?;
    let format = config.output.format;
    let limit = matches.get_one::<u64>("limit").map(|n| *n as usize);
    let path = matches
        .get_one::<String>("path")
        .ok_or_else(|| "missing path".to_string())?;

    let loader = DocumentLoader::from_path(path)
        .map_err(|e| e.to_string())?
        .with_chunk_size(config.scan.chunk_size);
    let mut stream = loader.stream(config.scan.channel_capacity);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut collected = Vec::new();
    let mut received = 0;
    while let Some(item) = stream.next().await {
        received += 1;
        log::debug!("{}", item);
        if format.is_incremental() {
            writeln!(out, "{}", formats::render_line(&item))
                .map_err(|e| format!("Error writing output: {}", e))?;
        } else {
            collected.push(item);
        }
        if limit.is_some_and(|n| received >= n) {
            stream.cancel();
            break;
        }
    }

    let report = stream.join().await.map_err(|e| e.to_string())?;
    log::info!(
        "{} items from {} lines{}",
        report.items,
        report.lines,
        if report.cancelled { " (stopped early)" } else { "" }
    );

    if !format.is_incremental() {
        let rendered = formats::render(&collected, format).map_err(|e| e.to_string())?;
        out.write_all(rendered.as_bytes())
            .map_err(|e| format!("Error writing output: {}", e))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();
    match run(matches).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
