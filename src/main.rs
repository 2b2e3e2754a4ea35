//! Command line driver: load a file, parse it, report whether it is valid.
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use dsjson::parser::DEFAULT_MAX_DEPTH;
use dsjson::{parse_bytes_with_options, EscapePolicy, ParserOptions};

#[derive(Parser)]
#[command(name = "dsjson")]
#[command(about = "Parse a JSON document and report whether it is valid", long_about = None)]
#[command(version)]
struct Cli {
    /// The document to parse
    file: PathBuf,

    /// Print the parsed value tree
    #[arg(long)]
    tree: bool,

    /// Accept strings containing invalid escape sequences
    #[arg(long)]
    tolerate_escapes: bool,

    /// Reject anything following the document value
    #[arg(long)]
    strict: bool,

    /// Maximum nesting of objects and arrays
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log lexer and parser diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ParserOptions {
        let escapes = if self.tolerate_escapes {
            EscapePolicy::Tolerate
        } else {
            EscapePolicy::Reject
        };
        ParserOptions::default()
            .with_escape_policy(escapes)
            .with_max_depth(self.max_depth)
            .with_require_eof(self.strict)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let bytes = match fs::read(&cli.file) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(file = %cli.file.display(), %err, "unable to read input file");
            return ExitCode::from(2);
        }
    };
    debug!(file = %cli.file.display(), len = bytes.len(), "loaded input");

    match parse_bytes_with_options(&bytes, cli.options()) {
        Ok(value) => {
            if cli.tree {
                print!("{}", value.tree());
            } else {
                println!("valid {}", value.type_name());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("invalid: {err}");
            ExitCode::FAILURE
        }
    }
}
