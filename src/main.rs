//! jsonitem CLI.
//!
//! Validate, reformat, and transcode documents between text and the binary
//! format, and run conformance corpora.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{debug, info};
use thiserror::Error;

use jsonitem::binary;
use jsonitem::conformance::{ConformanceError, CorpusRunner};
use jsonitem::json::{self, Item, ItemType, Limits};
use jsonitem::ErrorCode;

#[derive(Parser)]
#[command(name = "jsonitem")]
#[command(about = "Ordered JSON documents and their binary encoding", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a text document and report the first error, if any
    Check {
        /// Path to the JSON text
        file: PathBuf,
        /// Allow `#` line comments
        #[arg(long)]
        comments: bool,
    },

    /// Re-serialize a text document
    Format {
        /// Path to the JSON text
        file: PathBuf,
        /// Write compact output instead of indented
        #[arg(long)]
        compact: bool,
        /// Allow `#` line comments
        #[arg(long)]
        comments: bool,
    },

    /// Encode a text document (object or array) to the binary format
    Encode {
        /// Path to the JSON text
        input: PathBuf,
        /// Where to write the blob
        output: PathBuf,
    },

    /// Decode a binary blob and print it as text
    Decode {
        /// Path to the blob
        input: PathBuf,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        /// The blob holds an array rather than an object
        #[arg(long)]
        array: bool,
    },

    /// Run a conformance corpus
    Conformance {
        /// Path to the corpus JSON
        corpus: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{} ({}): {0}", .0.name(), .0.code())]
    Document(#[from] ErrorCode),
    #[error(transparent)]
    Corpus(#[from] ConformanceError),
    #[error("conformance failed: {0}")]
    Conformance(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Check { file, comments } => {
            parse_file(&file, comments)?;
            println!("ok");
        }
        Commands::Format {
            file,
            compact,
            comments,
        } => {
            let item = parse_file(&file, comments)?;
            if compact {
                println!("{}", item.to_compact_string());
            } else {
                println!("{}", item.to_pretty_string());
            }
        }
        Commands::Encode { input, output } => {
            match parse_file(&input, false)? {
                Item::Object(object) => binary::save_object(&output, &object)?,
                Item::Array(array) => binary::save_array(&output, &array)?,
                other => {
                    return Err(ErrorCode::TypeMismatch {
                        expected: ItemType::Object,
                        found: other.item_type(),
                    }
                    .into())
                }
            }
            info!("wrote {}", output.display());
        }
        Commands::Decode {
            input,
            pretty,
            array,
        } => {
            let item = if array {
                Item::from(binary::open_array(&input)?)
            } else {
                Item::from(binary::open_object(&input)?)
            };
            if pretty {
                println!("{}", item.to_pretty_string());
            } else {
                println!("{}", item.to_compact_string());
            }
        }
        Commands::Conformance { corpus } => {
            let runner = CorpusRunner::load(&corpus)?;
            info!(
                "running {} vectors from {}",
                runner.vector_count(),
                corpus.display()
            );
            let results = runner.run_all();
            for (id, result) in results.problems() {
                println!("{id}: {result:?}");
            }
            println!("{}", results.summary());
            if !results.all_passed() {
                return Err(CliError::Conformance(results.summary()));
            }
        }
    }
    Ok(())
}

fn parse_file(path: &Path, comments: bool) -> Result<Item, ErrorCode> {
    let bytes = fs::read(path).map_err(|e| ErrorCode::io(path, &e))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    let limits = if comments {
        Limits::with_comments()
    } else {
        Limits::strict()
    };
    json::parse_with_limits(&bytes, limits)
}
