use ::console::Term;
use anyhow::{Context, Result};
use clap::CommandFactory;
use clap::FromArgMatches;
#[cfg(panic = "unwind")]
use human_panic::setup_panic;
use libsnakediff::cli::{self, Args, Command};
use libsnakediff::config::{Config, ReadError};
use libsnakediff::diff::compute_edit_script_with_newlines;
use libsnakediff::input_processing::Token;
use libsnakediff::read_document;
use libsnakediff::render::{DisplayData, DocumentDiffData, Renderer, TextEdit};
use log::{LevelFilter, error, info, warn};
use serde_json as json;
use std::io::{self, Write};
use std::process::ExitCode;

#[cfg(feature = "jemallocator")]
use jemallocator::Jemalloc;

#[cfg(feature = "jemallocator")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Return an instance of [Config] from a config file path (or the inferred default path)
///
/// If there is no config file to read, the config is built from the defaults and the environment.
/// This will error out if a config is found but is found to be an invalid config.
fn derive_config(args: &Args) -> Result<Config> {
    if args.no_config {
        info!("`no_config` specified, using the default config with environment overrides");
        return Ok(Config::from_env()?);
    }
    match Config::try_from_file(args.config.as_ref()) {
        Ok(config) => Ok(config),
        // Not finding a config file isn't a hard error.
        Err(e @ (ReadError::ReadFileFailure(_) | ReadError::NoDefault)) => {
            warn!("{} - falling back to default config", e);
            Ok(Config::from_env()?)
        }
        // A config that exists but doesn't parse is.
        Err(ReadError::DeserializationFailure(e)) => {
            error!("Failed to deserialize config file: {:#}", e);
            Err(e)
        }
    }
}

/// Take the diff of two files.
///
/// Returns whether the documents differ.
fn run_diff(args: Args, mut config: Config) -> Result<bool> {
    // Resolve the renderer up front so a bad tag fails before any work is done.
    let renderer = config.formatting.clone().get_renderer(args.renderer)?;
    if let Some(granularity) = args.granularity {
        config.input_processing.granularity = granularity;
    }

    let old_path = args.old.context("Missing the old document")?;
    let new_path = args.new.context("Missing the new document")?;
    let old_doc = read_document(old_path)?;
    let new_doc = read_document(new_path)?;

    let old_tokens = config.input_processing.process(&old_doc.text);
    let new_tokens = config.input_processing.process(&new_doc.text);
    info!(
        "Split the documents into {} and {} tokens",
        old_tokens.len(),
        new_tokens.len()
    );

    // The edits are positioned in the old document, so it's the destination of the diff.
    let edits = compute_edit_script_with_newlines(&new_tokens, &old_tokens, Token::is_newline)
        .iter()
        .map(|edit| TextEdit::from_edit(edit, &old_tokens))
        .collect::<Vec<_>>();
    let differ = !edits.is_empty();

    let old_filename = old_doc.filename();
    let new_filename = new_doc.filename();
    let params = DisplayData {
        edits,
        old: DocumentDiffData {
            filename: &old_filename,
            text: &old_doc.text,
        },
        new: DocumentDiffData {
            filename: &new_filename,
            text: &new_doc.text,
        },
    };
    // A buffered terminal amortizes the cost of printing many short lines.
    let mut buf_writer = Term::buffered_stdout();
    let term_info = buf_writer.clone();
    renderer.render(&mut buf_writer, &params, Some(&term_info))?;
    buf_writer.flush()?;
    Ok(differ)
}

/// Serialize the default options struct to a json file and print that to stdout
fn dump_default_config() -> Result<()> {
    let config = Config::default();
    println!("{}", json::to_string_pretty(&config)?);
    Ok(())
}

/// Print shell completion scripts to `stdout`.
fn print_shell_completion(shell: clap_complete::Shell) {
    let mut app = Args::command();
    clap_complete::generate(shell, &mut app, "snakediff", &mut io::stdout());
}

fn main() -> Result<ExitCode> {
    // Set up a panic handler that will yield more human-readable errors.
    #[cfg(panic = "unwind")]
    setup_panic!();

    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches)?;

    let log_level = if args.debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Off
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log_level)
        .init();

    // Parse the config early so users get quick feedback if anything is off with it.
    let config = derive_config(&args)?;

    if let Some(cmd) = args.cmd {
        match cmd {
            Command::DumpDefaultConfig => dump_default_config()?,
            Command::GenCompletion { shell } => print_shell_completion(shell),
        }
        return Ok(ExitCode::SUCCESS);
    }

    cli::set_term_colors(args.color_output);
    let exit_code = args.exit_code;
    let differ = run_diff(args, config)?;
    if exit_code && differ {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
