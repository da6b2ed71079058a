use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use log_extract::cli::Cli;
use log_extract::config::Config;
use log_extract::error::ExtractError;
use log_extract::extractor::{Extractor, Stats};
use log_extract::filter::{filter_by_date, filter_by_pattern};
use log_extract::formatter::Formatter;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so `log-extract ... | head` exits
    // quietly instead of reporting a write error.
    reset_sigpipe();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("log-extract: {e}");
            return ExitCode::from(1);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ExtractError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("log-extract: {e}");
            ExitCode::from(1)
        }
    }
}

/// Extract, filter, render, and print records according to `config`.
fn run(config: &Config) -> Result<(), ExtractError> {
    let mut extractor = Extractor::new(config.format, config.pattern.as_deref())?;

    let mut records = match config.input {
        Some(ref path) => {
            let file = File::open(path).map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    ExtractError::FileNotFound(path.clone())
                } else {
                    ExtractError::Io(e)
                }
            })?;
            extractor.extract(BufReader::new(file))?
        }
        None => extractor.extract(io::stdin().lock())?,
    };

    if config.start_date.is_some() || config.end_date.is_some() {
        records = filter_by_date(records, config.start_date, config.end_date);
    }

    if let Some(ref filter) = config.filter {
        records = filter_by_pattern(records, filter)?;
    }

    let output = config.output.formatter().format(&records)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    writeln!(writer, "{output}")?;
    writer.flush()?;

    if config.stats {
        print_stats(extractor.stats());
    }

    Ok(())
}

fn print_stats(stats: Stats) {
    eprintln!(
        "\n--- Statistics ---\nTotal lines: {}\nMatched lines: {}\nMatch rate: {:.1}%",
        stats.total_lines,
        stats.matched_lines,
        stats.match_rate()
    );
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise only warnings are shown, or debug output with
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "log_extract=debug"
    } else {
        "log_extract=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// Restoring `SIG_DFL` lets the OS end the process quietly when the reader
/// of stdout goes away.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
