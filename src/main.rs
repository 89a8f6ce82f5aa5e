//! Resonator coefficient generator
//!
//! Designs the resonator bank and writes the Q15 coefficient header the
//! firmware build includes.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use resonator_coefs::config::{
    DEFAULT_CENTER_FREQS_HZ, DEFAULT_INCLUDE_GUARD, DEFAULT_OUTPUT_FILE, DEFAULT_Q,
    DEFAULT_SAMPLE_RATE_HZ,
};
use resonator_coefs::emitter::write_header_with;
use resonator_coefs::{design_default, GeneratorConfig, HeaderOptions};

/// Generate Q15 resonator bank coefficients as a C header
#[derive(Parser, Debug)]
#[command(name = "resonator-coefs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Center frequencies in Hz, in channel order (repeat or comma-separate)
    #[arg(short, long = "freq", value_delimiter = ',', num_args = 1..)]
    freqs: Vec<f64>,

    /// Sample rate in Hz
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE_HZ)]
    sample_rate: f64,

    /// Quality factor shared by all channels
    #[arg(short, long = "quality", default_value_t = DEFAULT_Q)]
    q: f64,

    /// Output header path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Write the header to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Include guard macro name
    #[arg(long, default_value = DEFAULT_INCLUDE_GUARD)]
    guard: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        let center_freqs_hz = if self.freqs.is_empty() {
            DEFAULT_CENTER_FREQS_HZ.to_vec()
        } else {
            self.freqs.clone()
        };

        GeneratorConfig {
            center_freqs_hz,
            sample_rate_hz: self.sample_rate,
            q: self.q,
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();
    let table = design_default(&config).context("failed to design resonator bank")?;
    let options = HeaderOptions {
        include_guard: cli.guard.clone(),
    };

    if cli.stdout {
        write_header_with(&table, &options, io::stdout().lock())
            .context("failed to write header to stdout")?;
    } else {
        let file = File::create(&cli.output)
            .with_context(|| format!("failed to create {}", cli.output.display()))?;
        write_header_with(&table, &options, BufWriter::new(file))
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
        info!(
            path = %cli.output.display(),
            channels = table.channel_count(),
            "header written"
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
