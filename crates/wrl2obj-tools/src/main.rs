//! wrl2obj - level-compiler WRL to OBJ converter
//!
//! Usage:
//!   wrl2obj --input errors.wrl --output errors.obj
//!   wrl2obj < errors.wrl > errors.obj

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wrl2obj_io::{ObjWriter, WrlReader, Writer};

#[derive(Parser, Debug)]
#[command(
    name = "wrl2obj",
    version,
    about = "Converts tool's .wrl files from VRML 1.0 format to OBJ for importing to Blender",
    after_help = "EXAMPLES:\n  \
                  wrl2obj --input maps/bsp_errors.wrl --output bsp_errors.obj\n  \
                  wrl2obj < maps/bsp_errors.wrl > bsp_errors.obj"
)]
struct Cli {
    /// Path to an input .wrl file. If not passed, input is read from stdin.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output file path. If not passed, the OBJ file is written to stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("{:#}", err);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to convert WRL: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never mix with OBJ written to stdout.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn run(cli: &Cli) -> Result<()> {
    let mut reader = match &cli.input {
        Some(path) => WrlReader::open(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => WrlReader::from_reader(io::stdin().lock())
            .context("cannot read standard input")?,
    };

    let document = reader.read_document()?;
    let mut writer = ObjWriter::new();
    writer.add_document(&document)?;

    match &cli.output {
        Some(path) => {
            Writer::write(&writer, path)
                .with_context(|| format!("cannot write {}", path.display()))?;
            info!(output = %path.display(), "wrote OBJ file");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writer
                .write_to(&mut stdout)
                .context("cannot write standard output")?;
            stdout.flush().context("cannot write standard output")?;
        }
    }
    Ok(())
}
