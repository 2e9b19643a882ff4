//! Decode one MLS message and print what it contains.
//!
//! ```text
//! mls-inspect message.bin
//! mls-inspect --hex 0001000201670000000000000007010003111111022222
//! cat message.bin | mls-inspect
//! ```
//!
//! The summary goes to stdout. Decode failures are logged to stderr and the
//! process exits non-zero. Set `RUST_LOG=debug` to see which field failed.

mod summary;

use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use mls_codec::{CodecError, DEFAULT_MAX_MESSAGE_SIZE, Limits, MlsMessage};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mls-inspect", version, about = "Decode an MLS message and print its fields")]
struct Args {
    /// File holding the raw message; stdin when omitted
    #[arg(conflicts_with = "hex")]
    file: Option<PathBuf>,

    /// Message as a hex string
    #[arg(long)]
    hex: Option<String>,

    /// Largest message accepted, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    max_size: usize,
}

#[derive(Error, Debug)]
enum InspectError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("malformed message: {0}")]
    Codec(#[from] CodecError),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, "inspection failed");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<(), InspectError> {
    let bytes = read_input(args)?;
    info!(size = bytes.len(), "decoding message");

    let limits = Limits::new().with_max_message_size(args.max_size);
    let message = MlsMessage::from_bytes_with(&bytes, limits)?;

    let mut stdout = io::stdout().lock();
    summary::write_summary(&mut stdout, &message)?;
    stdout.flush()?;
    Ok(())
}

fn read_input(args: &Args) -> Result<Vec<u8>, InspectError> {
    if let Some(text) = &args.hex {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        return Ok(hex::decode(compact)?);
    }

    match &args.file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        },
    }
}
