//! keygen - asymmetric key generation utility
//!
//! Generates an RSA key pair and writes each half to the key directory as a
//! Base64-encoded record: `pkey` for the public key, `skey` for the secret
//! key. Existing key files are left alone unless `--force` is given.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use filecpt::base64;
use filecpt::rsa_512::KG;
use filecpt::traits::{KeyGen, SerDes};
use log::{debug, error, warn, LevelFilter};
use zeroize::Zeroize;

const SKEY_FILE: &str = "skey";
const PKEY_FILE: &str = "pkey";

#[derive(Parser)]
#[command(name = "keygen", about = "keygen - asymmetric key generation utility")]
struct Args {
    /// Key directory
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Key modulus size (reserved)
    #[arg(short, long)]
    bytes: Option<usize>,

    /// Overwrite existing keys in the directory
    #[arg(short, long)]
    force: bool,

    /// Don't produce any output
    #[arg(short, long, visible_alias = "silent", conflicts_with = "debug")]
    quiet: bool,

    /// Output debug messages
    #[arg(short = 'x', long)]
    debug: bool,
}

fn init_logging(quiet: bool, debug: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Writes one Base64 key text into the directory, honoring `--force`.
///
/// A non-empty existing file without `--force` is an error so that a stale
/// key pair cannot be half-replaced silently.
fn key_file_write(dir: &Path, name: &str, text: &str, force: bool) -> Result<(), ExitCode> {
    let path = dir.join(name);

    let occupied = fs::metadata(&path).map(|meta| meta.len() > 0).unwrap_or(false);
    if occupied && !force {
        warn!("keygen: {} already exists, use --force to overwrite", path.display());
        return Err(ExitCode::from(1));
    }

    fs::write(&path, text).map_err(|err| {
        error!("keygen: Failed to write {}: {err}", path.display());
        ExitCode::from(2)
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet, args.debug);

    debug!("Start of main");
    if args.bytes.is_some() {
        debug!("--bytes is reserved and currently ignored");
    }

    let (pkey, skey) = match KG::try_keygen() {
        Ok(pair) => pair,
        Err(err) => {
            error!("keygen: Failed to generate keys: {err}");
            return ExitCode::from(1);
        }
    };

    let pkey_text = base64::encode(&pkey.into_bytes());
    let mut skey_record = skey.into_bytes();
    let skey_text = base64::encode(&skey_record);
    skey_record.zeroize();

    let mut status = ExitCode::SUCCESS;

    if let Err(code) = key_file_write(&args.dir, PKEY_FILE, &pkey_text, args.force) {
        status = code;
    }
    if let Err(code) = key_file_write(&args.dir, SKEY_FILE, &skey_text, args.force) {
        status = code;
    }

    debug!("End of main");
    status
}
