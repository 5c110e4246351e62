//! asmcpt - asymmetric cryptography utility
//!
//! Encrypts a file for the holder of a key pair's secret half, or decrypts
//! a container addressed to it. Keys are the Base64 records written by
//! `keygen`, resolved against the key directory.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use filecpt::base64;
use filecpt::rsa_512::{PublicKey, SecretKey, PKEY_LEN, SKEY_LEN};
use filecpt::traits::{Open, Seal, SerDes};
use log::{debug, error, LevelFilter};
use zeroize::Zeroize;

#[derive(Parser)]
#[command(name = "asmcpt", about = "asmcpt - asymmetric cryptography utility")]
struct Args {
    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,

    /// Secret key file
    #[arg(short, long, default_value = "skey")]
    secret: String,

    /// Public key file
    #[arg(short, long, default_value = "pkey")]
    public: String,

    /// Key directory
    #[arg(short = 'D', long, default_value = ".")]
    dir: PathBuf,

    /// Encrypt file (the default)
    #[arg(short, long, conflicts_with = "decrypt")]
    encrypt: bool,

    /// Decrypt file
    #[arg(short = 'd', long)]
    decrypt: bool,

    /// Don't produce any output
    #[arg(short, long, conflicts_with = "debug")]
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

/// Reads a key file and strips its Base64 wrapping.
fn key_record_read(args: &Args, name: &str) -> Result<Vec<u8>, ExitCode> {
    let path = args.dir.join(name);
    let text = fs::read(&path).map_err(|err| {
        error!("asmcpt: Failed to read key file {}: {err}", path.display());
        ExitCode::from(1)
    })?;
    base64::decode(&text).map_err(|err| {
        error!("asmcpt: Failed to decode key file {}: {err}", path.display());
        ExitCode::from(1)
    })
}

fn pkey_get(args: &Args) -> Result<PublicKey, ExitCode> {
    let decoded = key_record_read(args, &args.public)?;
    let record: [u8; PKEY_LEN] = decoded.try_into().map_err(|_| {
        error!("asmcpt: Public key record has the wrong length");
        ExitCode::from(1)
    })?;
    PublicKey::try_from_bytes(record).map_err(|err| {
        error!("asmcpt: Failed to decode public key: {err}");
        ExitCode::from(1)
    })
}

fn skey_get(args: &Args) -> Result<SecretKey, ExitCode> {
    let mut decoded = key_record_read(args, &args.secret)?;
    if decoded.len() != SKEY_LEN {
        decoded.zeroize();
        error!("asmcpt: Secret key record has the wrong length");
        return Err(ExitCode::from(1));
    }
    let mut record = [0u8; SKEY_LEN];
    record.copy_from_slice(&decoded);
    decoded.zeroize();

    let key = SecretKey::try_from_bytes(record).map_err(|err| {
        error!("asmcpt: Failed to decode secret key: {err}");
        ExitCode::from(1)
    });
    record.zeroize();
    key
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.quiet, args.debug);

    debug!("Start of main");

    let message = match fs::read(&args.input) {
        Ok(message) => message,
        Err(err) => {
            error!("asmcpt: Failed to read file: {err}");
            return ExitCode::from(2);
        }
    };
    if message.is_empty() {
        error!("asmcpt: Inputted file has no data");
        return ExitCode::from(1);
    }

    // encryption is the default mode
    let encrypt = args.encrypt || !args.decrypt;

    let result = if encrypt {
        let pkey = match pkey_get(&args) {
            Ok(key) => key,
            Err(code) => return code,
        };
        pkey.try_seal(&message)
    } else {
        let skey = match skey_get(&args) {
            Ok(key) => key,
            Err(code) => return code,
        };
        skey.try_open(&message)
    };

    let result = match result {
        Ok(result) => result,
        Err(err) => {
            error!("asmcpt: {err}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = fs::write(&args.output, result) {
        error!("asmcpt: Failed to write file: {err}");
        return ExitCode::from(2);
    }

    debug!("End of main");
    ExitCode::SUCCESS
}
