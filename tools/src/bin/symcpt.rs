//! symcpt - symmetric cryptography utility
//!
//! Encrypts or decrypts a file under a password. The password is hashed
//! once with SHA-256; the hex digest tags the payload and its leading
//! characters key the chosen AES variant.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use filecpt::aes::KeySize;
use filecpt::sym::{sym_decrypt, sym_encrypt};
use zeroize::Zeroize;

#[derive(Parser)]
#[command(name = "symcpt", about = "symcpt - symmetric cryptography utility")]
struct Args {
    /// Input file
    input: PathBuf,

    /// Output file
    output: PathBuf,

    /// AES cipher
    #[arg(short, long, default_value = "aes256")]
    cipher: String,

    /// Encryption password
    #[arg(short, long)]
    password: Option<String>,

    /// Encrypt file (the default)
    #[arg(short, long, conflicts_with = "decrypt")]
    encrypt: bool,

    /// Decrypt file
    #[arg(short = 'd', long)]
    decrypt: bool,
}

fn key_size_get(cipher: &str) -> Option<KeySize> {
    match cipher {
        "aes256" => Some(KeySize::Aes256),
        "aes192" => Some(KeySize::Aes192),
        "aes128" => Some(KeySize::Aes128),
        _ => None,
    }
}

/// Takes the password from the command line, or prompts for it without
/// echoing.
fn password_get(args: &Args) -> Result<String, ExitCode> {
    if let Some(password) = &args.password {
        return Ok(password.clone());
    }
    rpassword::prompt_password("Password: ").map_err(|err| {
        eprintln!("symcpt: Failed to read password: {err}");
        ExitCode::from(2)
    })
}

fn main() -> ExitCode {
    let args = Args::parse();

    let message = match fs::read(&args.input) {
        Ok(message) => message,
        Err(err) => {
            eprintln!("symcpt: Failed to read file: {err}");
            return ExitCode::from(2);
        }
    };
    if message.is_empty() {
        eprintln!("symcpt: Inputted file has no data");
        return ExitCode::from(1);
    }

    let Some(key_size) = key_size_get(&args.cipher) else {
        eprintln!("symcpt: Cipher not supported");
        return ExitCode::from(3);
    };

    let mut password = match password_get(&args) {
        Ok(password) => password,
        Err(code) => return code,
    };

    // encryption is the default mode
    let encrypt = args.encrypt || !args.decrypt;

    let result = if encrypt {
        sym_encrypt(&message, password.as_bytes(), key_size)
    } else {
        sym_decrypt(&message, password.as_bytes(), key_size)
    };
    password.zeroize();

    let result = match result {
        Ok(result) => result,
        Err(err) => {
            eprintln!("symcpt: {err}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = fs::write(&args.output, result) {
        eprintln!("symcpt: Failed to write file: {err}");
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}
