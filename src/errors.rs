//! Library-wide error and result types.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// All failures the cryptographic core can report.
///
/// Every fallible operation surfaces its error to the caller; nothing is
/// swallowed internally. The CLI collaborators translate these into
/// user-visible messages and exit codes.
#[derive(Debug, Error)]
pub enum Error {
    /// Null-equivalent or obviously wrong input, e.g. a zero length where a
    /// positive length is required.
    #[error("invalid arguments")]
    InvalidArguments,

    /// An AES key outside {16, 24, 32} bytes, or an encoded RSA key record
    /// whose length or internal size fields do not match the parameter set.
    #[error("invalid key length")]
    InvalidKeyLength,

    /// An AES input that is not a positive multiple of the block size, or an
    /// RSA input longer than the modulus admits.
    #[error("invalid ciphertext length")]
    InvalidCiphertextLength,

    /// A byte outside the Base64 alphabet (and distinct from `=`).
    #[error("invalid base64 symbol 0x{0:02x}")]
    InvalidSymbol(u8),

    /// Key generation went through its full retry budget without finding a
    /// valid `(p, q, d)` triple.
    #[error("key generation exhausted its retry budget")]
    KeyGenExhausted,

    /// A hybrid container below the minimum size of
    /// `1 + ENCRYPT_SIZE + 16` bytes.
    #[error("container is too small")]
    ContainerTooSmall,

    /// The symmetric password tag did not match the supplied password.
    #[error("bad password")]
    BadPassword,

    /// The injected random number generator failed to produce bytes.
    #[error("random number generator failure")]
    RandomSource,

    /// An underlying I/O operation failed.
    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

/// If the condition is not met, return the given error. Borrowed from the
/// `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate
