#![deny(unsafe_code, missing_docs)]
#![deny(unused_import_braces, unreachable_pub)]
#![doc = include_str!("../README.md")]

// The three parameter sets are modules in this file with injected macro code
// that connects them to the shared machinery in rsa.rs, key_codec.rs and
// hybrid.rs. Const generics are constrained to record-length tagging; the
// remaining parameters travel as normal function arguments.


/// The `rand_core` types are re-exported so that users of filecpt do not
/// have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, Error as RngError, RngCore};

mod bigint;
mod hybrid;
mod key_codec;
mod rsa;
mod tables;
mod types;

pub mod aes;
pub mod base64;
pub mod errors;
pub mod sha256;
pub mod sym;

/// All hybrid functionality is covered by traits, so each parameter set
/// presents the same API.
pub mod traits;

pub use errors::{Error, Result};


// This common functionality is injected into each parameter-set module
macro_rules! functionality {
    () => {
        use crate::errors::Result;
        use crate::traits::{KeyGen, Open, Seal, SerDes};
        use crate::{hybrid, key_codec, rsa};
        use rand_core::CryptoRngCore;

        // A single length byte frames the wrapped key, and the payload key
        // must fit the textbook primitive.
        const _: () = assert!(ENCRYPT_SIZE <= 255);
        const _: () = assert!(MESSAGE_SIZE >= 32);


        /// Public key with records sized for this parameter set.
        pub type PublicKey = crate::types::PublicKey<PKEY_LEN>;

        /// Secret key with records sized for this parameter set.
        pub type SecretKey = crate::types::SecretKey<SKEY_LEN>;

        /// Supports the [`KeyGen`] trait, allowing for key-pair generation.
        pub struct KG();


        impl KeyGen for KG {
            type PublicKey = PublicKey;
            type SecretKey = SecretKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(PublicKey, SecretKey)> {
                let key = rsa::generate_keys(rng, MODULUS_BITS)?;
                let pkey = PublicKey { n: key.n.clone(), e: key.e.clone() };
                let skey = SecretKey { n: key.n, e: key.e, d: key.d, p: key.p, q: key.q };
                Ok((pkey, skey))
            }
        }


        impl Seal for PublicKey {
            fn try_seal_with_rng(
                &self, rng: &mut impl CryptoRngCore, message: &[u8],
            ) -> Result<Vec<u8>> {
                hybrid::seal(rng, message, &self.n, &self.e, ENCRYPT_SIZE, MESSAGE_SIZE)
            }
        }


        impl Open for SecretKey {
            fn try_open(&self, container: &[u8]) -> Result<Vec<u8>> {
                hybrid::open(container, &self.n, &self.d, ENCRYPT_SIZE)
            }
        }


        impl PublicKey {
            /// Textbook RSA on a short message: `m^e mod n`, exported at its
            /// significant length. No padding is applied; leading zero bytes
            /// of the message do not survive the integer round trip.
            /// # Errors
            /// Returns an error on an empty message or one longer than
            /// [`MESSAGE_SIZE`].
            pub fn try_encrypt_raw(&self, message: &[u8]) -> Result<Vec<u8>> {
                rsa::encrypt(message, &self.n, &self.e, MESSAGE_SIZE)
            }
        }


        impl SecretKey {
            /// Inverse of [`PublicKey::try_encrypt_raw`]: `c^d mod n`.
            /// # Errors
            /// Returns an error on an empty input or one longer than
            /// [`ENCRYPT_SIZE`].
            pub fn try_decrypt_raw(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
                rsa::decrypt(ciphertext, &self.n, &self.d, ENCRYPT_SIZE)
            }
        }


        impl SerDes for PublicKey {
            type ByteArray = [u8; PKEY_LEN];

            fn into_bytes(self) -> Self::ByteArray {
                let mut record = [0u8; PKEY_LEN];
                key_codec::encode_pkey(&self.n, &self.e, ENCRYPT_SIZE, &mut record);
                record
            }

            fn try_from_bytes(bytes: Self::ByteArray) -> Result<Self> {
                let (n, e) = key_codec::decode_pkey(&bytes, ENCRYPT_SIZE)?;
                Ok(PublicKey { n, e })
            }
        }


        impl SerDes for SecretKey {
            type ByteArray = [u8; SKEY_LEN];

            fn into_bytes(self) -> Self::ByteArray {
                let mut record = [0u8; SKEY_LEN];
                key_codec::encode_skey(
                    &self.n, &self.e, &self.d, &self.p, &self.q, ENCRYPT_SIZE, BUFFER_SIZE,
                    &mut record,
                );
                record
            }

            fn try_from_bytes(bytes: Self::ByteArray) -> Result<Self> {
                let (n, e, d, p, q) =
                    key_codec::decode_skey(&bytes, ENCRYPT_SIZE, BUFFER_SIZE)?;
                Ok(SecretKey { n, e, d, p, q })
            }
        }


    };
}


/// Functionality for the 512-bit modulus parameter set: the size the
/// original tools shipped with, kept for compatibility with their files.
/// A 512-bit modulus is factorable with commodity hardware; prefer a wider
/// set where compatibility allows.
#[cfg(feature = "rsa-512")]
pub mod rsa_512 {
    //!
    //! Typical usage flow:
    //! 1. The recipient runs `try_keygen()` and serializes the public key via
    //!    `into_bytes()` for distribution.
    //! 2. A sender restores it with `try_from_bytes(<bytes>)` and runs
    //!    `try_seal(<message>)` to produce a container.
    //! 3. The recipient runs `try_open(<container>)` to recover the message.
    //!
    //! **--> See [`crate::traits`] for the keygen, seal/open, and
    //! serialization functionality.**

    /// Modulus width in bits.
    pub const MODULUS_BITS: usize = 512;
    /// Byte width of an RSA ciphertext block.
    pub const ENCRYPT_SIZE: usize = MODULUS_BITS / 8;
    /// Byte width of each serialized prime field.
    pub const BUFFER_SIZE: usize = MODULUS_BITS / 16;
    /// Largest message the textbook primitive admits.
    pub const MESSAGE_SIZE: usize = ENCRYPT_SIZE - 11;
    /// Serialized public-key record length (in bytes).
    pub const PKEY_LEN: usize = crate::key_codec::pkey_len(ENCRYPT_SIZE);
    /// Serialized secret-key record length (in bytes).
    pub const SKEY_LEN: usize = crate::key_codec::skey_len(ENCRYPT_SIZE, BUFFER_SIZE);

    functionality!();
}


/// Functionality for the 1024-bit modulus parameter set.
#[cfg(feature = "rsa-1024")]
pub mod rsa_1024 {
    //!
    //! Typical usage flow:
    //! 1. The recipient runs `try_keygen()` and serializes the public key via
    //!    `into_bytes()` for distribution.
    //! 2. A sender restores it with `try_from_bytes(<bytes>)` and runs
    //!    `try_seal(<message>)` to produce a container.
    //! 3. The recipient runs `try_open(<container>)` to recover the message.
    //!
    //! **--> See [`crate::traits`] for the keygen, seal/open, and
    //! serialization functionality.**

    /// Modulus width in bits.
    pub const MODULUS_BITS: usize = 1024;
    /// Byte width of an RSA ciphertext block.
    pub const ENCRYPT_SIZE: usize = MODULUS_BITS / 8;
    /// Byte width of each serialized prime field.
    pub const BUFFER_SIZE: usize = MODULUS_BITS / 16;
    /// Largest message the textbook primitive admits.
    pub const MESSAGE_SIZE: usize = ENCRYPT_SIZE - 11;
    /// Serialized public-key record length (in bytes).
    pub const PKEY_LEN: usize = crate::key_codec::pkey_len(ENCRYPT_SIZE);
    /// Serialized secret-key record length (in bytes).
    pub const SKEY_LEN: usize = crate::key_codec::skey_len(ENCRYPT_SIZE, BUFFER_SIZE);

    functionality!();
}


/// Functionality for the 1536-bit modulus parameter set: the widest modulus
/// whose ciphertext length still fits the container's single length byte
/// (2048 bits would need 256).
#[cfg(feature = "rsa-1536")]
pub mod rsa_1536 {
    //!
    //! Typical usage flow:
    //! 1. The recipient runs `try_keygen()` and serializes the public key via
    //!    `into_bytes()` for distribution.
    //! 2. A sender restores it with `try_from_bytes(<bytes>)` and runs
    //!    `try_seal(<message>)` to produce a container.
    //! 3. The recipient runs `try_open(<container>)` to recover the message.
    //!
    //! **--> See [`crate::traits`] for the keygen, seal/open, and
    //! serialization functionality.**

    /// Modulus width in bits.
    pub const MODULUS_BITS: usize = 1536;
    /// Byte width of an RSA ciphertext block.
    pub const ENCRYPT_SIZE: usize = MODULUS_BITS / 8;
    /// Byte width of each serialized prime field.
    pub const BUFFER_SIZE: usize = MODULUS_BITS / 16;
    /// Largest message the textbook primitive admits.
    pub const MESSAGE_SIZE: usize = ENCRYPT_SIZE - 11;
    /// Serialized public-key record length (in bytes).
    pub const PKEY_LEN: usize = crate::key_codec::pkey_len(ENCRYPT_SIZE);
    /// Serialized secret-key record length (in bytes).
    pub const SKEY_LEN: usize = crate::key_codec::skey_len(ENCRYPT_SIZE, BUFFER_SIZE);

    functionality!();
}
