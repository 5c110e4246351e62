//! Password-keyed symmetric framing.
//!
//! The password is hashed once with SHA-256; the 64-character hex form is
//! prepended to the plaintext as a verification tag, and its leading
//! characters key the cipher. Keying AES with hex ASCII rather than the raw
//! digest halves the effective entropy but is what existing ciphertexts
//! were produced with, so it is reproduced here. The tag authenticates the
//! password only, not the plaintext.

use crate::aes::{self, KeySize};
use crate::errors::{ensure, Error, Result};
use crate::sha256::sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

// The tag is the full hex digest.
const TAG_LEN: usize = 64;

/// Encrypts a message under a password.
///
/// The payload is `sha256(password) ‖ message`, encrypted with the chosen
/// AES key size using the first 16/24/32 hex characters of the digest as
/// the key.
///
/// # Errors
/// `InvalidArguments` when the message or the password is empty.
pub fn sym_encrypt(message: &[u8], password: &[u8], key_size: KeySize) -> Result<Vec<u8>> {
    ensure!(!message.is_empty() && !password.is_empty(), Error::InvalidArguments);

    // 1. Hash the password; the digest doubles as tag and key material
    let mut hash = sha256(password);

    // 2. Concatenate the tag and the message
    let mut payload = Vec::with_capacity(TAG_LEN + message.len());
    payload.extend_from_slice(&hash);
    payload.extend_from_slice(message);

    // 3. Encrypt the payload with the digest-prefix key
    let result = aes::aes_encrypt(&payload, &hash[..key_size.key_len()], key_size);

    payload.zeroize();
    hash.zeroize();
    result
}

/// Decrypts a message produced by [`sym_encrypt`].
///
/// The tag comparison is constant-time. A plaintext whose final bytes were
/// zero comes back without them (see [`aes::aes_decrypt`]).
///
/// # Errors
/// `BadPassword` when the recovered tag does not match the password's
/// digest, plus any error of the AES layer.
pub fn sym_decrypt(message: &[u8], password: &[u8], key_size: KeySize) -> Result<Vec<u8>> {
    ensure!(!password.is_empty(), Error::InvalidArguments);

    // 1. Hash the password
    let mut hash = sha256(password);

    // 2. Decrypt to recover the tagged payload
    let mut payload = match aes::aes_decrypt(message, &hash[..key_size.key_len()], key_size) {
        Ok(payload) => payload,
        Err(err) => {
            hash.zeroize();
            return Err(err);
        }
    };

    // 3. Compare the recovered tag against the password digest
    let tag_ok = payload.len() >= TAG_LEN && bool::from(payload[..TAG_LEN].ct_eq(&hash));
    if !tag_ok {
        payload.zeroize();
        hash.zeroize();
        return Err(Error::BadPassword);
    }

    // 4. The plaintext follows the tag
    let result = payload[TAG_LEN..].to_vec();
    payload.zeroize();
    hash.zeroize();
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_sizes() {
        let message = b"the cat sat on the mat";
        for key_size in [KeySize::Aes128, KeySize::Aes192, KeySize::Aes256] {
            let ct = sym_encrypt(message, b"hunter2", key_size).unwrap();
            // tag (64) + message, padded to the block size
            assert_eq!(ct.len(), aes::padded_len(64 + message.len()));
            let pt = sym_decrypt(&ct, b"hunter2", key_size).unwrap();
            assert_eq!(pt, message);
        }
    }

    #[test]
    fn test_wrong_password() {
        let ct = sym_encrypt(b"secret data", b"correct horse", KeySize::Aes256).unwrap();
        assert!(matches!(
            sym_decrypt(&ct, b"battery staple", KeySize::Aes256),
            Err(Error::BadPassword)
        ));
    }

    #[test]
    fn test_wrong_key_size_is_a_bad_password() {
        let ct = sym_encrypt(b"secret data", b"hunter2", KeySize::Aes256).unwrap();
        assert!(matches!(
            sym_decrypt(&ct, b"hunter2", KeySize::Aes128),
            Err(Error::BadPassword)
        ));
    }

    #[test]
    fn test_short_ciphertext() {
        // a single block cannot hold the 64-byte tag
        let ct = vec![0u8; 16];
        assert!(matches!(
            sym_decrypt(&ct, b"hunter2", KeySize::Aes256),
            Err(Error::BadPassword)
        ));
    }

    #[test]
    fn test_empty_arguments() {
        assert!(matches!(
            sym_encrypt(b"", b"pw", KeySize::Aes128),
            Err(Error::InvalidArguments)
        ));
        assert!(matches!(
            sym_encrypt(b"data", b"", KeySize::Aes128),
            Err(Error::InvalidArguments)
        ));
    }
}
