//! The hybrid container: RSA key transport around an AES-256 body.
//!
//! Layout: `L (1 byte) ‖ wrapped_key (L bytes) ‖ ciphertext`. `L` is the
//! significant length of the RSA-encrypted payload key, which is why the
//! parameter-set macro refuses moduli wider than 255 ciphertext bytes.

use crate::aes::{self, KeySize};
use crate::errors::{ensure, Error, Result};
use crate::rsa;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Width of the AES-256 payload key.
pub(crate) const PAYLOAD_KEY_LEN: usize = 32;

/// Fresh payload key; wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
struct PayloadKey([u8; PAYLOAD_KEY_LEN]);

/// Seals a message for the holder of the matching secret key.
///
/// Draws a fresh 32-byte AES-256 key from `rng`, wraps it with textbook RSA
/// under `(n, e)`, encrypts the message under the key, and frames the three
/// parts. The step order is fixed: key, wrap, body, frame.
///
/// # Errors
/// `InvalidArguments` on an empty message, `RandomSource` when the generator
/// fails, plus any error of the RSA or AES layers.
pub(crate) fn seal(
    rng: &mut impl CryptoRngCore, message: &[u8], n: &BigUint, e: &BigUint, encrypt_size: usize,
    message_size: usize,
) -> Result<Vec<u8>> {
    ensure!(!message.is_empty(), Error::InvalidArguments);

    // 1. Generate the AES payload key
    let mut key = PayloadKey([0u8; PAYLOAD_KEY_LEN]);
    rng.try_fill_bytes(&mut key.0).map_err(|_| Error::RandomSource)?;

    // 2. Wrap the payload key using RSA
    let wrapped = rsa::encrypt(&key.0, n, e, message_size)?;
    debug_assert!(wrapped.len() <= encrypt_size);

    // 3. Encrypt the message using the payload key
    let body = aes::aes_encrypt(message, &key.0, KeySize::Aes256)?;

    // 4. Frame: length, wrapped key, body
    let mut result = Vec::with_capacity(1 + wrapped.len() + body.len());
    result.push(wrapped.len() as u8);
    result.extend_from_slice(&wrapped);
    result.extend_from_slice(&body);
    Ok(result)
}

/// Opens a sealed container with the secret exponent.
///
/// The unwrapped payload key comes back at its significant length; the
/// big-endian integer round trip drops leading zero bytes, so the key is
/// zero-extended back to 32 bytes on the left before the body is decrypted.
///
/// # Errors
/// `ContainerTooSmall` below the minimum of `1 + encrypt_size + 16` bytes or
/// when the length prefix overruns the container, plus any error of the RSA
/// or AES layers.
pub(crate) fn open(
    container: &[u8], n: &BigUint, d: &BigUint, encrypt_size: usize,
) -> Result<Vec<u8>> {
    ensure!(
        container.len() >= 1 + encrypt_size + aes::BLOCK_SIZE,
        Error::ContainerTooSmall
    );

    // 1. The wrapped-key length
    let wrapped_len = container[0] as usize;
    ensure!(
        wrapped_len > 0 && 1 + wrapped_len + aes::BLOCK_SIZE <= container.len(),
        Error::ContainerTooSmall
    );

    // 2. Unwrap the payload key
    let mut unwrapped = rsa::decrypt(&container[1..1 + wrapped_len], n, d, encrypt_size)?;
    ensure!(unwrapped.len() <= PAYLOAD_KEY_LEN, Error::InvalidKeyLength);

    let mut key = PayloadKey([0u8; PAYLOAD_KEY_LEN]);
    key.0[PAYLOAD_KEY_LEN - unwrapped.len()..].copy_from_slice(&unwrapped);
    unwrapped.zeroize();

    // 3. Decrypt the body
    aes::aes_decrypt(&container[1 + wrapped_len..], &key.0, KeySize::Aes256)
}
