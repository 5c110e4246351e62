//! RSA key generation and the textbook encryption primitive.
//!
//! Key generation draws all randomness from the caller-supplied CSPRNG. The
//! primitive applies no padding scheme: a message is interpreted as a
//! big-endian integer, raised to the exponent, and exported at its
//! significant length. This is deliberate, to stay wire-compatible with the
//! container formats; it is not semantically secure on its own.

use crate::bigint;
use crate::errors::{ensure, Error, Result};
use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// The fixed public exponent.
pub(crate) const PUBLIC_EXPONENT: u32 = 3;

// Attempts before key generation reports exhaustion.
const KEY_GEN_ATTEMPTS: usize = 100;

/// Raw key material produced by [`generate_keys`].
pub(crate) struct KeyComponents {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
    pub(crate) d: BigUint,
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
}

/// Draws a prime of roughly `8 * buffer_size` bits.
///
/// The buffer's two top bits are forced so that the product of two such
/// primes fills the modulus width, and the bottom bit is forced so the seed
/// is odd. The next prime at or above the seed is then nudged until it is
/// not congruent to 1 modulo `e`.
fn random_prime(
    rng: &mut impl CryptoRngCore, buffer_size: usize, e: &BigUint,
) -> Result<BigUint> {
    let mut buffer = vec![0u8; buffer_size];
    rng.try_fill_bytes(&mut buffer).map_err(|_| Error::RandomSource)?;

    buffer[0] |= 0xc0;
    buffer[buffer_size - 1] |= 0x01;

    let seed = bigint::import_be(&buffer);
    buffer.zeroize();

    let mut prime = bigint::next_prime(&seed);
    while (&prime % e).is_one() {
        prime = bigint::next_prime(&prime);
    }
    Ok(prime)
}

/// Generates `(p, q, n, e, d)` for a modulus of `modulus_bits`.
///
/// Fixes `e = 3`, then retries up to 100 times: draw `p` and `q` (rejecting
/// `q == p`), form `n = p·q` and `φ = (p−1)(q−1)`, and stop at the first
/// attempt where `e` has an inverse modulo `φ`. An attempt whose prime
/// search overran its serialized field width is also rejected, so every
/// returned key fits its fixed-layout record.
///
/// # Errors
/// `RandomSource` when the generator fails, `KeyGenExhausted` after 100
/// fruitless attempts.
pub(crate) fn generate_keys(
    rng: &mut impl CryptoRngCore, modulus_bits: usize,
) -> Result<KeyComponents> {
    debug_assert!(modulus_bits % 16 == 0);
    let buffer_size = modulus_bits / 16;
    let e = BigUint::from(PUBLIC_EXPONENT);

    for _attempt in 0..KEY_GEN_ATTEMPTS {
        let p = random_prime(rng, buffer_size, &e)?;
        let mut q = random_prime(rng, buffer_size, &e)?;
        while q == p {
            q = random_prime(rng, buffer_size, &e)?;
        }

        // next_prime can in principle step past the field width; such an
        // attempt cannot be serialized and is thrown away
        if p.bits() > 8 * buffer_size as u64 || q.bits() > 8 * buffer_size as u64 {
            continue;
        }

        let n = &p * &q;
        let phi = (&p - 1u32) * (&q - 1u32);

        match bigint::mod_inverse(&e, &phi) {
            Some(d) => return Ok(KeyComponents { n, e, d, p, q }),
            // the inverse only fails when e divides phi, which the prime
            // tweak is supposed to rule out
            None => debug_assert!(!bigint::gcd(&e, &phi).is_one()),
        }
    }
    Err(Error::KeyGenExhausted)
}

/// Textbook RSA encryption: `c = m^e mod n`, exported big-endian at its
/// significant length (leading zero bytes suppressed).
///
/// # Errors
/// `InvalidArguments` on an empty message, `InvalidCiphertextLength` when
/// the message exceeds `message_size` (the PKCS#1 headroom bound the wire
/// format reserves but never pads for).
pub(crate) fn encrypt(
    message: &[u8], n: &BigUint, e: &BigUint, message_size: usize,
) -> Result<Vec<u8>> {
    ensure!(!message.is_empty(), Error::InvalidArguments);
    ensure!(message.len() <= message_size, Error::InvalidCiphertextLength);

    let m = bigint::import_be(message);
    let c = bigint::modexp(&m, e, n);
    Ok(bigint::export_be(&c))
}

/// Textbook RSA decryption: `m = c^d mod n`, exported big-endian.
///
/// The export suppresses leading zero bytes, so callers that encrypted a
/// fixed-width value must re-extend the result on the left.
///
/// # Errors
/// `InvalidArguments` on an empty input, `InvalidCiphertextLength` when the
/// input exceeds `encrypt_size`.
pub(crate) fn decrypt(
    ciphertext: &[u8], n: &BigUint, d: &BigUint, encrypt_size: usize,
) -> Result<Vec<u8>> {
    ensure!(!ciphertext.is_empty(), Error::InvalidArguments);
    ensure!(ciphertext.len() <= encrypt_size, Error::InvalidCiphertextLength);

    let c = bigint::import_be(ciphertext);
    let m = bigint::modexp(&c, d, n);
    Ok(bigint::export_be(&m))
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    // Tiny textbook key: p = 11, q = 17, n = 187, phi = 160, e = 3, d = 107.
    fn tiny_key() -> (BigUint, BigUint, BigUint) {
        (BigUint::from(187u32), BigUint::from(3u32), BigUint::from(107u32))
    }

    #[test]
    fn test_primitive_round_trip_tiny() {
        let (n, e, d) = tiny_key();
        let ct = encrypt(&[0x02], &n, &e, 53).unwrap();
        assert_eq!(ct, vec![0x08]); // 2^3 = 8 < 187
        let pt = decrypt(&ct, &n, &d, 64).unwrap();
        assert_eq!(pt, vec![0x02]);
    }

    #[test]
    fn test_length_preconditions() {
        let (n, e, d) = tiny_key();
        assert!(matches!(encrypt(&[], &n, &e, 53), Err(Error::InvalidArguments)));
        assert!(matches!(
            encrypt(&[0u8; 54], &n, &e, 53),
            Err(Error::InvalidCiphertextLength)
        ));
        assert!(matches!(
            decrypt(&[0u8; 65], &n, &d, 64),
            Err(Error::InvalidCiphertextLength)
        ));
    }

    #[test]
    fn test_generate_keys_512() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        let key = generate_keys(&mut rng, 512).unwrap();

        assert_eq!(key.n, &key.p * &key.q);
        assert_ne!(key.p, key.q);
        assert_eq!(key.n.bits(), 512);

        // e * d = 1 (mod phi)
        let phi = (&key.p - 1u32) * (&key.q - 1u32);
        assert_eq!((&key.e * &key.d) % &phi, BigUint::one());

        // the tweak guarantees neither prime is 1 mod e
        assert_ne!(&key.p % &key.e, BigUint::one());
        assert_ne!(&key.q % &key.e, BigUint::one());
    }

    #[test]
    fn test_generated_key_round_trip() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
        let key = generate_keys(&mut rng, 512).unwrap();

        // a message with no leading zero byte survives the integer round trip
        let message = b"textbook rsa carries at most 53 bytes here";
        let ct = encrypt(message, &key.n, &key.e, 53).unwrap();
        let pt = decrypt(&ct, &key.n, &key.d, 64).unwrap();
        assert_eq!(pt, message);
    }
}
