//! Thin adapter over `num-bigint`.
//!
//! The RSA code only needs a small capability set: big-endian byte
//! import/export, modular exponentiation, gcd, modular inverse, and a
//! next-prime search. Everything else in the crate speaks bytes.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Reads an unsigned big-endian byte string into an integer.
pub(crate) fn import_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Writes an integer as its significant big-endian bytes.
///
/// Leading zero bytes are suppressed and zero exports as the empty string,
/// matching the export convention the serialized key records rely on.
pub(crate) fn export_be(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// `base ^ exponent mod modulus`. The modulus must be non-zero.
pub(crate) fn modexp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    debug_assert!(!modulus.is_zero());
    base.modpow(exponent, modulus)
}

/// Greatest common divisor.
pub(crate) fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Extended Euclid: returns `(g, x)` with `a·x + b·y = g`.
fn egcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = r;
        r = next_r;
        let next_s = &old_s - &quotient * &s;
        old_s = s;
        s = next_s;
    }
    (old_r, old_s)
}

/// Multiplicative inverse of `value` modulo `modulus`, or `None` when none
/// exists (the values are not coprime).
pub(crate) fn mod_inverse(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }
    let signed_value = BigInt::from(value.clone());
    let signed_modulus = BigInt::from(modulus.clone());

    let (g, x) = egcd(&signed_value, &signed_modulus);
    if !g.is_one() {
        return None;
    }
    let inverse = ((x % &signed_modulus) + &signed_modulus) % &signed_modulus;
    inverse.to_biguint()
}

// Trial-division sieve applied before the expensive witness tests.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

// Fixed Miller-Rabin witnesses: deterministic for every candidate below
// 3.3 * 10^24, and a probabilistic test beyond that, which the key
// generation procedure accepts.
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

fn miller_rabin(n: &BigUint) -> bool {
    let one = BigUint::one();
    let n_minus_1 = n - &one;
    let trailing = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> trailing;

    'witness: for &witness in &WITNESSES {
        let mut x = BigUint::from(witness).modpow(&d, n);
        if x == one || x == n_minus_1 {
            continue;
        }
        for _ in 1..trailing {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

fn is_prime(n: &BigUint) -> bool {
    for &p in &SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }
    miller_rabin(n)
}

/// The smallest prime strictly greater than `start`.
pub(crate) fn next_prime(start: &BigUint) -> BigUint {
    let two = BigUint::from(2u32);
    if *start < two {
        return two;
    }
    let mut candidate = start + 1u32;
    if candidate.is_even() {
        candidate += 1u32;
    }
    while !is_prime(&candidate) {
        candidate += 2u32;
    }
    candidate
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_export() {
        let value = import_be(&hex::decode("0100ff").unwrap());
        assert_eq!(value, BigUint::from(0x0100ffu32));
        assert_eq!(export_be(&value), hex::decode("0100ff").unwrap());

        // leading zeros vanish in the round trip
        assert_eq!(export_be(&import_be(&[0x00, 0x00, 0x7f])), vec![0x7f]);
        assert_eq!(export_be(&BigUint::zero()), Vec::<u8>::new());
        assert_eq!(import_be(&[]), BigUint::zero());
    }

    #[test]
    fn test_modexp() {
        let result = modexp(
            &BigUint::from(4u32),
            &BigUint::from(13u32),
            &BigUint::from(497u32),
        );
        assert_eq!(result, BigUint::from(445u32));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(
            gcd(&BigUint::from(12u32), &BigUint::from(18u32)),
            BigUint::from(6u32)
        );
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 107 = 321 = 2 * 160 + 1
        let d = mod_inverse(&BigUint::from(3u32), &BigUint::from(160u32)).unwrap();
        assert_eq!(d, BigUint::from(107u32));

        // no inverse when not coprime
        assert!(mod_inverse(&BigUint::from(2u32), &BigUint::from(4u32)).is_none());
        assert!(mod_inverse(&BigUint::from(3u32), &BigUint::zero()).is_none());
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(&BigUint::zero()), BigUint::from(2u32));
        assert_eq!(next_prime(&BigUint::from(2u32)), BigUint::from(3u32));
        assert_eq!(next_prime(&BigUint::from(10u32)), BigUint::from(11u32));
        assert_eq!(next_prime(&BigUint::from(13u32)), BigUint::from(17u32));
        assert_eq!(next_prime(&BigUint::from(90u32)), BigUint::from(97u32));
        // a value large enough to reach the witness tests
        assert_eq!(
            next_prime(&BigUint::from(1_000_000u32)),
            BigUint::from(1_000_003u32)
        );
    }

    #[test]
    fn test_is_prime_catches_strong_pseudoprimes() {
        // 42799 = 127 * 337 is a strong pseudoprime to base 2 with no small
        // factors; the wider witness set must reject it.
        assert!(!is_prime(&BigUint::from(42799u32)));
        assert!(is_prime(&BigUint::from(104729u32))); // the 10000th prime
    }
}
