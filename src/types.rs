//! Key types shared by the parameter-set modules.

use num_bigint::BigUint;

/// RSA public key: the modulus `n` and the public exponent `e`.
///
/// The const parameter pins the serialized record length, so keys from
/// different parameter sets are distinct types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<const PK_LEN: usize> {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

/// RSA secret key: `(n, e, d, p, q)` with `n = p·q` and
/// `e·d ≡ 1 (mod (p−1)(q−1))`.
///
/// `Debug` is deliberately not implemented; the private components must not
/// end up in logs by accident.
#[derive(Clone)]
pub struct SecretKey<const SK_LEN: usize> {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
    pub(crate) d: BigUint,
    pub(crate) p: BigUint,
    pub(crate) q: BigUint,
}
